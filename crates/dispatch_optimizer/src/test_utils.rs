use std::sync::Arc;

use crate::{
    problem::{
        fleet::Fleet,
        kmh::Kmh,
        location::Location,
        stop::{Demand, Stop, StopBuilder, StopIdx},
        time_window::{DEFAULT_HORIZON, TimeWindow},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
    solver::solution::working_solution::WorkingSolution,
};

const SAMPLE_POINTS: [(f64, f64); 7] = [
    (12.9716, 77.5946),
    (12.9800, 77.6000),
    (12.9650, 77.6100),
    (12.9900, 77.5800),
    (12.9550, 77.5850),
    (12.9750, 77.6200),
    (12.9600, 77.5700),
];

const SAMPLE_WINDOWS: [(u64, u64); 7] = [
    (0, 600),
    (0, 200),
    (50, 300),
    (100, 400),
    (200, 500),
    (150, 450),
    (250, 600),
];

pub fn sample_locations() -> Vec<Location> {
    SAMPLE_POINTS
        .iter()
        .map(|&(lat, lon)| Location::from_lat_lon(lat, lon))
        .collect()
}

pub fn create_stop(index: usize, location: Location, demand: Demand, window: TimeWindow) -> Stop {
    let mut builder = StopBuilder::default();
    builder
        .set_external_id(if index == 0 {
            String::from("depot")
        } else {
            format!("stop-{index}")
        })
        .set_location(location)
        .set_demand(demand)
        .set_time_window(window);
    builder.build()
}

fn create_problem(stops: Vec<Stop>, num_vehicles: usize, capacity: Demand) -> VehicleRoutingProblem {
    let mut builder = VehicleRoutingProblemBuilder::default();
    builder
        .set_stops(stops)
        .set_fleet(Fleet::homogeneous(num_vehicles, capacity, Kmh::new(40.0)))
        .set_max_waiting(30);
    builder.build().unwrap()
}

fn sample_stops(windows: impl Fn(usize) -> TimeWindow) -> Vec<Stop> {
    sample_locations()
        .into_iter()
        .enumerate()
        .map(|(index, location)| {
            let demand = if index == 0 { 0 } else { 1 };
            create_stop(index, location, demand, windows(index))
        })
        .collect()
}

/// Depot and six stops around it, three vehicles of capacity 3, 40 km/h.
pub fn sample_problem() -> VehicleRoutingProblem {
    sample_problem_with_fleet(3, 3)
}

pub fn sample_problem_with_fleet(num_vehicles: usize, capacity: Demand) -> VehicleRoutingProblem {
    let stops = sample_stops(|index| {
        let (start, end) = SAMPLE_WINDOWS[index];
        TimeWindow::new(start, end)
    });
    create_problem(stops, num_vehicles, capacity)
}

pub fn sample_problem_without_time_windows() -> VehicleRoutingProblem {
    create_problem(sample_stops(|_| DEFAULT_HORIZON), 3, 3)
}

/// No time windows and room for every stop in a single vehicle.
pub fn relaxed_problem() -> VehicleRoutingProblem {
    create_problem(sample_stops(|_| DEFAULT_HORIZON), 3, 6)
}

/// Stop 1 is heavier than any vehicle, stop 2 closes before it can be
/// reached and stop 3 is servable.
pub fn problem_with_unreachable_stops() -> VehicleRoutingProblem {
    let locations = sample_locations();
    let stops = vec![
        create_stop(0, locations[0], 0, DEFAULT_HORIZON),
        create_stop(1, locations[1], 5, DEFAULT_HORIZON),
        create_stop(2, locations[2], 1, TimeWindow::new(0, 1)),
        create_stop(3, locations[3], 1, TimeWindow::new(100, 400)),
    ];
    create_problem(stops, 3, 3)
}

/// `rows * cols` stops on a grid spaced by 0.01 degrees, the depot in the
/// first corner. Windows are wide and staggered.
pub fn grid_problem(
    rows: usize,
    cols: usize,
    num_vehicles: usize,
    capacity: Demand,
) -> VehicleRoutingProblem {
    let stops = (0..rows * cols)
        .map(|index| {
            let location = Location::from_lat_lon(
                12.95 + (index / cols) as f64 * 0.01,
                77.55 + (index % cols) as f64 * 0.01,
            );

            if index == 0 {
                create_stop(index, location, 0, DEFAULT_HORIZON)
            } else {
                let start = (index % 3) as u64 * 60;
                create_stop(index, location, 1, TimeWindow::new(start, start + 300))
            }
        })
        .collect();

    create_problem(stops, num_vehicles, capacity)
}

pub fn stops(ids: &[usize]) -> Vec<StopIdx> {
    ids.iter().copied().map(StopIdx::new).collect()
}

pub fn sequences(routes: &[&[usize]]) -> Vec<Vec<StopIdx>> {
    routes.iter().map(|route| stops(route)).collect()
}

pub fn solution_from_routes(
    problem: VehicleRoutingProblem,
    routes: &[&[usize]],
) -> WorkingSolution {
    WorkingSolution::from_routes(Arc::new(problem), sequences(routes)).unwrap()
}
