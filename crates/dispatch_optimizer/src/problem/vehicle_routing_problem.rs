use tracing::info;

use crate::{error::InvalidInput, utils::enumerate_idx::EnumerateIdx};

use super::{
    fleet::Fleet,
    stop::{DEPOT, Demand, Stop, StopIdx},
    time_window::{DEFAULT_MAX_WAITING, Minutes, TimeWindow},
    travel_matrices::{Distance, TravelMatrices},
    vehicle::{Vehicle, VehicleIdx},
};

/// A validated CVRPTW instance. Stop 0 is the depot and its time window is the
/// planning horizon.
#[derive(Debug)]
pub struct VehicleRoutingProblem {
    stops: Vec<Stop>,
    fleet: Fleet,
    travel_matrices: TravelMatrices,
    max_waiting: Minutes,

    /// Stop windows clipped to the horizon, `None` when they do not overlap it.
    precomputed_service_windows: Vec<Option<TimeWindow>>,
}

impl VehicleRoutingProblem {
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, stop_id: StopIdx) -> &Stop {
        &self.stops[stop_id]
    }

    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    /// Every stop except the depot.
    pub fn customers(&self) -> impl Iterator<Item = StopIdx> + use<> {
        (1..self.stops.len()).map(StopIdx::new)
    }

    pub fn horizon(&self) -> TimeWindow {
        self.stops[DEPOT].time_window()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        self.fleet.vehicles()
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        self.fleet.vehicle(vehicle_id)
    }

    pub fn demand(&self, stop_id: StopIdx) -> Demand {
        self.stops[stop_id].demand()
    }

    /// The window in which the stop can be served, already clipped to the horizon.
    #[inline(always)]
    pub fn service_window(&self, stop_id: StopIdx) -> Option<TimeWindow> {
        self.precomputed_service_windows[stop_id.get()]
    }

    pub fn max_waiting(&self) -> Minutes {
        self.max_waiting
    }

    #[inline(always)]
    pub fn travel_distance(&self, from: StopIdx, to: StopIdx) -> Distance {
        self.travel_matrices.distance(from, to)
    }

    #[inline(always)]
    pub fn travel_time(&self, from: StopIdx, to: StopIdx) -> Minutes {
        self.travel_matrices.time(from, to)
    }

    pub fn travel_matrices(&self) -> &TravelMatrices {
        &self.travel_matrices
    }

    /// Distances are always symmetric, travel times only without an override
    /// or with a symmetric one.
    pub fn is_symmetric(&self) -> bool {
        self.travel_matrices.times().is_symmetric()
    }
}

#[derive(Default)]
pub struct VehicleRoutingProblemBuilder {
    stops: Option<Vec<Stop>>,
    fleet: Option<Fleet>,
    max_waiting: Option<Minutes>,
    travel_times_seconds: Option<Vec<Vec<f64>>>,
}

impl VehicleRoutingProblemBuilder {
    pub fn set_stops(&mut self, stops: Vec<Stop>) -> &mut VehicleRoutingProblemBuilder {
        self.stops = Some(stops);
        self
    }

    pub fn add_stop(&mut self, stop: Stop) -> &mut VehicleRoutingProblemBuilder {
        self.stops.get_or_insert_with(Vec::new).push(stop);
        self
    }

    pub fn set_fleet(&mut self, fleet: Fleet) -> &mut VehicleRoutingProblemBuilder {
        self.fleet = Some(fleet);
        self
    }

    pub fn set_max_waiting(&mut self, max_waiting: Minutes) -> &mut VehicleRoutingProblemBuilder {
        self.max_waiting = Some(max_waiting);
        self
    }

    /// Overrides the haversine-derived travel times, see
    /// [`TravelMatrices::with_travel_times_seconds`].
    pub fn set_travel_times_seconds(
        &mut self,
        travel_times_seconds: Vec<Vec<f64>>,
    ) -> &mut VehicleRoutingProblemBuilder {
        self.travel_times_seconds = Some(travel_times_seconds);
        self
    }

    pub fn build(self) -> Result<VehicleRoutingProblem, InvalidInput> {
        let stops = self.stops.unwrap_or_default();
        let fleet = self.fleet.unwrap_or_default();

        if stops.is_empty() {
            return Err(InvalidInput::NoStops);
        }

        if fleet.vehicles().is_empty() {
            return Err(InvalidInput::NoVehicles);
        }

        if !fleet.speed().is_positive() {
            return Err(InvalidInput::NonPositiveSpeed);
        }

        for (vehicle_id, vehicle) in fleet.vehicles().iter().enumerate_idx() {
            if vehicle.capacity() == 0 {
                return Err(InvalidInput::NonPositiveCapacity {
                    vehicle: vehicle_id,
                });
            }
        }

        for (stop_id, stop) in stops.iter().enumerate_idx() {
            if !stop.location().is_finite() {
                return Err(InvalidInput::NonFiniteCoordinates { stop: stop_id });
            }

            if !stop.location().is_in_range() {
                return Err(InvalidInput::CoordinatesOutOfRange { stop: stop_id });
            }

            let time_window = stop.time_window();
            if !time_window.is_valid() {
                return Err(InvalidInput::InvalidTimeWindow {
                    stop: stop_id,
                    start: time_window.start,
                    end: time_window.end,
                });
            }
        }

        let depot_demand = stops[DEPOT].demand();
        if depot_demand != 0 {
            return Err(InvalidInput::DepotDemand {
                demand: depot_demand,
            });
        }

        let locations = stops
            .iter()
            .map(|stop| *stop.location())
            .collect::<Vec<_>>();
        let mut travel_matrices = TravelMatrices::from_haversine(&locations, fleet.speed());
        if let Some(seconds) = &self.travel_times_seconds {
            travel_matrices = travel_matrices.with_travel_times_seconds(seconds)?;
        }

        let horizon = stops[DEPOT].time_window();
        let precomputed_service_windows = stops
            .iter()
            .map(|stop| stop.time_window().intersect(&horizon))
            .collect();

        let problem = VehicleRoutingProblem {
            stops,
            fleet,
            max_waiting: self.max_waiting.unwrap_or(DEFAULT_MAX_WAITING),
            travel_matrices,
            precomputed_service_windows,
        };

        info!(
            stops = problem.num_stops(),
            vehicles = problem.vehicles().len(),
            symmetric = problem.is_symmetric(),
            "Built vehicle routing problem"
        );

        Ok(problem)
    }
}
