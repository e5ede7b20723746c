use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    error::InvalidInput,
    problem::{
        fleet::{DEFAULT_NUM_VEHICLES, DEFAULT_SPEED_KMH, DEFAULT_VEHICLE_CAPACITY, Fleet},
        kmh::Kmh,
        location::Location,
        stop::{DEFAULT_DEMAND, Demand, StopBuilder},
        time_window::{DEFAULT_HORIZON, DEFAULT_MAX_WAITING, Minutes, TimeWindow},
        vehicle_routing_problem::{VehicleRoutingProblem, VehicleRoutingProblemBuilder},
    },
};

/// A dispatch problem as read from JSON. The first stop is the depot.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "DispatchProblem")]
pub struct JsonDispatchProblem {
    pub stops: Vec<JsonStop>,
    #[serde(default)]
    pub fleet: JsonFleet,
    /// Longest wait allowed at a stop before its window opens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_waiting_minutes: Option<Minutes>,
    /// Travel times in seconds between every pair of stops, in stop order.
    /// Replaces the times derived from distances and speed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel_times_seconds: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Stop")]
pub struct JsonStop {
    #[serde(default)]
    pub id: Option<String>,
    pub lat: f64,
    pub lon: f64,
    /// Defaults to 0 for the depot and 1 for every other stop.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<Demand>,
    /// Minutes from the start of the day. Defaults to the depot's window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_start: Option<Minutes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_end: Option<Minutes>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "Fleet")]
pub struct JsonFleet {
    pub num_vehicles: usize,
    pub capacity_per_vehicle: Demand,
    pub speed_km_per_hour: f64,
}

impl Default for JsonFleet {
    fn default() -> Self {
        JsonFleet {
            num_vehicles: DEFAULT_NUM_VEHICLES,
            capacity_per_vehicle: DEFAULT_VEHICLE_CAPACITY,
            speed_km_per_hour: DEFAULT_SPEED_KMH,
        }
    }
}

impl JsonStop {
    fn time_window(&self, default: TimeWindow) -> TimeWindow {
        TimeWindow::new(
            self.window_start.unwrap_or(default.start),
            self.window_end.unwrap_or(default.end),
        )
    }
}

impl JsonDispatchProblem {
    pub fn build_problem(self) -> Result<VehicleRoutingProblem, InvalidInput> {
        let horizon = self
            .stops
            .first()
            .map_or(DEFAULT_HORIZON, |depot| depot.time_window(DEFAULT_HORIZON));

        let stops = self
            .stops
            .into_iter()
            .enumerate()
            .map(|(index, stop)| {
                let default_demand = if index == 0 { 0 } else { DEFAULT_DEMAND };
                let default_id = if index == 0 {
                    String::from("depot")
                } else {
                    index.to_string()
                };

                let time_window = stop.time_window(horizon);
                let mut builder = StopBuilder::default();
                builder
                    .set_external_id(stop.id.unwrap_or(default_id))
                    .set_location(Location::from_lat_lon(stop.lat, stop.lon))
                    .set_demand(stop.demand.unwrap_or(default_demand))
                    .set_time_window(time_window);
                builder.build()
            })
            .collect();

        let fleet = Fleet::homogeneous(
            self.fleet.num_vehicles,
            self.fleet.capacity_per_vehicle,
            Kmh::new(self.fleet.speed_km_per_hour),
        );

        let mut builder = VehicleRoutingProblemBuilder::default();
        builder
            .set_stops(stops)
            .set_fleet(fleet)
            .set_max_waiting(self.max_waiting_minutes.unwrap_or(DEFAULT_MAX_WAITING));

        if let Some(travel_times_seconds) = self.travel_times_seconds {
            builder.set_travel_times_seconds(travel_times_seconds);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use crate::problem::stop::{DEPOT, StopIdx};

    use super::*;

    #[test]
    fn test_build_problem_with_defaults() {
        let json = r#"{
            "stops": [
                { "id": "warehouse", "lat": 12.9716, "lon": 77.5946, "window_start": 0, "window_end": 480 },
                { "lat": 12.9800, "lon": 77.6000, "window_end": 200 },
                { "id": "b", "lat": 12.9650, "lon": 77.6100, "demand": 2 }
            ]
        }"#;

        let problem = serde_json::from_str::<JsonDispatchProblem>(json)
            .unwrap()
            .build_problem()
            .unwrap();

        assert_eq!(problem.num_stops(), 3);
        assert_eq!(problem.vehicles().len(), 3);
        assert_eq!(problem.fleet().max_capacity(), 3);
        assert_eq!(problem.max_waiting(), 30);
        assert_eq!(problem.horizon(), TimeWindow::new(0, 480));

        assert_eq!(problem.stop(DEPOT).external_id(), "warehouse");
        assert_eq!(problem.demand(DEPOT), 0);

        let first = StopIdx::new(1);
        assert_eq!(problem.stop(first).external_id(), "1");
        assert_eq!(problem.demand(first), 1);
        assert_eq!(problem.stop(first).time_window(), TimeWindow::new(0, 200));

        let second = StopIdx::new(2);
        assert_eq!(problem.demand(second), 2);
        assert_eq!(problem.stop(second).time_window(), TimeWindow::new(0, 480));
    }

    #[test]
    fn test_build_problem_with_travel_times() {
        let json = r#"{
            "stops": [
                { "lat": 12.9716, "lon": 77.5946 },
                { "lat": 12.9800, "lon": 77.6000 }
            ],
            "fleet": { "num_vehicles": 1, "capacity_per_vehicle": 5, "speed_km_per_hour": 30.0 },
            "max_waiting_minutes": 10,
            "travel_times_seconds": [[0, 359], [420, 0]]
        }"#;

        let problem = serde_json::from_str::<JsonDispatchProblem>(json)
            .unwrap()
            .build_problem()
            .unwrap();

        assert_eq!(problem.max_waiting(), 10);
        assert_eq!(problem.travel_time(DEPOT, StopIdx::new(1)), 5);
        assert_eq!(problem.travel_time(StopIdx::new(1), DEPOT), 7);
        assert_eq!(problem.travel_distance(DEPOT, StopIdx::new(1)), 1102);
    }

    #[test]
    fn test_build_problem_rejects_invalid_input() {
        let empty = JsonDispatchProblem {
            stops: vec![],
            fleet: JsonFleet::default(),
            max_waiting_minutes: None,
            travel_times_seconds: None,
        };
        assert_eq!(empty.build_problem().unwrap_err(), InvalidInput::NoStops);

        let json = r#"{
            "stops": [
                { "lat": 12.9716, "lon": 77.5946 },
                { "lat": 12.9800, "lon": 77.6000, "window_start": 300, "window_end": 100 }
            ]
        }"#;
        let error = serde_json::from_str::<JsonDispatchProblem>(json)
            .unwrap()
            .build_problem()
            .unwrap_err();
        assert_eq!(
            error,
            InvalidInput::InvalidTimeWindow {
                stop: StopIdx::new(1),
                start: 300,
                end: 100
            }
        );
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let json = r#"{ "stops": [{ "lat": 1.0, "lon": 2.0, "weight": 3 }] }"#;
        assert!(serde_json::from_str::<JsonDispatchProblem>(json).is_err());
    }
}
