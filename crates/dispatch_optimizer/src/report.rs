use serde::Serialize;

use crate::{
    problem::{
        stop::{Demand, StopIdx},
        time_window::TimeWindow,
        travel_matrices::Distance,
        vehicle::VehicleIdx,
    },
    solver::{
        solution::{unassigned::UnassignedReason, working_solution::WorkingSolution},
        statistics::SearchStatistics,
    },
};

/// Read-only result of a solve.
///
/// Only ordered collections are used so that identical solves serialize to
/// identical bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolutionReport {
    pub routes: Vec<VehicleRouteReport>,
    /// Meters.
    pub total_distance: Distance,
    pub unassigned: Vec<UnassignedStopReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchStatistics>,
}

/// The route of one vehicle. Empty routes are kept, as a depot round trip of
/// zero distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleRouteReport {
    pub vehicle: VehicleIdx,
    pub capacity: Demand,
    pub load: Demand,
    pub distance: Distance,
    /// Depot, stops in visiting order, depot.
    pub visits: Vec<StopVisit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopVisit {
    pub stop: StopIdx,
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    /// Load on board after serving this stop.
    pub load: Demand,
    /// Bounds of the arrival time, in minutes.
    pub arrival: TimeWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnassignedStopReport {
    pub stop: StopIdx,
    pub id: String,
    pub reason: UnassignedReason,
}

impl SolutionReport {
    pub fn summarize(solution: &WorkingSolution) -> Self {
        let problem = solution.problem();

        let routes = solution
            .routes()
            .iter()
            .map(|route| {
                let visits = route
                    .cumulative_states(problem)
                    .into_iter()
                    .map(|state| {
                        let stop = problem.stop(state.stop);
                        StopVisit {
                            stop: state.stop,
                            id: stop.external_id().to_owned(),
                            lat: stop.location().lat(),
                            lon: stop.location().lon(),
                            load: state.load,
                            arrival: state.arrival,
                        }
                    })
                    .collect();

                VehicleRouteReport {
                    vehicle: route.vehicle_id(),
                    capacity: route.vehicle(problem).capacity(),
                    load: route.load(),
                    distance: route.distance(),
                    visits,
                }
            })
            .collect();

        let unassigned = solution
            .unassigned_with_reasons()
            .into_iter()
            .map(|unassigned| UnassignedStopReport {
                stop: unassigned.stop,
                id: problem.stop(unassigned.stop).external_id().to_owned(),
                reason: unassigned.reason,
            })
            .collect();

        SolutionReport {
            routes,
            total_distance: solution.total_distance(),
            unassigned,
            search: None,
        }
    }

    pub fn with_search_statistics(mut self, statistics: SearchStatistics) -> Self {
        self.search = Some(statistics);
        self
    }

    pub fn non_empty_routes(&self) -> impl Iterator<Item = &VehicleRouteReport> {
        self.routes.iter().filter(|route| route.visits.len() > 2)
    }

    pub fn num_assigned_stops(&self) -> usize {
        self.routes
            .iter()
            .map(|route| route.visits.len().saturating_sub(2))
            .sum()
    }
}
