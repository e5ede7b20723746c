use thiserror::Error;

use crate::{
    problem::{stop::StopIdx, time_window::Minutes, vehicle::VehicleIdx},
    solver::{constraints::infeasibility::Infeasibility, solution::route_id::RouteIdx},
};

/// Problems detected while building a [`crate::problem::vehicle_routing_problem::VehicleRoutingProblem`].
///
/// These are fatal: no solve is attempted on an invalid problem.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("at least one stop is required, the first stop is the depot")]
    NoStops,

    #[error("stop {stop} has non-finite coordinates")]
    NonFiniteCoordinates { stop: StopIdx },

    #[error("stop {stop} has coordinates outside of the valid latitude/longitude range")]
    CoordinatesOutOfRange { stop: StopIdx },

    #[error("the fleet must contain at least one vehicle")]
    NoVehicles,

    #[error("vehicle {vehicle} has a non-positive capacity")]
    NonPositiveCapacity { vehicle: VehicleIdx },

    #[error("speed must be a positive, finite number of km/h")]
    NonPositiveSpeed,

    #[error("stop {stop} has an invalid time window [{start}, {end}]")]
    InvalidTimeWindow {
        stop: StopIdx,
        start: Minutes,
        end: Minutes,
    },

    #[error("the depot cannot have a demand, got {demand}")]
    DepotDemand { demand: u64 },

    #[error("travel time matrix must be {expected}x{expected}, got {rows} rows")]
    TravelTimeShape { expected: usize, rows: usize },

    #[error("travel time from {from} to {to} must be a non-negative finite number of seconds")]
    InvalidTravelTime { from: StopIdx, to: StopIdx },
}

/// Stop sequences that cannot form a solution of a given problem.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InvalidSolution {
    #[error("{routes} routes given for a fleet of {vehicles} vehicles")]
    TooManyRoutes { routes: usize, vehicles: usize },

    #[error("route {route} visits stop {stop}, which does not exist")]
    UnknownStop { route: RouteIdx, stop: StopIdx },

    #[error("route {route} visits the depot between its ends")]
    DepotInRoute { route: RouteIdx },

    #[error("stop {stop} is visited more than once")]
    DuplicateStop { stop: StopIdx },

    #[error("route {route} is infeasible: {infeasibility}")]
    Infeasible {
        route: RouteIdx,
        infeasibility: Infeasibility,
    },
}

#[derive(Debug, Error)]
pub enum SolveError {
    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error("failed to build the solver thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
