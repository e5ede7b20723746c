pub mod fleet;
pub mod kmh;
pub mod location;
pub mod stop;
pub mod time_window;
pub mod travel_matrices;
pub mod vehicle;
pub mod vehicle_routing_problem;
