pub mod route;
pub mod route_id;
pub mod unassigned;
pub mod working_solution;
