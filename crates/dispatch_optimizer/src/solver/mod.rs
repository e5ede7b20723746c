pub mod constraints;
pub mod construction;
pub mod insertion;
pub mod ls;
pub mod solution;
pub mod solver;
pub mod solver_params;
pub mod statistics;
