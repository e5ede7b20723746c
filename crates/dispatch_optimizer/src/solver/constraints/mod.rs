pub mod capacity_constraint;
pub mod constraint_model;
pub mod infeasibility;
pub mod time_window_constraint;
