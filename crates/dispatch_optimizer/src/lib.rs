mod acceptor;
pub mod error;
pub mod problem;
pub mod report;
pub mod solver;
mod utils;

pub mod json;

pub use report::SolutionReport;
pub use solver::{
    solver::{Solver, solve},
    solver_params::{AcceptanceStrategy, SearchBudget, SolverParams, Threads},
};

#[cfg(test)]
pub(crate) mod test_utils;
