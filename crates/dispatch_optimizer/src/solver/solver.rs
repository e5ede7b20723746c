use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use tracing::{info, instrument};

use crate::{
    error::SolveError,
    problem::vehicle_routing_problem::VehicleRoutingProblem,
    report::SolutionReport,
    solver::{
        construction::construct_solution::construct_solution, ls::local_search::LocalSearch,
        solution::working_solution::WorkingSolution, solver_params::SolverParams,
        statistics::SearchStatistics,
    },
};

/// Builds a solution by cheapest insertion and improves it with local search.
///
/// The problem is immutable once built and shared between the worker threads.
pub struct Solver {
    problem: Arc<VehicleRoutingProblem>,
    params: SolverParams,
}

impl Solver {
    pub fn new(problem: VehicleRoutingProblem, params: SolverParams) -> Self {
        Solver {
            problem: Arc::new(problem),
            params,
        }
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        &self.problem
    }

    #[instrument(skip_all, fields(stops = self.problem.num_stops(), vehicles = self.problem.vehicles().len()))]
    pub fn solve(&self) -> Result<SolutionReport, SolveError> {
        let thread_pool = ThreadPoolBuilder::new()
            .num_threads(self.params.threads.number_of_threads())
            .build()?;

        let report = thread_pool.install(|| {
            let mut solution = construct_solution(&self.problem);
            if !self.params.run_local_search {
                return SolutionReport::summarize(&solution);
            }

            let statistics = self.improve(&mut solution);
            SolutionReport::summarize(&solution).with_search_statistics(statistics)
        });

        info!(
            total_distance = report.total_distance,
            assigned = report.num_assigned_stops(),
            unassigned = report.unassigned.len(),
            "Solved"
        );

        Ok(report)
    }

    fn improve(&self, solution: &mut WorkingSolution) -> SearchStatistics {
        let mut local_search = LocalSearch::new(self.params.budget.clone(), &self.params.acceptance);
        local_search.improve(solution)
    }
}

/// Solves `problem` with `params` in one call.
pub fn solve(
    problem: VehicleRoutingProblem,
    params: SolverParams,
) -> Result<SolutionReport, SolveError> {
    Solver::new(problem, params).solve()
}
