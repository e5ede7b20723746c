use std::{collections::BTreeMap, ops::ControlFlow, time::Instant};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info, instrument};

use crate::{
    acceptor::{accept_move::AcceptMove, move_acceptor::MoveAcceptor},
    solver::{
        ls::r#move::{EvaluatedRoutes, LocalSearchMove},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
        solver_params::{AcceptanceStrategy, SearchBudget},
        statistics::{SearchStatistics, StopReason},
    },
};

type RoutePair = (RouteIdx, RouteIdx);

struct AcceptedMove {
    operator_name: &'static str,
    delta: i64,
    routes: EvaluatedRoutes,
}

/// First-improvement local search.
///
/// Each iteration scans the neighborhood in a fixed order: ordered route pairs
/// `(r1, r2)` lexicographically, and for each pair relocate, swap, 2-opt and
/// 2-opt* with positions ascending. The first move that passes the acceptor's
/// delta limit and survives a full feasibility check is applied, then the
/// scan starts over. Best-improvement would pick different moves.
///
/// Route pairs are scanned in parallel against the frozen solution; the first
/// hit in scan order wins, so the outcome does not depend on the thread count.
/// Moves are applied by a single writer and the budget is checked between moves.
pub struct LocalSearch {
    budget: SearchBudget,
    acceptor: MoveAcceptor,
}

impl LocalSearch {
    pub fn new(budget: SearchBudget, acceptance: &AcceptanceStrategy) -> Self {
        LocalSearch {
            budget,
            acceptor: MoveAcceptor::from(acceptance),
        }
    }

    /// Improves `solution` in place. Unassigned stops stay unassigned.
    ///
    /// With a non-strict acceptor the best solution seen is restored at the end.
    #[instrument(skip_all, level = "debug")]
    pub fn improve(&mut self, solution: &mut WorkingSolution) -> SearchStatistics {
        let started = Instant::now();
        let time_limit = self
            .budget
            .time_limit
            .map(|limit| std::time::Duration::try_from(limit).unwrap_or_default());

        let num_routes = solution.routes().len();
        let pairs = (0..num_routes)
            .flat_map(|r1| (0..num_routes).map(move |r2| (RouteIdx::new(r1), RouteIdx::new(r2))))
            .collect::<Vec<RoutePair>>();

        let initial_distance = solution.total_distance();
        let keep_best = !self.acceptor.is_strictly_improving();
        let mut best: Option<WorkingSolution> = None;
        let mut best_distance = initial_distance;

        let mut iterations = 0;
        let mut accepted_moves = 0;
        let mut accepted_by_operator = BTreeMap::new();

        let stop_reason = loop {
            if iterations >= self.budget.max_iterations {
                break StopReason::MaxIterations;
            }

            if accepted_moves >= self.budget.max_accepted_moves {
                break StopReason::MaxAcceptedMoves;
            }

            if time_limit.is_some_and(|limit| started.elapsed() >= limit) {
                break StopReason::TimeLimit;
            }

            iterations += 1;
            let delta_limit = self.acceptor.delta_limit();

            let frozen = &*solution;
            let found = pairs
                .par_iter()
                .find_map_first(|&pair| find_move(frozen, pair, delta_limit));

            let Some(accepted) = found else {
                break StopReason::Converged;
            };

            debug!(
                operator = accepted.operator_name,
                delta = accepted.delta,
                "Accepted local search move"
            );

            solution.replace_routes(accepted.routes);
            self.acceptor.on_accepted(accepted.delta);
            accepted_moves += 1;
            *accepted_by_operator
                .entry(accepted.operator_name)
                .or_insert(0) += 1;

            if keep_best && solution.total_distance() < best_distance {
                best_distance = solution.total_distance();
                best = Some(solution.clone());
            }
        };

        if let Some(best) = best
            && best.total_distance() < solution.total_distance()
        {
            *solution = best;
        }

        let statistics = SearchStatistics {
            initial_distance,
            final_distance: solution.total_distance(),
            iterations,
            accepted_moves,
            accepted_by_operator,
            stop_reason,
        };

        info!(
            iterations,
            accepted_moves,
            ?stop_reason,
            initial_distance,
            final_distance = statistics.final_distance,
            "Local search finished"
        );

        statistics
    }
}

/// First move of `pair` in scan order with `delta < delta_limit` that keeps
/// every route feasible.
fn find_move(solution: &WorkingSolution, pair: RoutePair, delta_limit: i64) -> Option<AcceptedMove> {
    let mut found = None;

    let _ = LocalSearchMove::generate_moves(solution, pair, &mut |candidate| {
        let delta = candidate.delta(solution);
        if delta >= delta_limit {
            return ControlFlow::Continue(());
        }

        match candidate.evaluate(solution) {
            Ok(routes) => {
                found = Some(AcceptedMove {
                    operator_name: candidate.operator_name(),
                    delta,
                    routes,
                });
                ControlFlow::Break(())
            }
            Err(_) => ControlFlow::Continue(()),
        }
    });

    found
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;

    use crate::test_utils;

    use super::*;

    fn strict() -> LocalSearch {
        LocalSearch::new(SearchBudget::default(), &AcceptanceStrategy::StrictImprovement)
    }

    #[test]
    fn test_improves_shuffled_routes() {
        let mut solution = test_utils::solution_from_routes(
            test_utils::sample_problem(),
            &[&[5, 1, 2], &[4, 3, 6]],
        );

        let statistics = strict().improve(&mut solution);

        assert_eq!(
            solution.sequences(),
            test_utils::sequences(&[&[1, 5, 2], &[4, 6, 3], &[]])
        );
        assert_eq!(statistics.initial_distance, 21340);
        assert_eq!(statistics.final_distance, 16641);
        assert_eq!(statistics.accepted_moves, 3);
        assert_eq!(statistics.iterations, 4);
        assert_eq!(statistics.accepted_by_operator.get("relocate"), Some(&3));
        assert_eq!(statistics.stop_reason, StopReason::Converged);
        assert!(solution.is_partition_valid());
    }

    #[test]
    fn test_inter_route_moves() {
        let mut solution = test_utils::solution_from_routes(
            test_utils::sample_problem(),
            &[&[1], &[2, 5], &[3, 6, 4]],
        );

        let statistics = strict().improve(&mut solution);

        assert_eq!(
            solution.sequences(),
            test_utils::sequences(&[&[], &[2, 5, 1], &[3, 6, 4]])
        );
        assert_eq!(statistics.initial_distance, 18284);
        assert_eq!(statistics.final_distance, 16641);
        assert_eq!(statistics.accepted_by_operator.get("inter_relocate"), Some(&1));
        assert_eq!(statistics.accepted_by_operator.get("relocate"), Some(&1));
    }

    #[test]
    fn test_converged_solution_is_a_fixed_point() {
        let mut solution = test_utils::solution_from_routes(
            test_utils::sample_problem(),
            &[&[2, 5, 1], &[3, 6, 4]],
        );
        let before = solution.sequences();

        let statistics = strict().improve(&mut solution);

        assert_eq!(solution.sequences(), before);
        assert_eq!(statistics.accepted_moves, 0);
        assert_eq!(statistics.iterations, 1);
        assert_eq!(statistics.stop_reason, StopReason::Converged);
    }

    #[test]
    fn test_move_budget_is_respected() {
        let mut solution = test_utils::solution_from_routes(
            test_utils::sample_problem(),
            &[&[5, 1, 2], &[4, 3, 6]],
        );

        let mut local_search = LocalSearch::new(
            SearchBudget {
                max_accepted_moves: 1,
                ..SearchBudget::default()
            },
            &AcceptanceStrategy::StrictImprovement,
        );
        let statistics = local_search.improve(&mut solution);

        assert_eq!(statistics.accepted_moves, 1);
        assert_eq!(statistics.final_distance, 19228);
        assert_eq!(statistics.stop_reason, StopReason::MaxAcceptedMoves);
    }

    #[test]
    fn test_iteration_budget_is_respected() {
        let mut solution = test_utils::solution_from_routes(
            test_utils::sample_problem(),
            &[&[5, 1, 2], &[4, 3, 6]],
        );

        let mut local_search = LocalSearch::new(
            SearchBudget {
                max_iterations: 2,
                ..SearchBudget::default()
            },
            &AcceptanceStrategy::StrictImprovement,
        );
        let statistics = local_search.improve(&mut solution);

        assert_eq!(statistics.iterations, 2);
        assert_eq!(statistics.final_distance, 17906);
        assert_eq!(statistics.stop_reason, StopReason::MaxIterations);
    }

    #[test]
    fn test_zero_time_limit_stops_before_any_move() {
        let mut solution = test_utils::solution_from_routes(
            test_utils::sample_problem(),
            &[&[5, 1, 2], &[4, 3, 6]],
        );

        let mut local_search = LocalSearch::new(
            SearchBudget {
                time_limit: Some(SignedDuration::ZERO),
                ..SearchBudget::default()
            },
            &AcceptanceStrategy::StrictImprovement,
        );
        let statistics = local_search.improve(&mut solution);

        assert_eq!(statistics.iterations, 0);
        assert_eq!(statistics.final_distance, 21340);
        assert_eq!(statistics.stop_reason, StopReason::TimeLimit);
    }

    #[test]
    fn test_non_strict_acceptors_never_end_worse() {
        for acceptance in [
            AcceptanceStrategy::AcceptEqual {
                max_plateau_moves: 5,
            },
            AcceptanceStrategy::SimulatedAnnealing {
                initial_temperature: 300.0,
                cooling_rate: 0.9,
                min_temperature: 1.0,
                seed: 7,
            },
        ] {
            let mut solution = test_utils::solution_from_routes(
                test_utils::sample_problem(),
                &[&[5, 1, 2], &[4, 3, 6]],
            );

            let statistics = LocalSearch::new(SearchBudget::default(), &acceptance)
                .improve(&mut solution);

            assert!(statistics.final_distance <= 21340, "{acceptance:?}");
            assert_eq!(statistics.final_distance, solution.total_distance());
            assert!(solution.is_partition_valid());
            for route in solution.routes() {
                assert!(route.load() <= 3);
            }
        }
    }

    #[test]
    fn test_parallel_scan_matches_sequential() {
        let problem = test_utils::grid_problem(6, 6, 4, 10);
        let run = |threads: usize| {
            rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .unwrap()
                .install(|| {
                    let problem = std::sync::Arc::new(test_utils::grid_problem(6, 6, 4, 10));
                    let mut solution =
                        crate::solver::construction::construct_solution::construct_solution(
                            &problem,
                        );
                    let statistics = strict().improve(&mut solution);
                    (solution.sequences(), statistics)
                })
        };

        assert_eq!(problem.num_stops(), 36);
        assert_eq!(run(1), run(4));
    }
}
