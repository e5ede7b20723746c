use std::ops::ControlFlow;

use crate::{
    problem::stop::StopIdx,
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route Relocate**
///
/// Moves the stop at `from` so that it is visited just before the stop that
/// is currently at `to` (or last when `to` is the route length).
///
/// ```text
/// BEFORE:
///    ... (A) -> [from] -> (B) ... (X) -> (Y) ...
///
/// AFTER:
///    ... (A) -> (B) ... (X) -> [from] -> (Y) ...
///
/// Edges Removed: (A->from), (from->B), (X->Y)
/// Edges Added:   (A->B), (X->from), (from->Y)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateOperator {
    params: RelocateParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocateParams {
    pub route_id: RouteIdx,
    pub from: usize,
    /// Position in the route before the move, `to != from` and `to != from + 1`.
    pub to: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateParams) -> Self {
        debug_assert!(params.to != params.from && params.to != params.from + 1);
        RelocateOperator { params }
    }
}

impl LocalSearchOperator for RelocateOperator {
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        consumer: &mut C,
    ) -> ControlFlow<()>
    where
        C: FnMut(Self) -> ControlFlow<()>,
    {
        if r1 != r2 {
            return ControlFlow::Continue(());
        }

        let len = solution.route(r1).len();
        for from in 0..len {
            for to in 0..=len {
                if to == from || to == from + 1 {
                    continue;
                }

                consumer(RelocateOperator::new(RelocateParams {
                    route_id: r1,
                    from,
                    to,
                }))?;
            }
        }

        ControlFlow::Continue(())
    }

    fn distance_delta(&self, solution: &WorkingSolution) -> i64 {
        let problem = solution.problem();
        let route = solution.route(self.params.route_id);
        let stop = route.stop_id(self.params.from);

        // The insertion gap is never next to `from`, so both halves are independent
        route.removal_delta(problem, self.params.from)
            + route.insertion_delta(problem, self.params.to, stop)
    }

    fn rebuilt_routes(&self, solution: &WorkingSolution) -> Vec<(RouteIdx, Vec<StopIdx>)> {
        let mut stops = solution.route(self.params.route_id).stops().to_vec();
        let stop = stops.remove(self.params.from);

        let to = if self.params.to < self.params.from {
            self.params.to
        } else {
            self.params.to - 1
        };
        stops.insert(to, stop);

        vec![(self.params.route_id, stops)]
    }

}

#[cfg(test)]
mod tests {
    use std::ops::ControlFlow;

    use crate::{
        solver::ls::r#move::LocalSearchOperator,
        test_utils,
    };

    use super::*;

    #[test]
    fn test_relocate_forward_and_backward() {
        let solution =
            test_utils::solution_from_routes(test_utils::sample_problem(), &[&[5, 1, 2]]);

        let forward = RelocateOperator::new(RelocateParams {
            route_id: 0.into(),
            from: 0,
            to: 2,
        });
        assert_eq!(
            forward.rebuilt_routes(&solution),
            vec![(RouteIdx::new(0), test_utils::stops(&[1, 5, 2]))]
        );

        let backward = RelocateOperator::new(RelocateParams {
            route_id: 0.into(),
            from: 2,
            to: 0,
        });
        assert_eq!(
            backward.rebuilt_routes(&solution),
            vec![(RouteIdx::new(0), test_utils::stops(&[2, 5, 1]))]
        );
    }

    #[test]
    fn test_relocate_delta_matches_distance_change() {
        let mut solution =
            test_utils::solution_from_routes(test_utils::sample_problem(), &[&[5, 1, 2]]);
        let before = solution.total_distance() as i64;

        let operator = RelocateOperator::new(RelocateParams {
            route_id: 0.into(),
            from: 0,
            to: 2,
        });
        let delta = operator.distance_delta(&solution);
        operator.apply(&mut solution).unwrap();

        assert_eq!(delta, -2112);
        assert_eq!(solution.total_distance() as i64, before + delta);
    }

    #[test]
    fn test_generate_moves_skips_identity_positions() {
        let solution =
            test_utils::solution_from_routes(test_utils::sample_problem(), &[&[5, 1, 2]]);

        let mut moves = Vec::new();
        let _ = RelocateOperator::generate_moves(&solution, (0.into(), 0.into()), &mut |op| {
            moves.push((op.params.from, op.params.to));
            ControlFlow::Continue(())
        });

        assert_eq!(
            moves,
            vec![(0, 2), (0, 3), (1, 0), (1, 3), (2, 0), (2, 1)]
        );

        let mut count = 0;
        let _ = RelocateOperator::generate_moves(&solution, (0.into(), 1.into()), &mut |_| {
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 0);
    }
}
