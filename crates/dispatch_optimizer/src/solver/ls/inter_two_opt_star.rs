use std::ops::ControlFlow;

use crate::{
    problem::stop::StopIdx,
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route 2-Opt* (Two-Opt Star)**
///
/// Exchanges the **tails** of two different routes. The first route keeps its
/// stops before `first_cut` and continues with the stops of the second route
/// from `second_cut` on, and the other way around.
///
/// ```text
/// BEFORE (Routes Cross):
///    R1: [Head A] --x--> [Tail A]
///                    \ /
///                     X
///                    / \
///    R2: [Head B] --x--> [Tail B]
///
/// AFTER (Routes Uncrossed):
///    R1: [Head A] -----> [Tail B]
///    R2: [Head B] -----> [Tail A]
/// ```
///
/// The tails keep their direction. Cutting at the very end of a route hands
/// it an empty tail, so this can also merge two routes or split one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterTwoOptStarOperator {
    params: InterTwoOptStarParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterTwoOptStarParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    /// First position of the tail of the first route, in `0..=len`.
    pub first_cut: usize,
    pub second_cut: usize,
}

impl InterTwoOptStarOperator {
    pub fn new(params: InterTwoOptStarParams) -> Self {
        debug_assert_ne!(params.first_route_id, params.second_route_id);
        Self { params }
    }
}

impl LocalSearchOperator for InterTwoOptStarOperator {
    /// Only for `r1 < r2`. Cutting both routes at the start or both at the
    /// end swaps them whole and is skipped.
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        consumer: &mut C,
    ) -> ControlFlow<()>
    where
        C: FnMut(Self) -> ControlFlow<()>,
    {
        if r1 >= r2 {
            return ControlFlow::Continue(());
        }

        let first_len = solution.route(r1).len();
        let second_len = solution.route(r2).len();

        for first_cut in 0..=first_len {
            for second_cut in 0..=second_len {
                if (first_cut == 0 && second_cut == 0)
                    || (first_cut == first_len && second_cut == second_len)
                {
                    continue;
                }

                consumer(InterTwoOptStarOperator::new(InterTwoOptStarParams {
                    first_route_id: r1,
                    second_route_id: r2,
                    first_cut,
                    second_cut,
                }))?;
            }
        }

        ControlFlow::Continue(())
    }

    fn distance_delta(&self, solution: &WorkingSolution) -> i64 {
        let problem = solution.problem();
        let r1 = solution.route(self.params.first_route_id);
        let r2 = solution.route(self.params.second_route_id);

        let first_head = r1.previous_stop_id(self.params.first_cut);
        let first_tail = r1.stop_id_or_depot(self.params.first_cut);
        let second_head = r2.previous_stop_id(self.params.second_cut);
        let second_tail = r2.stop_id_or_depot(self.params.second_cut);

        let d = |a, b| problem.travel_distance(a, b) as i64;

        d(first_head, second_tail) + d(second_head, first_tail)
            - d(first_head, first_tail)
            - d(second_head, second_tail)
    }

    fn rebuilt_routes(&self, solution: &WorkingSolution) -> Vec<(RouteIdx, Vec<StopIdx>)> {
        let first = solution.route(self.params.first_route_id).stops();
        let second = solution.route(self.params.second_route_id).stops();

        let (first_head, first_tail) = first.split_at(self.params.first_cut);
        let (second_head, second_tail) = second.split_at(self.params.second_cut);

        vec![
            (
                self.params.first_route_id,
                [first_head, second_tail].concat(),
            ),
            (
                self.params.second_route_id,
                [second_head, first_tail].concat(),
            ),
        ]
    }

}
