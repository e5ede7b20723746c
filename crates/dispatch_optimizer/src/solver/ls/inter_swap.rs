use std::ops::ControlFlow;

use crate::{
    problem::stop::StopIdx,
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Swap**
///
/// Exchanges the stop at `first` in `first_route_id` with the stop at `second`
/// in `second_route_id`. Loads change only by the difference of the two demands.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [first] -> (B) ...
///    R2: ... (X) -> [second] -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> [second] -> (B) ...
///    R2: ... (X) -> [first] -> (Y) ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterSwapOperator {
    params: InterSwapParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterSwapParams {
    pub first_route_id: RouteIdx,
    pub second_route_id: RouteIdx,
    pub first: usize,
    pub second: usize,
}

impl InterSwapOperator {
    pub fn new(params: InterSwapParams) -> Self {
        debug_assert_ne!(params.first_route_id, params.second_route_id);
        Self { params }
    }
}

impl LocalSearchOperator for InterSwapOperator {
    /// Only for `r1 < r2`, a swap is symmetric in its two routes.
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

        for first in 0..first_len {
            for second in 0..second_len {
                consumer(InterSwapOperator::new(InterSwapParams {
                    first_route_id: r1,
                    second_route_id: r2,
                    first,
                    second,
                }))?;
            }
        }

        ControlFlow::Continue(())
    }

    fn distance_delta(&self, solution: &WorkingSolution) -> i64 {
        let problem = solution.problem();
        let r1 = solution.route(self.params.first_route_id);
        let r2 = solution.route(self.params.second_route_id);

        let a = r1.previous_stop_id(self.params.first);
        let first = r1.stop_id(self.params.first);
        let b = r1.next_stop_id(self.params.first);

        let x = r2.previous_stop_id(self.params.second);
        let second = r2.stop_id(self.params.second);
        let y = r2.next_stop_id(self.params.second);

        let d = |from, to| problem.travel_distance(from, to) as i64;

        d(a, second) + d(second, b) - d(a, first) - d(first, b) + d(x, first) + d(first, y)
            - d(x, second)
            - d(second, y)
    }

    fn rebuilt_routes(&self, solution: &WorkingSolution) -> Vec<(RouteIdx, Vec<StopIdx>)> {
        let mut first = solution.route(self.params.first_route_id).stops().to_vec();
        let mut second = solution.route(self.params.second_route_id).stops().to_vec();

        std::mem::swap(
            &mut first[self.params.first],
            &mut second[self.params.second],
        );

        vec![
            (self.params.first_route_id, first),
            (self.params.second_route_id, second),
        ]
    }

}
