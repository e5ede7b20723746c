use std::ops::ControlFlow;

use crate::{
    problem::stop::StopIdx,
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Intra-Route 2-Opt**
///
/// Reverses the stops between `from` and `to` (inclusive).
/// This eliminates crossing edges within a single route.
///
/// ```text
/// BEFORE:
///    ... (prev) --x--> [from] -> ... -> [to] --x--> (next) ...
///
/// AFTER (Sequence Reversed):
///    ... (prev) -----> [to] -> ... -> [from] -----> (next) ...
///
/// Edges Removed: (prev->from), (to->next)
/// Edges Added:   (prev->to),   (from->next)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoOptOperator {
    params: TwoOptParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoOptParams {
    pub route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl TwoOptOperator {
    pub fn new(params: TwoOptParams) -> Self {
        debug_assert!(params.from < params.to);
        TwoOptOperator { params }
    }
}

impl LocalSearchOperator for TwoOptOperator {
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
            for to in (from + 1)..len {
                consumer(TwoOptOperator::new(TwoOptParams {
                    route_id: r1,
                    from,
                    to,
                }))?;
            }
        }

        ControlFlow::Continue(())
    }

    /// Distances are symmetric, so the reversed inner edges keep their length.
    fn distance_delta(&self, solution: &WorkingSolution) -> i64 {
        let problem = solution.problem();
        let route = solution.route(self.params.route_id);

        let prev = route.previous_stop_id(self.params.from);
        let from = route.stop_id(self.params.from);
        let to = route.stop_id(self.params.to);
        let next = route.next_stop_id(self.params.to);

        let d = |a, b| problem.travel_distance(a, b) as i64;

        d(prev, to) + d(from, next) - d(prev, from) - d(to, next)
    }

    fn rebuilt_routes(&self, solution: &WorkingSolution) -> Vec<(RouteIdx, Vec<StopIdx>)> {
        let mut stops = solution.route(self.params.route_id).stops().to_vec();
        stops[self.params.from..=self.params.to].reverse();

        vec![(self.params.route_id, stops)]
    }
}
