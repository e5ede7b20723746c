use std::ops::ControlFlow;

use crate::{
    problem::stop::StopIdx,
    solver::{
        ls::r#move::LocalSearchOperator,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// **Inter-Route Relocate**
///
/// Moves the stop at `from` in `from_route_id` to position `to` in `to_route_id`.
/// Balances load between vehicles and can empty a route entirely.
///
/// ```text
/// BEFORE:
///    R1: ... (A) -> [from] -> (B) ...
///    R2: ... (X) -> (Y) ...
///
/// AFTER:
///    R1: ... (A) -> (B) ...
///    R2: ... (X) -> [from] -> (Y) ...
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterRelocateOperator {
    params: InterRelocateParams,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterRelocateParams {
    pub from_route_id: RouteIdx,
    pub to_route_id: RouteIdx,
    pub from: usize,
    pub to: usize,
}

impl InterRelocateOperator {
    pub fn new(params: InterRelocateParams) -> Self {
        debug_assert_ne!(params.from_route_id, params.to_route_id);
        Self { params }
    }
}

impl LocalSearchOperator for InterRelocateOperator {
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (RouteIdx, RouteIdx),
        consumer: &mut C,
    ) -> ControlFlow<()>
    where
        C: FnMut(Self) -> ControlFlow<()>,
    {
        if r1 == r2 {
            return ControlFlow::Continue(());
        }

        let from_len = solution.route(r1).len();
        let to_len = solution.route(r2).len();

        for from in 0..from_len {
            for to in 0..=to_len {
                consumer(InterRelocateOperator::new(InterRelocateParams {
                    from_route_id: r1,
                    to_route_id: r2,
                    from,
                    to,
                }))?;
            }
        }

        ControlFlow::Continue(())
    }

    fn distance_delta(&self, solution: &WorkingSolution) -> i64 {
        let problem = solution.problem();
        let r1 = solution.route(self.params.from_route_id);
        let r2 = solution.route(self.params.to_route_id);
        let stop = r1.stop_id(self.params.from);

        r1.removal_delta(problem, self.params.from)
            + r2.insertion_delta(problem, self.params.to, stop)
    }

    fn rebuilt_routes(&self, solution: &WorkingSolution) -> Vec<(RouteIdx, Vec<StopIdx>)> {
        let mut source = solution.route(self.params.from_route_id).stops().to_vec();
        let mut target = solution.route(self.params.to_route_id).stops().to_vec();

        let stop = source.remove(self.params.from);
        target.insert(self.params.to, stop);

        vec![
            (self.params.from_route_id, source),
            (self.params.to_route_id, target),
        ]
    }

}
