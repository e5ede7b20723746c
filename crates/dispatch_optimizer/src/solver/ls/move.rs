use std::ops::ControlFlow;

use crate::{
    problem::stop::StopIdx,
    solver::{
        constraints::infeasibility::Infeasibility,
        ls::{
            inter_relocate::InterRelocateOperator, inter_swap::InterSwapOperator,
            inter_two_opt_star::InterTwoOptStarOperator, relocate::RelocateOperator,
            two_opt::TwoOptOperator,
        },
        solution::{
            route::WorkingSolutionRoute, route_id::RouteIdx, working_solution::WorkingSolution,
        },
    },
};

/// Routes rebuilt by a move, already checked against every constraint.
pub type EvaluatedRoutes = Vec<(RouteIdx, WorkingSolutionRoute)>;

pub trait LocalSearchOperator: Sized {
    /// Feeds the moves of this operator for an ordered pair of routes to
    /// `consumer`, positions ascending, until it breaks.
    fn generate_moves<C>(
        solution: &WorkingSolution,
        pair: (RouteIdx, RouteIdx),
        consumer: &mut C,
    ) -> ControlFlow<()>
    where
        C: FnMut(Self) -> ControlFlow<()>;

    /// Change of the total distance, from the edges the move adds and removes.
    fn distance_delta(&self, solution: &WorkingSolution) -> i64;

    /// Stop sequences of the routes after the move.
    fn rebuilt_routes(&self, solution: &WorkingSolution) -> Vec<(RouteIdx, Vec<StopIdx>)>;

    /// Rebuilds the touched routes and re-verifies capacity and time windows.
    /// The solution is not modified.
    fn evaluate(&self, solution: &WorkingSolution) -> Result<EvaluatedRoutes, Infeasibility> {
        let problem = solution.problem();

        self.rebuilt_routes(solution)
            .into_iter()
            .map(|(route_id, stops)| {
                let vehicle_id = solution.route(route_id).vehicle_id();
                WorkingSolutionRoute::with_stops(problem, vehicle_id, stops)
                    .map(|route| (route_id, route))
            })
            .collect()
    }

    fn apply(&self, solution: &mut WorkingSolution) -> Result<(), Infeasibility> {
        let routes = self.evaluate(solution)?;
        solution.replace_routes(routes);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalSearchMove {
    /// Moves a stop to another position of its own route.
    Relocate(RelocateOperator),
    /// Moves a stop to another route.
    InterRelocate(InterRelocateOperator),
    /// Exchanges two stops of different routes.
    InterSwap(InterSwapOperator),
    /// Reverses a segment of a route.
    TwoOpt(TwoOptOperator),
    /// Exchanges the tails of two routes.
    InterTwoOptStar(InterTwoOptStarOperator),
}

impl LocalSearchMove {
    pub fn operator_name(&self) -> &'static str {
        match self {
            LocalSearchMove::Relocate(_) => "relocate",
            LocalSearchMove::InterRelocate(_) => "inter_relocate",
            LocalSearchMove::InterSwap(_) => "inter_swap",
            LocalSearchMove::TwoOpt(_) => "two_opt",
            LocalSearchMove::InterTwoOptStar(_) => "inter_two_opt_star",
        }
    }

    pub fn delta(&self, solution: &WorkingSolution) -> i64 {
        match self {
            LocalSearchMove::Relocate(op) => op.distance_delta(solution),
            LocalSearchMove::InterRelocate(op) => op.distance_delta(solution),
            LocalSearchMove::InterSwap(op) => op.distance_delta(solution),
            LocalSearchMove::TwoOpt(op) => op.distance_delta(solution),
            LocalSearchMove::InterTwoOptStar(op) => op.distance_delta(solution),
        }
    }

    pub fn evaluate(&self, solution: &WorkingSolution) -> Result<EvaluatedRoutes, Infeasibility> {
        match self {
            LocalSearchMove::Relocate(op) => op.evaluate(solution),
            LocalSearchMove::InterRelocate(op) => op.evaluate(solution),
            LocalSearchMove::InterSwap(op) => op.evaluate(solution),
            LocalSearchMove::TwoOpt(op) => op.evaluate(solution),
            LocalSearchMove::InterTwoOptStar(op) => op.evaluate(solution),
        }
    }

    /// Every move of a route pair in the fixed scan order: relocate, swap,
    /// 2-opt, then 2-opt*. Each operator skips the pairs it does not apply to.
    pub fn generate_moves<C>(
        solution: &WorkingSolution,
        pair: (RouteIdx, RouteIdx),
        consumer: &mut C,
    ) -> ControlFlow<()>
    where
        C: FnMut(LocalSearchMove) -> ControlFlow<()>,
    {
        RelocateOperator::generate_moves(solution, pair, &mut |op| {
            consumer(LocalSearchMove::Relocate(op))
        })?;
        InterRelocateOperator::generate_moves(solution, pair, &mut |op| {
            consumer(LocalSearchMove::InterRelocate(op))
        })?;
        InterSwapOperator::generate_moves(solution, pair, &mut |op| {
            consumer(LocalSearchMove::InterSwap(op))
        })?;
        TwoOptOperator::generate_moves(solution, pair, &mut |op| {
            consumer(LocalSearchMove::TwoOpt(op))
        })?;
        InterTwoOptStarOperator::generate_moves(solution, pair, &mut |op| {
            consumer(LocalSearchMove::InterTwoOptStar(op))
        })
    }
}
