use crate::{
    problem::stop::StopIdx,
    solver::solution::{
        route::WorkingSolutionRoute, route_id::RouteIdx, working_solution::WorkingSolution,
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// Inserting `stop` before `position` of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub route_id: RouteIdx,
    pub stop: StopIdx,
    pub position: usize,
}

impl Insertion {
    pub fn route<'a>(&self, solution: &'a WorkingSolution) -> &'a WorkingSolutionRoute {
        solution.route(self.route_id)
    }
}

/// An insertion with its distance increase.
///
/// Candidates are totally ordered by `(delta, stop, route, position)`, which
/// makes the cheapest insertion unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredInsertion {
    pub insertion: Insertion,
    pub delta: i64,
}

impl ScoredInsertion {
    pub fn key(&self) -> (i64, StopIdx, RouteIdx, usize) {
        (
            self.delta,
            self.insertion.stop,
            self.insertion.route_id,
            self.insertion.position,
        )
    }
}

/// Visits every position of every route, routes first, positions ascending.
pub fn for_each_insertion(solution: &WorkingSolution, stop: StopIdx, mut f: impl FnMut(Insertion)) {
    for (route_id, route) in solution.routes().iter().enumerate_idx() {
        for position in 0..=route.len() {
            f(Insertion {
                route_id,
                stop,
                position,
            });
        }
    }
}
