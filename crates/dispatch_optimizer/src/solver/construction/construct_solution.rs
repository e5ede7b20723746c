use std::sync::Arc;

use fxhash::FxHashSet;
use rayon::prelude::*;
use tracing::{debug, info, instrument, warn};

use crate::{
    problem::{stop::StopIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solver::{
        constraints::constraint_model::ConstraintModel,
        insertion::{ScoredInsertion, for_each_insertion},
        solution::working_solution::WorkingSolution,
    },
};

/// Cheapest feasible insertion of `stop` over every route and position.
fn best_insertion_for_stop(
    solution: &WorkingSolution,
    constraints: &ConstraintModel,
    stop: StopIdx,
) -> Option<ScoredInsertion> {
    let problem = solution.problem();
    let mut best: Option<ScoredInsertion> = None;

    for_each_insertion(solution, stop, |insertion| {
        let route = insertion.route(solution);
        let delta = route.insertion_delta(problem, insertion.position, stop);

        if best.is_some_and(|best| best.key() <= (delta, stop, insertion.route_id, insertion.position)) {
            return;
        }

        if constraints
            .check_insertion(route, insertion.position, stop)
            .is_ok()
        {
            best = Some(ScoredInsertion { insertion, delta });
        }
    });

    best
}

/// Cheapest insertion construction.
///
/// Every round scans all `(unassigned stop, route, position)` candidates that
/// satisfy capacity and time windows, and applies the one with the smallest
/// distance increase. Ties go to the lowest stop, then the lowest vehicle, then
/// the earliest position. Stops are scanned in parallel; the reduction uses the
/// total order above so the result does not depend on the number of threads.
///
/// Stops that fit nowhere stay unassigned. Must run inside the solver thread pool.
#[instrument(skip_all, level = "debug")]
pub fn construct_solution(problem: &Arc<VehicleRoutingProblem>) -> WorkingSolution {
    debug!("Start cheapest insertion construction");
    let mut solution = WorkingSolution::new(Arc::clone(problem));
    let constraints = ConstraintModel::new(problem);
    let mut rejected = FxHashSet::default();

    loop {
        let candidates = solution
            .unassigned_stops()
            .iter()
            .copied()
            .filter(|stop| !rejected.contains(stop))
            .collect::<Vec<_>>();

        let best = candidates
            .par_iter()
            .filter_map(|&stop| best_insertion_for_stop(&solution, &constraints, stop))
            .min_by_key(|candidate| candidate.key());

        let Some(best) = best else {
            break;
        };

        if let Err(infeasibility) = solution.insert(&best.insertion) {
            // The constant time check and the full propagation disagree, keep the stop out
            warn!(
                stop = %best.insertion.stop,
                %infeasibility,
                "Insertion rejected by full route evaluation"
            );
            rejected.insert(best.insertion.stop);
        }
    }

    info!(
        assigned = problem.num_stops() - 1 - solution.unassigned_stops().len(),
        unassigned = solution.unassigned_stops().len(),
        distance = solution.total_distance(),
        "Construction finished"
    );

    solution
}
