use std::iter;

use serde::Serialize;

use crate::{
    problem::{
        stop::{DEPOT, Demand, StopIdx},
        time_window::TimeWindow,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::solution::{
        route::WorkingSolutionRoute,
        unassigned::UnassignedReason,
    },
};

use super::{
    capacity_constraint::CapacityConstraint, infeasibility::Infeasibility,
    time_window_constraint::TimeWindowConstraint,
};

/// Load and arrival bounds at one node of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CumulativeState {
    pub stop: StopIdx,
    /// Sum of the demands served up to and including this node.
    pub load: Demand,
    /// Every arrival time in this window extends to a feasible schedule of the whole route.
    pub arrival: TimeWindow,
}

/// Propagated time intervals for the nodes of a route: the depot, each stop,
/// then the depot again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSchedule {
    load: Demand,
    forward: Vec<TimeWindow>,
    backward: Vec<TimeWindow>,
    arrivals: Vec<TimeWindow>,
}

impl RouteSchedule {
    /// Schedule of a vehicle that leaves the depot and returns without serving anything.
    pub(crate) fn idle(horizon: TimeWindow) -> Self {
        RouteSchedule {
            load: 0,
            forward: vec![horizon; 2],
            backward: vec![horizon; 2],
            arrivals: vec![horizon; 2],
        }
    }

    pub fn load(&self) -> Demand {
        self.load
    }

    /// Arrival times at `node` reachable from the start of the route.
    #[inline(always)]
    pub fn forward(&self, node: usize) -> &TimeWindow {
        &self.forward[node]
    }

    /// Arrival times at `node` from which the route can be completed.
    #[inline(always)]
    pub fn backward(&self, node: usize) -> &TimeWindow {
        &self.backward[node]
    }

    pub fn arrivals(&self) -> &[TimeWindow] {
        &self.arrivals
    }
}

/// Feasibility queries over the capacity and time dimensions of a problem.
///
/// Every query returns the [`Infeasibility`] instead of failing, so callers can
/// reject candidates cheaply in tight loops.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintModel<'a> {
    problem: &'a VehicleRoutingProblem,
    time_windows: TimeWindowConstraint,
}

impl<'a> ConstraintModel<'a> {
    pub fn new(problem: &'a VehicleRoutingProblem) -> Self {
        ConstraintModel {
            problem,
            time_windows: TimeWindowConstraint::new(problem.max_waiting()),
        }
    }

    /// Whether `candidate` can be visited right after the stops of `route`,
    /// with the vehicle still able to return to the depot in time.
    pub fn feasible_to_append(
        &self,
        route: &[StopIdx],
        candidate: StopIdx,
        vehicle_capacity: Demand,
    ) -> bool {
        let load = self.load(route).saturating_add(self.problem.demand(candidate));

        CapacityConstraint::check(load, vehicle_capacity).is_ok()
            && self.arrival_window(route, candidate).is_ok()
    }

    /// Feasible arrival times at `candidate` when it is visited right after the
    /// stops of `route` and followed by the return to the depot.
    pub fn arrival_window(
        &self,
        route: &[StopIdx],
        candidate: StopIdx,
    ) -> Result<TimeWindow, Infeasibility> {
        let problem = self.problem;
        let mut current = problem.horizon();
        let mut previous = DEPOT;

        for &stop in route.iter().chain(iter::once(&candidate)) {
            current = self.time_windows.forward(
                &current,
                problem.travel_time(previous, stop),
                problem.service_window(stop),
                stop,
            )?;
            previous = stop;
        }

        let completable = self.time_windows.backward(
            &problem.horizon(),
            problem.travel_time(candidate, DEPOT),
            problem.service_window(candidate),
            candidate,
        )?;

        current
            .intersect(&completable)
            .ok_or(Infeasibility::TimeWindow { stop: candidate })
    }

    /// Propagates both dimensions over `depot -> stops -> depot`.
    pub fn schedule(
        &self,
        stops: &[StopIdx],
        vehicle_capacity: Demand,
    ) -> Result<RouteSchedule, Infeasibility> {
        let problem = self.problem;
        let load = self.load(stops);
        CapacityConstraint::check(load, vehicle_capacity)?;

        let nodes = iter::once(DEPOT)
            .chain(stops.iter().copied())
            .chain(iter::once(DEPOT))
            .collect::<Vec<_>>();

        let mut forward = Vec::with_capacity(nodes.len());
        let mut current = problem.horizon();
        forward.push(current);
        for pair in nodes.windows(2) {
            let (previous, stop) = (pair[0], pair[1]);
            current = self.time_windows.forward(
                &current,
                problem.travel_time(previous, stop),
                problem.service_window(stop),
                stop,
            )?;
            forward.push(current);
        }

        let mut backward = Vec::with_capacity(nodes.len());
        let mut current = problem.horizon();
        backward.push(current);
        for pair in nodes.windows(2).rev() {
            let (stop, next) = (pair[0], pair[1]);
            current = self.time_windows.backward(
                &current,
                problem.travel_time(stop, next),
                problem.service_window(stop),
                stop,
            )?;
            backward.push(current);
        }
        backward.reverse();

        let arrivals = nodes
            .iter()
            .zip(forward.iter().zip(backward.iter()))
            .map(|(&stop, (forward, backward))| {
                forward
                    .intersect(backward)
                    .ok_or(Infeasibility::TimeWindow { stop })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RouteSchedule {
            load,
            forward,
            backward,
            arrivals,
        })
    }

    /// Running load and arrival bounds for every node of `depot -> stops -> depot`.
    pub fn evaluate_sequence(
        &self,
        stops: &[StopIdx],
        vehicle_capacity: Demand,
    ) -> Result<Vec<CumulativeState>, Infeasibility> {
        let schedule = self.schedule(stops, vehicle_capacity)?;
        Ok(self.cumulative_states(stops, &schedule))
    }

    pub fn cumulative_states(
        &self,
        stops: &[StopIdx],
        schedule: &RouteSchedule,
    ) -> Vec<CumulativeState> {
        let nodes = iter::once(DEPOT)
            .chain(stops.iter().copied())
            .chain(iter::once(DEPOT));

        let mut load = 0;
        nodes
            .zip(schedule.arrivals())
            .map(|(stop, &arrival)| {
                load += self.problem.demand(stop);
                CumulativeState {
                    stop,
                    load,
                    arrival,
                }
            })
            .collect()
    }

    /// Checks inserting `stop` before `position` of `route` in constant time,
    /// from the intervals already propagated on the route.
    pub fn check_insertion(
        &self,
        route: &WorkingSolutionRoute,
        position: usize,
        stop: StopIdx,
    ) -> Result<(), Infeasibility> {
        let problem = self.problem;
        let capacity = problem.vehicle(route.vehicle_id()).capacity();
        CapacityConstraint::check(route.load().saturating_add(problem.demand(stop)), capacity)?;

        let previous = route.previous_stop_id(position);
        let next = route.stop_id_or_depot(position);
        let schedule = route.schedule();

        let at_stop = self.time_windows.forward(
            schedule.forward(position),
            problem.travel_time(previous, stop),
            problem.service_window(stop),
            stop,
        )?;

        let at_next = self.time_windows.forward(
            &at_stop,
            problem.travel_time(stop, next),
            problem.service_window(next),
            next,
        )?;

        at_next
            .intersect(schedule.backward(position + 1))
            .map(|_| ())
            .ok_or(Infeasibility::TimeWindow { stop: next })
    }

    /// Why `stop` could not be placed in any route.
    pub fn unassigned_reason(&self, stop: StopIdx) -> UnassignedReason {
        let max_capacity = self.problem.fleet().max_capacity();

        if self.problem.demand(stop) > max_capacity {
            UnassignedReason::ExceedsCapacity
        } else if self.schedule(&[stop], max_capacity).is_err() {
            UnassignedReason::TimeWindowUnreachable
        } else {
            UnassignedReason::NoFeasibleRoute
        }
    }

    fn load(&self, stops: &[StopIdx]) -> Demand {
        stops
            .iter()
            .fold(0, |load: Demand, &stop| load.saturating_add(self.problem.demand(stop)))
    }
}
