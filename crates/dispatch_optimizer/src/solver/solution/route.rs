use crate::{
    problem::{
        stop::{DEPOT, Demand, StopIdx},
        travel_matrices::Distance,
        vehicle::{Vehicle, VehicleIdx},
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::constraints::{
        constraint_model::{ConstraintModel, CumulativeState, RouteSchedule},
        infeasibility::Infeasibility,
    },
};

/// The stops served by one vehicle, in visiting order. The depot at both ends is
/// implicit: `stops` only holds customers.
///
/// A route is always feasible. Every mutation computes the new schedule first
/// and leaves the route untouched when it is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingSolutionRoute {
    vehicle_id: VehicleIdx,
    stops: Vec<StopIdx>,
    distance: Distance,
    schedule: RouteSchedule,
}

impl WorkingSolutionRoute {
    pub fn empty(problem: &VehicleRoutingProblem, vehicle_id: VehicleIdx) -> Self {
        WorkingSolutionRoute {
            vehicle_id,
            stops: Vec::new(),
            distance: 0,
            schedule: RouteSchedule::idle(problem.horizon()),
        }
    }

    pub fn with_stops(
        problem: &VehicleRoutingProblem,
        vehicle_id: VehicleIdx,
        stops: Vec<StopIdx>,
    ) -> Result<Self, Infeasibility> {
        let capacity = problem.vehicle(vehicle_id).capacity();
        let schedule = ConstraintModel::new(problem).schedule(&stops, capacity)?;

        Ok(WorkingSolutionRoute {
            vehicle_id,
            distance: Self::compute_distance(problem, &stops),
            stops,
            schedule,
        })
    }

    pub fn compute_distance(problem: &VehicleRoutingProblem, stops: &[StopIdx]) -> Distance {
        if stops.is_empty() {
            return 0;
        }

        let mut distance = problem.travel_distance(DEPOT, stops[0]);
        for pair in stops.windows(2) {
            distance += problem.travel_distance(pair[0], pair[1]);
        }
        distance + problem.travel_distance(stops[stops.len() - 1], DEPOT)
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a VehicleRoutingProblem) -> &'a Vehicle {
        problem.vehicle(self.vehicle_id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[StopIdx] {
        &self.stops
    }

    pub fn contains(&self, stop: StopIdx) -> bool {
        self.stops.contains(&stop)
    }

    pub fn load(&self) -> Demand {
        self.schedule.load()
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    pub fn schedule(&self) -> &RouteSchedule {
        &self.schedule
    }

    /// Depot, stops, depot.
    pub fn nodes(&self) -> impl Iterator<Item = StopIdx> + '_ {
        std::iter::once(DEPOT)
            .chain(self.stops.iter().copied())
            .chain(std::iter::once(DEPOT))
    }

    pub fn cumulative_states(&self, problem: &VehicleRoutingProblem) -> Vec<CumulativeState> {
        ConstraintModel::new(problem).cumulative_states(&self.stops, &self.schedule)
    }

    #[inline(always)]
    pub fn stop_id(&self, position: usize) -> StopIdx {
        self.stops[position]
    }

    /// The stop at `position`, or the closing depot past the end of the route.
    #[inline(always)]
    pub fn stop_id_or_depot(&self, position: usize) -> StopIdx {
        self.stops.get(position).copied().unwrap_or(DEPOT)
    }

    /// The stop before `position`, or the opening depot for the first position.
    #[inline(always)]
    pub fn previous_stop_id(&self, position: usize) -> StopIdx {
        if position == 0 {
            DEPOT
        } else {
            self.stops[position - 1]
        }
    }

    #[inline(always)]
    pub fn next_stop_id(&self, position: usize) -> StopIdx {
        self.stop_id_or_depot(position + 1)
    }

    /// Distance added by inserting `stop` before `position`.
    #[inline]
    pub fn insertion_delta(
        &self,
        problem: &VehicleRoutingProblem,
        position: usize,
        stop: StopIdx,
    ) -> i64 {
        let previous = self.previous_stop_id(position);
        let next = self.stop_id_or_depot(position);

        problem.travel_distance(previous, stop) as i64 + problem.travel_distance(stop, next) as i64
            - problem.travel_distance(previous, next) as i64
    }

    /// Distance added by removing the stop at `position`, usually negative.
    #[inline]
    pub fn removal_delta(&self, problem: &VehicleRoutingProblem, position: usize) -> i64 {
        let previous = self.previous_stop_id(position);
        let stop = self.stop_id(position);
        let next = self.next_stop_id(position);

        problem.travel_distance(previous, next) as i64
            - problem.travel_distance(previous, stop) as i64
            - problem.travel_distance(stop, next) as i64
    }

    pub fn insert(
        &mut self,
        problem: &VehicleRoutingProblem,
        position: usize,
        stop: StopIdx,
    ) -> Result<(), Infeasibility> {
        let mut stops = Vec::with_capacity(self.stops.len() + 1);
        stops.extend_from_slice(&self.stops[..position]);
        stops.push(stop);
        stops.extend_from_slice(&self.stops[position..]);

        self.replace_stops(problem, stops)
    }

    pub fn replace_stops(
        &mut self,
        problem: &VehicleRoutingProblem,
        stops: Vec<StopIdx>,
    ) -> Result<(), Infeasibility> {
        *self = WorkingSolutionRoute::with_stops(problem, self.vehicle_id, stops)?;
        Ok(())
    }
}
