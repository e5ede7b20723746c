use std::sync::Arc;

use fxhash::FxHashSet;

use crate::{
    error::InvalidSolution,
    problem::{
        stop::{DEPOT, StopIdx},
        travel_matrices::Distance,
        vehicle_routing_problem::VehicleRoutingProblem,
    },
    solver::{
        constraints::{constraint_model::ConstraintModel, infeasibility::Infeasibility},
        insertion::Insertion,
        solution::{
            route::WorkingSolutionRoute,
            route_id::RouteIdx,
            unassigned::UnassignedStop,
        },
    },
    utils::enumerate_idx::EnumerateIdx,
};

/// One route per vehicle plus the stops that are not served yet.
#[derive(Debug, Clone)]
pub struct WorkingSolution {
    problem: Arc<VehicleRoutingProblem>,
    routes: Vec<WorkingSolutionRoute>,
    /// Sorted ascending.
    unassigned_stops: Vec<StopIdx>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<VehicleRoutingProblem>) -> Self {
        let routes = problem
            .vehicles()
            .iter()
            .enumerate_idx()
            .map(|(vehicle_id, _)| WorkingSolutionRoute::empty(&problem, vehicle_id))
            .collect::<Vec<_>>();
        let unassigned_stops = problem.customers().collect();

        WorkingSolution {
            problem,
            routes,
            unassigned_stops,
        }
    }

    /// Builds a solution from explicit stop sequences, one per vehicle in fleet
    /// order. Vehicles without a sequence get an empty route, stops that appear
    /// nowhere are unassigned.
    pub fn from_routes(
        problem: Arc<VehicleRoutingProblem>,
        sequences: Vec<Vec<StopIdx>>,
    ) -> Result<Self, InvalidSolution> {
        let mut solution = WorkingSolution::new(problem);

        if sequences.len() > solution.routes.len() {
            return Err(InvalidSolution::TooManyRoutes {
                routes: sequences.len(),
                vehicles: solution.routes.len(),
            });
        }

        let mut assigned = FxHashSet::default();
        for (route_id, stops) in sequences.iter().enumerate_idx() {
            let route_id: RouteIdx = route_id;
            for &stop in stops {
                if stop.get() >= solution.problem.num_stops() {
                    return Err(InvalidSolution::UnknownStop {
                        route: route_id,
                        stop,
                    });
                }

                if stop == DEPOT {
                    return Err(InvalidSolution::DepotInRoute { route: route_id });
                }

                if !assigned.insert(stop) {
                    return Err(InvalidSolution::DuplicateStop { stop });
                }
            }
        }

        for (route_id, stops) in sequences.into_iter().enumerate_idx() {
            let route_id: RouteIdx = route_id;
            let vehicle_id = solution.routes[route_id].vehicle_id();
            solution.routes[route_id] =
                WorkingSolutionRoute::with_stops(&solution.problem, vehicle_id, stops).map_err(
                    |infeasibility| InvalidSolution::Infeasible {
                        route: route_id,
                        infeasibility,
                    },
                )?;
        }

        solution
            .unassigned_stops
            .retain(|stop| !assigned.contains(stop));

        Ok(solution)
    }

    pub fn problem(&self) -> &VehicleRoutingProblem {
        &self.problem
    }

    pub fn routes(&self) -> &[WorkingSolutionRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingSolutionRoute {
        &self.routes[route_id]
    }

    pub fn unassigned_stops(&self) -> &[StopIdx] {
        &self.unassigned_stops
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned_stops.is_empty()
    }

    /// Unassigned stops with the reason they could not be served.
    pub fn unassigned_with_reasons(&self) -> Vec<UnassignedStop> {
        let constraints = ConstraintModel::new(&self.problem);
        self.unassigned_stops
            .iter()
            .map(|&stop| UnassignedStop {
                stop,
                reason: constraints.unassigned_reason(stop),
            })
            .collect()
    }

    pub fn total_distance(&self) -> Distance {
        self.routes.iter().map(|route| route.distance()).sum()
    }

    /// Sequences of stops per route, the shape accepted by [`WorkingSolution::from_routes`].
    pub fn sequences(&self) -> Vec<Vec<StopIdx>> {
        self.routes
            .iter()
            .map(|route| route.stops().to_vec())
            .collect()
    }

    pub fn insert(&mut self, insertion: &Insertion) -> Result<(), Infeasibility> {
        let problem = Arc::clone(&self.problem);
        self.routes[insertion.route_id].insert(&problem, insertion.position, insertion.stop)?;

        if let Ok(index) = self.unassigned_stops.binary_search(&insertion.stop) {
            self.unassigned_stops.remove(index);
        }

        Ok(())
    }

    /// Swaps in routes that were already evaluated against the constraints.
    pub fn replace_routes(&mut self, routes: Vec<(RouteIdx, WorkingSolutionRoute)>) {
        for (route_id, route) in routes {
            self.routes[route_id] = route;
        }
    }

    /// Every customer is either unassigned or served by exactly one route.
    pub fn is_partition_valid(&self) -> bool {
        let mut seen = FxHashSet::default();

        let routed_once = self
            .routes
            .iter()
            .flat_map(|route| route.stops().iter())
            .chain(self.unassigned_stops.iter())
            .all(|&stop| stop != DEPOT && seen.insert(stop));

        routed_once && seen.len() == self.problem.num_stops() - 1
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::test_utils;

    use super::*;

    #[test]
    fn test_new_solution_has_everything_unassigned() {
        let solution = WorkingSolution::new(Arc::new(test_utils::sample_problem()));

        assert_eq!(solution.routes().len(), 3);
        assert_eq!(solution.unassigned_stops().len(), 6);
        assert_eq!(solution.total_distance(), 0);
        assert!(solution.is_partition_valid());
    }

    #[test]
    fn test_from_routes_tracks_unassigned() {
        let solution = test_utils::solution_from_routes(
            test_utils::sample_problem(),
            &[&[2, 5, 1], &[3, 6, 4]],
        );

        assert_eq!(solution.total_distance(), 16641);
        assert!(!solution.has_unassigned());
        assert!(solution.route(2.into()).is_empty());
        assert!(solution.is_partition_valid());
    }

    #[test]
    fn test_insert_removes_from_unassigned() {
        let mut solution =
            test_utils::solution_from_routes(test_utils::sample_problem(), &[&[2, 5], &[3, 6, 4]]);
        assert_eq!(solution.unassigned_stops(), &[StopIdx::new(1)]);

        solution
            .insert(&Insertion {
                route_id: 0.into(),
                stop: 1.into(),
                position: 2,
            })
            .unwrap();

        assert!(!solution.has_unassigned());
        assert_eq!(solution.total_distance(), 16641);
        assert!(solution.is_partition_valid());
    }

    #[test]
    fn test_from_routes_rejects_malformed_sequences() {
        let from_routes = |routes: &[&[usize]]| {
            WorkingSolution::from_routes(
                Arc::new(test_utils::sample_problem()),
                test_utils::sequences(routes),
            )
            .err()
        };

        assert_eq!(
            from_routes(&[&[1], &[2], &[3], &[4]]),
            Some(InvalidSolution::TooManyRoutes {
                routes: 4,
                vehicles: 3
            })
        );
        assert_eq!(
            from_routes(&[&[1], &[7]]),
            Some(InvalidSolution::UnknownStop {
                route: 1.into(),
                stop: 7.into()
            })
        );
        assert_eq!(
            from_routes(&[&[1, 0, 2]]),
            Some(InvalidSolution::DepotInRoute { route: 0.into() })
        );
        assert_eq!(
            from_routes(&[&[1, 2], &[3, 1]]),
            Some(InvalidSolution::DuplicateStop { stop: 1.into() })
        );
        assert_eq!(
            from_routes(&[&[1, 2, 3, 4]]),
            Some(InvalidSolution::Infeasible {
                route: 0.into(),
                infeasibility: Infeasibility::Capacity {
                    load: 4,
                    capacity: 3
                }
            })
        );
    }

    #[test]
    fn test_partition_detects_duplicates() {
        let problem = test_utils::sample_problem();
        let duplicate =
            WorkingSolutionRoute::with_stops(&problem, 1.into(), vec![StopIdx::new(1)]).unwrap();
        let mut solution = test_utils::solution_from_routes(problem, &[&[1]]);

        solution.replace_routes(vec![(1.into(), duplicate)]);

        assert!(!solution.is_partition_valid());
    }
}
