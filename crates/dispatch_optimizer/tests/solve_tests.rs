use std::sync::Arc;

use dispatch_optimizer::{
    SolutionReport, SolverParams, Threads,
    json::types::JsonDispatchProblem,
    problem::{stop::StopIdx, vehicle_routing_problem::VehicleRoutingProblem},
    solve,
    solver::{
        ls::local_search::LocalSearch,
        solution::{unassigned::UnassignedReason, working_solution::WorkingSolution},
        solver_params::{AcceptanceStrategy, SearchBudget},
        statistics::StopReason,
    },
};

const SCENARIO: &str = r#"{
    "stops": [
        { "id": "depot", "lat": 12.9716, "lon": 77.5946, "window_start": 0, "window_end": 600 },
        { "id": "a", "lat": 12.9800, "lon": 77.6000, "window_start": 0, "window_end": 200 },
        { "id": "b", "lat": 12.9650, "lon": 77.6100, "window_start": 50, "window_end": 300 },
        { "id": "c", "lat": 12.9900, "lon": 77.5800, "window_start": 100, "window_end": 400 },
        { "id": "d", "lat": 12.9550, "lon": 77.5850, "window_start": 200, "window_end": 500 },
        { "id": "e", "lat": 12.9750, "lon": 77.6200, "window_start": 150, "window_end": 450 },
        { "id": "f", "lat": 12.9600, "lon": 77.5700, "window_start": 250, "window_end": 600 }
    ],
    "fleet": { "num_vehicles": 3, "capacity_per_vehicle": 3, "speed_km_per_hour": 40.0 }
}"#;

fn scenario() -> JsonDispatchProblem {
    serde_json::from_str(SCENARIO).unwrap()
}

fn scenario_problem() -> VehicleRoutingProblem {
    scenario().build_problem().unwrap()
}

fn visited(report: &SolutionReport) -> Vec<Vec<usize>> {
    report
        .routes
        .iter()
        .map(|route| {
            let visits = &route.visits[1..route.visits.len() - 1];
            visits.iter().map(|visit| visit.stop.get()).collect()
        })
        .collect()
}

#[test]
fn test_example_scenario() {
    let report = solve(scenario_problem(), SolverParams::default()).unwrap();

    assert_eq!(visited(&report), vec![vec![2, 5, 1], vec![3, 6, 4], vec![]]);
    assert_eq!(report.total_distance, 16641);
    assert!(report.unassigned.is_empty());

    for route in &report.routes {
        assert!(route.load <= route.capacity);
        assert_eq!(route.visits.first().unwrap().stop.get(), 0);
        assert_eq!(route.visits.last().unwrap().stop.get(), 0);
        for visit in &route.visits {
            assert!(visit.arrival.start <= visit.arrival.end);
            assert!(visit.arrival.end <= 600);
        }
    }

    let ids = report.routes[0]
        .visits
        .iter()
        .map(|visit| visit.id.as_str())
        .collect::<Vec<_>>();
    assert_eq!(ids, vec!["depot", "b", "e", "a", "depot"]);
}

#[test]
fn test_report_is_byte_identical_across_runs_and_threads() {
    let run = |threads| {
        let params = SolverParams {
            threads,
            ..SolverParams::default()
        };
        let report = solve(scenario_problem(), params).unwrap();
        serde_json::to_string_pretty(&report).unwrap()
    };

    let first = run(Threads::Single);
    assert_eq!(first, run(Threads::Single));
    assert_eq!(first, run(Threads::Multi(4)));
}

#[test]
fn test_stop_heavier_than_any_vehicle_is_unassigned() {
    let mut problem = scenario();
    problem.stops[3].demand = Some(4);

    let report = solve(problem.build_problem().unwrap(), SolverParams::default()).unwrap();

    assert_eq!(report.unassigned.len(), 1);
    assert_eq!(report.unassigned[0].stop, StopIdx::new(3));
    assert_eq!(report.unassigned[0].id, "c");
    assert_eq!(report.unassigned[0].reason, UnassignedReason::ExceedsCapacity);
    assert_eq!(report.num_assigned_stops(), 5);
}

#[test]
fn test_demand_at_integer_limit_is_unassigned() {
    let mut problem = scenario();
    problem.stops[3].demand = Some(u64::MAX);

    let report = solve(problem.build_problem().unwrap(), SolverParams::default()).unwrap();

    assert_eq!(report.unassigned.len(), 1);
    assert_eq!(report.unassigned[0].stop, StopIdx::new(3));
    assert_eq!(report.unassigned[0].reason, UnassignedReason::ExceedsCapacity);
}

#[test]
fn test_unbounded_horizon_and_waiting() {
    let json = r#"{
        "stops": [
            { "lat": 12.9716, "lon": 77.5946, "window_start": 0, "window_end": 18446744073709551615 },
            { "lat": 12.9800, "lon": 77.6000 }
        ],
        "max_waiting_minutes": 18446744073709551615
    }"#;
    let problem = serde_json::from_str::<JsonDispatchProblem>(json)
        .unwrap()
        .build_problem()
        .unwrap();

    let report = solve(problem, SolverParams::default()).unwrap();

    assert_eq!(visited(&report), vec![vec![1], vec![], vec![]]);
    assert_eq!(report.total_distance, 2204);
    assert!(report.unassigned.is_empty());
}

#[test]
fn test_travel_time_beyond_integer_range_is_unreachable() {
    let json = r#"{
        "stops": [
            { "lat": 12.9716, "lon": 77.5946 },
            { "lat": 12.9800, "lon": 77.6000 }
        ],
        "travel_times_seconds": [[0, 1e30], [1e30, 0]]
    }"#;
    let problem = serde_json::from_str::<JsonDispatchProblem>(json)
        .unwrap()
        .build_problem()
        .unwrap();

    let report = solve(problem, SolverParams::default()).unwrap();

    assert_eq!(report.total_distance, 0);
    assert_eq!(
        report
            .unassigned
            .iter()
            .map(|unassigned| (unassigned.stop.get(), unassigned.reason))
            .collect::<Vec<_>>(),
        vec![(1, UnassignedReason::TimeWindowUnreachable)]
    );
}

#[test]
fn test_fleet_too_small_leaves_stops_unassigned() {
    let mut problem = scenario();
    problem.fleet.num_vehicles = 1;

    let report = solve(problem.build_problem().unwrap(), SolverParams::default()).unwrap();

    assert_eq!(report.num_assigned_stops(), 3);
    assert_eq!(
        report
            .unassigned
            .iter()
            .map(|unassigned| (unassigned.stop.get(), unassigned.reason))
            .collect::<Vec<_>>(),
        vec![
            (3, UnassignedReason::NoFeasibleRoute),
            (4, UnassignedReason::NoFeasibleRoute),
            (6, UnassignedReason::NoFeasibleRoute),
        ]
    );
}

#[test]
fn test_local_search_is_idempotent() {
    let problem = Arc::new(scenario_problem());
    let report = solve(scenario_problem(), SolverParams::default()).unwrap();

    let sequences = visited(&report)
        .into_iter()
        .map(|route| route.into_iter().map(StopIdx::new).collect())
        .collect();
    let mut solution = WorkingSolution::from_routes(problem, sequences).unwrap();

    let statistics = LocalSearch::new(SearchBudget::default(), &AcceptanceStrategy::default())
        .improve(&mut solution);

    assert_eq!(statistics.accepted_moves, 0);
    assert_eq!(statistics.stop_reason, StopReason::Converged);
    assert_eq!(solution.total_distance(), report.total_distance);
}

#[test]
fn test_local_search_repairs_poor_solution() {
    let problem = Arc::new(scenario_problem());
    let sequences = vec![
        vec![StopIdx::new(5), StopIdx::new(1), StopIdx::new(2)],
        vec![StopIdx::new(4), StopIdx::new(3), StopIdx::new(6)],
    ];
    let mut solution = WorkingSolution::from_routes(problem, sequences).unwrap();
    assert_eq!(solution.total_distance(), 21340);

    let statistics = LocalSearch::new(SearchBudget::default(), &AcceptanceStrategy::default())
        .improve(&mut solution);

    assert_eq!(statistics.final_distance, 16641);
    assert_eq!(statistics.accepted_moves, 3);
    assert_eq!(statistics.iterations, 4);
    assert_eq!(statistics.accepted_by_operator.get("relocate"), Some(&3));

    let report = SolutionReport::summarize(&solution).with_search_statistics(statistics);
    assert_eq!(visited(&report), vec![vec![1, 5, 2], vec![4, 6, 3], vec![]]);
}
