//! End-to-end tests driving the JSON boundary: request in, plan out.

use std::sync::Arc;

use dray_optimizer::{
    error::OptimizeError,
    json::{request_builder::build_problem, types::JsonOptimizeRequest},
    plan::{RoutePlan, SolverMode},
    problem::routing_problem::RoutingProblem,
    solver::{
        budget::{BudgetTracker, SearchBudget},
        engine::Optimizer,
        params::SolverParams,
        search::{SearchIncomplete, SearchStrategy},
        solution::working_solution::WorkingSolution,
        statistics::SearchStatistics,
    },
};

fn parse(value: serde_json::Value) -> JsonOptimizeRequest {
    serde_json::from_value(value).unwrap()
}

fn solve(value: serde_json::Value) -> Result<RoutePlan, OptimizeError> {
    let (problem, params) = build_problem(&parse(value))?;
    Optimizer::new(params).solve(&Arc::new(problem))
}

fn served_ids(plan: &RoutePlan) -> Vec<u64> {
    let mut ids: Vec<u64> = plan
        .routes
        .iter()
        .flat_map(|route| route.stops.iter().map(|stop| stop.id))
        .collect();
    ids.sort_unstable();
    ids
}

#[test]
fn london_scenario_visits_the_nearer_stop_first() {
    let plan = solve(serde_json::json!({
        "depot": {"lat": 51.5074, "lng": -0.1278},
        "stops": [
            {"id": 1, "lat": 51.5155, "lng": -0.1420, "label": "A", "demand": 1.0,
             "tw_start": "09:00", "tw_end": "17:00"},
            {"id": 2, "lat": 51.5000, "lng": -0.1000, "label": "B", "demand": 1.0,
             "tw_start": "08:00", "tw_end": "18:00"}
        ],
        "vehicles": [{"id": 1, "capacity": 5.0}],
        "budget": {"iterations": 100}
    }))
    .unwrap();

    assert_eq!(plan.mode, SolverMode::Search);
    assert!(plan.unassigned.is_empty());

    let route = &plan.routes[0];
    assert_eq!(route.stops.len(), 2);

    // A is the nearer of the two by haversine distance.
    assert_eq!(route.stops[0].id, 1);
    assert_eq!(route.stops[1].id, 2);

    // Arrival at A waits for its 09:00 window to open.
    assert!(route.stops[0].arrival_minutes < 9.0 * 60.0);
    assert!(route.stops[0].wait > jiff::SignedDuration::ZERO);

    assert_eq!(route.stops[0].load_after, 1.0);
    assert_eq!(route.stops[1].load_after, 2.0);

    assert!(plan.savings.unwrap() >= 0.0);
}

#[test]
fn grouping_stops_beats_the_round_robin_baseline() {
    // Four stops on a line east of the depot. The round-robin baseline
    // splits them across both vehicles and drives the strip twice; one
    // vehicle can serve all four in a single sweep.
    let plan = solve(serde_json::json!({
        "depot": {"lat": 0.0, "lng": 0.0},
        "stops": [
            {"id": 1, "lat": 0.0, "lng": 0.1, "demand": 1.0},
            {"id": 2, "lat": 0.0, "lng": 0.2, "demand": 1.0},
            {"id": 3, "lat": 0.0, "lng": 0.3, "demand": 1.0},
            {"id": 4, "lat": 0.0, "lng": 0.4, "demand": 1.0}
        ],
        "vehicles": [
            {"id": 1, "capacity": 10.0},
            {"id": 2, "capacity": 10.0}
        ],
        "budget": {"iterations": 500}
    }))
    .unwrap();

    assert_eq!(plan.mode, SolverMode::Search);
    assert!(plan.unassigned.is_empty());
    assert!(plan.total_distance < plan.baseline_distance);
    assert!(plan.savings.unwrap() > 0.0);
}

#[test]
fn every_stop_is_served_or_listed_never_lost() {
    let plan = solve(serde_json::json!({
        "depot": {"lat": 48.8566, "lng": 2.3522},
        "stops": [
            {"id": 11, "lat": 48.86, "lng": 2.34, "demand": 2.0},
            {"id": 12, "lat": 48.87, "lng": 2.36, "demand": 2.0},
            {"id": 13, "lat": 48.84, "lng": 2.37, "demand": 2.0},
            {"id": 14, "lat": 48.85, "lng": 2.33, "demand": 2.0},
            // Unservable: its window closes before anything can get there.
            {"id": 15, "lat": 48.40, "lng": 2.00, "demand": 2.0,
             "tw_start": 0, "tw_end": 5}
        ],
        "vehicles": [{"id": 1, "capacity": 100.0}],
        "budget": {"iterations": 500}
    }))
    .unwrap();

    assert_eq!(plan.unassigned, vec![15]);

    let mut all = served_ids(&plan);
    all.extend(&plan.unassigned);
    all.sort_unstable();
    assert_eq!(all, vec![11, 12, 13, 14, 15]);
}

#[test]
fn capacity_and_windows_hold_on_every_returned_route() {
    let plan = solve(serde_json::json!({
        "depot": {"lat": 51.5074, "lng": -0.1278},
        "stops": [
            {"id": 1, "lat": 51.52, "lng": -0.15, "demand": 3.0, "tw_start": "08:00", "tw_end": "12:00"},
            {"id": 2, "lat": 51.49, "lng": -0.12, "demand": 3.0, "tw_start": "08:00", "tw_end": "12:00"},
            {"id": 3, "lat": 51.51, "lng": -0.10, "demand": 3.0, "tw_start": "13:00", "tw_end": "18:00"},
            {"id": 4, "lat": 51.50, "lng": -0.14, "demand": 3.0, "tw_start": "13:00", "tw_end": "18:00"}
        ],
        "vehicles": [
            {"id": 1, "capacity": 6.0},
            {"id": 2, "capacity": 6.0}
        ],
        "budget": {"iterations": 500}
    }))
    .unwrap();

    assert!(plan.unassigned.is_empty());

    for route in &plan.routes {
        let mut previous_load = 0.0;
        for stop in &route.stops {
            assert!(stop.load_after >= previous_load);
            assert!(stop.load_after <= 6.0);
            previous_load = stop.load_after;

            // Service never starts after 18:00, the latest window end.
            let service_start =
                stop.arrival_minutes + stop.wait.as_secs_f64() / 60.0;
            assert!(service_start <= 18.0 * 60.0 + 1e-9);
        }
    }
}

#[test]
fn iteration_budgets_make_runs_reproducible() {
    let request = serde_json::json!({
        "depot": {"lat": 52.52, "lng": 13.405},
        "stops": [
            {"id": 1, "lat": 52.53, "lng": 13.41, "demand": 1.0},
            {"id": 2, "lat": 52.50, "lng": 13.39, "demand": 1.0},
            {"id": 3, "lat": 52.55, "lng": 13.45, "demand": 1.0},
            {"id": 4, "lat": 52.51, "lng": 13.35, "demand": 1.0},
            {"id": 5, "lat": 52.49, "lng": 13.44, "demand": 1.0},
            {"id": 6, "lat": 52.54, "lng": 13.38, "demand": 1.0},
            {"id": 7, "lat": 52.48, "lng": 13.37, "demand": 1.0},
            {"id": 8, "lat": 52.56, "lng": 13.42, "demand": 1.0}
        ],
        "vehicles": [
            {"id": 1, "capacity": 5.0},
            {"id": 2, "capacity": 5.0}
        ],
        "budget": {"iterations": 200}
    });

    let first = solve(request.clone()).unwrap();
    let second = solve(request).unwrap();

    assert_eq!(
        serde_json::to_value(&first.routes).unwrap(),
        serde_json::to_value(&second.routes).unwrap()
    );
    assert_eq!(first.total_distance, second.total_distance);
}

#[test]
fn excess_demand_is_proven_infeasible_with_the_shortfall() {
    let err = solve(serde_json::json!({
        "depot": {"lat": 0.0, "lng": 0.0},
        "stops": [
            {"id": 1, "lat": 0.0, "lng": 0.1, "demand": 5.0},
            {"id": 2, "lat": 0.0, "lng": 0.2, "demand": 5.0}
        ],
        "vehicles": [{"id": 1, "capacity": 5.0}]
    }))
    .unwrap_err();

    match err {
        OptimizeError::Infeasible {
            demand,
            capacity,
            shortfall,
        } => {
            assert_eq!(demand, 10.0);
            assert_eq!(capacity, 5.0);
            assert_eq!(shortfall, 5.0);
        }
        other => panic!("expected Infeasible, got {other}"),
    }
}

#[test]
fn an_empty_fleet_cannot_serve_stops() {
    let err = solve(serde_json::json!({
        "depot": {"lat": 0.0, "lng": 0.0},
        "stops": [{"id": 1, "lat": 0.0, "lng": 0.1, "demand": 1.0}],
        "vehicles": []
    }))
    .unwrap_err();

    assert!(matches!(err, OptimizeError::Infeasible { .. }));
}

#[test]
fn zero_stops_yield_a_trivial_empty_plan() {
    let plan = solve(serde_json::json!({
        "depot": {"lat": 0.0, "lng": 0.0},
        "stops": [],
        "vehicles": [{"id": 1, "capacity": 5.0}]
    }))
    .unwrap();

    assert_eq!(plan.mode, SolverMode::Search);
    assert!(plan.routes.iter().all(|route| route.stops.is_empty()));
    assert!(plan.unassigned.is_empty());
    assert_eq!(plan.savings, None);
}

struct NeverFinishes;

impl SearchStrategy for NeverFinishes {
    fn attempt(
        &self,
        _problem: &Arc<RoutingProblem>,
        _tracker: &mut BudgetTracker,
        _statistics: &mut SearchStatistics,
    ) -> Result<WorkingSolution, SearchIncomplete> {
        Err(SearchIncomplete)
    }
}

#[test]
fn the_fallback_reports_the_same_unservable_stop_as_the_search() {
    let request = serde_json::json!({
        "depot": {"lat": 0.0, "lng": 0.0},
        "stops": [
            {"id": 1, "lat": 0.0, "lng": 0.1, "demand": 1.0},
            // Roughly 55 km out with a five minute window: unreachable in
            // time from the depot under any routing.
            {"id": 2, "lat": 0.0, "lng": 0.5, "demand": 1.0,
             "tw_start": 0, "tw_end": 5}
        ],
        "vehicles": [{"id": 1, "capacity": 10.0}],
        "budget": {"iterations": 100}
    });

    let search_plan = solve(request.clone()).unwrap();
    assert_eq!(search_plan.mode, SolverMode::Search);
    assert_eq!(search_plan.unassigned, vec![2]);

    let (problem, params) = build_problem(&parse(request)).unwrap();
    let fallback_plan = Optimizer::with_strategy(params, Box::new(NeverFinishes))
        .solve(&Arc::new(problem))
        .unwrap();

    assert_eq!(fallback_plan.mode, SolverMode::Fallback);
    assert!(fallback_plan.note.is_some());
    assert_eq!(fallback_plan.unassigned, vec![2]);
    assert_eq!(served_ids(&fallback_plan), vec![1]);
}

#[test]
fn a_zero_budget_routes_through_the_fallback() {
    let (problem, _) = build_problem(&parse(serde_json::json!({
        "depot": {"lat": 0.0, "lng": 0.0},
        "stops": [
            {"id": 1, "lat": 0.0, "lng": 0.1, "demand": 1.0},
            {"id": 2, "lat": 0.0, "lng": 0.2, "demand": 1.0},
            {"id": 3, "lat": 0.0, "lng": 0.3, "demand": 1.0}
        ],
        "vehicles": [{"id": 1, "capacity": 10.0}]
    })))
    .unwrap();

    let params = SolverParams {
        budget: SearchBudget::Iterations(0),
        stop_signal: None,
    };

    let plan = Optimizer::new(params).solve(&Arc::new(problem)).unwrap();

    assert_eq!(plan.mode, SolverMode::Fallback);
    assert!(plan.unassigned.is_empty());
    assert_eq!(served_ids(&plan), vec![1, 2, 3]);
}
