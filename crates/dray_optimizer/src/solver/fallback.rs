use std::sync::Arc;

use tracing::{debug, instrument};

use crate::{
    problem::routing_problem::RoutingProblem,
    solver::{
        feasibility::FeasibilityModel,
        insertion::StopInsertion,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

/// Deterministic nearest-feasible-neighbor routing.
///
/// Fills vehicles one at a time in fleet order (the order the request
/// listed them, not by external id): from wherever the route
/// currently ends, walk the unassigned stops nearest-first through the
/// spatial index and append the first one the feasibility model accepts.
/// A vehicle that can take nothing more hands over to the next one.
///
/// Runs in bounded time, never fails, and leaves whatever the fleet cannot
/// serve in the unassigned set rather than dropping it.
#[instrument(skip_all, level = "debug")]
pub fn greedy_fallback(problem: &Arc<RoutingProblem>) -> WorkingSolution {
    let mut solution = WorkingSolution::new(Arc::clone(problem));
    let model = FeasibilityModel::new(problem.as_ref());

    for route_id in (0..problem.fleet().len()).map(RouteIdx::new) {
        loop {
            if !solution.has_unassigned() {
                break;
            }

            let route = solution.route(route_id);
            let from = route.last_location(problem);

            let next = problem
                .nearest_stops_of_location(from)
                .filter(|&stop_id| solution.is_unassigned(stop_id))
                .find(|&stop_id| model.can_append(route, stop_id));

            match next {
                Some(stop_id) => {
                    let position = solution.route(route_id).len();
                    solution.insert(&StopInsertion {
                        route_id,
                        stop_id,
                        position,
                    });
                }
                None => break,
            }
        }
    }

    debug!(
        unassigned = solution.num_unassigned(),
        routes = solution.non_empty_routes_iter().count(),
        "greedy fallback finished"
    );

    solution
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use jiff::SignedDuration;

    use super::*;
    use crate::problem::fleet::Fleet;
    use crate::problem::routing_problem::RoutingProblemBuilder;
    use crate::problem::stop::{StopBuilder, StopIdx};
    use crate::problem::time_window::TimeWindow;
    use crate::test_utils::{
        create_basic_stops, create_basic_vehicles, create_locations, create_test_problem_arc,
    };

    #[test]
    fn visits_collinear_stops_nearest_first() {
        let problem = create_test_problem_arc(4, 1);

        let solution = greedy_fallback(&problem);

        assert!(!solution.has_unassigned());
        let order: Vec<usize> = solution
            .route(RouteIdx::new(0))
            .stop_ids()
            .iter()
            .map(|id| id.get())
            .collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn hands_over_to_the_next_vehicle_when_full() {
        let locations = create_locations(vec![(0.0, 0.0), (0.1, 0.0), (0.2, 0.0)]);
        let stops = vec![
            {
                let mut builder = StopBuilder::default();
                builder.set_stop_id(0);
                builder.set_location_id(1);
                builder.set_demand(60.0);
                builder.build()
            },
            {
                let mut builder = StopBuilder::default();
                builder.set_stop_id(1);
                builder.set_location_id(2);
                builder.set_demand(60.0);
                builder.build()
            },
        ];

        let mut builder = RoutingProblemBuilder::default();
        builder.set_locations(locations);
        builder.set_stops(stops);
        builder.set_fleet(Fleet::new(create_basic_vehicles(2)));
        let problem = Arc::new(builder.build().unwrap());

        let solution = greedy_fallback(&problem);

        assert!(!solution.has_unassigned());
        assert_eq!(
            solution.route(RouteIdx::new(0)).stop_ids(),
            &[StopIdx::new(0)]
        );
        assert_eq!(
            solution.route(RouteIdx::new(1)).stop_ids(),
            &[StopIdx::new(1)]
        );
    }

    #[test]
    fn reports_what_the_fleet_cannot_serve() {
        let locations = create_locations(vec![(0.0, 0.0), (0.1, 0.0), (0.5, 0.0)]);
        let stops = vec![
            {
                let mut builder = StopBuilder::default();
                builder.set_stop_id(0);
                builder.set_location_id(1);
                builder.build()
            },
            {
                let mut builder = StopBuilder::default();
                builder.set_stop_id(1);
                builder.set_location_id(2);
                builder.set_time_window(TimeWindow::new(
                    SignedDuration::ZERO,
                    SignedDuration::from_mins(5),
                ));
                builder.build()
            },
        ];

        let mut builder = RoutingProblemBuilder::default();
        builder.set_locations(locations);
        builder.set_stops(stops);
        builder.set_fleet(Fleet::new(create_basic_vehicles(1)));
        let problem = Arc::new(builder.build().unwrap());

        let solution = greedy_fallback(&problem);

        assert_eq!(solution.num_unassigned(), 1);
        assert!(solution.is_unassigned(StopIdx::new(1)));
        assert_eq!(
            solution.route(RouteIdx::new(0)).stop_ids(),
            &[StopIdx::new(0)]
        );
    }

    #[test]
    fn an_empty_fleet_serves_nobody() {
        let locations = create_locations(vec![(0.0, 0.0), (0.1, 0.0)]);
        let stops = create_basic_stops(vec![1]);

        let mut builder = RoutingProblemBuilder::default();
        builder.set_locations(locations);
        builder.set_stops(stops);
        builder.set_fleet(Fleet::new(vec![]));
        let problem = Arc::new(builder.build().unwrap());

        let solution = greedy_fallback(&problem);

        assert_eq!(solution.num_unassigned(), 1);
        assert!(solution.routes().is_empty());
    }
}
