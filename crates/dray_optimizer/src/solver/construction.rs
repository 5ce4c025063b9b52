use std::cmp::Reverse;

use tracing::{debug, instrument};

use crate::{
    problem::stop::StopIdx,
    solver::{
        budget::BudgetTracker,
        feasibility::FeasibilityModel,
        insertion::{StopInsertion, for_each_insertion},
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
        statistics::SearchStatistics,
    },
};

/// Cheapest-insertion construction.
///
/// Repeatedly applies the (stop, route, position) insertion with the
/// smallest marginal distance increase among those the feasibility model
/// accepts. Routes open lazily in fleet order: a vehicle only joins the
/// scan once no open route can take any remaining stop. Stops that fit
/// nowhere even with the whole fleet open stay unassigned.
///
/// Returns false when the budget ran out while unassigned stops might
/// still have been insertable; the caller treats that as an incomplete
/// search.
#[instrument(skip_all, level = "debug")]
pub fn construct(
    solution: &mut WorkingSolution,
    model: &FeasibilityModel,
    tracker: &mut BudgetTracker,
    statistics: &mut SearchStatistics,
) -> bool {
    let num_vehicles = solution.problem().fleet().len();
    let mut open_routes = usize::min(1, num_vehicles);

    loop {
        if !solution.has_unassigned() {
            break;
        }

        if !tracker.checkpoint() {
            debug!(
                unassigned = solution.num_unassigned(),
                "construction ran out of budget"
            );
            return false;
        }

        match best_insertion(solution, model, open_routes) {
            Some(insertion) => {
                solution.insert(&insertion);
                statistics.construction_insertions += 1;
            }
            None if open_routes < num_vehicles => {
                open_routes += 1;
                debug!(open_routes, "opening the next vehicle");
            }
            None => {
                // The whole fleet is open and nothing fits anywhere.
                debug!(
                    unassigned = solution.num_unassigned(),
                    "remaining stops cannot be inserted"
                );
                break;
            }
        }
    }

    debug!(
        insertions = statistics.construction_insertions,
        unassigned = solution.num_unassigned(),
        "construction finished"
    );

    true
}

/// The feasible insertion with the smallest marginal distance increase.
/// Ties break toward the earliest stop in request order, then the earliest
/// vehicle in fleet order, then the latest position, which keeps the
/// committed visit order stable. External ids play no part; two requests
/// listing the same stops in the same order tie-break identically no
/// matter how they are numbered.
fn best_insertion(
    solution: &WorkingSolution,
    model: &FeasibilityModel,
    open_routes: usize,
) -> Option<StopInsertion> {
    let route_ids: Vec<RouteIdx> = (0..open_routes).map(RouteIdx::new).collect();

    let mut stop_ids: Vec<StopIdx> = solution.unassigned_stops().iter().copied().collect();
    stop_ids.sort_unstable();

    let mut best: Option<(f64, StopInsertion)> = None;

    for stop_id in stop_ids {
        for_each_insertion(solution, &route_ids, stop_id, |insertion| {
            let route = solution.route(insertion.route_id);

            if !model.can_insert_at(route, insertion.position, insertion.stop_id) {
                return;
            }

            let delta = marginal_distance(solution, &insertion);

            let replaces = match &best {
                None => true,
                Some((best_delta, best_insertion)) => match delta.total_cmp(best_delta) {
                    std::cmp::Ordering::Less => true,
                    std::cmp::Ordering::Greater => false,
                    std::cmp::Ordering::Equal => {
                        key_of(&insertion) < key_of(best_insertion)
                    }
                },
            };

            if replaces {
                best = Some((delta, insertion));
            }
        });
    }

    best.map(|(_, insertion)| insertion)
}

fn key_of(insertion: &StopInsertion) -> (StopIdx, RouteIdx, Reverse<usize>) {
    (
        insertion.stop_id,
        insertion.route_id,
        Reverse(insertion.position),
    )
}

/// Distance added by splicing the stop between its would-be neighbors.
fn marginal_distance(solution: &WorkingSolution, insertion: &StopInsertion) -> f64 {
    let problem = solution.problem();
    let route = solution.route(insertion.route_id);

    let stop = problem.stop(insertion.stop_id).location_id();
    let prev = route.location_before(problem, insertion.position);
    let next = route.location_at(problem, insertion.position);

    problem.travel_distance(prev, stop).value() + problem.travel_distance(stop, next).value()
        - problem.travel_distance(prev, next).value()
}
