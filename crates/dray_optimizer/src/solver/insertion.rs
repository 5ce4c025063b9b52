use crate::{
    problem::stop::StopIdx,
    solver::solution::{route_id::RouteIdx, working_solution::WorkingSolution},
};

#[derive(Clone, Debug)]
pub struct StopInsertion {
    pub route_id: RouteIdx,
    pub stop_id: StopIdx,
    pub position: usize,
}

/// Visits every position the stop could take in the given routes, including
/// the tail position of each.
pub fn for_each_insertion(
    solution: &WorkingSolution,
    route_ids: &[RouteIdx],
    stop_id: StopIdx,
    mut f: impl FnMut(StopInsertion),
) {
    for &route_id in route_ids {
        let route = solution.route(route_id);

        for position in 0..=route.len() {
            f(StopInsertion {
                route_id,
                stop_id,
                position,
            });
        }
    }
}
