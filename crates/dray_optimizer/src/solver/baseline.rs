use dray_matrix::Meters;

use crate::problem::{
    location::{DEPOT_LOCATION, LocationIdx},
    routing_problem::RoutingProblem,
};

/// Distance of the unoptimized reference: stops dealt round-robin in input
/// order across the fleet, each chain driven depot to depot.
///
/// Ignores capacity and windows entirely; the number only exists so the
/// optimized result has something to be compared against. Never returned
/// as a plan.
pub fn baseline_distance(problem: &RoutingProblem) -> Meters {
    let num_vehicles = problem.fleet().len();

    if num_vehicles == 0 || problem.num_stops() == 0 {
        return Meters::ZERO;
    }

    let mut chains: Vec<Vec<LocationIdx>> = vec![Vec::new(); num_vehicles];

    for (index, stop) in problem.stops().iter().enumerate() {
        chains[index % num_vehicles].push(stop.location_id());
    }

    let mut total = Meters::ZERO;

    for chain in &chains {
        let mut from = DEPOT_LOCATION;

        for &location_id in chain {
            total += problem.travel_distance(from, location_id);
            from = location_id;
        }

        total += problem.travel_distance(from, DEPOT_LOCATION);
    }

    total
}
