use std::sync::Arc;

use crate::{
    problem::{
        fleet::Fleet,
        location::Location,
        routing_problem::{RoutingProblem, RoutingProblemBuilder},
        stop::{Stop, StopBuilder},
        vehicle::{Vehicle, VehicleBuilder},
    },
    solver::{
        insertion::StopInsertion,
        solution::{route_id::RouteIdx, working_solution::WorkingSolution},
    },
};

pub fn create_locations(coordinates: Vec<(f64, f64)>) -> Vec<Location> {
    coordinates
        .iter()
        .map(|&(lon, lat)| Location::from_lat_lon(lat, lon))
        .collect()
}

pub fn create_basic_stops(location_ids: Vec<usize>) -> Vec<Stop> {
    location_ids
        .iter()
        .enumerate()
        .map(|(index, &location_id)| {
            let mut builder = StopBuilder::default();
            builder.set_stop_id(index as u64);
            builder.set_location_id(location_id);
            builder.build()
        })
        .collect()
}

pub fn create_stop(stop_id: u64, location_id: usize, demand: f64) -> Stop {
    let mut builder = StopBuilder::default();
    builder.set_stop_id(stop_id);
    builder.set_location_id(location_id);
    builder.set_demand(demand);
    builder.build()
}

pub fn create_basic_vehicles(count: usize) -> Vec<Vehicle> {
    (0..count)
        .map(|index| {
            let mut builder = VehicleBuilder::default();
            builder.set_vehicle_id(index as u64);
            builder.set_capacity(100.0);
            builder.build()
        })
        .collect()
}

pub fn create_test_problem(
    locations: Vec<Location>,
    stops: Vec<Stop>,
    vehicles: Vec<Vehicle>,
) -> RoutingProblem {
    let mut builder = RoutingProblemBuilder::default();
    builder.set_locations(locations);
    builder.set_stops(stops);
    builder.set_fleet(Fleet::new(vehicles));

    builder.build().unwrap()
}

/// Depot at the origin with stops strung east along the equator, one tenth
/// of a degree apart in stop order.
pub fn create_test_problem_arc(num_stops: usize, num_vehicles: usize) -> Arc<RoutingProblem> {
    let mut coordinates = vec![(0.0, 0.0)];
    coordinates.extend((1..=num_stops).map(|i| (i as f64 * 0.1, 0.0)));

    let locations = create_locations(coordinates);
    let stops = create_basic_stops((1..=num_stops).collect());
    let vehicles = create_basic_vehicles(num_vehicles);

    Arc::new(create_test_problem(locations, stops, vehicles))
}

pub struct TestRoute {
    pub vehicle_id: usize,
    pub stop_ids: Vec<usize>,
}

pub fn create_test_working_solution(
    problem: Arc<RoutingProblem>,
    routes: Vec<TestRoute>,
) -> WorkingSolution {
    let mut solution = WorkingSolution::new(problem);

    for route in routes.iter() {
        for (index, &stop_id) in route.stop_ids.iter().enumerate() {
            solution.insert(&StopInsertion {
                route_id: RouteIdx::new(route.vehicle_id),
                stop_id: stop_id.into(),
                position: index,
            });
        }
    }

    solution
}
