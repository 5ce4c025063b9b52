use std::sync::Arc;

use dray_matrix::Meters;
use fxhash::FxHashSet;
use jiff::SignedDuration;

use crate::{
    problem::{routing_problem::RoutingProblem, stop::StopIdx, vehicle::VehicleIdx},
    solver::{
        feasibility::FeasibilityModel,
        insertion::StopInsertion,
        solution::{route::WorkingRoute, route_id::RouteIdx},
    },
};

#[derive(Clone)]
pub struct WorkingSolution {
    problem: Arc<RoutingProblem>,
    routes: Vec<WorkingRoute>,
    unassigned_stops: FxHashSet<StopIdx>,
}

impl WorkingSolution {
    /// Starts with one empty route per vehicle, in fleet order, and every
    /// stop unassigned.
    pub fn new(problem: Arc<RoutingProblem>) -> Self {
        let routes = problem
            .fleet()
            .vehicles()
            .iter()
            .enumerate()
            .map(|(vehicle_id, _)| WorkingRoute::empty(&problem, VehicleIdx::new(vehicle_id)))
            .collect::<Vec<_>>();
        let unassigned_stops = (0..problem.num_stops()).map(StopIdx::new).collect();

        WorkingSolution {
            problem,
            routes,
            unassigned_stops,
        }
    }

    pub fn problem(&self) -> &RoutingProblem {
        self.problem.as_ref()
    }

    pub fn routes(&self) -> &[WorkingRoute] {
        &self.routes
    }

    pub fn route(&self, route_id: RouteIdx) -> &WorkingRoute {
        &self.routes[route_id]
    }

    pub fn non_empty_routes_iter(&self) -> impl Iterator<Item = &WorkingRoute> {
        self.routes.iter().filter(|route| !route.is_empty())
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned_stops.is_empty()
    }

    pub fn is_unassigned(&self, stop_id: StopIdx) -> bool {
        self.unassigned_stops.contains(&stop_id)
    }

    pub fn unassigned_stops(&self) -> &FxHashSet<StopIdx> {
        &self.unassigned_stops
    }

    pub fn num_unassigned(&self) -> usize {
        self.unassigned_stops.len()
    }

    pub fn total_distance(&self) -> Meters {
        self.routes.iter().map(|route| route.distance()).sum()
    }

    pub fn total_duration(&self) -> SignedDuration {
        self.routes.iter().map(|route| route.duration()).sum()
    }

    /// Applies an insertion that was already judged feasible.
    pub fn insert(&mut self, insertion: &StopInsertion) {
        let route = &self.routes[insertion.route_id];
        let mut stop_ids = route.stop_ids().to_vec();
        stop_ids.insert(insertion.position, insertion.stop_id);

        let schedule = FeasibilityModel::new(self.problem.as_ref())
            .simulate(route.vehicle_id(), &stop_ids)
            .expect("insertion was checked feasible before applying");

        self.routes[insertion.route_id].set_schedule(stop_ids, schedule);
        self.unassigned_stops.remove(&insertion.stop_id);
    }

    /// Replaces a route's stop sequence with one that was already judged
    /// feasible. Assignment does not change, the stops merely move.
    pub fn replace_stops(&mut self, route_id: RouteIdx, stop_ids: Vec<StopIdx>) {
        let schedule = FeasibilityModel::new(self.problem.as_ref())
            .simulate(self.routes[route_id].vehicle_id(), &stop_ids)
            .expect("replacement sequence was checked feasible before applying");

        self.routes[route_id].set_schedule(stop_ids, schedule);
    }
}
