use dray_matrix::Meters;
use jiff::SignedDuration;

use crate::{
    problem::{
        location::{DEPOT_LOCATION, LocationIdx},
        routing_problem::RoutingProblem,
        stop::StopIdx,
        vehicle::VehicleIdx,
    },
    solver::solution::route::WorkingRoute,
};

/// Timing and load data for one simulated route. All times are offsets from
/// the start of the planning day.
#[derive(Clone, Debug)]
pub struct RouteSchedule {
    pub arrivals: Vec<SignedDuration>,
    pub waits: Vec<SignedDuration>,
    pub departures: Vec<SignedDuration>,

    /// Cumulative demand delivered after each stop.
    pub loads: Vec<f64>,

    pub distance: Meters,
    pub return_arrival: SignedDuration,
    pub duration: SignedDuration,
}

/// Judges whether a stop sequence is drivable by a vehicle.
///
/// Construction, local search and the greedy fallback all evaluate sequences
/// through this model, so a route one of them accepts is a route all of them
/// accept.
pub struct FeasibilityModel<'a> {
    problem: &'a RoutingProblem,
}

impl<'a> FeasibilityModel<'a> {
    pub fn new(problem: &'a RoutingProblem) -> Self {
        FeasibilityModel { problem }
    }

    /// Walks the sequence from the depot and back. A sequence is feasible
    /// when its total demand fits the vehicle, every arrival falls before
    /// the stop's window closes (arriving early waits), and the vehicle is
    /// back at the depot before its availability ends.
    pub fn simulate(&self, vehicle_id: VehicleIdx, stop_ids: &[StopIdx]) -> Option<RouteSchedule> {
        let vehicle = self.problem.vehicle(vehicle_id);

        let total_demand: f64 = stop_ids
            .iter()
            .map(|&stop_id| self.problem.stop(stop_id).demand())
            .sum();
        if total_demand > vehicle.capacity() {
            return None;
        }

        let mut arrivals = Vec::with_capacity(stop_ids.len());
        let mut waits = Vec::with_capacity(stop_ids.len());
        let mut departures = Vec::with_capacity(stop_ids.len());
        let mut loads = Vec::with_capacity(stop_ids.len());

        let start = vehicle.availability().start();
        let mut cursor = start;
        let mut from = DEPOT_LOCATION;
        let mut distance = Meters::ZERO;
        let mut delivered = 0.0;

        for &stop_id in stop_ids {
            let (arrival, wait, departure) = self.step(cursor, from, stop_id)?;

            let stop = self.problem.stop(stop_id);
            distance += self.problem.travel_distance(from, stop.location_id());
            delivered += stop.demand();

            arrivals.push(arrival);
            waits.push(wait);
            departures.push(departure);
            loads.push(delivered);

            cursor = departure;
            from = stop.location_id();
        }

        distance += self.problem.travel_distance(from, DEPOT_LOCATION);
        let return_arrival = cursor + self.problem.travel_time(from, DEPOT_LOCATION);

        if return_arrival > vehicle.availability().end() {
            return None;
        }

        Some(RouteSchedule {
            arrivals,
            waits,
            departures,
            loads,
            distance,
            return_arrival,
            duration: return_arrival - start,
        })
    }

    pub fn is_feasible(&self, vehicle_id: VehicleIdx, stop_ids: &[StopIdx]) -> bool {
        self.simulate(vehicle_id, stop_ids).is_some()
    }

    /// Appending only extends the tail, so this checks the new leg, the new
    /// return leg and the added demand against the route's end state.
    pub fn can_append(&self, route: &WorkingRoute, stop_id: StopIdx) -> bool {
        let vehicle = self.problem.vehicle(route.vehicle_id());
        let stop = self.problem.stop(stop_id);

        if route.load() + stop.demand() > vehicle.capacity() {
            return false;
        }

        let cursor = route.departure_from_last(self.problem);
        let from = route.last_location(self.problem);

        let Some((_, _, departure)) = self.step(cursor, from, stop_id) else {
            return false;
        };

        let return_arrival =
            departure + self.problem.travel_time(stop.location_id(), DEPOT_LOCATION);

        return_arrival <= vehicle.availability().end()
    }

    /// Inserting resequences everything after the position, so the whole
    /// spliced route is walked again.
    pub fn can_insert_at(&self, route: &WorkingRoute, position: usize, stop_id: StopIdx) -> bool {
        let mut stop_ids = route.stop_ids().to_vec();
        stop_ids.insert(position, stop_id);

        self.is_feasible(route.vehicle_id(), &stop_ids)
    }

    /// One leg of the walk: from the previous departure to arrival, waiting
    /// and departure at the next stop. None when the window has closed.
    fn step(
        &self,
        previous_departure: SignedDuration,
        from: LocationIdx,
        stop_id: StopIdx,
    ) -> Option<(SignedDuration, SignedDuration, SignedDuration)> {
        let stop = self.problem.stop(stop_id);
        let arrival = previous_departure + self.problem.travel_time(from, stop.location_id());

        if !stop.time_window().admits(arrival) {
            return None;
        }

        let service_start = stop.time_window().service_start(arrival);
        let wait = service_start - arrival;
        let departure = service_start + stop.service_duration();

        Some((arrival, wait, departure))
    }
}
