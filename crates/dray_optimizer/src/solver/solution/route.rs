use dray_matrix::Meters;
use jiff::SignedDuration;

use crate::{
    problem::{
        location::{DEPOT_LOCATION, LocationIdx},
        routing_problem::RoutingProblem,
        stop::StopIdx,
        vehicle::{Vehicle, VehicleIdx},
    },
    solver::feasibility::RouteSchedule,
};

/// One vehicle's route under construction. The stop sequence and its
/// schedule are kept in lockstep: every mutation goes through
/// [`WorkingRoute::set_schedule`] with a schedule simulated for the new
/// sequence.
#[derive(Clone)]
pub struct WorkingRoute {
    vehicle_id: VehicleIdx,

    stop_ids: Vec<StopIdx>,

    /// Arrival time at each stop, before any waiting.
    arrivals: Vec<SignedDuration>,

    /// Waiting time at each stop before its window opens.
    waits: Vec<SignedDuration>,

    /// Departure time from each stop.
    departures: Vec<SignedDuration>,

    /// Cumulative demand delivered after each stop.
    loads: Vec<f64>,

    distance: Meters,
    duration: SignedDuration,
    return_arrival: SignedDuration,
}

impl WorkingRoute {
    pub fn empty(problem: &RoutingProblem, vehicle_id: VehicleIdx) -> Self {
        let start = problem.vehicle(vehicle_id).availability().start();

        WorkingRoute {
            vehicle_id,
            stop_ids: Vec::new(),
            arrivals: Vec::new(),
            waits: Vec::new(),
            departures: Vec::new(),
            loads: Vec::new(),
            distance: Meters::ZERO,
            duration: SignedDuration::ZERO,
            return_arrival: start,
        }
    }

    pub fn len(&self) -> usize {
        self.stop_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_ids.is_empty()
    }

    pub fn vehicle_id(&self) -> VehicleIdx {
        self.vehicle_id
    }

    pub fn vehicle<'a>(&self, problem: &'a RoutingProblem) -> &'a Vehicle {
        problem.vehicle(self.vehicle_id)
    }

    pub fn stop_ids(&self) -> &[StopIdx] {
        &self.stop_ids
    }

    pub fn stop_id(&self, position: usize) -> StopIdx {
        self.stop_ids[position]
    }

    pub fn contains_stop(&self, stop_id: StopIdx) -> bool {
        self.stop_ids.contains(&stop_id)
    }

    pub fn arrival(&self, position: usize) -> SignedDuration {
        self.arrivals[position]
    }

    pub fn wait(&self, position: usize) -> SignedDuration {
        self.waits[position]
    }

    pub fn departure(&self, position: usize) -> SignedDuration {
        self.departures[position]
    }

    pub fn load_after(&self, position: usize) -> f64 {
        self.loads[position]
    }

    /// Total demand carried by the route.
    pub fn load(&self) -> f64 {
        self.loads.last().copied().unwrap_or(0.0)
    }

    pub fn total_waiting_duration(&self) -> SignedDuration {
        self.waits.iter().sum()
    }

    pub fn distance(&self) -> Meters {
        self.distance
    }

    pub fn duration(&self) -> SignedDuration {
        self.duration
    }

    /// Arrival time back at the depot.
    pub fn return_arrival(&self) -> SignedDuration {
        self.return_arrival
    }

    /// Location of the last stop, or the depot for an empty route.
    pub fn last_location(&self, problem: &RoutingProblem) -> LocationIdx {
        self.stop_ids
            .last()
            .map(|&stop_id| problem.stop(stop_id).location_id())
            .unwrap_or(DEPOT_LOCATION)
    }

    /// Departure time from the last stop, or the vehicle's availability
    /// start for an empty route.
    pub fn departure_from_last(&self, problem: &RoutingProblem) -> SignedDuration {
        self.departures
            .last()
            .copied()
            .unwrap_or_else(|| self.vehicle(problem).availability().start())
    }

    /// Location id of the stop at `position`, the depot when it points past
    /// the end.
    pub fn location_at(&self, problem: &RoutingProblem, position: usize) -> LocationIdx {
        self.stop_ids
            .get(position)
            .map(|&stop_id| problem.stop(stop_id).location_id())
            .unwrap_or(DEPOT_LOCATION)
    }

    /// Location id of the stop before `position`, the depot at the front.
    pub fn location_before(&self, problem: &RoutingProblem, position: usize) -> LocationIdx {
        if position == 0 {
            DEPOT_LOCATION
        } else {
            problem.stop(self.stop_ids[position - 1]).location_id()
        }
    }

    pub(crate) fn set_schedule(&mut self, stop_ids: Vec<StopIdx>, schedule: RouteSchedule) {
        self.stop_ids = stop_ids;
        self.arrivals = schedule.arrivals;
        self.waits = schedule.waits;
        self.departures = schedule.departures;
        self.loads = schedule.loads;
        self.distance = schedule.distance;
        self.duration = schedule.duration;
        self.return_arrival = schedule.return_arrival;
    }
}
