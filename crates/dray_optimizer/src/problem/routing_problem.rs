use dray_matrix::{InvalidCoordinate, Kmh, Meters, TravelMatrix};
use jiff::SignedDuration;

use crate::problem::{
    fleet::Fleet,
    location::{DEPOT_LOCATION, Location, LocationIdx},
    stop::{Stop, StopIdx},
    stop_index::StopIndex,
    vehicle::{Vehicle, VehicleIdx},
};

/// Fallback travel speed when the request does not supply one.
pub const DEFAULT_SPEED: Kmh = Kmh::new(32.0);

#[derive(Debug)]
pub struct RoutingProblem {
    locations: Vec<Location>,
    stops: Vec<Stop>,
    fleet: Fleet,
    matrix: TravelMatrix,
    stop_index: StopIndex,

    precomputed_total_demand: f64,
    precomputed_max_stop_demand: f64,
}

impl RoutingProblem {
    fn new(locations: Vec<Location>, stops: Vec<Stop>, fleet: Fleet, matrix: TravelMatrix) -> Self {
        let stop_index = StopIndex::new(&locations, &stops);

        let precomputed_total_demand = stops.iter().map(|stop| stop.demand()).sum();
        let precomputed_max_stop_demand = stops
            .iter()
            .map(|stop| stop.demand())
            .fold(0.0_f64, f64::max);

        Self {
            locations,
            stops,
            fleet,
            matrix,
            stop_index,
            precomputed_total_demand,
            precomputed_max_stop_demand,
        }
    }

    pub fn depot(&self) -> &Location {
        &self.locations[DEPOT_LOCATION]
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn location(&self, location_id: LocationIdx) -> &Location {
        &self.locations[location_id]
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn stop(&self, stop_id: StopIdx) -> &Stop {
        &self.stops[stop_id]
    }

    pub fn num_stops(&self) -> usize {
        self.stops.len()
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn vehicle(&self, vehicle_id: VehicleIdx) -> &Vehicle {
        self.fleet.vehicle(vehicle_id)
    }

    pub fn travel_distance(&self, from: LocationIdx, to: LocationIdx) -> Meters {
        self.matrix.distance(from.get(), to.get())
    }

    pub fn travel_time(&self, from: LocationIdx, to: LocationIdx) -> SignedDuration {
        self.matrix.travel_time(from.get(), to.get())
    }

    pub fn nearest_stops_of_location(
        &self,
        location_id: LocationIdx,
    ) -> impl Iterator<Item = StopIdx> {
        let location = &self.locations[location_id];
        self.stop_index.nearest_neighbor_iter(location)
    }

    pub fn total_demand(&self) -> f64 {
        self.precomputed_total_demand
    }

    pub fn max_stop_demand(&self) -> f64 {
        self.precomputed_max_stop_demand
    }
}

#[derive(Default)]
pub struct RoutingProblemBuilder {
    locations: Option<Vec<Location>>,
    stops: Option<Vec<Stop>>,
    fleet: Option<Fleet>,
    speed: Option<Kmh>,
}

impl RoutingProblemBuilder {
    pub fn set_locations(&mut self, locations: Vec<Location>) -> &mut RoutingProblemBuilder {
        self.locations = Some(locations);
        self
    }

    pub fn add_location(&mut self, location: Location) -> &mut RoutingProblemBuilder {
        if let Some(locations) = &mut self.locations {
            locations.push(location);
        } else {
            self.locations = Some(vec![location]);
        }

        self
    }

    pub fn set_stops(&mut self, stops: Vec<Stop>) -> &mut RoutingProblemBuilder {
        self.stops = Some(stops);
        self
    }

    pub fn set_fleet(&mut self, fleet: Fleet) -> &mut RoutingProblemBuilder {
        self.fleet = Some(fleet);
        self
    }

    pub fn set_speed(&mut self, speed: Kmh) -> &mut RoutingProblemBuilder {
        self.speed = Some(speed);
        self
    }

    /// Location 0 is the depot. Stop order is preserved as given.
    pub fn build(self) -> Result<RoutingProblem, InvalidCoordinate> {
        let locations = self.locations.expect("Expected list of locations");
        let stops = self.stops.expect("Expected list of stops");

        if locations.is_empty() {
            panic!("Expected at least the depot location");
        }

        for stop in stops.iter() {
            if stop.location_id().get() >= locations.len() {
                panic!("Stop location_id must be within the range of locations");
            }
        }

        let speed = self.speed.unwrap_or(DEFAULT_SPEED);
        let points: Vec<geo::Point> = locations.iter().map(geo::Point::from).collect();
        let matrix = TravelMatrix::from_points(&points, speed)?;

        Ok(RoutingProblem::new(
            locations,
            stops,
            self.fleet.expect("Expected fleet"),
            matrix,
        ))
    }
}
