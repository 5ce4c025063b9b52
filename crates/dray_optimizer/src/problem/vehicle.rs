use crate::{define_index_newtype, problem::time_window::TimeWindow};

define_index_newtype!(VehicleIdx, Vehicle);

/// A capacity-limited vehicle. Vehicles are fungible apart from capacity
/// and availability; every route starts and ends at the shared depot.
#[derive(Debug, Clone)]
pub struct Vehicle {
    external_id: u64,
    capacity: f64,
    availability: TimeWindow,
}

impl Vehicle {
    pub fn external_id(&self) -> u64 {
        self.external_id
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// When the vehicle may be on the road: it leaves the depot at the
    /// start and must be back by the end.
    pub fn availability(&self) -> &TimeWindow {
        &self.availability
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    external_id: Option<u64>,
    capacity: Option<f64>,
    availability: Option<TimeWindow>,
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, external_id: u64) -> &mut VehicleBuilder {
        self.external_id = Some(external_id);
        self
    }

    pub fn set_capacity(&mut self, capacity: f64) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_availability(&mut self, availability: TimeWindow) -> &mut VehicleBuilder {
        self.availability = Some(availability);
        self
    }

    pub fn build(self) -> Vehicle {
        Vehicle {
            external_id: self.external_id.expect("Vehicle ID is required"),
            capacity: self.capacity.unwrap_or(0.0),
            availability: self.availability.unwrap_or_default(),
        }
    }
}
