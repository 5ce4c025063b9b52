use crate::{
    define_index_newtype, problem::vehicle::VehicleIdx, solver::solution::route::WorkingRoute,
};

define_index_newtype!(RouteIdx, WorkingRoute);

// Routes are laid out in fleet order, one per vehicle.
impl From<VehicleIdx> for RouteIdx {
    fn from(vehicle_id: VehicleIdx) -> Self {
        RouteIdx::new(vehicle_id.get())
    }
}
