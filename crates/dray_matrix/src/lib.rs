pub mod travel_matrix;
pub mod units;

pub use travel_matrix::{InvalidCoordinate, TravelMatrix};
pub use units::{Kmh, Meters};
