use crate::define_index_newtype;

define_index_newtype!(LocationIdx, Location);

/// The depot always occupies the first slot of the location list, and
/// therefore row/column 0 of the travel matrix.
pub const DEPOT_LOCATION: LocationIdx = LocationIdx::new(0);

#[derive(Debug, Clone)]
pub struct Location {
    point: geo::Point,
}

impl Location {
    pub fn from_lat_lon(lat: f64, lon: f64) -> Self {
        Self {
            point: geo::Point::new(lon, lat),
        }
    }

    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn point(&self) -> geo::Point {
        self.point
    }
}

impl From<&Location> for geo::Point<f64> {
    fn from(location: &Location) -> Self {
        location.point
    }
}
