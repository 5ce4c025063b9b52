use std::fmt;
use std::sync::Arc;

use geo::{Distance, Haversine, Point};
use jiff::SignedDuration;
use thiserror::Error;
use tracing::debug;

use crate::units::{Kmh, Meters};

#[derive(Debug, Error)]
#[error("coordinate {index} out of range: latitude {latitude}, longitude {longitude}")]
pub struct InvalidCoordinate {
    pub index: usize,
    pub latitude: f64,
    pub longitude: f64,
}

/// Pairwise great-circle distances and travel times, stored flat.
/// The entry for a pair is at `from * num_points + to`.
///
/// Distances come from a spherical haversine formula, times from dividing
/// by a constant average speed, so the matrix is symmetric with a zero
/// diagonal. Built once per request and read-only afterwards.
pub struct TravelMatrix {
    distances: Arc<Vec<f64>>,
    times: Arc<Vec<f64>>,
    num_points: usize,
}

fn validate(index: usize, point: &Point) -> Result<(), InvalidCoordinate> {
    let latitude = point.y();
    let longitude = point.x();

    // NaN fails both range checks.
    if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) {
        Ok(())
    } else {
        Err(InvalidCoordinate {
            index,
            latitude,
            longitude,
        })
    }
}

impl TravelMatrix {
    pub fn from_points(points: &[Point], speed: Kmh) -> Result<Self, InvalidCoordinate> {
        for (index, point) in points.iter().enumerate() {
            validate(index, point)?;
        }

        let num_points = points.len();
        let mut distances = vec![0.0; num_points * num_points];
        let mut times = vec![0.0; num_points * num_points];

        // Each unordered pair is computed once so both halves are
        // bit-identical.
        for (i, from) in points.iter().enumerate() {
            for (j, to) in points.iter().enumerate().skip(i + 1) {
                let distance = Haversine.distance(*from, *to);
                let seconds = (Meters::new(distance) / speed).as_secs_f64();

                distances[i * num_points + j] = distance;
                distances[j * num_points + i] = distance;
                times[i * num_points + j] = seconds;
                times[j * num_points + i] = seconds;
            }
        }

        debug!(num_points, speed_kmh = speed.value(), "built travel matrix");

        Ok(TravelMatrix {
            distances: Arc::new(distances),
            times: Arc::new(times),
            num_points,
        })
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_points + to
    }

    #[inline(always)]
    pub fn distance(&self, from: usize, to: usize) -> Meters {
        if from == to {
            return Meters::ZERO;
        }

        Meters::new(self.distances[self.index(from, to)])
    }

    #[inline(always)]
    pub fn travel_time(&self, from: usize, to: usize) -> SignedDuration {
        if from == to {
            return SignedDuration::ZERO;
        }

        SignedDuration::from_secs_f64(self.times[self.index(from, to)])
    }

    pub fn num_points(&self) -> usize {
        self.num_points
    }
}

// The flat vectors grow quadratically; a debug dump only shows the size.
impl fmt::Debug for TravelMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TravelMatrix")
            .field("num_points", &self.num_points)
            .finish_non_exhaustive()
    }
}
