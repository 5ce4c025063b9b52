use geo::{Distance, Haversine};
use rstar::primitives::GeomWithData;
use rstar::{AABB, Envelope, PointDistance, RTree, RTreeObject};

use crate::problem::location::Location;
use crate::problem::stop::{Stop, StopIdx};

/// A stop's coordinate, compared by great-circle distance so the nearest
/// neighbor agrees with the travel matrix.
pub struct IndexedPoint {
    x: f64,
    y: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.x, self.y])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(
        &self,
        point: &<Self::Envelope as Envelope>::Point,
    ) -> <<Self::Envelope as Envelope>::Point as rstar::Point>::Scalar {
        let distance = Haversine.distance(
            geo::Point::new(self.x, self.y),
            geo::Point::new(point[0], point[1]),
        );

        distance * distance
    }
}

type StopIndexObject = GeomWithData<IndexedPoint, StopIdx>;

/// Spatial index over stop coordinates, used to walk stops outward from a
/// query point in nearest-first order.
pub struct StopIndex {
    tree: RTree<StopIndexObject>,
}

impl StopIndex {
    pub fn new(locations: &[Location], stops: &[Stop]) -> StopIndex {
        let tree: RTree<StopIndexObject> = RTree::bulk_load(
            stops
                .iter()
                .enumerate()
                .map(|(stop_id, stop)| {
                    let location = &locations[stop.location_id()];

                    StopIndexObject::new(
                        IndexedPoint {
                            x: location.lon(),
                            y: location.lat(),
                        },
                        StopIdx::new(stop_id),
                    )
                })
                .collect(),
        );

        StopIndex { tree }
    }

    pub fn nearest_neighbor_iter<'a, P>(&'a self, point: P) -> impl Iterator<Item = StopIdx> + 'a
    where
        P: Into<geo::Point>,
    {
        let point: geo::Point = point.into();
        self.tree
            .nearest_neighbor_iter(&[point.x(), point.y()])
            .map(|geom_with_data| geom_with_data.data)
    }
}

impl std::fmt::Debug for StopIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StopIndex")
            .field("stops", &self.tree.size())
            .finish()
    }
}
