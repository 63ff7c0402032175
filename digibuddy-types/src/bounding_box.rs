use serde::{Deserialize, Serialize};

use crate::LatLng;

/// Rectangle in latitude/longitude space.
///
/// Boxes crossing the antimeridian are not supported: a box always spans from its western
/// to its eastern longitude through increasing values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    south: f64,
    west: f64,
    north: f64,
    east: f64,
}

impl BoundingBox {
    /// Creates a new box from its south-western and north-eastern corners.
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south: south_west.lat(),
            west: south_west.lng(),
            north: north_east.lat(),
            east: north_east.lng(),
        }
    }

    /// Smallest box containing all the points. Returns `None` if the iterator is empty.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a LatLng>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bbox = Self::new(*first, *first);
        for point in points {
            bbox.extend(point);
        }

        Some(bbox)
    }

    /// Grows the box to contain the point.
    pub fn extend(&mut self, point: &LatLng) {
        self.south = self.south.min(point.lat());
        self.north = self.north.max(point.lat());
        self.west = self.west.min(point.lng());
        self.east = self.east.max(point.lng());
    }

    /// Smallest box containing both boxes.
    pub fn merge(&self, other: &BoundingBox) -> Self {
        Self {
            south: self.south.min(other.south),
            west: self.west.min(other.west),
            north: self.north.max(other.north),
            east: self.east.max(other.east),
        }
    }

    /// Returns true if the point is inside the box or on its border.
    pub fn contains(&self, point: &LatLng) -> bool {
        (self.south..=self.north).contains(&point.lat())
            && (self.west..=self.east).contains(&point.lng())
    }

    /// South-western corner.
    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    /// North-eastern corner.
    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    /// Center of the box.
    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south + self.north) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::latlng;

    #[test]
    fn from_points() {
        let points = [latlng!(51.96, 7.62), latlng!(51.95, 7.64), latlng!(51.97, 7.63)];
        let bbox = BoundingBox::from_points(&points).expect("not empty");

        assert_eq!(bbox.south_west(), latlng!(51.95, 7.62));
        assert_eq!(bbox.north_east(), latlng!(51.97, 7.64));
        assert!(points.iter().all(|p| bbox.contains(p)));
        assert!(!bbox.contains(&latlng!(51.0, 7.63)));
    }

    #[test]
    fn from_no_points() {
        assert_eq!(BoundingBox::from_points(std::iter::empty()), None);
    }

    #[test]
    fn merge() {
        let a = BoundingBox::new(latlng!(0.0, 0.0), latlng!(1.0, 1.0));
        let b = BoundingBox::new(latlng!(-1.0, 0.5), latlng!(0.5, 3.0));

        let merged = a.merge(&b);
        assert_eq!(merged, BoundingBox::new(latlng!(-1.0, 0.0), latlng!(1.0, 3.0)));
        assert_eq!(merged.center(), latlng!(0.0, 1.5));
    }
}
