use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, GeometryError, LatLng};

/// Geometry of a map feature.
///
/// Polygons are stored as a list of rings, the first one being the outer boundary. Rings are
/// stored as they come from the data source, so a closed ring repeats its first vertex at the
/// end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    /// Single point.
    Point(LatLng),
    /// Set of points.
    MultiPoint(Vec<LatLng>),
    /// Polyline.
    LineString(Vec<LatLng>),
    /// Set of polylines.
    MultiLineString(Vec<Vec<LatLng>>),
    /// Polygon: outer ring followed by holes.
    Polygon(Vec<Vec<LatLng>>),
    /// Set of polygons.
    MultiPolygon(Vec<Vec<Vec<LatLng>>>),
    /// Heterogeneous collection.
    GeometryCollection(Vec<Geometry>),
}

/// Kind of a [`Geometry`] without its coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeometryKind {
    /// [`Geometry::Point`]
    Point,
    /// [`Geometry::MultiPoint`]
    MultiPoint,
    /// [`Geometry::LineString`]
    LineString,
    /// [`Geometry::MultiLineString`]
    MultiLineString,
    /// [`Geometry::Polygon`]
    Polygon,
    /// [`Geometry::MultiPolygon`]
    MultiPolygon,
    /// [`Geometry::GeometryCollection`]
    GeometryCollection,
}

impl Display for GeometryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        };
        f.write_str(name)
    }
}

impl Geometry {
    /// Kind of the geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }

    /// Iterates over all vertices of the geometry, including holes and collection members.
    pub fn iter_points(&self) -> Box<dyn Iterator<Item = &LatLng> + '_> {
        match self {
            Geometry::Point(point) => Box::new(std::iter::once(point)),
            Geometry::MultiPoint(points) | Geometry::LineString(points) => Box::new(points.iter()),
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => {
                Box::new(lines.iter().flatten())
            }
            Geometry::MultiPolygon(polygons) => Box::new(polygons.iter().flatten().flatten()),
            Geometry::GeometryCollection(members) => {
                Box::new(members.iter().flat_map(Geometry::iter_points))
            }
        }
    }

    /// Bounding box of all vertices. Returns `None` for a geometry without vertices.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        match self {
            Geometry::GeometryCollection(members) => members
                .iter()
                .filter_map(Geometry::bounding_box)
                .reduce(|bbox, other| bbox.merge(&other)),
            _ => BoundingBox::from_points(self.iter_points()),
        }
    }
}

/// Arithmetic mean of the ring vertices.
///
/// This is not an area-weighted centroid: a side with many vertices pulls the result towards
/// itself. Every vertex is counted, so the closing vertex of a closed ring is counted twice.
/// Returns `None` if the ring is empty.
pub fn centroid_of_ring(ring: &[LatLng]) -> Option<LatLng> {
    if ring.is_empty() {
        return None;
    }

    let (lat_sum, lng_sum) = ring.iter().fold((0.0, 0.0), |(lat, lng), point| {
        (lat + point.lat(), lng + point.lng())
    });
    let count = ring.len() as f64;

    Some(LatLng::new(lat_sum / count, lng_sum / count))
}

/// Point a route to the geometry should lead to.
///
/// Points are used as is, polygons resolve to the [`centroid_of_ring`] of their outer ring
/// (holes are ignored). Other geometry kinds are not routable.
pub fn resolve_target(geometry: &Geometry) -> Result<LatLng, GeometryError> {
    match geometry {
        Geometry::Point(point) => Ok(*point),
        Geometry::Polygon(rings) => rings
            .first()
            .and_then(|outer| centroid_of_ring(outer))
            .ok_or(GeometryError::EmptyRing),
        other => Err(GeometryError::Unsupported(other.kind())),
    }
}
