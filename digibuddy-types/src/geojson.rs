//! Conversion of GeoJSON geometries into [`Geometry`].

use geojson::{PointType, Value};

use crate::{Geometry, GeometryError, LatLng};

fn position(position: &PointType) -> Result<LatLng, GeometryError> {
    match position.as_slice() {
        [lng, lat, ..] if lng.is_finite() && lat.is_finite() => {
            Ok(LatLng::from_lng_lat(*lng, *lat))
        }
        _ => Err(GeometryError::InvalidPosition(position.clone())),
    }
}

fn positions(positions: &[PointType]) -> Result<Vec<LatLng>, GeometryError> {
    positions.iter().map(position).collect()
}

fn rings(rings: &[Vec<PointType>]) -> Result<Vec<Vec<LatLng>>, GeometryError> {
    rings.iter().map(|ring| positions(ring)).collect()
}

impl TryFrom<&Value> for Geometry {
    type Error = GeometryError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Ok(match value {
            Value::Point(point) => Geometry::Point(position(point)?),
            Value::MultiPoint(points) => Geometry::MultiPoint(positions(points)?),
            Value::LineString(line) => Geometry::LineString(positions(line)?),
            Value::MultiLineString(lines) => Geometry::MultiLineString(rings(lines)?),
            Value::Polygon(polygon) => Geometry::Polygon(rings(polygon)?),
            Value::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|polygon| rings(polygon))
                    .collect::<Result<_, _>>()?,
            ),
            Value::GeometryCollection(members) => Geometry::GeometryCollection(
                members
                    .iter()
                    .map(Geometry::try_from)
                    .collect::<Result<_, _>>()?,
            ),
        })
    }
}

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = GeometryError;

    fn try_from(value: &geojson::Geometry) -> Result<Self, Self::Error> {
        Geometry::try_from(&value.value)
    }
}
