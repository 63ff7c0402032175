//! Client of the DigiBuddy server: building data and route calculation.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use async_trait::async_trait;
use digibuddy_types::{BoundingBox, Geometry, LatLng};
use maybe_sync::{MaybeSend, MaybeSync};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::DigibuddyError;
use crate::feature_store::RawFeature;

#[cfg(not(target_arch = "wasm32"))]
mod native;
#[cfg(target_arch = "wasm32")]
mod web;

/// HTTP backend for the current platform.
#[cfg(not(target_arch = "wasm32"))]
pub type HttpBackend = native::NativeHttpBackend;

/// HTTP backend for the current platform.
#[cfg(target_arch = "wasm32")]
pub type HttpBackend = web::WebHttpBackend;

/// Path of the building data endpoint.
pub const BUILDINGS_PATH: &str = "/buildings";
/// Path of the routing endpoint.
pub const ROUTE_PATH: &str = "/get_route";

/// Routing profile forwarded to the routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TravelMode {
    /// By car.
    #[default]
    #[serde(rename = "driving-car")]
    DrivingCar,
    /// On foot.
    #[serde(rename = "foot-walking")]
    FootWalking,
    /// By bicycle.
    #[serde(rename = "cycling-regular")]
    CyclingRegular,
}

impl TravelMode {
    /// Profile name as understood by the routing engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::DrivingCar => "driving-car",
            TravelMode::FootWalking => "foot-walking",
            TravelMode::CyclingRegular => "cycling-regular",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The travel mode selector had a value that is not a known profile.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown travel mode '{0}'")]
pub struct UnknownTravelMode(pub String);

impl FromStr for TravelMode {
    type Err = UnknownTravelMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving-car" => Ok(TravelMode::DrivingCar),
            "foot-walking" => Ok(TravelMode::FootWalking),
            "cycling-regular" => Ok(TravelMode::CyclingRegular),
            other => Err(UnknownTravelMode(other.to_string())),
        }
    }
}

/// Body of a routing request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteRequest {
    /// Route start.
    pub start: LatLng,
    /// Route end.
    pub end: LatLng,
    /// Routing profile.
    pub mode: TravelMode,
}

/// Route returned by the backend, ready to be drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteShape {
    geometry: Geometry,
    bounds: BoundingBox,
}

impl RouteShape {
    /// Creates a route shape. Returns `None` if the geometry has no vertices.
    pub fn new(geometry: Geometry) -> Option<Self> {
        let bounds = geometry.bounding_box()?;
        Some(Self { geometry, bounds })
    }

    /// Route geometry.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Box containing the whole route.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }
}

/// Server the map client talks to.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait Backend: MaybeSend + MaybeSync {
    /// Loads all building features.
    ///
    /// Fails with [`DigibuddyError::FetchFailed`].
    async fn fetch_buildings(&self) -> Result<Vec<RawFeature>, DigibuddyError>;

    /// Calculates a route.
    ///
    /// Fails with [`DigibuddyError::RouteCalculationFailed`].
    async fn get_route(&self, request: &RouteRequest) -> Result<RouteShape, DigibuddyError>;
}

#[derive(Deserialize)]
struct BuildingsPayload {
    features: Vec<RawFeature>,
}

/// Decodes the body of the building data response.
pub fn decode_buildings(body: &[u8]) -> Result<Vec<RawFeature>, DigibuddyError> {
    let payload: BuildingsPayload = serde_json::from_slice(body)
        .map_err(|err| DigibuddyError::FetchFailed(format!("invalid building data: {err}")))?;

    Ok(payload.features)
}

/// Decodes the body of the routing response.
///
/// The body can be a GeoJSON geometry, feature or feature collection. All geometries found
/// in it become a part of the route.
pub fn decode_route(body: &[u8]) -> Result<RouteShape, DigibuddyError> {
    let failed = |reason: String| DigibuddyError::RouteCalculationFailed(reason);

    let geojson: geojson::GeoJson = serde_json::from_slice(body)
        .map_err(|err| failed(format!("invalid route response: {err}")))?;

    let raw_geometries: Vec<geojson::Geometry> = match geojson {
        geojson::GeoJson::Geometry(geometry) => vec![geometry],
        geojson::GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        geojson::GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
    };

    let mut geometries = raw_geometries
        .iter()
        .map(Geometry::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| failed(format!("invalid route geometry: {err}")))?;

    let geometry = match geometries.len() {
        0 => return Err(failed("route response has no geometry".into())),
        1 => geometries.remove(0),
        _ => Geometry::GeometryCollection(geometries),
    };

    RouteShape::new(geometry).ok_or_else(|| failed("route geometry is empty".into()))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use digibuddy_types::latlng;
    use serde_json::json;

    use super::*;

    #[test]
    fn route_request_body() {
        let request = RouteRequest {
            start: latlng!(51.96, 7.62),
            end: latlng!(51.97, 7.6),
            mode: TravelMode::FootWalking,
        };

        assert_eq!(
            serde_json::to_value(request).expect("serializable"),
            json!({
                "start": {"lat": 51.96, "lng": 7.62},
                "end": {"lat": 51.97, "lng": 7.6},
                "mode": "foot-walking",
            })
        );
    }

    #[test]
    fn travel_mode_parsing() {
        assert_eq!("cycling-regular".parse::<TravelMode>(), Ok(TravelMode::CyclingRegular));
        assert_eq!(
            "hovercraft".parse::<TravelMode>(),
            Err(UnknownTravelMode("hovercraft".into()))
        );
        assert_eq!(TravelMode::default().as_str(), "driving-car");
    }

    #[test]
    fn decode_buildings_payload() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "geometry": {"type": "Point", "coordinates": [7.62, 51.96]},
                    "properties": {"name": "Dom", "tourism": "attraction"}
                },
                {"type": "Feature", "geometry": null, "properties": null}
            ]
        });

        let features = decode_buildings(body.to_string().as_bytes()).expect("valid payload");
        assert_eq!(features.len(), 2);
        assert!(features[0].geometry.is_some());
        assert!(features[1].properties.is_none());
    }

    #[test]
    fn decode_buildings_without_features() {
        assert_matches!(
            decode_buildings(br#"{"error": "Building data file not found"}"#),
            Err(DigibuddyError::FetchFailed(_))
        );
        assert_matches!(
            decode_buildings(b"<html>"),
            Err(DigibuddyError::FetchFailed(_))
        );
    }

    #[test]
    fn decode_route_feature_collection() {
        let body = json!({
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"summary": {"distance": 1200.0}},
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[7.62, 51.96], [7.63, 51.965], [7.64, 51.97]]
                }
            }]
        });

        let route = decode_route(body.to_string().as_bytes()).expect("valid route");
        assert_matches!(route.geometry(), Geometry::LineString(points) if points.len() == 3);
        assert_eq!(route.bounds().south_west(), latlng!(51.96, 7.62));
        assert_eq!(route.bounds().north_east(), latlng!(51.97, 7.64));
    }

    #[test]
    fn decode_route_failures() {
        let empty = json!({"type": "FeatureCollection", "features": []});
        assert_matches!(
            decode_route(empty.to_string().as_bytes()),
            Err(DigibuddyError::RouteCalculationFailed(_))
        );

        let no_vertices = json!({"type": "LineString", "coordinates": []});
        assert_matches!(
            decode_route(no_vertices.to_string().as_bytes()),
            Err(DigibuddyError::RouteCalculationFailed(_))
        );

        assert_matches!(
            decode_route(br#"{"error": "quota exceeded"}"#),
            Err(DigibuddyError::RouteCalculationFailed(_))
        );
    }
}
