//! Test doubles shared by the unit tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use digibuddy_types::Geometry;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::backend::{decode_buildings, Backend, RouteRequest, RouteShape};
use crate::error::DigibuddyError;
use crate::feature_store::RawFeature;

/// Backend answering from memory.
///
/// Routes are straight lines between the requested endpoints. A route request waits for the
/// next queued gate, if there is one, before answering.
#[derive(Default)]
pub(crate) struct TestBackend {
    buildings: Mutex<Option<String>>,
    route_fails: bool,
    gates: Mutex<VecDeque<oneshot::Receiver<()>>>,
    requests: Mutex<Vec<RouteRequest>>,
}

impl TestBackend {
    pub(crate) fn with_buildings(geojson: serde_json::Value) -> Self {
        Self {
            buildings: Mutex::new(Some(geojson.to_string())),
            ..Default::default()
        }
    }

    /// Replaces the building data served from now on.
    pub(crate) fn set_buildings(&self, geojson: serde_json::Value) {
        *self.buildings.lock() = Some(geojson.to_string());
    }

    pub(crate) fn failing_routes(mut self) -> Self {
        self.route_fails = true;
        self
    }

    /// Makes the next route request wait until the returned sender is used or dropped.
    pub(crate) fn gate_next_route(&self) -> oneshot::Sender<()> {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().push_back(receiver);
        sender
    }

    pub(crate) fn route_requests(&self) -> Vec<RouteRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Backend for TestBackend {
    async fn fetch_buildings(&self) -> Result<Vec<RawFeature>, DigibuddyError> {
        let body = self.buildings.lock().clone();
        match body {
            Some(body) => decode_buildings(body.as_bytes()),
            None => Err(DigibuddyError::FetchFailed("HTTP error! status: 404".into())),
        }
    }

    async fn get_route(&self, request: &RouteRequest) -> Result<RouteShape, DigibuddyError> {
        self.requests.lock().push(*request);

        let gate = self.gates.lock().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }

        if self.route_fails {
            return Err(DigibuddyError::RouteCalculationFailed(
                "HTTP error! status: 500".into(),
            ));
        }

        RouteShape::new(Geometry::LineString(vec![request.start, request.end])).ok_or_else(
            || DigibuddyError::RouteCalculationFailed("empty route".into()),
        )
    }
}

/// Building data of a few features around the Münster city center.
pub(crate) fn campus_buildings() -> serde_json::Value {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [7.6253, 51.9625]},
                "properties": {"name": "Cafe Extrablatt", "amenity": "cafe"}
            },
            {
                "type": "Feature",
                "geometry": {"type": "Point", "coordinates": [7.6261, 51.9629]},
                "properties": {"name": "St.-Paulus-Dom", "tourism": "attraction"}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[7.612, 51.963], [7.614, 51.963], [7.614, 51.965], [7.612, 51.965]]]
                },
                "properties": {"name": "Schloss", "university": "yes", "addr:street": "Schlossplatz"}
            },
            {
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[7.60, 51.96], [7.61, 51.96]]
                },
                "properties": {"name": "Promenade"}
            }
        ]
    })
}
