//! Error types used by the crate.

use digibuddy_types::GeometryError;
use thiserror::Error;

/// DigiBuddy error type.
///
/// None of the errors is fatal for the application: every handler catches them, logs them and
/// shows [`DigibuddyError::status_message`] to the user.
#[derive(Debug, Error)]
pub enum DigibuddyError {
    /// Building data could not be loaded: network error or non-success status.
    #[error("failed to load building data: {0}")]
    FetchFailed(String),
    /// The routing backend did not return a usable route.
    #[error("route calculation failed: {0}")]
    RouteCalculationFailed(String),
    /// The feature geometry cannot be used as a routing target.
    #[error("unsupported geometry: {0}")]
    UnsupportedGeometry(#[from] GeometryError),
    /// No feature with the given name is loaded.
    #[error("building not found: {0}")]
    BuildingNotFound(String),
    /// The map surface reported a geolocation error.
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    /// Routing was requested before the user position is known.
    #[error("user position is not known yet")]
    NoActivePosition,
    /// Transport level failure of an HTTP request.
    #[error("request failed: {0}")]
    Http(String),
    /// Response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decoding(#[from] serde_json::Error),
    /// Error interacting with WASM runtime.
    #[error("wasm error: {0:?}")]
    Wasm(Option<String>),
}

impl DigibuddyError {
    /// Short human-readable message for the status line.
    pub fn status_message(&self) -> &'static str {
        match self {
            DigibuddyError::FetchFailed(_) => "Failed to load buildings",
            DigibuddyError::RouteCalculationFailed(_) => "Failed to calculate route",
            DigibuddyError::UnsupportedGeometry(GeometryError::Unsupported(_)) => {
                "Unsupported geometry type"
            }
            DigibuddyError::UnsupportedGeometry(_) | DigibuddyError::BuildingNotFound(_) => {
                "Building not found or invalid geometry"
            }
            DigibuddyError::LocationUnavailable(_) => "Could not find location",
            DigibuddyError::NoActivePosition => "Please enable location first",
            DigibuddyError::Http(_) | DigibuddyError::Decoding(_) | DigibuddyError::Wasm(_) => {
                "Something went wrong"
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for DigibuddyError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for DigibuddyError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        DigibuddyError::Wasm(Some(format!("{value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use digibuddy_types::GeometryKind;

    use super::*;

    #[test]
    fn status_messages() {
        assert_eq!(
            DigibuddyError::NoActivePosition.status_message(),
            "Please enable location first"
        );
        assert_eq!(
            DigibuddyError::from(GeometryError::Unsupported(GeometryKind::LineString))
                .status_message(),
            "Unsupported geometry type"
        );
        assert_eq!(
            DigibuddyError::from(GeometryError::EmptyRing).status_message(),
            "Building not found or invalid geometry"
        );
    }
}
