//! Application configuration.

use digibuddy_types::LatLng;
use serde::{Deserialize, Serialize};

use crate::backend::TravelMode;
use crate::surface::LocateOptions;

/// Configuration of the map application.
///
/// All fields have defaults matching the Münster campus deployment, so a config file only
/// needs to list what differs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base url of the DigiBuddy server. Empty means the origin the page was served from.
    pub backend_url: String,
    /// Initial map center.
    pub center: LatLng,
    /// Initial zoom level.
    pub zoom: u8,
    /// Raster tile url template.
    pub tile_url: String,
    /// Maximum zoom level of the tile server.
    pub max_zoom: u8,
    /// Geolocation parameters.
    pub locate: LocateOptions,
    /// Zoom level used by the "locate me" action when the position is known.
    pub locate_me_zoom: u8,
    /// Padding in pixels around a route when the view is fitted to it.
    pub fit_padding: u32,
    /// Travel mode selected at startup.
    pub travel_mode: TravelMode,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: String::new(),
            center: LatLng::new(51.9607, 7.6257),
            zoom: 14,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19,
            locate: LocateOptions::default(),
            locate_me_zoom: 17,
            fit_padding: 50,
            travel_mode: TravelMode::default(),
        }
    }
}

impl AppConfig {
    /// Sets the server base url.
    pub fn with_backend_url(mut self, url: impl Into<String>) -> Self {
        self.backend_url = url.into();
        self
    }

    /// Sets the initial view.
    pub fn with_view(mut self, center: LatLng, zoom: u8) -> Self {
        self.center = center;
        self.zoom = zoom;
        self
    }

    /// Sets the geolocation parameters.
    pub fn with_locate_options(mut self, options: LocateOptions) -> Self {
        self.locate = options;
        self
    }

    /// Sets the travel mode selected at startup.
    pub fn with_travel_mode(mut self, mode: TravelMode) -> Self {
        self.travel_mode = mode;
        self
    }
}
