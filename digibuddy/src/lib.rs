//! DigiBuddy is an interactive campus map: it shows buildings and points of interest, tracks the
//! user's location and draws routes calculated by the DigiBuddy server.
//!
//! The crate does not draw anything by itself. Everything visible goes through the
//! [`MapSurface`](surface::MapSurface) trait, implemented by the embedding (a JS map widget on
//! the web, [`HeadlessSurface`](surface::HeadlessSurface) on the command line and in tests).
//! Data comes from a [`Backend`](backend::Backend), and user-facing messages go to a
//! [`StatusReporter`].
//!
//! # Main components
//!
//! * [`App`] owns the map state and is the single entry point for the embedding. It is created
//!   with [`App::bootstrap`] and then receives [`MapEvent`](surface::MapEvent)s from the map
//!   widget and [`ControlEvent`]s from the rest of the page.
//! * [`FeatureStore`](feature_store::FeatureStore) keeps the building data and answers
//!   category and name queries.
//! * [`RouteSession`] keeps at most one route on the map together with its endpoint markers.
//! * [`FeatureRenderer`] and [`GeolocationTracker`] manage the feature layers and the user
//!   position marker.
//!
//! ```no_run
//! use digibuddy::backend::HttpBackend;
//! use digibuddy::digibuddy_types::latlng;
//! use digibuddy::surface::{HeadlessSurface, MapEvent};
//! use digibuddy::{App, AppConfig, ControlEvent, LogStatusReporter};
//!
//! # async fn run() {
//! let config = AppConfig::default().with_backend_url("http://localhost:5000");
//! let backend = HttpBackend::new(&config.backend_url).unwrap();
//! let app = App::bootstrap(config, HeadlessSurface::new(), backend, LogStatusReporter).await;
//!
//! app.handle_map_event(MapEvent::LocationFound {
//!     position: latlng!(51.9607, 7.6257),
//!     accuracy: 20.0,
//! })
//! .await;
//! app.handle_control(ControlEvent::RouteToBuilding("Schloss".into()))
//!     .await;
//! # }
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod app;
pub mod backend;
mod config;
pub mod error;
pub mod feature_store;
mod geolocation;
mod popup;
mod rendering;
mod route_session;
mod status;
mod style;
pub mod surface;

#[cfg(test)]
mod tests;

pub use app::{App, ControlEvent};
pub use config::AppConfig;
pub use error::DigibuddyError;
pub use geolocation::{GeolocationTracker, UserPosition};
pub use popup::{Popup, POPUP_ROWS, ROUTE_ACTION_LABEL};
pub use rendering::{feature_popup, marker_icon, FeatureRenderer};
pub use route_session::{RouteCompletion, RouteSession, RouteToken, SessionState};
pub use status::{LogStatusReporter, StatusLine, StatusReporter};
pub use style::{Color, Icon, ShapeStyle};

#[cfg(target_arch = "wasm32")]
pub use status::DomStatusReporter;

// Reexport digibuddy_types
pub use digibuddy_types;

/// Sends log records to the browser console and panic messages to the console error output.
#[cfg(target_arch = "wasm32")]
pub fn init_web_logging(level: log::Level) -> Result<(), log::SetLoggerError> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(level)
}
