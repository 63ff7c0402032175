//! Capability interface of the map widget.
//!
//! The application never talks to a concrete map library. Everything it needs from one is
//! collected in the [`MapSurface`] trait: a pannable surface that can show layers, locate the
//! user and fit its view to a box. Events travel the other way: the embedding converts the
//! widget callbacks into [`MapEvent`]s and hands them to
//! [`App::handle_map_event`](crate::App::handle_map_event).

use std::time::Duration;

use digibuddy_types::{BoundingBox, Geometry, LatLng};
use maybe_sync::MaybeSend;
use serde::{Deserialize, Serialize};

use crate::popup::Popup;
use crate::style::{Icon, ShapeStyle};

mod headless;

pub use headless::HeadlessSurface;

/// Handle of a layer added to a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u64);

/// Point marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Position of the marker.
    pub position: LatLng,
    /// Image of the marker. The surface default pin is used if `None`.
    pub icon: Option<Icon>,
    /// Popup opened by clicking the marker.
    pub popup: Option<Popup>,
}

impl Marker {
    /// Default pin at the given position.
    pub fn new(position: LatLng) -> Self {
        Self {
            position,
            icon: None,
            popup: None,
        }
    }
}

/// Circle with radius in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    /// Center of the circle.
    pub center: LatLng,
    /// Radius in metres.
    pub radius: f64,
    /// Stroke and fill.
    pub style: ShapeStyle,
}

/// Vector geometry drawn with a style.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    /// Geometry to draw.
    pub geometry: Geometry,
    /// Stroke and fill.
    pub style: ShapeStyle,
    /// Popup opened by clicking the shape.
    pub popup: Option<Popup>,
}

/// Anything that can be shown on the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    /// Raster tile background.
    Tiles {
        /// Tile url with `{z}`, `{x}`, `{y}` and optional `{s}` placeholders.
        url_template: String,
        /// Maximum zoom level the tile server provides.
        max_zoom: u8,
    },
    /// Point marker.
    Marker(Marker),
    /// Circle.
    Circle(Circle),
    /// Vector shape.
    Shape(Shape),
}

/// Geolocation request parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocateOptions {
    /// Move the view to the found location.
    pub set_view: bool,
    /// Maximum zoom used when moving the view to the location.
    pub max_zoom: u8,
    /// Give up locating after this time. Waits indefinitely if `None`.
    pub timeout: Option<Duration>,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            set_view: true,
            max_zoom: 16,
            timeout: None,
        }
    }
}

/// Event emitted by the map widget.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The map background was clicked.
    Click(LatLng),
    /// Geolocation produced a position. `accuracy` is the raw accuracy value of the
    /// geolocation API, twice the radius to show.
    LocationFound {
        /// Found position.
        position: LatLng,
        /// Raw accuracy in metres.
        accuracy: f64,
    },
    /// Geolocation failed.
    LocationError(String),
    /// Pointer entered a layer.
    PointerEnter(LayerId),
    /// Pointer left a layer.
    PointerLeave(LayerId),
    /// A layer was clicked.
    LayerClick(LayerId),
    /// The action button in the popup of a layer was pressed.
    PopupAction(LayerId),
}

/// Map widget capabilities used by the application.
pub trait MapSurface: MaybeSend {
    /// Moves the view to the given center and zoom level.
    fn set_view(&mut self, center: LatLng, zoom: u8);
    /// Adds a layer on top of the existing ones.
    fn add_layer(&mut self, layer: Layer) -> LayerId;
    /// Replaces the layer keeping its handle. Returns the old layer, or `None` (and does
    /// nothing) if no layer with this handle exists.
    fn update_layer(&mut self, id: LayerId, layer: Layer) -> Option<Layer>;
    /// Removes the layer from the map.
    fn remove_layer(&mut self, id: LayerId) -> Option<Layer>;
    /// Layer with the given handle.
    fn layer(&self, id: LayerId) -> Option<&Layer>;
    /// Starts geolocation. Results arrive as [`MapEvent::LocationFound`] or
    /// [`MapEvent::LocationError`].
    fn locate(&mut self, options: &LocateOptions);
    /// Moves the view so that the box is visible with `padding` pixels around it.
    fn fit_bounds(&mut self, bounds: BoundingBox, padding: u32);
}
