//! Geographic primitives used by the DigiBuddy campus map.
//!
//! The crate deliberately keeps to plain latitude/longitude coordinates: everything the map
//! client does (centroids of building outlines, route bounds, marker positions) happens in
//! WGS84 degrees, and no projection is ever applied on the client side.
//!
//! GeoJSON stores positions as `[lng, lat]`, while the map surface and the routing backend
//! speak `{lat, lng}`. The swap happens exactly once, when a GeoJSON geometry is converted
//! into a [`Geometry`] (see the `geojson` feature).
//!
//! ```
//! use digibuddy_types::{latlng, resolve_target, Geometry};
//!
//! let building = Geometry::Polygon(vec![vec![
//!     latlng!(0.0, 0.0),
//!     latlng!(0.0, 2.0),
//!     latlng!(2.0, 2.0),
//!     latlng!(2.0, 0.0),
//! ]]);
//!
//! assert_eq!(resolve_target(&building).unwrap(), latlng!(1.0, 1.0));
//! ```

mod bounding_box;
mod error;
mod geometry;
mod point;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use bounding_box::BoundingBox;
pub use error::GeometryError;
pub use geometry::{centroid_of_ring, resolve_target, Geometry, GeometryKind};
pub use point::LatLng;
