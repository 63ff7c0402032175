use thiserror::Error;

use crate::GeometryKind;

/// Errors of geometry conversion and geometry helpers.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    /// The operation is not defined for this kind of geometry.
    #[error("unsupported geometry type: {0}")]
    Unsupported(GeometryKind),
    /// Centroid of a ring without vertices was requested.
    #[error("ring has no vertices")]
    EmptyRing,
    /// A position has less than two coordinates or non-finite coordinates.
    #[error("invalid position: {0:?}")]
    InvalidPosition(Vec<f64>),
}
