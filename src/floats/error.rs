//! Float catalog error types
//!
//! Defines the errors that can occur when working with coordinates and floats.

use thiserror::Error;

/// Errors that can occur in the float layer
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeoError {
    /// Latitude outside [-90, 90] or longitude outside [-180, 180]
    #[error("Invalid coordinate: lat={lat}, lon={lon}")]
    InvalidCoordinate { lat: f64, lon: f64 },

    /// Requested float does not exist in the catalog
    #[error("Float not found: {0}")]
    FloatNotFound(String),

    /// Two catalog entries share an id
    #[error("Duplicate float id: {0}")]
    DuplicateFloat(String),
}

/// Result type alias for float operations
pub type GeoResult<T> = Result<T, GeoError>;
