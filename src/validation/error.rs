//! Error classification for coordinate transforms and the anchor registry

use thiserror::Error;

use crate::utils::config::ConfigError;

/// Result type for coordinate transform operations
pub type TransformResult<T> = Result<T, TransformError>;

/// Result type for anchor registry operations
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Errors produced by the coordinate transform engine.
///
/// Conversions only ever fail with [`TransformError::ReferenceNotSet`]; the
/// range variants are raised when establishing a reference location.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    #[error("reference location not set")]
    ReferenceNotSet,

    #[error("latitude {value} outside [-90, 90]")]
    LatitudeOutOfRange { value: f64 },

    #[error("longitude {value} outside [-180, 180]")]
    LongitudeOutOfRange { value: f64 },

    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
}

/// Errors produced by the anchor registry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("coordinate transform failed: {0}")]
    Transform(#[from] TransformError),

    #[error("maximum number of anchors ({limit}) reached")]
    CapacityExceeded { limit: usize },

    /// Identity generation produced a key that is already live
    #[error("anchor identifier {id} is already in use")]
    IdentityCollision { id: String },

    #[error("invalid registry configuration {parameter}: {reason}")]
    InvalidConfig { parameter: String, reason: String },
}

impl From<ConfigError> for RegistryError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidParameter { parameter, value, reason } => RegistryError::InvalidConfig {
                parameter,
                reason: format!("{reason} (got {value})"),
            },
            other => RegistryError::InvalidConfig {
                parameter: "config".to_string(),
                reason: other.to_string(),
            },
        }
    }
}

impl RegistryError {
    /// Whether the caller can retry after changing registry state
    /// (e.g. deleting anchors to free capacity).
    pub fn is_recoverable(&self) -> bool {
        match self {
            RegistryError::CapacityExceeded { .. } => true,
            RegistryError::Transform(TransformError::ReferenceNotSet) => true,
            RegistryError::Transform(_) => false,
            RegistryError::IdentityCollision { .. } => false,
            RegistryError::InvalidConfig { .. } => false,
        }
    }
}
