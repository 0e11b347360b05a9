//! Spatial Anchors
//!
//! Registry of persistent 3D scene anchors with lifecycle notifications,
//! plus a flat-earth transform between a geographic reference location
//! and local scene coordinates.

pub mod core;
pub mod algorithms;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{GeographicPosition, LocalOffset, ReferenceLocation};
pub use algorithms::coordinates::{CoordinateTransformEngine, CoordinateValidator};
pub use api::{
    Anchor, AnchorId, AnchorObserver, AnchorRegistry, CallbackObserver, Metadata, Rotation,
    SendAnchorRegistry, SharedAnchorRegistry, SubscriptionHandle,
};
pub use validation::error::{RegistryError, RegistryResult, TransformError, TransformResult};
pub use utils::config::{AnchorSystemConfig, ConfigurationManager, RegistryConfig, TransformConfig};
