//! Error types

pub mod error;

pub use error::{RegistryError, RegistryResult, TransformError, TransformResult};
