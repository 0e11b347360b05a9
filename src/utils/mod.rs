//! Configuration

pub mod config;

pub use config::{AnchorSystemConfig, ConfigError, ConfigurationManager};
