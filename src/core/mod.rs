//! Core types and constants for spatial anchor management

pub mod types;
pub mod constants;

pub use types::*;
pub use constants::*;
