//! Coordinate conversion algorithms

pub mod coordinates;

pub use coordinates::{CoordinateTransformEngine, CoordinateValidator};
