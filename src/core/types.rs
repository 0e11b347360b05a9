//! Core data types for the geographic and local scene frames

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Geographic origin for local-coordinate conversions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLocation {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
    /// Altitude in meters
    #[serde(default)]
    pub alt: f64,
}

impl ReferenceLocation {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, alt: 0.0 }
    }

    pub fn with_altitude(mut self, alt: f64) -> Self {
        self.alt = alt;
        self
    }
}

/// Geographic position (latitude, longitude, altitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeographicPosition {
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub alt: f64,
}

impl GeographicPosition {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng, alt: 0.0 }
    }

    pub fn with_altitude(mut self, alt: f64) -> Self {
        self.alt = alt;
        self
    }
}

impl From<ReferenceLocation> for GeographicPosition {
    fn from(reference: ReferenceLocation) -> Self {
        Self {
            lat: reference.lat,
            lng: reference.lng,
            alt: reference.alt,
        }
    }
}

/// Offset in meters from the reference location.
///
/// `x` is east/west, `z` is north/south and `y` is vertical.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalOffset {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl LocalOffset {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance in the ground plane (ignores `y`)
    pub fn horizontal_distance(&self) -> f64 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }
}

impl From<Vector3<f64>> for LocalOffset {
    fn from(v: Vector3<f64>) -> Self {
        Self { x: v.x, y: v.y, z: v.z }
    }
}

impl From<LocalOffset> for Vector3<f64> {
    fn from(offset: LocalOffset) -> Self {
        offset.to_vector()
    }
}
