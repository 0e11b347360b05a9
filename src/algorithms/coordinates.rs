//! Geographic <-> local scene coordinate transformation
//!
//! Converts between a single geographic reference location and local
//! Cartesian offsets using a flat-earth linear approximation:
//! - `x` east/west: `(lng - ref.lng) * 111320`
//! - `z` north/south: `(lat - ref.lat) * 110540`
//! - `y` vertical: `alt - ref.alt`
//!
//! The longitude constant is the equatorial meters-per-degree and is applied
//! without cosine correction, so east-west offsets are stretched by
//! `1 / cos(ref.lat)`. That stretch stays under 1% within about 8 degrees of
//! the equator and under 5% within [`ACCURATE_LATITUDE_LIMIT_DEG`]. Beyond
//! that, distances are distorted but round trips remain exact because both
//! directions share the same constants. Only building/site-scale offsets
//! (see [`TransformConfig::max_operational_radius_m`]) are meaningful.

use crate::core::{
    GeographicPosition, LocalOffset, ReferenceLocation, ACCURATE_LATITUDE_LIMIT_DEG,
    MAX_LATITUDE_DEG, MAX_LONGITUDE_DEG, METERS_PER_DEGREE_LATITUDE, METERS_PER_DEGREE_LONGITUDE,
};
use crate::utils::config::TransformConfig;
use crate::validation::error::{TransformError, TransformResult};

/// Bidirectional converter around one reference location
#[derive(Debug, Clone, Default)]
pub struct CoordinateTransformEngine {
    reference: Option<ReferenceLocation>,
    config: TransformConfig,
}

impl CoordinateTransformEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an engine from config, applying its reference location if any
    pub fn from_config(config: TransformConfig) -> TransformResult<Self> {
        let initial = config.reference;
        let mut engine = Self {
            reference: None,
            config,
        };
        if let Some(reference) = initial {
            engine.set_reference(reference)?;
        }
        Ok(engine)
    }

    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// Establish or replace the reference location.
    ///
    /// On error the previous reference is kept.
    pub fn set_reference_location(&mut self, lat: f64, lng: f64, alt: f64) -> TransformResult<()> {
        if self.config.validate_ranges {
            CoordinateValidator::validate_geographic(lat, lng, alt)?;
        }

        if lat.abs() > ACCURATE_LATITUDE_LIMIT_DEG {
            tracing::debug!(
                lat,
                stretch = longitude_stretch(lat),
                "reference latitude outside flat-earth accuracy range; east-west offsets are stretched"
            );
        }

        self.reference = Some(ReferenceLocation { lat, lng, alt });
        tracing::debug!(lat, lng, alt, "reference location set");
        Ok(())
    }

    pub fn set_reference(&mut self, reference: ReferenceLocation) -> TransformResult<()> {
        self.set_reference_location(reference.lat, reference.lng, reference.alt)
    }

    pub fn reference_location(&self) -> Option<&ReferenceLocation> {
        self.reference.as_ref()
    }

    pub fn has_reference(&self) -> bool {
        self.reference.is_some()
    }

    /// Convert a geographic position to a local offset from the reference
    pub fn to_local(&self, lat: f64, lng: f64, alt: f64) -> TransformResult<LocalOffset> {
        let reference = self.active_reference()?;

        let offset = LocalOffset {
            x: (lng - reference.lng) * METERS_PER_DEGREE_LONGITUDE,
            y: alt - reference.alt,
            z: (lat - reference.lat) * METERS_PER_DEGREE_LATITUDE,
        };

        self.check_operational_radius(&offset);
        Ok(offset)
    }

    pub fn to_local_position(&self, position: &GeographicPosition) -> TransformResult<LocalOffset> {
        self.to_local(position.lat, position.lng, position.alt)
    }

    /// Convert a local offset back to a geographic position.
    ///
    /// Exact algebraic inverse of [`Self::to_local`].
    pub fn to_geographic(&self, x: f64, y: f64, z: f64) -> TransformResult<GeographicPosition> {
        let reference = self.active_reference()?;

        self.check_operational_radius(&LocalOffset { x, y, z });

        Ok(GeographicPosition {
            lat: reference.lat + z / METERS_PER_DEGREE_LATITUDE,
            lng: reference.lng + x / METERS_PER_DEGREE_LONGITUDE,
            alt: reference.alt + y,
        })
    }

    pub fn to_geographic_offset(&self, offset: &LocalOffset) -> TransformResult<GeographicPosition> {
        self.to_geographic(offset.x, offset.y, offset.z)
    }

    /// Relative east-west stretch at the reference latitude (`1/cos(lat) - 1`).
    ///
    /// `None` until a reference is set. Infinite at the poles.
    pub fn longitude_scale_error(&self) -> Option<f64> {
        self.reference.map(|r| longitude_stretch(r.lat))
    }

    /// Whether the horizontal part of `offset` lies inside the configured
    /// operational radius
    pub fn is_within_operational_radius(&self, offset: &LocalOffset) -> bool {
        offset.horizontal_distance() <= self.config.max_operational_radius_m
    }

    fn active_reference(&self) -> TransformResult<ReferenceLocation> {
        self.reference.ok_or(TransformError::ReferenceNotSet)
    }

    fn check_operational_radius(&self, offset: &LocalOffset) {
        if !self.is_within_operational_radius(offset) {
            tracing::warn!(
                distance_m = offset.horizontal_distance(),
                radius_m = self.config.max_operational_radius_m,
                "offset outside operational radius; flat-earth approximation degrades"
            );
        }
    }
}

fn longitude_stretch(lat: f64) -> f64 {
    1.0 / lat.to_radians().cos() - 1.0
}

/// Range checks for geographic coordinates
pub struct CoordinateValidator;

impl CoordinateValidator {
    /// Check that a geographic triple is finite and within lat/lng bounds
    pub fn validate_geographic(lat: f64, lng: f64, alt: f64) -> TransformResult<()> {
        if !lat.is_finite() {
            return Err(TransformError::NonFinite { field: "latitude" });
        }
        if !lng.is_finite() {
            return Err(TransformError::NonFinite { field: "longitude" });
        }
        if !alt.is_finite() {
            return Err(TransformError::NonFinite { field: "altitude" });
        }
        if lat.abs() > MAX_LATITUDE_DEG {
            return Err(TransformError::LatitudeOutOfRange { value: lat });
        }
        if lng.abs() > MAX_LONGITUDE_DEG {
            return Err(TransformError::LongitudeOutOfRange { value: lng });
        }
        Ok(())
    }

    /// [`Self::validate_geographic`] over a [`GeographicPosition`]
    pub fn validate_position(position: &GeographicPosition) -> TransformResult<()> {
        Self::validate_geographic(position.lat, position.lng, position.alt)
    }
}
