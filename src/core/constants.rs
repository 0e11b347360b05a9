//! Flat-earth conversion constants

/// Meters per degree of longitude used by the linear approximation.
///
/// This is the equatorial value. It is applied at every latitude, so
/// east-west offsets are stretched by `1 / cos(lat)` away from the equator.
pub const METERS_PER_DEGREE_LONGITUDE: f64 = 111_320.0;

/// Meters per degree of latitude used by the linear approximation
pub const METERS_PER_DEGREE_LATITUDE: f64 = 110_540.0;

/// Reference latitude (degrees, absolute) beyond which the east-west
/// stretch of the fixed longitude constant exceeds 5%
pub const ACCURATE_LATITUDE_LIMIT_DEG: f64 = 18.0;

/// Default radius (meters) of the site the approximation is trusted for
pub const DEFAULT_OPERATIONAL_RADIUS_M: f64 = 10_000.0;

pub const MAX_LATITUDE_DEG: f64 = 90.0;
pub const MAX_LONGITUDE_DEG: f64 = 180.0;
