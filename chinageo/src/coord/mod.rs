//! Coordinate value types and the China bounding-envelope predicate.
//!
//! Provides the raw [`GeoPoint`] value type, CRS-tagged wrappers
//! ([`Wgs84`], [`Gcj02`], [`Bd09`]) that make mismatched conversions a
//! compile error, and the envelope test that gates every GCJ-02
//! "encryption" transform.

mod types;

pub use types::{Bd09, CoordError, Crs, GeoPoint, Gcj02, Wgs84, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// Western edge of the GCJ-02 jurisdiction envelope (degrees longitude).
pub const CHINA_MIN_LON: f64 = 72.004;
/// Eastern edge of the GCJ-02 jurisdiction envelope (degrees longitude).
pub const CHINA_MAX_LON: f64 = 137.8347;
/// Southern edge of the GCJ-02 jurisdiction envelope (degrees latitude).
pub const CHINA_MIN_LAT: f64 = 0.8293;
/// Northern edge of the GCJ-02 jurisdiction envelope (degrees latitude).
pub const CHINA_MAX_LAT: f64 = 55.8271;

/// Returns true if the point falls outside mainland China's bounding
/// envelope.
///
/// Outside this envelope the GCJ-02 offset scheme is not meaningful and
/// every encryption transform is defined to be the identity.
#[inline]
pub fn is_outside_china(point: GeoPoint) -> bool {
    point.lon() < CHINA_MIN_LON
        || point.lon() > CHINA_MAX_LON
        || point.lat() < CHINA_MIN_LAT
        || point.lat() > CHINA_MAX_LAT
}
