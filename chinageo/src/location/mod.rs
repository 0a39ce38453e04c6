//! Location provider boundary.
//!
//! The engine itself never performs I/O; the raw GPS fix comes from an
//! external platform layer. That collaborator is modeled as the
//! [`LocationProvider`] trait so integrations can plug in a real GPS
//! source while tests and offline tools use [`FixedLocationProvider`].
//!
//! A provider returns a raw **WGS-84** fix. Displaying it on a GCJ-02 map
//! is the caller's job, typically `wgs_to_gcj(provider.request_location()?)`.

use thiserror::Error;

use crate::coord::{GeoPoint, Wgs84};

/// Errors a location provider can report.
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    /// Location services are disabled or not present on this platform.
    #[error("Location services unavailable")]
    Unavailable,

    /// The user denied the location permission.
    #[error("Location permission denied")]
    PermissionDenied,

    /// Platform-specific failure.
    #[error("Location provider error: {0}")]
    Provider(String),
}

/// Source of raw WGS-84 position fixes.
pub trait LocationProvider {
    /// Request the current position.
    ///
    /// Blocking and synchronous: providers wrapping asynchronous platform
    /// APIs resolve the fix before returning.
    fn request_location(&self) -> Result<Wgs84, LocationError>;
}

/// Default fallback coordinate: central Beijing, the reference point of
/// the original application.
pub const DEFAULT_COORDINATE: (f64, f64) = (39.916527, 116.397128);

/// A provider that always returns the same fix.
///
/// Used as the offline fallback and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    point: Wgs84,
}

impl FixedLocationProvider {
    /// Provider returning `point` for every request.
    pub fn new(point: Wgs84) -> Self {
        Self { point }
    }
}

impl Default for FixedLocationProvider {
    fn default() -> Self {
        Self {
            point: Wgs84::from_point(GeoPoint::new_unchecked(
                DEFAULT_COORDINATE.0,
                DEFAULT_COORDINATE.1,
            )),
        }
    }
}

impl LocationProvider for FixedLocationProvider {
    fn request_location(&self) -> Result<Wgs84, LocationError> {
        Ok(self.point)
    }
}
