//! Core coordinate types shared across the transform engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;
/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;
/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;
/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Errors that can occur when constructing coordinates.
#[derive(Debug, Error, PartialEq)]
pub enum CoordError {
    /// Latitude is non-finite or outside [-90, 90].
    #[error("Invalid latitude: {0} (must be finite and within [-90, 90])")]
    InvalidLatitude(f64),

    /// Longitude is non-finite or outside [-180, 180].
    #[error("Invalid longitude: {0} (must be finite and within [-180, 180])")]
    InvalidLongitude(f64),
}

/// A coordinate pair in decimal degrees.
///
/// `GeoPoint` carries no CRS tag: it is the raw value shared by the
/// [`Wgs84`], [`Gcj02`] and [`Bd09`] wrappers. Transforms never mutate a
/// point in place; they always produce a new value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lon: f64,
}

impl GeoPoint {
    /// Create a validated point.
    ///
    /// Rejects non-finite values and values outside the valid
    /// latitude/longitude ranges. NaN fails the range checks and is
    /// rejected like any out-of-range value.
    pub fn new(lat: f64, lon: f64) -> Result<Self, CoordError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(CoordError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) {
            return Err(CoordError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Create a point without range validation.
    ///
    /// Used internally by the inverse search, whose working box may
    /// momentarily extend past the valid ranges, and by callers that
    /// need the reference pass-through behavior for out-of-range input.
    #[inline]
    pub fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Latitude in decimal degrees.
    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in decimal degrees.
    #[inline]
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}, {:.8}", self.lat, self.lon)
    }
}

/// The coordinate reference systems the engine converts between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Crs {
    /// World Geodetic System 1984, the global GPS reference.
    Wgs84,
    /// The obfuscated national standard applied within China.
    Gcj02,
    /// Baidu's vendor offset system derived from GCJ-02.
    Bd09,
}

impl Crs {
    /// Canonical lowercase name, used in CLI output and config files.
    pub fn name(&self) -> &'static str {
        match self {
            Crs::Wgs84 => "wgs84",
            Crs::Gcj02 => "gcj02",
            Crs::Bd09 => "bd09",
        }
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! crs_wrapper {
    ($(#[$doc:meta])* $name:ident, $crs:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
        pub struct $name(GeoPoint);

        impl $name {
            /// Create a validated point in this CRS.
            pub fn new(lat: f64, lon: f64) -> Result<Self, CoordError> {
                GeoPoint::new(lat, lon).map(Self)
            }

            /// Tag an already-validated point with this CRS.
            ///
            /// The engine never infers a CRS at runtime; the caller
            /// asserts the datum by choosing the wrapper.
            #[inline]
            pub fn from_point(point: GeoPoint) -> Self {
                Self(point)
            }

            /// The underlying untagged point.
            #[inline]
            pub fn point(&self) -> GeoPoint {
                self.0
            }

            /// Latitude in decimal degrees.
            #[inline]
            pub fn lat(&self) -> f64 {
                self.0.lat()
            }

            /// Longitude in decimal degrees.
            #[inline]
            pub fn lon(&self) -> f64 {
                self.0.lon()
            }

            /// The CRS this wrapper asserts.
            #[inline]
            pub fn crs(&self) -> Crs {
                $crs
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{} ({})", self.0, $crs)
            }
        }
    };
}

crs_wrapper!(
    /// A coordinate known to be in WGS-84.
    Wgs84,
    Crs::Wgs84
);
crs_wrapper!(
    /// A coordinate known to be in GCJ-02.
    Gcj02,
    Crs::Gcj02
);
crs_wrapper!(
    /// A coordinate known to be in BD-09.
    Bd09,
    Crs::Bd09
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_point_construction() {
        let p = GeoPoint::new(39.916527, 116.397128).unwrap();
        assert_eq!(p.lat(), 39.916527);
        assert_eq!(p.lon(), 116.397128);
    }

    #[test]
    fn test_latitude_out_of_range_rejected() {
        let result = GeoPoint::new(90.5, 0.0);
        assert_eq!(result.unwrap_err(), CoordError::InvalidLatitude(90.5));
    }

    #[test]
    fn test_longitude_out_of_range_rejected() {
        let result = GeoPoint::new(0.0, 200.0);
        assert_eq!(result.unwrap_err(), CoordError::InvalidLongitude(200.0));
    }

    #[test]
    fn test_nan_rejected() {
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(0.0, f64::NAN).is_err());
        assert!(GeoPoint::new(f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_range_edges_accepted() {
        assert!(GeoPoint::new(MAX_LAT, MAX_LON).is_ok());
        assert!(GeoPoint::new(MIN_LAT, MIN_LON).is_ok());
    }

    #[test]
    fn test_unchecked_allows_out_of_range() {
        let p = GeoPoint::new_unchecked(0.0, 200.0);
        assert_eq!(p.lon(), 200.0);
    }

    #[test]
    fn test_wrapper_round_trips_point() {
        let p = GeoPoint::new(31.2304, 121.4737).unwrap();
        let wgs = Wgs84::from_point(p);
        assert_eq!(wgs.point(), p);
        assert_eq!(wgs.crs(), Crs::Wgs84);
    }

    #[test]
    fn test_crs_names() {
        assert_eq!(Crs::Wgs84.name(), "wgs84");
        assert_eq!(Crs::Gcj02.name(), "gcj02");
        assert_eq!(Crs::Bd09.name(), "bd09");
    }

    #[test]
    fn test_error_display_mentions_value() {
        let err = CoordError::InvalidLongitude(200.0);
        assert!(err.to_string().contains("200"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_valid_ranges_accepted(
                lat in MIN_LAT..=MAX_LAT,
                lon in MIN_LON..=MAX_LON
            ) {
                let p = GeoPoint::new(lat, lon);
                prop_assert!(p.is_ok());
            }

            #[test]
            fn test_high_latitude_rejected(
                lat in 90.001..1.0e6_f64,
                lon in MIN_LON..=MAX_LON
            ) {
                let result = GeoPoint::new(lat, lon);
                prop_assert!(matches!(result, Err(CoordError::InvalidLatitude(_))));
            }

            #[test]
            fn test_low_longitude_rejected(
                lat in MIN_LAT..=MAX_LAT,
                lon in -1.0e6..-180.001_f64
            ) {
                let result = GeoPoint::new(lat, lon);
                prop_assert!(matches!(result, Err(CoordError::InvalidLongitude(_))));
            }
        }
    }
}
