//! ChinaGeo - coordinate transformations between WGS-84, GCJ-02 and BD-09
//!
//! This library provides a pure, stateless geodetic engine for converting
//! positions between the three coordinate reference systems used in and
//! around mainland China:
//!
//! - **WGS-84**: the global reference system used by GPS
//! - **GCJ-02**: the obfuscated national standard ("Mars coordinates")
//! - **BD-09**: Baidu's further-offset vendor system derived from GCJ-02
//!
//! The WGS-84 to GCJ-02 "encryption" is a closed-form smooth distortion
//! with no algebraic inverse; the reverse direction is recovered by a
//! bounded quadrant-bisection search. A great-circle distance helper is
//! included for consumers that need surface distances in meters.
//!
//! Every transform is a pure function over double-precision coordinate
//! pairs: no I/O, no shared state, safe to call from any thread.
//!
//! # Example
//!
//! ```
//! use chinageo::{transform, Wgs84};
//!
//! let beijing = Wgs84::new(39.916527, 116.397128).unwrap();
//! let gcj = transform::wgs_to_gcj(beijing);
//! assert!((gcj.lat() - beijing.lat()).abs() < 0.01);
//! ```

pub mod config;
pub mod coord;
pub mod distance;
pub mod location;
pub mod telemetry;
pub mod transform;

pub use config::{config_file_path, ConfigFile, ConfigKey};
pub use coord::{Bd09, CoordError, Crs, GeoPoint, Gcj02, Wgs84};
pub use distance::distance_meters;
pub use location::{FixedLocationProvider, LocationError, LocationProvider};
pub use transform::{
    bd09_to_gcj, bd09_to_wgs, gcj_to_bd09, gcj_to_wgs, gcj_to_wgs_with, wgs_to_bd09, wgs_to_gcj,
    InverseConfig, InverseOutcome,
};

/// Library version, taken from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_not_empty() {
        assert!(!VERSION.is_empty(), "Version should not be empty");
    }
}
