//! Closed-form forward transforms.
//!
//! The WGS-84 → GCJ-02 distortion is the published offset surrogate: two
//! low-order polynomial-plus-sine terms evaluated relative to (105°E, 35°N),
//! scaled by the local meridian and parallel radii of the Krasovsky 1940
//! ellipsoid. The published coefficients are reproduced exactly; any
//! deviation breaks bit-for-bit agreement with reference implementations.

use std::f64::consts::PI;

use crate::coord::{is_outside_china, Bd09, GeoPoint, Gcj02, Wgs84};

/// Semi-major axis of the Krasovsky 1940 ellipsoid (meters).
const KRASOVSKY_A: f64 = 6378245.0;

/// First eccentricity squared of the Krasovsky 1940 ellipsoid.
const KRASOVSKY_EE: f64 = 0.00669342162296594323;

/// Scaled pi used by the BD-09 polar warp.
const X_PI: f64 = PI * 3000.0 / 180.0;

/// Latitude component of the GCJ-02 distortion, in the offset frame
/// x = lon - 105, y = lat - 35.
fn distort_lat(x: f64, y: f64) -> f64 {
    let mut d = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    d += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    d += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    d += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    d
}

/// Longitude component of the GCJ-02 distortion.
fn distort_lon(x: f64, y: f64) -> f64 {
    let mut d = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    d += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    d += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    d += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    d
}

/// The GCJ-02 offset for a WGS-84 point, in degrees.
///
/// Scales the raw distortion by the ellipsoid's meridian radius (latitude
/// axis) and parallel radius (longitude axis) at the input latitude.
fn gcj_offset(point: GeoPoint) -> (f64, f64) {
    let x = point.lon() - 105.0;
    let y = point.lat() - 35.0;
    let d_lat = distort_lat(x, y);
    let d_lon = distort_lon(x, y);

    let rad_lat = point.lat() / 180.0 * PI;
    let magic = 1.0 - KRASOVSKY_EE * rad_lat.sin() * rad_lat.sin();
    let sqrt_magic = magic.sqrt();

    let d_lat = (d_lat * 180.0) / ((KRASOVSKY_A * (1.0 - KRASOVSKY_EE)) / (magic * sqrt_magic) * PI);
    let d_lon = (d_lon * 180.0) / (KRASOVSKY_A / sqrt_magic * rad_lat.cos() * PI);

    (d_lat, d_lon)
}

/// Convert a WGS-84 coordinate to GCJ-02.
///
/// Outside the China bounding envelope the offset scheme is not
/// meaningful and the input passes through unchanged.
pub fn wgs_to_gcj(wgs: Wgs84) -> Gcj02 {
    let point = wgs.point();
    if is_outside_china(point) {
        return Gcj02::from_point(point);
    }
    let (d_lat, d_lon) = gcj_offset(point);
    Gcj02::from_point(GeoPoint::new_unchecked(
        point.lat() + d_lat,
        point.lon() + d_lon,
    ))
}

/// Convert a GCJ-02 coordinate to BD-09.
///
/// A closed-form polar warp; no envelope gating, since GCJ-02 input
/// already implies an in-China coordinate.
pub fn gcj_to_bd09(gcj: Gcj02) -> Bd09 {
    let lat = gcj.lat();
    let lon = gcj.lon();
    let z = (lon * lon + lat * lat).sqrt() + 0.00002 * (lat * X_PI).sin();
    let theta = lat.atan2(lon) + 0.000003 * (lon * X_PI).cos();
    Bd09::from_point(GeoPoint::new_unchecked(
        z * theta.sin() + 0.006,
        z * theta.cos() + 0.0065,
    ))
}

/// Convert a BD-09 coordinate to GCJ-02.
///
/// Inverse of the polar warp. The pair [`gcj_to_bd09`]/[`bd09_to_gcj`]
/// are approximate (not exact) inverses of each other by construction.
pub fn bd09_to_gcj(bd: Bd09) -> Gcj02 {
    let x = bd.lon() - 0.0065;
    let y = bd.lat() - 0.006;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    Gcj02::from_point(GeoPoint::new_unchecked(z * theta.sin(), z * theta.cos()))
}

/// Convert a WGS-84 coordinate to BD-09.
///
/// Definitional composition of [`wgs_to_gcj`] and [`gcj_to_bd09`].
pub fn wgs_to_bd09(wgs: Wgs84) -> Bd09 {
    gcj_to_bd09(wgs_to_gcj(wgs))
}
