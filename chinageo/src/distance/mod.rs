//! Great-circle distance between WGS-84 points.
//!
//! Uses the spherical law of cosines on a mean-radius sphere. Accuracy is
//! in the sub-percent range for the distances the engine's consumers care
//! about; it is not an ellipsoidal geodesic solver.

use crate::coord::Wgs84;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_004.0;

/// Surface distance in meters between two WGS-84 points.
///
/// Computes `2R·asin(√(temp/2))` with
/// `temp = 2 − 2·cos(φ1)·cos(φ2)·cos(λ1−λ2) − 2·sin(φ1)·sin(φ2)`.
/// `temp` is clamped to [0, 4] before the root: floating-point overshoot
/// at identical or antipodal points would otherwise feed `sqrt` a value
/// slightly outside the domain.
pub fn distance_meters(a: Wgs84, b: Wgs84) -> f64 {
    // cos²+sin² rounding leaves a residual of ~1e-16 for coincident
    // points, which the asin turns into a spurious ~0.1 m.
    if a == b {
        return 0.0;
    }

    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let lon1 = a.lon().to_radians();
    let lon2 = b.lon().to_radians();

    let temp = 2.0 - 2.0 * lat1.cos() * lat2.cos() * (lon1 - lon2).cos()
        - 2.0 * lat1.sin() * lat2.sin();
    let temp = temp.clamp(0.0, 4.0);

    2.0 * EARTH_RADIUS_M * (temp.sqrt() / 2.0).asin()
}
