//! Datum transforms between WGS-84, GCJ-02 and BD-09.
//!
//! The forward direction is closed-form: the GCJ-02 "encryption" applies a
//! smooth polynomial-plus-trigonometric distortion to WGS-84 coordinates,
//! and BD-09 applies a further polar warp on top of GCJ-02. The reverse
//! direction WGS-84 ← GCJ-02 has no algebraic inverse and is recovered by
//! a bounded quadrant-bisection search ([`gcj_to_wgs`]).
//!
//! All transforms are deterministic pure functions; forward transforms are
//! total and infallible, and the inverse search degrades to a best-effort
//! approximation instead of failing (see [`InverseOutcome`]).
//!
//! # Example
//!
//! ```
//! use chinageo::{transform, Wgs84};
//!
//! let wgs = Wgs84::new(31.2304, 121.4737).unwrap();
//! let bd = transform::wgs_to_bd09(wgs);
//! let back = transform::bd09_to_wgs(bd);
//! assert!((back.lat() - wgs.lat()).abs() < 1e-4);
//! ```

mod forward;
mod inverse;

pub use forward::{bd09_to_gcj, gcj_to_bd09, wgs_to_bd09, wgs_to_gcj};
pub use inverse::{bd09_to_wgs, gcj_to_wgs, gcj_to_wgs_with, InverseConfig, InverseOutcome};
