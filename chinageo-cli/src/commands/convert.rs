//! Convert command - transform a coordinate between reference systems.

use clap::Args;
use tracing::debug;

use chinageo::config::ConfigFile;
use chinageo::{transform, Bd09, Crs, GeoPoint, Gcj02, InverseConfig, Wgs84};

use super::common::{resolve_inverse_config, resolve_output_format, print_point, CrsKind};
use crate::error::CliError;

/// Arguments for the convert command.
#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Source reference system
    #[arg(long, value_enum)]
    pub from: CrsKind,

    /// Target reference system
    #[arg(long, value_enum)]
    pub to: CrsKind,

    /// Latitude in decimal degrees
    pub lat: f64,

    /// Longitude in decimal degrees
    pub lon: f64,

    /// Emit JSON instead of plain text
    #[arg(long)]
    pub json: bool,

    /// Inverse-search convergence threshold in degrees
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Inverse-search iteration ceiling
    #[arg(long)]
    pub max_iterations: Option<u32>,
}

/// Run the convert command.
pub fn run(args: ConvertArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let inverse = resolve_inverse_config(args.threshold, args.max_iterations, &config);
    let format = resolve_output_format(args.json, &config);

    let point = GeoPoint::new(args.lat, args.lon)?;
    debug!(from = %Crs::from(args.from), to = %Crs::from(args.to), %point, "converting");

    let result = convert(args.from, args.to, point, &inverse);
    print_point(args.to.into(), result, format)?;
    Ok(())
}

/// Dispatch one conversion across the full datum matrix.
///
/// Same-system pairs are the identity. Paths ending in WGS-84 from an
/// encrypted datum run the iterative inverse search with `inverse`.
fn convert(from: CrsKind, to: CrsKind, point: GeoPoint, inverse: &InverseConfig) -> GeoPoint {
    match (from, to) {
        (CrsKind::Wgs84, CrsKind::Wgs84)
        | (CrsKind::Gcj02, CrsKind::Gcj02)
        | (CrsKind::Bd09, CrsKind::Bd09) => point,

        (CrsKind::Wgs84, CrsKind::Gcj02) => {
            transform::wgs_to_gcj(Wgs84::from_point(point)).point()
        }
        (CrsKind::Wgs84, CrsKind::Bd09) => {
            transform::wgs_to_bd09(Wgs84::from_point(point)).point()
        }
        (CrsKind::Gcj02, CrsKind::Bd09) => {
            transform::gcj_to_bd09(Gcj02::from_point(point)).point()
        }
        (CrsKind::Bd09, CrsKind::Gcj02) => {
            transform::bd09_to_gcj(Bd09::from_point(point)).point()
        }
        (CrsKind::Gcj02, CrsKind::Wgs84) => transform::gcj_to_wgs_with(
            Gcj02::from_point(point),
            inverse,
        )
        .point
        .point(),
        (CrsKind::Bd09, CrsKind::Wgs84) => {
            let gcj = transform::bd09_to_gcj(Bd09::from_point(point));
            transform::gcj_to_wgs_with(gcj, inverse).point.point()
        }
    }
}
