//! Distance command - great-circle distance between two WGS-84 points.

use clap::Args;
use serde_json::json;

use chinageo::config::{ConfigFile, OutputFormat};
use chinageo::{distance_meters, GeoPoint, Wgs84};

use super::common::resolve_output_format;
use crate::error::CliError;

/// Arguments for the distance command.
#[derive(Debug, Args)]
pub struct DistanceArgs {
    /// Latitude of the first point (WGS-84)
    pub lat1: f64,

    /// Longitude of the first point (WGS-84)
    pub lon1: f64,

    /// Latitude of the second point (WGS-84)
    pub lat2: f64,

    /// Longitude of the second point (WGS-84)
    pub lon2: f64,

    /// Emit JSON instead of plain text
    #[arg(long)]
    pub json: bool,
}

/// Run the distance command.
pub fn run(args: DistanceArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let format = resolve_output_format(args.json, &config);

    let a = Wgs84::from_point(GeoPoint::new(args.lat1, args.lon1)?);
    let b = Wgs84::from_point(GeoPoint::new(args.lat2, args.lon2)?);
    let meters = distance_meters(a, b);

    match format {
        OutputFormat::Plain => {
            println!("{:.3} m ({:.3} km)", meters, meters / 1000.0);
        }
        OutputFormat::Json => {
            let value = json!({ "meters": meters });
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(())
}
