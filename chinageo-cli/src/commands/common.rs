//! Common types and utilities shared across CLI commands.

use clap::ValueEnum;
use serde_json::json;

use chinageo::config::{ConfigFile, OutputFormat};
use chinageo::{Crs, GeoPoint, InverseConfig};

/// Reference-system selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq)]
pub enum CrsKind {
    /// WGS-84, the global GPS datum
    Wgs84,
    /// GCJ-02, the Chinese national standard
    Gcj02,
    /// BD-09, Baidu's offset datum
    Bd09,
}

impl From<CrsKind> for Crs {
    fn from(kind: CrsKind) -> Self {
        match kind {
            CrsKind::Wgs84 => Crs::Wgs84,
            CrsKind::Gcj02 => Crs::Gcj02,
            CrsKind::Bd09 => Crs::Bd09,
        }
    }
}

/// Resolve inverse-search tuning from CLI args and config.
///
/// CLI takes precedence, then config, then defaults.
pub fn resolve_inverse_config(
    cli_threshold: Option<f64>,
    cli_max_iterations: Option<u32>,
    config: &ConfigFile,
) -> InverseConfig {
    let defaults = config.inverse_config();
    InverseConfig::default()
        .with_threshold_deg(cli_threshold.unwrap_or(defaults.threshold_deg))
        .with_max_iterations(cli_max_iterations.unwrap_or(defaults.max_iterations))
}

/// Resolve the output format from CLI args and config.
pub fn resolve_output_format(cli_json: bool, config: &ConfigFile) -> OutputFormat {
    if cli_json {
        OutputFormat::Json
    } else {
        config.output.format
    }
}

/// Print a coordinate result in the chosen format.
pub fn print_point(
    crs: Crs,
    point: GeoPoint,
    format: OutputFormat,
) -> Result<(), serde_json::Error> {
    match format {
        OutputFormat::Plain => {
            println!("{:.8}, {:.8}", point.lat(), point.lon());
        }
        OutputFormat::Json => {
            let value = json!({
                "crs": crs.name(),
                "lat": point.lat(),
                "lon": point.lon(),
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
