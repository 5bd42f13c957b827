//! Route table reporting.
//!
//! The resolved table (GTFS short name, route ID, published names) is logged
//! and can be appended to a CSV file across runs.

use anyhow::Result;
use tracing::{debug, info};

use crate::model::RouteSummary;
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Logs every resolved route at debug level.
pub fn print_pretty(routes: &[RouteSummary]) {
    debug!("{:#?}", routes);
}

/// Logs the resolved routes as one JSON array.
pub fn print_json(routes: &[RouteSummary]) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(routes)?);
    Ok(())
}

/// Appends one row per resolved route to the CSV file at `path`.
///
/// The header row is written only when the file is created, so successive
/// runs accumulate in one table.
pub fn append_records(path: &str, routes: &[RouteSummary]) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, rows = routes.len(), "Appending route table");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists)
        .from_writer(file);

    for route in routes {
        writer.serialize(route)?;
    }
    writer.flush()?;

    Ok(())
}
