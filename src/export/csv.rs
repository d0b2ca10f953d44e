//! CSV export.
//!
//! Flattened view of batch results: one row per completed lookup, list
//! statuses collapsed into a single `name:status` column joined by `|`.
//! Failed outcomes carry no lookup data and are skipped.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::models::LookupOutcome;

/// Column headers, in output order.
const HEADERS: [&str; 4] = ["IP", "Reverse Hostname", "Naming Convention", "List Status"];

/// Writes completed results as CSV to an arbitrary writer.
///
/// Returns the number of data rows written.
pub fn export_csv<W: Write>(outcomes: &[LookupOutcome], writer: W) -> Result<usize> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer
        .write_record(HEADERS)
        .context("Failed to write CSV header")?;

    let mut rows = 0;
    for outcome in outcomes {
        let LookupOutcome::Completed(result) = outcome else {
            continue;
        };

        let list_status = result
            .list_statuses
            .iter()
            .map(|s| format!("{}:{}", s.list, s.status))
            .collect::<Vec<_>>()
            .join("|");

        let reverse = result.standards_compliance.reverse_hostname.to_string();
        let naming = result.standards_compliance.naming_convention.to_string();
        csv_writer
            .write_record([
                result.ip.as_str(),
                reverse.as_str(),
                naming.as_str(),
                list_status.as_str(),
            ])
            .with_context(|| format!("Failed to write CSV row for {}", result.ip))?;
        rows += 1;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(rows)
}

/// Writes completed results as CSV to a file path.
pub fn export_csv_to_path(outcomes: &[LookupOutcome], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    export_csv(outcomes, file)
}
