//! Result export formats.

mod csv;

pub use csv::{export_csv, export_csv_to_path};
