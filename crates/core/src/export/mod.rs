//! CSV export of domain collections.

mod csv_export;

pub use csv_export::{rows_to_csv, to_csv, ExportCollection};
