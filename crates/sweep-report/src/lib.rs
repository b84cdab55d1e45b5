//! # sweep-report
//!
//! Rendering and export of sweep results: run summary, boxed sample tables
//! for the console, TSV files in display units, and a spreadsheet workbook
//! and JSON document in native units.
//!
//! Display scaling (e.g. Hz shown as kHz) is applied here; the engine only
//! ever sees native values.

pub mod columns;
pub mod format;
pub mod json;
pub mod summary;
pub mod table;
pub mod tsv;
pub mod xlsx;

pub use columns::DisplayColumn;
pub use format::{format_cell, format_g};
pub use json::{write_json, JsonReport};
pub use summary::RunSummary;
pub use table::SampleTable;
pub use tsv::write_tsv;
pub use xlsx::write_xlsx;
