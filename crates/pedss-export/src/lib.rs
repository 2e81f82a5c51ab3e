//! pedss-export
//!
//! CSV and plain-text report rendering for saved assessments. Pure string
//! producers — file writing and the share sheet stay in the UI shell.

pub mod csv;
pub mod error;
pub mod report;

pub use csv::{csv_row, to_csv};
pub use error::ExportError;
pub use report::report;
