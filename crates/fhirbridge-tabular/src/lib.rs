//! Reverse pipeline: FHIR Bundle → fixed-column tabular records.
//!
//! [`flatten`] projects every Bundle entry onto a [`FlatRecord`] with the
//! columns `resourceType, id, status, code_text, effective_date,
//! patient_reference`; [`CsvWriter`] serializes the records as delimited
//! text. Both halves are pure over their inputs.

mod csv_writer;
mod flat;
mod flatten;

pub use csv_writer::CsvWriter;
pub use flat::{COLUMNS, FlatRecord};
pub use flatten::flatten;

use thiserror::Error;

/// Errors that can occur while producing tabular output.
#[derive(Debug, Error)]
pub enum Error {
    /// An error occurred while generating output.
    #[error("Output error: {0}")]
    Output(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Flatten a Bundle and render it as CSV with the standard header.
pub fn bundle_to_csv(bundle: &fhirbridge_core::Bundle) -> Result<String> {
    let records = flatten(bundle);
    CsvWriter::new().write_to_string(&records)
}
