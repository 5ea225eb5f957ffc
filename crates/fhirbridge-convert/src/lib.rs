//! Forward pipeline: tabular rows → FHIR Bundle.
//!
//! The stages compose as Row Loader → Resource Builder → Bundle Assembler →
//! Bundle Writer. Each stage is a pure function over its input; only the
//! writers touch the filesystem.

mod assembler;
mod builder;
mod columns;
mod row;
mod warnings;
mod writer;

pub use assembler::{assemble, assemble_with};
pub use builder::{BuildOutcome, build};
pub use columns::{
    CONDITION_COLUMNS, OBSERVATION_COLUMNS, PATIENT_COLUMNS, kinds_for, recognized_columns,
};
pub use row::{Row, read_rows};
pub use warnings::ConversionWarning;
pub use writer::{write_bundle, write_resources};

use std::io::Read;

use fhirbridge_core::Bundle;
use thiserror::Error;

/// Errors that can occur while converting rows to a Bundle.
#[derive(Debug, Error)]
pub enum Error {
    /// The tabular input could not be read or parsed.
    #[error("CSV input error: {0}")]
    Csv(#[from] csv::Error),

    /// A filesystem operation failed while persisting output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A resource or Bundle could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A core model operation failed.
    #[error(transparent)]
    Core(#[from] fhirbridge_core::CoreError),
}

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of a full row-to-Bundle conversion run.
#[derive(Debug)]
pub struct Conversion {
    pub bundle: Bundle,
    pub warnings: Vec<ConversionWarning>,
}

/// Run the whole forward pipeline over CSV input.
///
/// Row ordinals are 1-based, so the first data row yields `patient-1`.
/// Malformed field values surface as warnings on the returned
/// [`Conversion`], never as errors; only unreadable input fails the run.
pub fn convert_reader<R: Read>(input: R) -> Result<Conversion> {
    let rows = read_rows(input)?;

    let mut resources = Vec::new();
    let mut warnings = Vec::new();
    for (index, row) in rows.iter().enumerate() {
        let outcome = build(row, index + 1);
        resources.extend(outcome.resources);
        warnings.extend(outcome.warnings);
    }

    for warning in &warnings {
        tracing::warn!(ordinal = warning.ordinal, column = %warning.column, "{}", warning.message);
    }

    let bundle = assemble(&resources)?;
    tracing::info!(
        rows = rows.len(),
        resources = bundle.len(),
        warnings = warnings.len(),
        "converted tabular input to Bundle"
    );

    Ok(Conversion { bundle, warnings })
}
