use serde::Serialize;
use std::fmt;

/// A non-fatal problem found while converting one row.
///
/// Warnings accumulate on the conversion run; the offending field is
/// omitted from the resource and processing continues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionWarning {
    /// 1-based row ordinal, matching generated resource ids.
    pub ordinal: usize,
    pub column: String,
    pub message: String,
}

impl ConversionWarning {
    pub fn new(ordinal: usize, column: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ordinal,
            column: column.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}, column '{}': {}", self.ordinal, self.column, self.message)
    }
}
