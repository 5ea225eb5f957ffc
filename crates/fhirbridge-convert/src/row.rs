//! Row loading: structured tabular input → ordered column/value mappings.

use std::io::Read;

use indexmap::IndexMap;

use crate::Result;

/// One line of tabular input: an ordered mapping from column name to value.
///
/// Blank cells are never stored, so `get` returning `None` is the single
/// representation of "absent" throughout the builder.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: IndexMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from (column, value) pairs, normalizing names and
    /// dropping blank values. Mostly useful in tests and form-style input.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut row = Self::new();
        for (column, value) in pairs {
            row.insert(column.as_ref(), value.as_ref());
        }
        row
    }

    /// Store a cell. Blank values are ignored; names are normalized the
    /// same way header cells are.
    pub fn insert(&mut self, column: &str, value: &str) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }
        self.columns
            .insert(normalize_column(column), value.to_string());
    }

    /// The cell value for `column`, if present and non-blank.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Whether any of the given columns holds a value.
    pub fn has_any(&self, columns: &[&str]) -> bool {
        columns.iter().any(|c| self.columns.contains_key(*c))
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Header names arrive in whatever casing the spreadsheet used.
fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Read all rows from CSV input. The first record is the header.
pub fn read_rows<R: Read>(input: R) -> Result<Vec<Row>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_column)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Row::new();
        for (header, value) in headers.iter().zip(record.iter()) {
            if !value.is_empty() {
                row.columns.insert(header.clone(), value.to_string());
            }
        }
        rows.push(row);
    }

    Ok(rows)
}
