//! Bundle Flattener: project every entry onto a [`FlatRecord`].

use fhirbridge_core::Bundle;

use crate::flat::FlatRecord;

/// Flatten a Bundle into one record per entry, preserving entry order.
///
/// Pure: no clocks, no ids, no external state. Bundles fetched from a
/// remote server flatten the same way as locally assembled ones, and an
/// empty or missing entry list yields an empty sequence.
pub fn flatten(bundle: &Bundle) -> Vec<FlatRecord> {
    let records: Vec<FlatRecord> = bundle.resources().map(FlatRecord::from_resource).collect();
    tracing::debug!(entries = records.len(), "flattened Bundle");
    records
}
