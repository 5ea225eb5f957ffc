//! The flat projection of one Bundle entry.
//!
//! Every output column is populated by an explicit ordered list of
//! accessors; the first accessor that finds a string wins. The chains are
//! fixed so the same resource always flattens to the same record.

use serde::Serialize;
use serde_json::Value;

/// Output columns, in header order.
pub const COLUMNS: [&str; 6] = [
    "resourceType",
    "id",
    "status",
    "code_text",
    "effective_date",
    "patient_reference",
];

type Accessor = fn(&Value) -> Option<&str>;

/// `code.text`, else the first coding display under `type[0]`.
const CODE_TEXT_CHAIN: &[Accessor] = &[
    |r| r.pointer("/code/text").and_then(Value::as_str),
    |r| r.pointer("/type/0/coding/0/display").and_then(Value::as_str),
];

/// `effectiveDateTime`, else `onsetDateTime`, else generic `date`.
const EFFECTIVE_DATE_CHAIN: &[Accessor] = &[
    |r| r.pointer("/effectiveDateTime").and_then(Value::as_str),
    |r| r.pointer("/onsetDateTime").and_then(Value::as_str),
    |r| r.pointer("/date").and_then(Value::as_str),
];

/// `subject.reference`, else `patient.reference`.
const PATIENT_REFERENCE_CHAIN: &[Accessor] = &[
    |r| r.pointer("/subject/reference").and_then(Value::as_str),
    |r| r.pointer("/patient/reference").and_then(Value::as_str),
];

fn first_match(resource: &Value, chain: &[Accessor]) -> Option<String> {
    chain
        .iter()
        .find_map(|accessor| accessor(resource))
        .map(str::to_string)
}

fn direct(resource: &Value, field: &str) -> Option<String> {
    resource.get(field).and_then(Value::as_str).map(str::to_string)
}

/// One flattened Bundle entry. A plain value copy, not a live view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct FlatRecord {
    #[serde(rename = "resourceType")]
    pub resource_type: Option<String>,
    pub id: Option<String>,
    pub status: Option<String>,
    pub code_text: Option<String>,
    pub effective_date: Option<String>,
    pub patient_reference: Option<String>,
}

impl FlatRecord {
    /// Project a resource of any shape onto the six columns. Unknown
    /// resource types populate whatever columns they can.
    pub fn from_resource(resource: &Value) -> Self {
        Self {
            resource_type: direct(resource, "resourceType"),
            id: direct(resource, "id"),
            status: direct(resource, "status"),
            code_text: first_match(resource, CODE_TEXT_CHAIN),
            effective_date: first_match(resource, EFFECTIVE_DATE_CHAIN),
            patient_reference: first_match(resource, PATIENT_REFERENCE_CHAIN),
        }
    }

    /// Column values in header order, absent cells as empty strings.
    pub fn values(&self) -> [&str; 6] {
        fn cell(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or("")
        }
        [
            cell(&self.resource_type),
            cell(&self.id),
            cell(&self.status),
            cell(&self.code_text),
            cell(&self.effective_date),
            cell(&self.patient_reference),
        ]
    }
}
