//! Bundle container shared by both pipelines.
//!
//! Entries hold raw JSON values rather than [`ClinicalResource`]: a fetched
//! Bundle may contain resource types this system never builds, and the
//! flattener must still be able to walk them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::resource::ClinicalResource;
use crate::time::FhirDateTime;

fn bundle_tag() -> String {
    "Bundle".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BundleEntry {
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub resource: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    #[serde(rename = "resourceType", default = "bundle_tag")]
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub bundle_type: Option<String>,
    /// Kept as an opaque string: remote servers are not all strict about
    /// RFC3339 here, and a sloppy timestamp must not fail the whole parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Fresh collection Bundle, the only type the assembler generates.
    pub fn collection(id: impl Into<String>, timestamp: FhirDateTime) -> Self {
        Self {
            resource_type: bundle_tag(),
            id: Some(id.into()),
            bundle_type: Some("collection".to_string()),
            timestamp: Some(timestamp.to_string()),
            total: Some(0),
            entry: Vec::new(),
        }
    }

    /// Append a locally built resource, keeping `total` in step.
    pub fn push_resource(&mut self, resource: &ClinicalResource) -> Result<()> {
        let value = serde_json::to_value(resource)?;
        self.entry.push(BundleEntry { resource: value });
        self.total = Some(self.entry.len() as u64);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }

    /// Resources in entry order.
    pub fn resources(&self) -> impl Iterator<Item = &Value> {
        self.entry.iter().map(|e| &e.resource)
    }
}

impl Default for Bundle {
    fn default() -> Self {
        Self {
            resource_type: bundle_tag(),
            id: None,
            bundle_type: None,
            timestamp: None,
            total: None,
            entry: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Patient;
    use serde_json::json;

    #[test]
    fn collection_bundle_serializes_expected_shape() {
        let timestamp: FhirDateTime = "2024-01-01T00:00:00Z".parse().unwrap();
        let mut bundle = Bundle::collection("b-1", timestamp);
        bundle
            .push_resource(&ClinicalResource::Patient(Patient::stub("patient-1")))
            .unwrap();

        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(value["resourceType"], "Bundle");
        assert_eq!(value["type"], "collection");
        assert_eq!(value["total"], 1);
        assert_eq!(value["entry"][0]["resource"]["id"], "patient-1");
    }

    #[test]
    fn foreign_bundle_with_missing_fields_still_parses() {
        // Bare minimum a remote server might return.
        let bundle: Bundle = serde_json::from_value(json!({"resourceType": "Bundle"})).unwrap();
        assert!(bundle.is_empty());
        assert!(bundle.id.is_none());
        assert!(bundle.timestamp.is_none());
    }

    #[test]
    fn foreign_entry_without_resource_parses_as_null() {
        let bundle: Bundle = serde_json::from_value(json!({
            "resourceType": "Bundle",
            "entry": [{"fullUrl": "urn:uuid:x"}]
        }))
        .unwrap();
        assert_eq!(bundle.len(), 1);
        assert!(bundle.entry[0].resource.is_null());
    }
}
