//! Typed clinical resources produced by the forward pipeline.

use serde::{Deserialize, Serialize};

use crate::datatypes::{
    Address, CodeableConcept, ContactPoint, HumanName, Identifier, Quantity, Reference,
};
use crate::types::ResourceType;

/// One typed clinical record, tagged by `resourceType` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "resourceType")]
pub enum ClinicalResource {
    Patient(Patient),
    Observation(Observation),
    Condition(Condition),
}

impl ClinicalResource {
    pub fn resource_type(&self) -> ResourceType {
        match self {
            ClinicalResource::Patient(_) => ResourceType::Patient,
            ClinicalResource::Observation(_) => ResourceType::Observation,
            ClinicalResource::Condition(_) => ResourceType::Condition,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ClinicalResource::Patient(p) => &p.id,
            ClinicalResource::Observation(o) => &o.id,
            ClinicalResource::Condition(c) => &c.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub identifier: Vec<Identifier>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub name: Vec<HumanName>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(rename = "birthDate", skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub address: Vec<Address>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub telecom: Vec<ContactPoint>,
}

impl Patient {
    /// Minimal stub carrying only an id.
    ///
    /// Emitted when a row has observation/condition data but no patient
    /// columns, so subject references always resolve within the Bundle.
    pub fn stub(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            identifier: Vec::new(),
            name: Vec::new(),
            gender: None,
            birth_date: None,
            address: Vec::new(),
            telecom: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(rename = "effectiveDateTime", skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,
    #[serde(rename = "valueQuantity", skip_serializing_if = "Option::is_none")]
    pub value_quantity: Option<Quantity>,
    #[serde(rename = "valueString", skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: String,
    #[serde(rename = "clinicalStatus", skip_serializing_if = "Option::is_none")]
    pub clinical_status: Option<CodeableConcept>,
    #[serde(rename = "verificationStatus", skip_serializing_if = "Option::is_none")]
    pub verification_status: Option<CodeableConcept>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub category: Vec<CodeableConcept>,
    pub code: CodeableConcept,
    pub subject: Reference,
    #[serde(rename = "onsetDateTime", skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,
}
