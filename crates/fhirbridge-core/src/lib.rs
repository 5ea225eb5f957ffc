//! Core clinical data model for fhirbridge.
//!
//! Shared by the forward pipeline (rows → Bundle) and the reverse pipeline
//! (Bundle → flat CSV): resource types, common FHIR datatypes, the typed
//! [`ClinicalResource`] variants, the tolerant [`Bundle`] container, and
//! date/id helpers.

pub mod bundle;
pub mod datatypes;
pub mod error;
pub mod id;
pub mod resource;
pub mod time;
pub mod types;

pub use bundle::{Bundle, BundleEntry};
pub use datatypes::{
    Address, CodeableConcept, Coding, ContactPoint, HumanName, Identifier, Quantity, Reference,
};
pub use error::{CoreError, Result};
pub use id::{generate_bundle_id, patient_reference, resource_id};
pub use resource::{ClinicalResource, Condition, Observation, Patient};
pub use time::{FhirDateTime, now_utc, validate_date_cell};
pub use types::{ResourceKind, ResourceType};
