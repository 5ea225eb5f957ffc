use crate::types::ResourceKind;

/// Generate a run-scoped Bundle id.
pub fn generate_bundle_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Resource id as a pure function of kind and row ordinal.
///
/// Re-running the builder on the same input yields the same ids, and the
/// subject reference for a row can be derived without shared counters.
pub fn resource_id(kind: ResourceKind, ordinal: usize) -> String {
    format!("{}-{}", kind.id_prefix(), ordinal)
}

/// The reference string pointing at the Patient built from `ordinal`.
pub fn patient_reference(ordinal: usize) -> String {
    format!("Patient/{}", resource_id(ResourceKind::Patient, ordinal))
}
