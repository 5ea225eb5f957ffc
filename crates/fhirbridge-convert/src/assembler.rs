//! Bundle Assembler: wrap built resources into one collection Bundle.

use fhirbridge_core::{Bundle, ClinicalResource, FhirDateTime, generate_bundle_id, now_utc};

use crate::Result;

/// Assemble a run-scoped Bundle with a fresh id and the current time.
pub fn assemble(resources: &[ClinicalResource]) -> Result<Bundle> {
    assemble_with(resources, generate_bundle_id(), now_utc())
}

/// Deterministic variant: the caller supplies the Bundle id and timestamp.
///
/// Order-preserving and validation-free; entry `i` wraps resource `i`.
pub fn assemble_with(
    resources: &[ClinicalResource],
    id: impl Into<String>,
    timestamp: FhirDateTime,
) -> Result<Bundle> {
    let mut bundle = Bundle::collection(id, timestamp);
    for resource in resources {
        bundle.push_resource(resource)?;
    }
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirbridge_core::Patient;

    fn patients(n: usize) -> Vec<ClinicalResource> {
        (1..=n)
            .map(|i| ClinicalResource::Patient(Patient::stub(format!("patient-{i}"))))
            .collect()
    }

    #[test]
    fn assemble_preserves_input_order() {
        let resources = patients(5);
        let bundle = assemble(&resources).unwrap();

        assert_eq!(bundle.len(), 5);
        assert_eq!(bundle.total, Some(5));
        for (i, entry) in bundle.entry.iter().enumerate() {
            assert_eq!(entry.resource["id"], format!("patient-{}", i + 1));
        }
    }

    #[test]
    fn assemble_with_is_deterministic() {
        let resources = patients(2);
        let timestamp: FhirDateTime = "2024-06-01T00:00:00Z".parse().unwrap();
        let a = assemble_with(&resources, "run-1", timestamp).unwrap();
        let b = assemble_with(&resources, "run-1", timestamp).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.id.as_deref(), Some("run-1"));
        assert_eq!(a.timestamp.as_deref(), Some("2024-06-01T00:00:00Z"));
    }

    #[test]
    fn empty_input_yields_empty_bundle() {
        let bundle = assemble(&[]).unwrap();
        assert!(bundle.is_empty());
        assert_eq!(bundle.total, Some(0));
        assert_eq!(bundle.bundle_type.as_deref(), Some("collection"));
    }
}
