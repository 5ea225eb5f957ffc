use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resource types handled by the conversion pipelines.
///
/// Anything outside the clinical scope (Patient, Observation, Condition)
/// round-trips through `Custom` so fetched bundles never fail to parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    Patient,
    Observation,
    Condition,
    Bundle,
    #[serde(untagged)]
    Custom(String),
}

impl ResourceType {
    /// Whether this resource type is built by the forward pipeline.
    pub fn is_clinical(&self) -> bool {
        matches!(
            self,
            ResourceType::Patient | ResourceType::Observation | ResourceType::Condition
        )
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceType::Patient => write!(f, "Patient"),
            ResourceType::Observation => write!(f, "Observation"),
            ResourceType::Condition => write!(f, "Condition"),
            ResourceType::Bundle => write!(f, "Bundle"),
            ResourceType::Custom(name) => write!(f, "{}", name),
        }
    }
}

impl FromStr for ResourceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "Patient" => ResourceType::Patient,
            "Observation" => ResourceType::Observation,
            "Condition" => ResourceType::Condition,
            "Bundle" => ResourceType::Bundle,
            other => ResourceType::Custom(other.to_string()),
        })
    }
}

/// The clinical resource kinds the Resource Builder can emit.
///
/// Resource ids are a pure function of (kind, ordinal), see [`crate::id::resource_id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Patient,
    Observation,
    Condition,
}

impl ResourceKind {
    /// Lowercase prefix used in generated resource ids (`patient-3`).
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ResourceKind::Patient => "patient",
            ResourceKind::Observation => "observation",
            ResourceKind::Condition => "condition",
        }
    }

    pub fn resource_type(&self) -> ResourceType {
        match self {
            ResourceKind::Patient => ResourceType::Patient,
            ResourceKind::Observation => ResourceType::Observation,
            ResourceKind::Condition => ResourceType::Condition,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_resource_type_round_trips_as_custom() {
        let parsed: ResourceType = "ViewDefinition".parse().unwrap();
        assert_eq!(parsed, ResourceType::Custom("ViewDefinition".to_string()));
        assert_eq!(parsed.to_string(), "ViewDefinition");
        assert!(!parsed.is_clinical());
    }

    #[test]
    fn clinical_types_parse_to_variants() {
        let parsed: ResourceType = "Observation".parse().unwrap();
        assert_eq!(parsed, ResourceType::Observation);
        assert!(parsed.is_clinical());
    }
}
