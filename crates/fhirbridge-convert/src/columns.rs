//! Recognized column groups and the group → resource kind dispatch table.
//!
//! Which resource kinds a row produces is decided here and only here: a
//! kind is emitted when any column of its group holds a value. Columns
//! outside every group are ignored.

use fhirbridge_core::ResourceKind;

use crate::row::Row;

/// Columns that identify a Patient.
pub const PATIENT_COLUMNS: &[&str] = &[
    "patient_id",
    "first_name",
    "last_name",
    "gender",
    "birth_date",
    "address",
    "city",
    "state",
    "postal_code",
    "country",
    "phone",
    "email",
];

/// Columns that describe an Observation.
pub const OBSERVATION_COLUMNS: &[&str] = &[
    "observation_name",
    "loinc_code",
    "value",
    "unit",
    "unit_code",
    "observation_date",
];

/// Columns that describe a Condition.
pub const CONDITION_COLUMNS: &[&str] = &["condition_name", "snomed_code", "onset_date"];

const GROUPS: &[(ResourceKind, &[&str])] = &[
    (ResourceKind::Patient, PATIENT_COLUMNS),
    (ResourceKind::Observation, OBSERVATION_COLUMNS),
    (ResourceKind::Condition, CONDITION_COLUMNS),
];

/// The resource kinds a row triggers, in emission order (Patient first).
pub fn kinds_for(row: &Row) -> Vec<ResourceKind> {
    GROUPS
        .iter()
        .filter(|(_, columns)| row.has_any(columns))
        .map(|(kind, _)| *kind)
        .collect()
}

/// Every column name the builder recognizes.
pub fn recognized_columns() -> impl Iterator<Item = &'static str> {
    GROUPS.iter().flat_map(|(_, columns)| columns.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patient_only_row_triggers_patient_only() {
        let row = Row::from_pairs([("first_name", "Ann"), ("city", "Springfield")]);
        assert_eq!(kinds_for(&row), vec![ResourceKind::Patient]);
    }

    #[test]
    fn each_group_triggers_its_own_kind() {
        let row = Row::from_pairs([("loinc_code", "29463-7")]);
        assert_eq!(kinds_for(&row), vec![ResourceKind::Observation]);

        let row = Row::from_pairs([("snomed_code", "195967001")]);
        assert_eq!(kinds_for(&row), vec![ResourceKind::Condition]);
    }

    #[test]
    fn mixed_row_emits_patient_first() {
        let row = Row::from_pairs([
            ("condition_name", "Asthma"),
            ("observation_name", "Weight"),
            ("last_name", "Lee"),
        ]);
        assert_eq!(
            kinds_for(&row),
            vec![
                ResourceKind::Patient,
                ResourceKind::Observation,
                ResourceKind::Condition
            ]
        );
    }

    #[test]
    fn unrecognized_columns_trigger_nothing() {
        let row = Row::from_pairs([("favorite_color", "blue")]);
        assert!(kinds_for(&row).is_empty());
    }

    #[test]
    fn groups_do_not_overlap() {
        let mut seen = std::collections::HashSet::new();
        for column in recognized_columns() {
            assert!(seen.insert(column), "column {column} listed twice");
        }
    }
}
