//! Resource Builder: one tabular row → typed clinical resources.
//!
//! Which kinds get built is decided by the column-group table in
//! [`crate::columns`]; ids are a pure function of (kind, ordinal). A row
//! with observation or condition data but no patient columns still gets a
//! minimal anonymous Patient so every subject reference resolves inside
//! the Bundle.

use fhirbridge_core::{
    Address, ClinicalResource, CodeableConcept, Coding, Condition, ContactPoint, HumanName,
    Identifier, Observation, Patient, Quantity, Reference, ResourceKind, patient_reference,
    resource_id, validate_date_cell,
};

use crate::columns::kinds_for;
use crate::row::Row;
use crate::warnings::ConversionWarning;

const LOINC_SYSTEM: &str = "http://loinc.org";
const SNOMED_SYSTEM: &str = "http://snomed.info/sct";
const UCUM_SYSTEM: &str = "http://unitsofmeasure.org";
const MRN_TYPE_SYSTEM: &str = "http://terminology.hl7.org/CodeSystem/v2-0203";
const OBSERVATION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/observation-category";
const CONDITION_CLINICAL_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-clinical";
const CONDITION_VER_STATUS_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-ver-status";
const CONDITION_CATEGORY_SYSTEM: &str =
    "http://terminology.hl7.org/CodeSystem/condition-category";

/// Resources and warnings produced from one row.
#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub resources: Vec<ClinicalResource>,
    pub warnings: Vec<ConversionWarning>,
}

/// Build all resources a row triggers. `ordinal` is the 1-based row
/// position; re-running on the same input yields identical output.
pub fn build(row: &Row, ordinal: usize) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    let kinds = kinds_for(row);
    if kinds.is_empty() {
        return outcome;
    }

    // Dependent resources reference the row's Patient; synthesize a stub
    // when no patient column is present so the reference still resolves.
    if !kinds.contains(&ResourceKind::Patient) {
        outcome.resources.push(ClinicalResource::Patient(Patient::stub(
            resource_id(ResourceKind::Patient, ordinal),
        )));
    }

    for kind in kinds {
        let resource = match kind {
            ResourceKind::Patient => build_patient(row, ordinal, &mut outcome.warnings),
            ResourceKind::Observation => build_observation(row, ordinal, &mut outcome.warnings),
            ResourceKind::Condition => build_condition(row, ordinal, &mut outcome.warnings),
        };
        outcome.resources.push(resource);
    }

    outcome
}

fn build_patient(row: &Row, ordinal: usize, warnings: &mut Vec<ConversionWarning>) -> ClinicalResource {
    let mut patient = Patient::stub(resource_id(ResourceKind::Patient, ordinal));

    if let Some(mrn) = row.get("patient_id") {
        patient.identifier.push(Identifier {
            r#use: Some("usual".to_string()),
            r#type: Some(CodeableConcept::coded(
                MRN_TYPE_SYSTEM,
                "MR",
                "Medical Record Number",
            )),
            value: Some(mrn.to_string()),
        });
    }

    let given = row.get("first_name");
    let family = row.get("last_name");
    if given.is_some() || family.is_some() {
        patient.name.push(HumanName {
            r#use: Some("official".to_string()),
            family: family.map(str::to_string),
            given: given.map(str::to_string).into_iter().collect(),
        });
    }

    patient.gender = row.get("gender").map(str::to_lowercase);
    patient.birth_date = checked_date(row, "birth_date", ordinal, warnings);

    let address = Address {
        r#use: Some("home".to_string()),
        line: row.get("address").map(str::to_string).into_iter().collect(),
        city: row.get("city").map(str::to_string),
        state: row.get("state").map(str::to_string),
        postal_code: row.get("postal_code").map(str::to_string),
        country: row.get("country").map(str::to_string),
    };
    if !address.is_empty() {
        patient.address.push(address);
    }

    if let Some(phone) = row.get("phone") {
        patient.telecom.push(ContactPoint::home("phone", phone));
    }
    if let Some(email) = row.get("email") {
        patient.telecom.push(ContactPoint::home("email", email));
    }

    ClinicalResource::Patient(patient)
}

fn build_observation(
    row: &Row,
    ordinal: usize,
    warnings: &mut Vec<ConversionWarning>,
) -> ClinicalResource {
    let mut code = CodeableConcept::default();
    if let Some(name) = row.get("observation_name") {
        code.text = Some(name.to_string());
    }
    if let Some(loinc) = row.get("loinc_code") {
        code.coding.push(Coding {
            system: Some(LOINC_SYSTEM.to_string()),
            code: Some(loinc.to_string()),
            display: row.get("observation_name").map(str::to_string),
        });
    }

    let (value_quantity, value_string) = observation_value(row);

    ClinicalResource::Observation(Observation {
        id: resource_id(ResourceKind::Observation, ordinal),
        status: "final".to_string(),
        category: vec![CodeableConcept::coded(
            OBSERVATION_CATEGORY_SYSTEM,
            "vital-signs",
            "Vital Signs",
        )],
        code,
        subject: Reference::new(patient_reference(ordinal)),
        effective_date_time: checked_date(row, "observation_date", ordinal, warnings),
        value_quantity,
        value_string,
    })
}

/// Numeric cells become a valueQuantity, everything else a valueString.
/// Never coerce an unparseable value to zero.
fn observation_value(row: &Row) -> (Option<Quantity>, Option<String>) {
    let raw = row.get("value");
    let unit = row.get("unit");
    let unit_code = row.get("unit_code");

    match raw.map(|v| (v, v.parse::<f64>())) {
        Some((_, Ok(number))) => (
            Some(Quantity {
                value: Some(number),
                unit: unit.map(str::to_string),
                system: Some(UCUM_SYSTEM.to_string()),
                code: unit_code.map(str::to_string),
            }),
            None,
        ),
        Some((text, Err(_))) => (None, Some(text.to_string())),
        None if unit.is_some() || unit_code.is_some() => (
            Some(Quantity {
                value: None,
                unit: unit.map(str::to_string),
                system: Some(UCUM_SYSTEM.to_string()),
                code: unit_code.map(str::to_string),
            }),
            None,
        ),
        None => (None, None),
    }
}

fn build_condition(
    row: &Row,
    ordinal: usize,
    warnings: &mut Vec<ConversionWarning>,
) -> ClinicalResource {
    let mut code = CodeableConcept::default();
    if let Some(name) = row.get("condition_name") {
        code.text = Some(name.to_string());
    }
    if let Some(snomed) = row.get("snomed_code") {
        code.coding.push(Coding {
            system: Some(SNOMED_SYSTEM.to_string()),
            code: Some(snomed.to_string()),
            display: row.get("condition_name").map(str::to_string),
        });
    }

    ClinicalResource::Condition(Condition {
        id: resource_id(ResourceKind::Condition, ordinal),
        clinical_status: Some(CodeableConcept::coded(
            CONDITION_CLINICAL_SYSTEM,
            "active",
            "Active",
        )),
        verification_status: Some(CodeableConcept::coded(
            CONDITION_VER_STATUS_SYSTEM,
            "confirmed",
            "Confirmed",
        )),
        category: vec![CodeableConcept::coded(
            CONDITION_CATEGORY_SYSTEM,
            "encounter-diagnosis",
            "Encounter Diagnosis",
        )],
        code,
        subject: Reference::new(patient_reference(ordinal)),
        onset_date_time: checked_date(row, "onset_date", ordinal, warnings),
    })
}

/// Validated date cell, or `None` plus a warning when the cell is malformed.
fn checked_date(
    row: &Row,
    column: &str,
    ordinal: usize,
    warnings: &mut Vec<ConversionWarning>,
) -> Option<String> {
    let raw = row.get(column)?;
    match validate_date_cell(raw) {
        Ok(date) => Some(date.to_string()),
        Err(err) => {
            warnings.push(ConversionWarning::new(ordinal, column, err.to_string()));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirbridge_core::ResourceType;

    fn ids(outcome: &BuildOutcome) -> Vec<&str> {
        outcome.resources.iter().map(|r| r.id()).collect()
    }

    #[test]
    fn patient_only_row_yields_exactly_one_patient() {
        let row = Row::from_pairs([
            ("first_name", "Ann"),
            ("last_name", "Lee"),
            ("gender", "Female"),
            ("birth_date", "1980-05-17"),
        ]);
        let outcome = build(&row, 4);

        assert_eq!(outcome.resources.len(), 1);
        assert!(outcome.warnings.is_empty());
        let ClinicalResource::Patient(patient) = &outcome.resources[0] else {
            panic!("expected Patient");
        };
        assert_eq!(patient.id, "patient-4");
        assert_eq!(patient.gender.as_deref(), Some("female"));
        assert_eq!(patient.birth_date.as_deref(), Some("1980-05-17"));
        assert_eq!(patient.name[0].given, vec!["Ann"]);
        assert_eq!(patient.name[0].family.as_deref(), Some("Lee"));
    }

    #[test]
    fn observation_subject_references_the_same_rows_patient() {
        let row = Row::from_pairs([
            ("first_name", "Ann"),
            ("last_name", "Lee"),
            ("observation_name", "Weight"),
            ("value", "70"),
            ("unit", "kg"),
            ("observation_date", "2024-01-01"),
        ]);
        let outcome = build(&row, 1);

        assert_eq!(ids(&outcome), vec!["patient-1", "observation-1"]);
        let ClinicalResource::Observation(obs) = &outcome.resources[1] else {
            panic!("expected Observation");
        };
        assert_eq!(obs.subject.reference, "Patient/patient-1");
        assert_eq!(obs.effective_date_time.as_deref(), Some("2024-01-01"));
        assert_eq!(obs.code.text.as_deref(), Some("Weight"));
        let quantity = obs.value_quantity.as_ref().unwrap();
        assert_eq!(quantity.value, Some(70.0));
        assert_eq!(quantity.unit.as_deref(), Some("kg"));
    }

    #[test]
    fn observation_without_patient_columns_gets_a_stub_patient() {
        let row = Row::from_pairs([("observation_name", "Weight"), ("value", "70")]);
        let outcome = build(&row, 2);

        assert_eq!(ids(&outcome), vec!["patient-2", "observation-2"]);
        let ClinicalResource::Patient(stub) = &outcome.resources[0] else {
            panic!("expected Patient stub");
        };
        assert!(stub.name.is_empty());
        assert!(stub.gender.is_none());
        let ClinicalResource::Observation(obs) = &outcome.resources[1] else {
            panic!("expected Observation");
        };
        assert_eq!(obs.subject.reference, "Patient/patient-2");
    }

    #[test]
    fn condition_carries_snomed_coding_and_statuses() {
        let row = Row::from_pairs([
            ("first_name", "Ann"),
            ("condition_name", "Asthma"),
            ("snomed_code", "195967001"),
            ("onset_date", "2020-03-02"),
        ]);
        let outcome = build(&row, 1);

        let ClinicalResource::Condition(condition) = &outcome.resources[1] else {
            panic!("expected Condition");
        };
        assert_eq!(condition.id, "condition-1");
        assert_eq!(condition.code.text.as_deref(), Some("Asthma"));
        assert_eq!(condition.code.coding[0].code.as_deref(), Some("195967001"));
        assert_eq!(
            condition.code.coding[0].system.as_deref(),
            Some(SNOMED_SYSTEM)
        );
        assert_eq!(condition.onset_date_time.as_deref(), Some("2020-03-02"));
        assert_eq!(
            condition.clinical_status.as_ref().unwrap().coding[0]
                .code
                .as_deref(),
            Some("active")
        );
    }

    #[test]
    fn malformed_date_is_omitted_and_warned() {
        let row = Row::from_pairs([("observation_name", "Weight"), ("observation_date", "not-a-date")]);
        let outcome = build(&row, 3);

        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].column, "observation_date");
        assert_eq!(outcome.warnings[0].ordinal, 3);
        let ClinicalResource::Observation(obs) = &outcome.resources[1] else {
            panic!("expected Observation");
        };
        assert!(obs.effective_date_time.is_none());
    }

    #[test]
    fn non_numeric_value_becomes_value_string_not_zero() {
        let row = Row::from_pairs([("observation_name", "Urine color"), ("value", "amber")]);
        let outcome = build(&row, 1);

        let ClinicalResource::Observation(obs) = &outcome.resources[1] else {
            panic!("expected Observation");
        };
        assert!(obs.value_quantity.is_none());
        assert_eq!(obs.value_string.as_deref(), Some("amber"));
    }

    #[test]
    fn empty_row_builds_nothing() {
        let outcome = build(&Row::new(), 1);
        assert!(outcome.resources.is_empty());
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn building_twice_is_idempotent() {
        let row = Row::from_pairs([("first_name", "Ann"), ("condition_name", "Asthma")]);
        let first = build(&row, 5);
        let second = build(&row, 5);
        assert_eq!(first.resources, second.resources);
        assert_eq!(
            first.resources.iter().map(|r| r.resource_type()).collect::<Vec<_>>(),
            vec![ResourceType::Patient, ResourceType::Condition]
        );
    }
}
