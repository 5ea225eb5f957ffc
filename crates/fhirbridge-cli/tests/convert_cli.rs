use std::process::Command;

#[test]
fn convert_writes_a_linked_bundle() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("patients.csv");
    let bundle_out = dir.path().join("bundle.json");
    std::fs::write(
        &input,
        "first_name,last_name,observation_name,value,unit,observation_date\n\
         Ann,Lee,Weight,70,kg,2024-01-01\n",
    )
    .expect("write input");

    let output = Command::new(env!("CARGO_BIN_EXE_fhirbridge"))
        .arg("convert")
        .arg(&input)
        .arg("--bundle-out")
        .arg(&bundle_out)
        .output()
        .expect("run fhirbridge convert");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 2 resources"));
    assert!(stdout.contains("Patient: 1"));
    assert!(stdout.contains("Observation: 1"));

    let raw = std::fs::read_to_string(&bundle_out).expect("read bundle");
    let bundle: serde_json::Value = serde_json::from_str(&raw).expect("parse bundle");
    assert_eq!(bundle["type"], "collection");
    assert_eq!(bundle["entry"][0]["resource"]["id"], "patient-1");
    assert_eq!(
        bundle["entry"][1]["resource"]["subject"]["reference"],
        "Patient/patient-1"
    );
}

#[test]
fn convert_warns_on_malformed_dates_but_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("patients.csv");
    let bundle_out = dir.path().join("bundle.json");
    std::fs::write(
        &input,
        "first_name,observation_name,observation_date\nAnn,Weight,not-a-date\n",
    )
    .expect("write input");

    let output = Command::new(env!("CARGO_BIN_EXE_fhirbridge"))
        .arg("convert")
        .arg(&input)
        .arg("--bundle-out")
        .arg(&bundle_out)
        .output()
        .expect("run fhirbridge convert");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("observation_date"));

    let raw = std::fs::read_to_string(&bundle_out).expect("read bundle");
    assert!(!raw.contains("effectiveDateTime"));
}

#[test]
fn view_summarizes_a_bundle_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bundle_path = dir.path().join("bundle.json");
    std::fs::write(
        &bundle_path,
        r#"{"resourceType":"Bundle","id":"b-1","type":"collection",
            "timestamp":"2024-01-01T00:00:00Z",
            "entry":[{"resource":{"resourceType":"Patient","id":"patient-1"}}]}"#,
    )
    .expect("write bundle");

    let output = Command::new(env!("CARGO_BIN_EXE_fhirbridge"))
        .arg("view")
        .arg(&bundle_path)
        .output()
        .expect("run fhirbridge view");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Bundle: b-1"));
    assert!(stdout.contains("Entries: 1"));
    assert!(stdout.contains("1. Patient (ID: patient-1)"));
}
