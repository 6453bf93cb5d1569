use predicates::prelude::*;

mod common;
use common::{COMPLETE_MOD_PROPERTIES, TestProject};

/// A complete configuration validates cleanly.
#[test]
fn test_validate_complete_configuration() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is complete"))
        .stdout(predicate::str::contains("project_id = examplemod"))
        .stdout(predicate::str::contains(
            "artifact_locator = com.example:examplemod:1.21-2.0-SNAPSHOT",
        ));
}

/// A bare project reports every missing setting and exits non-zero.
#[test]
fn test_validate_bare_project_lists_missing_settings() {
    let project = TestProject::new().unwrap();

    project
        .modmeta_command()
        .arg("validate")
        .assert()
        .failure()
        .stdout(predicate::str::contains("project_group"))
        .stdout(predicate::str::contains("project_id"))
        .stdout(predicate::str::contains("license_name"))
        .stderr(predicate::str::contains("validation failed"));
}

/// An unparseable value is reported as invalid, not silently dropped.
#[test]
fn test_validate_reports_invalid_values() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .args(["validate", "-P", "java_version=seventeen"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("java_version"));
}

/// JSON output is machine-readable and carries the same findings.
#[test]
fn test_validate_json_format() {
    let project = TestProject::new().unwrap();

    let output = project
        .modmeta_command()
        .args(["validate", "--format", "json"])
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();
    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let missing: Vec<&str> = report["missing"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert!(missing.contains(&"project_group"));
    // Defaults resolve even on a bare project.
    assert!(
        report["resolved"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s["name"] == "release_type" && s["value"] == "SNAPSHOT")
    );
}

/// Without maven credentials the publishing target is the local folder.
#[test]
fn test_validate_reports_local_publishing_fallback() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .arg("validate")
        .assert()
        .success()
        .stdout(predicate::str::contains("local repository folder"));
}

/// With the full credential set the maven target is shown.
#[test]
fn test_validate_reports_maven_target() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .arg("validate")
        .env("MAVEN_URL", "https://maven.example.com/releases")
        .env("MAVEN_USER", "ci")
        .env("MAVEN_PASSWORD", "secret")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "maven repository https://maven.example.com/releases",
        ));
}
