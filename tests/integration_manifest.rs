use predicates::prelude::*;

mod common;
use common::{COMPLETE_MOD_PROPERTIES, TestProject};

/// The manifest block carries the fixed attribute set.
#[test]
fn test_manifest_attribute_block() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Maven-Artifact: com.example:examplemod:1.21-2.0-SNAPSHOT",
        ))
        .stdout(predicate::str::contains("Specification-Title: examplemod"))
        .stdout(predicate::str::contains("Specification-Version: 1"))
        .stdout(predicate::str::contains("Implementation-Version: 2.0"))
        .stdout(predicate::str::contains("Built-On-Minecraft: 1.21"))
        .stdout(predicate::str::contains("Built-On-NeoForge: 21.0.42"))
        .stdout(predicate::str::contains("FMLModType: MOD"))
        .stdout(predicate::str::contains("LICENSE: MIT"));
}

/// The release type feeds the locator embedded into the manifest.
#[test]
fn test_manifest_release_build() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .arg("manifest")
        .env("RELEASE_TYPE", "release")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Maven-Artifact: com.example:examplemod:1.21-2.0\n",
        ));
}

/// The classifier is appended to the implementation title.
#[test]
fn test_manifest_classifier() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .args(["manifest", "--classifier", "sources"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Implementation-Title: examplemod-sources",
        ));
}

/// A library is tagged GAMELIBRARY.
#[test]
fn test_manifest_library_tag() {
    let project = TestProject::with_properties(
        "\
project_type = LIBRARY
lib_group = com.example.lib
lib_name = examplelib
lib_version = 3.1
lib_vendor = Example Inc
mc_version = 1.21
neo_version = 21.0.42
java_version = 21
license_name = MIT
",
    )
    .unwrap();

    project
        .modmeta_command()
        .arg("manifest")
        .assert()
        .success()
        .stdout(predicate::str::contains("FMLModType: GAMELIBRARY"))
        .stdout(predicate::str::contains("Specification-Title: examplelib"));
}

/// JSON output carries the same attributes.
#[test]
fn test_manifest_json_format() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    let output = project
        .modmeta_command()
        .args(["manifest", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let attributes: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(attributes["FMLModType"], "MOD");
    assert_eq!(attributes["Implementation-Title"], "examplemod");
}

/// Writing to a file reports the path.
#[test]
fn test_manifest_output_file() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .args(["manifest", "--output", "manifest.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("manifest.txt"));

    let written = project.read("manifest.txt").unwrap();
    assert!(written.contains("Specification-Vendor: Example Inc"));
}
