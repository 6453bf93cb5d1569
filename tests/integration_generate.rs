use predicates::prelude::*;

mod common;
use common::{COMPLETE_MOD_PROPERTIES, TestProject};

const EXPECTED_DESCRIPTOR: &str = concat!(
    "modLoader = \"javafml\"\n",
    "loaderVersion = \"[1,)\"\n",
    "license = \"MIT\"\n",
    "issueTrackerURL = \"https://github.com/example/examplemod/issues\"\n",
    "\n",
    "[[mods]]\n",
    "modId = \"examplemod\"\n",
    "version = \"2.0\"\n",
    "displayName = \"Example Mod\"\n",
    "displayURL = \"https://github.com/example/examplemod\"\n",
    "authors = \"Alice, Bob\"\n",
    "description = '''\n",
    "The example mod.'''\n",
    "\n",
    "[[dependencies.examplemod]]\n",
    "modId = \"neoforge\"\n",
    "versionRange = \"[21.0,)\"\n",
    "type = \"required\"\n",
    "ordering = \"NONE\"\n",
    "side = \"BOTH\"\n",
    "\n",
    "[[dependencies.examplemod]]\n",
    "modId = \"minecraft\"\n",
    "versionRange = \"[1.21,)\"\n",
    "type = \"required\"\n",
    "ordering = \"NONE\"\n",
    "side = \"BOTH\"\n",
);

/// Generating against a complete configuration writes the expected bytes
/// under the renamed descriptor file for post-1.20.5 targets.
#[test]
fn test_generate_writes_expected_descriptor() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .arg("generate")
        .assert()
        .success()
        .stdout(predicate::str::contains("neoforge.mods.toml"));

    let written = project
        .read("build/generated/modsToml/neoforge.mods.toml")
        .unwrap();
    assert_eq!(written, EXPECTED_DESCRIPTOR);
}

/// Identical configuration produces byte-identical output across runs.
#[test]
fn test_generate_is_deterministic() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project.modmeta_command().arg("generate").assert().success();
    let first = project
        .read("build/generated/modsToml/neoforge.mods.toml")
        .unwrap();

    project.modmeta_command().arg("generate").assert().success();
    let second = project
        .read("build/generated/modsToml/neoforge.mods.toml")
        .unwrap();

    assert_eq!(first, second);
}

/// Targets at or below 1.20.5 keep the historical file name.
#[test]
fn test_generate_uses_legacy_file_name_below_cutoff() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    project
        .modmeta_command()
        .args(["generate", "-P", "mc_version=1.20.4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mods.toml"));

    let written = project.read("build/generated/modsToml/mods.toml").unwrap();
    assert!(written.starts_with("modLoader = \"javafml\"\n"));
}

/// Unset logo, credits and mc-publish references leave no trace in the
/// output, and a library has no dependency map at all.
#[test]
fn test_generate_omission_rules() {
    let project = TestProject::with_properties(
        "\
project_type = LIBRARY
lib_group = com.example.lib
lib_name = examplelib
lib_version = 3.1
mc_version = 1.21
loader_version = [1,)
license_name = MIT
",
    )
    .unwrap();

    let output = project
        .modmeta_command()
        .args(["generate", "--stdout"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();

    assert!(!text.contains("dependencies"));
    assert!(!text.contains("modproperties"));
    assert!(!text.contains("logoFile"));
    assert!(!text.contains("credits"));
    assert!(!text.contains("authors"));
    assert!(!text.contains("mc-publish"));
    // Library display name falls back to the library name.
    assert!(text.contains("displayName = \"examplelib\""));
}

/// The cross-reference block appears as soon as one of its ids is set.
#[test]
fn test_generate_mc_publish_block() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    let output = project
        .modmeta_command()
        .args(["generate", "--stdout", "-P", "mc_publish_curseforge=123456"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("[mc-publish]\ncurseforge = 123456\n"));
    assert!(!text.contains("modrinth"));
}

/// Declared extra dependencies follow the synthesized entries.
#[test]
fn test_generate_declared_dependency() {
    let project = TestProject::with_properties(COMPLETE_MOD_PROPERTIES).unwrap();

    let output = project
        .modmeta_command()
        .args([
            "generate",
            "--stdout",
            "-P",
            "dependencies=jei",
            "-P",
            "dependency_jei_type=optional",
            "-P",
            "dependency_jei_version_range=[19,)",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(output).unwrap();

    let jei = text.find("modId = \"jei\"").expect("jei entry present");
    let minecraft = text.find("modId = \"minecraft\"").unwrap();
    assert!(minecraft < jei, "declared entries come after built-ins");
    assert!(text.contains("type = \"optional\""));
}

/// A missing required setting fails the pass and names the setting.
#[test]
fn test_generate_missing_configuration_fails() {
    let project = TestProject::with_properties(
        "\
mod_group = com.example
mod_id = examplemod
mod_version = 2.0
mod_name = Example Mod
mc_version = 1.21
mc_version_range = [1.21,)
neo_version_range = [21.0,)
license_name = MIT
",
    )
    .unwrap();

    project
        .modmeta_command()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Missing required configuration: 'loader_version'",
        ));
}

/// A malformed property file fails with the offending line.
#[test]
fn test_generate_rejects_malformed_properties() {
    let project = TestProject::with_properties("mod_id=x\nbroken line\n").unwrap();

    project
        .modmeta_command()
        .arg("generate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}
