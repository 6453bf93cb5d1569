//! The `validate` subcommand: resolve the model and report every problem.
//!
//! Unlike generation, which stops at the first unresolvable setting,
//! validation walks the whole model and collects everything that is missing
//! or invalid, so one run shows the full distance to a working
//! configuration.

use crate::cli::OutputFormat;
use crate::descriptor;
use crate::settings::ProjectSettings;
use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::Serialize;

/// Arguments for `modmeta validate`.
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Outcome of a validation pass.
#[derive(Debug, Serialize)]
struct ValidationReport {
    /// Successfully resolved settings, in model order.
    resolved: Vec<ResolvedSetting>,
    /// Required settings that resolved to nothing.
    missing: Vec<String>,
    /// Settings or declarations that failed to parse or violate invariants.
    invalid: Vec<String>,
    /// Where a publish would go with the current environment.
    publishing: String,
    /// Ids of the declared (not synthesized) dependencies.
    dependencies: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ResolvedSetting {
    name: String,
    value: String,
}

impl ValidateCommand {
    /// Collect and print the validation report.
    ///
    /// Exits non-zero when anything is missing or invalid.
    pub fn execute(&self, settings: &ProjectSettings) -> Result<()> {
        let report = collect_report(settings);

        match self.format {
            OutputFormat::Text => print_text(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }

        let problems = report.missing.len() + report.invalid.len();
        if problems > 0 {
            bail!("validation failed with {problems} problem(s)");
        }
        Ok(())
    }
}

fn collect_report(settings: &ProjectSettings) -> ValidationReport {
    let mut report = ValidationReport {
        resolved: Vec::new(),
        missing: Vec::new(),
        invalid: Vec::new(),
        publishing: String::new(),
        dependencies: Vec::new(),
    };

    let mut check = |name: &str, required: bool, value: crate::core::Result<Option<String>>| {
        match value {
            Ok(Some(value)) => report.resolved.push(ResolvedSetting {
                name: name.to_string(),
                value,
            }),
            Ok(None) => {
                if required {
                    report.missing.push(name.to_string());
                }
            }
            Err(error) => report.invalid.push(error.to_string()),
        }
    };

    check("project_type", true, display(settings.project_type.get()));
    check("project_group", true, settings.project_group.get());
    check("project_id", true, settings.project_id.get());
    check("project_version", true, settings.project_version.get());
    check("project_name", true, settings.project_name.get());
    check("project_vendor", true, settings.project_vendor.get());
    check("release_type", true, settings.release_type.get());
    check("full_version", true, settings.full_version.get());
    check("artifact_locator", true, settings.artifact_locator.get());
    check("minecraft_version", true, settings.minecraft_version.get());
    check(
        "minecraft_version_range",
        true,
        settings.minecraft_version_range.get(),
    );
    check("neo_version", true, settings.neo_version.get());
    check("neo_version_range", true, settings.neo_version_range.get());
    check("loader_name", true, settings.loader.name.get());
    check("loader_version", true, settings.loader.version.get());
    check("license_name", true, settings.license.name.get());
    check("license_file", true, settings.license.file.get());
    check("java_version", true, display(settings.java.version.get()));
    check("java_vendor", true, display(settings.java.vendor.get()));

    check("project_url", false, settings.project_url.get());
    check("project_logo", false, settings.project_logo.get());
    check("project_credits", false, settings.project_credits.get());
    check("project_authors", false, settings.project_authors.get());
    check(
        "project_description",
        false,
        settings.project_description.get(),
    );
    check("license_url", false, settings.license.url.get());
    check("github_url", false, settings.github.url.get());
    check("github_issues_url", false, settings.github.issues_url.get());
    check("github_actions_url", false, settings.github.actions_url.get());
    check("scm_connection", false, settings.github.connection.get());
    check(
        "scm_developer_connection",
        false,
        settings.github.developer_connection.get(),
    );
    check(
        "mc_publish_modrinth",
        false,
        settings.mc_publish.modrinth.get(),
    );
    check(
        "mc_publish_curseforge",
        false,
        display(settings.mc_publish.curseforge.get()),
    );

    match settings.resolved_dependencies() {
        Ok(dependencies) => {
            report.dependencies = dependencies
                .into_iter()
                .map(|dependency| dependency.mod_id)
                .collect();
        }
        Err(error) => report.invalid.push(error.to_string()),
    }

    // A generation dry run catches invariants the per-setting walk cannot,
    // such as a declared dependency colliding with a synthesized one.
    if let Err(error) = descriptor::generate(settings) {
        let message = error.to_string();
        let already_known = report
            .missing
            .iter()
            .any(|name| message.contains(&format!("'{name}'")))
            || report.invalid.contains(&message);
        if !already_known {
            report.invalid.push(message);
        }
    }

    report.publishing = match settings.maven.valid.get() {
        Ok(Some(true)) => match settings.maven.url.get() {
            Ok(Some(url)) => format!("maven repository {url}"),
            _ => "maven repository".to_string(),
        },
        _ => "local repository folder (MAVEN_URL/MAVEN_USER/MAVEN_PASSWORD not set)".to_string(),
    };

    report
}

/// Render a non-string setting outcome for the report.
fn display<T: ToString>(
    value: crate::core::Result<Option<T>>,
) -> crate::core::Result<Option<String>> {
    value.map(|option| option.map(|v| v.to_string()))
}

fn print_text(report: &ValidationReport) {
    println!("{}", "Resolved settings".bold());
    for setting in &report.resolved {
        println!("  {} = {}", setting.name, setting.value);
    }

    println!("{}", "Publishing".bold());
    println!("  {}", report.publishing);

    if !report.dependencies.is_empty() {
        println!("{}", "Declared dependencies".bold());
        for id in &report.dependencies {
            println!("  {id}");
        }
    }

    if report.missing.is_empty() && report.invalid.is_empty() {
        println!("{}", "Configuration is complete".green());
        return;
    }

    println!("{}", "Problems".bold());
    for name in &report.missing {
        println!("  {} missing required configuration: {name}", "✗".red());
    }
    for message in &report.invalid {
        println!("  {} {message}", "✗".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::{Environment, PropertyStore};

    fn complete_store() -> PropertyStore {
        [
            ("mod_group", "com.example"),
            ("mod_id", "examplemod"),
            ("mod_version", "2.0"),
            ("mod_name", "Example Mod"),
            ("mod_vendor", "Example Inc"),
            ("mc_version", "1.21"),
            ("mc_version_range", "[1.21,)"),
            ("neo_version", "21.0.42"),
            ("neo_version_range", "[21.0,)"),
            ("loader_version", "[1,)"),
            ("license_name", "MIT"),
            ("java_version", "21"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_complete_configuration_has_no_problems() {
        let settings = ProjectSettings::new(complete_store(), Environment::empty()).unwrap();
        let report = collect_report(&settings);
        assert!(report.missing.is_empty(), "missing: {:?}", report.missing);
        assert!(report.invalid.is_empty(), "invalid: {:?}", report.invalid);
    }

    #[test]
    fn test_empty_configuration_lists_every_missing_setting() {
        let settings = ProjectSettings::new(PropertyStore::new(), Environment::empty()).unwrap();
        let report = collect_report(&settings);
        for name in ["project_group", "project_id", "project_version", "license_name"] {
            assert!(
                report.missing.iter().any(|missing| missing == name),
                "{name} should be reported missing: {:?}",
                report.missing
            );
        }
        // Defaults still resolve.
        assert!(report.resolved.iter().any(|s| s.name == "release_type"));
        assert!(report.resolved.iter().any(|s| s.name == "loader_name"));
    }

    #[test]
    fn test_duplicate_dependency_surfaces_as_invalid() {
        let mut store = complete_store();
        store.set("dependencies", "minecraft");
        store.set("dependency_minecraft_version_range", "[1.21,)");
        let settings = ProjectSettings::new(store, Environment::empty()).unwrap();
        let report = collect_report(&settings);
        assert!(
            report
                .invalid
                .iter()
                .any(|message| message.contains("minecraft")),
            "expected duplicate report: {:?}",
            report.invalid
        );
    }

    #[test]
    fn test_publishing_falls_back_to_local_folder() {
        let settings = ProjectSettings::new(complete_store(), Environment::empty()).unwrap();
        let report = collect_report(&settings);
        assert!(report.publishing.contains("local repository folder"));
    }
}
