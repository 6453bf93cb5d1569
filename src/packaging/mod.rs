//! Jar manifest attributes derived from the configuration model.
//!
//! The attribute key set is fixed and consumed downstream by the loader and
//! by release tooling; keys and their order are reproduced verbatim. The
//! build timestamp is passed in by the caller so that generation itself
//! stays a pure function of its inputs.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::core::Result;
use crate::settings::ProjectSettings;

/// Compute the ordered manifest attribute set.
///
/// `classifier` is the archive classifier of the jar being stamped (e.g.
/// `sources`); a non-empty classifier is appended to the implementation
/// title the way the jar file name carries it.
pub fn manifest_attributes(
    settings: &ProjectSettings,
    classifier: Option<&str>,
    timestamp: DateTime<Utc>,
) -> Result<Vec<(String, String)>> {
    let project_id = settings.project_id.require()?;
    let vendor = settings.project_vendor.require()?;
    let extension = match classifier {
        Some(classifier) if !classifier.is_empty() => format!("-{classifier}"),
        _ => String::new(),
    };

    Ok(vec![
        ("Maven-Artifact".to_string(), settings.artifact_locator.require()?),
        ("Specification-Title".to_string(), project_id.clone()),
        ("Specification-Vendor".to_string(), vendor.clone()),
        ("Specification-Version".to_string(), "1".to_string()),
        (
            "Implementation-Title".to_string(),
            format!("{project_id}{extension}"),
        ),
        (
            "Implementation-Version".to_string(),
            settings.project_version.require()?,
        ),
        ("Implementation-Vendor".to_string(), vendor),
        (
            "Built-On-Java".to_string(),
            settings.java.version.require()?.to_string(),
        ),
        (
            "Built-On-Minecraft".to_string(),
            settings.minecraft_version.require()?,
        ),
        ("Built-On-NeoForge".to_string(), settings.neo_version.require()?),
        (
            "Timestamp".to_string(),
            timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        (
            "FMLModType".to_string(),
            settings.project_type.require()?.packaging_tag().to_string(),
        ),
        ("LICENSE".to_string(), settings.license.name.require()?),
    ])
}

/// Render attributes as a `MANIFEST.MF`-style block, one `Key: Value` line
/// each, with a trailing newline.
#[must_use]
pub fn to_manifest_block(attributes: &[(String, String)]) -> String {
    let mut out = String::new();
    for (key, value) in attributes {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
    out
}
