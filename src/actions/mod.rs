//! GitHub Actions step-output integration.
//!
//! CI workflows read the project id, the full version and the targeted
//! Minecraft version back out of the build to name release artifacts and
//! tags. The values are appended as `key=value` lines to the file GitHub
//! names through the `GITHUB_OUTPUT` environment variable; appending (not
//! truncating) keeps outputs written by earlier steps intact.

use crate::core::Result;
use crate::settings::ProjectSettings;
use std::io::Write;
use std::path::Path;

/// The step-output values published for a build: `modid`, `version` (the
/// full version) and `minecraft_version`, in that order.
pub fn github_outputs(settings: &ProjectSettings) -> Result<Vec<(String, String)>> {
    Ok(vec![
        ("modid".to_string(), settings.project_id.require()?),
        ("version".to_string(), settings.full_version.require()?),
        (
            "minecraft_version".to_string(),
            settings.minecraft_version.require()?,
        ),
    ])
}

/// Append `key=value` lines to the output file.
///
/// Values are written verbatim (the protocol is line-based and unescaped);
/// each line is newline-terminated so repeated appends compose.
pub fn write_outputs(path: &Path, values: &[(String, String)]) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    for (key, value) in values {
        writeln!(file, "{key}={value}")?;
    }
    Ok(())
}
