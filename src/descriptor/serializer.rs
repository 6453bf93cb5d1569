//! Table-driven TOML emission for the descriptor.
//!
//! The output contract is stricter than a generic TOML writer guarantees,
//! so the emitter is owned here:
//!
//! - fixed key order per table, mod and dependency order preserved
//! - absent optional fields omitted entirely (no null markers, no empty
//!   tables)
//! - the description is a literal multi-line block whose contents are not
//!   interpreted; all other strings use basic-string quoting
//! - exactly one trailing newline
//! - parsing the output with [`ModsToml::parse`] and serializing again is
//!   byte-identical
//!
//! Each table is described by one row list below; adding a schema field
//! means adding a row, nothing else.

use crate::descriptor::{Dependency, DependencyMcPublish, McPublish, Mod, ModsToml};
use std::fmt::Write;

/// Serialize the descriptor to TOML text.
#[must_use]
pub fn serialize(descriptor: &ModsToml) -> String {
    let mut out = String::new();

    emit_rows(
        &mut out,
        &[
            ("modLoader", Some(Scalar::Str(&descriptor.mod_loader))),
            ("loaderVersion", Some(Scalar::Str(&descriptor.loader_version))),
            ("license", Some(Scalar::Str(&descriptor.license))),
            (
                "issueTrackerURL",
                descriptor.issue_tracker_url.as_deref().map(Scalar::Str),
            ),
        ],
    );

    for entry in &descriptor.mods {
        out.push_str("\n[[mods]]\n");
        emit_mod(&mut out, entry);
    }

    if let Some(block) = &descriptor.mc_publish {
        out.push_str("\n[mc-publish]\n");
        emit_mc_publish(&mut out, block);
    }

    if let Some(map) = &descriptor.dependencies {
        for (consumer, entries) in map {
            for dependency in entries {
                let _ = write!(out, "\n[[dependencies.{}]]\n", table_key(consumer));
                emit_dependency(&mut out, dependency);
            }
        }
    }

    if let Some(map) = &descriptor.modproperties {
        for (consumer, properties) in map {
            let _ = write!(out, "\n[modproperties.{}]\n", table_key(consumer));
            // Free-form keys may contain dots or spaces; quote them where
            // TOML would otherwise read a dotted (nested) key.
            for (key, value) in properties {
                let _ = writeln!(out, "{} = {}", table_key(key), basic_string(value));
            }
        }
    }

    out
}

fn emit_mod(out: &mut String, entry: &Mod) {
    emit_rows(
        out,
        &[
            ("modId", Some(Scalar::Str(&entry.mod_id))),
            ("version", Some(Scalar::Str(&entry.version))),
            ("displayName", Some(Scalar::Str(&entry.display_name))),
            ("displayURL", entry.display_url.as_deref().map(Scalar::Str)),
            ("logoFile", entry.logo_file.as_deref().map(Scalar::Str)),
            ("credits", entry.credits.as_deref().map(Scalar::Str)),
            ("authors", entry.authors.as_deref().map(Scalar::Str)),
            ("description", entry.description.as_deref().map(Scalar::Text)),
        ],
    );
}

fn emit_mc_publish(out: &mut String, block: &McPublish) {
    emit_rows(
        out,
        &[
            ("modrinth", block.modrinth.as_deref().map(Scalar::Str)),
            ("curseforge", block.curseforge.map(Scalar::Int)),
        ],
    );
}

fn emit_dependency(out: &mut String, dependency: &Dependency) {
    emit_rows(
        out,
        &[
            ("modId", Some(Scalar::Str(&dependency.mod_id))),
            ("versionRange", Some(Scalar::Str(&dependency.version_range))),
            ("type", Some(Scalar::Str(dependency.kind.as_str()))),
            ("ordering", Some(Scalar::Str(dependency.ordering.as_str()))),
            ("side", Some(Scalar::Str(dependency.side.as_str()))),
            (
                "mc-publish",
                dependency
                    .mc_publish
                    .as_ref()
                    .map(|block| Scalar::Raw(dependency_mc_publish(block))),
            ),
        ],
    );
}

fn dependency_mc_publish(block: &DependencyMcPublish) -> String {
    let mut pairs = Vec::new();
    if let Some(modrinth) = &block.modrinth {
        pairs.push(format!("modrinth = {}", basic_string(modrinth)));
    }
    if let Some(curseforge) = &block.curseforge {
        pairs.push(format!("curseforge = {}", basic_string(curseforge)));
    }
    format!("{{ {} }}", pairs.join(", "))
}

enum Scalar<'a> {
    /// Basic quoted string.
    Str(&'a str),
    /// Integer value.
    Int(i64),
    /// Long-form text, preferring a literal multi-line block.
    Text(&'a str),
    /// Pre-rendered TOML value.
    Raw(String),
}

fn emit_rows(out: &mut String, rows: &[(&str, Option<Scalar>)]) {
    for (key, value) in rows {
        let Some(value) = value else { continue };
        let rendered = match value {
            Scalar::Str(text) => basic_string(text),
            Scalar::Int(number) => number.to_string(),
            Scalar::Text(text) => long_form(text),
            Scalar::Raw(raw) => raw.clone(),
        };
        let _ = writeln!(out, "{key} = {rendered}");
    }
}

/// Render long-form text as a literal multi-line block.
///
/// The leading newline after the opening delimiter is trimmed by TOML, so
/// the block reproduces the text exactly. Text a literal block cannot hold
/// (a `'''` sequence, or control characters other than tab and newline)
/// falls back to an escaped basic string; the fallback is itself stable
/// under re-serialization.
fn long_form(text: &str) -> String {
    let literal_safe = !text.contains("'''")
        && text.chars().all(|c| c == '\t' || c == '\n' || !c.is_control());
    if literal_safe {
        format!("'''\n{text}'''")
    } else {
        basic_string(text)
    }
}

fn basic_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{000C}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Render a table key, bare where TOML allows it.
fn table_key(key: &str) -> String {
    let bare = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if bare {
        key.to_string()
    } else {
        basic_string(key)
    }
}
