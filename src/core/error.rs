//! Error handling for modmeta.
//!
//! The error system is built around two pieces:
//! 1. [`ModmetaError`] - strongly-typed errors for every failure mode of the
//!    metadata generation pass
//! 2. [`ErrorContext`] - a wrapper that adds user-friendly details and
//!    actionable suggestions for CLI display
//!
//! Generation is a deterministic, single-pass step: there are no retries
//! anywhere, any failure aborts the pass and is reported to the invoking
//! process. Three broad categories exist:
//!
//! - **Missing configuration**: a required setting has neither an override
//!   nor a derivable default. Surfaced at the point of use and named after
//!   the setting ([`ModmetaError::MissingConfiguration`]).
//! - **Invalid values**: an override string does not match an enumerated
//!   variant or cannot be parsed ([`ModmetaError::InvalidEnumValue`],
//!   [`ModmetaError::InvalidPropertyValue`],
//!   [`ModmetaError::InvalidMinecraftVersion`]).
//! - **Schema violations**: a generator invariant was broken, e.g. a
//!   duplicate dependency id or a cyclic setting graph
//!   ([`ModmetaError::DuplicateDependency`], [`ModmetaError::SettingCycle`]).
//!
//! [`std::io::Error`] converts automatically into
//! [`ModmetaError::IoError`]. Use [`user_friendly_error`] at the CLI
//! boundary to turn any [`anyhow::Error`] into a displayable context.

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for modmeta operations.
///
/// Each variant represents a specific failure mode of the single generation
/// pass. Messages are written for end users of the CLI; the structured
/// fields allow precise handling in code and targeted suggestions in
/// [`user_friendly_error`].
#[derive(Error, Debug)]
pub enum ModmetaError {
    /// A required setting resolved to nothing.
    ///
    /// Raised at the point of *use*, not at construction: a setting without
    /// an override or default only fails once something actually needs its
    /// value.
    #[error("Missing required configuration: '{setting}'")]
    MissingConfiguration {
        /// Name of the setting that could not be resolved
        setting: String,
    },

    /// An override string does not match one of the expected variants.
    ///
    /// Fails immediately when the value is parsed, e.g. an unrecognized
    /// `project_type` or dependency ordering.
    #[error("Invalid value '{value}' for {field}, expected one of: {expected}")]
    InvalidEnumValue {
        /// Logical field the value was supplied for
        field: String,
        /// The rejected value
        value: String,
        /// Comma-separated list of accepted variants
        expected: &'static str,
    },

    /// A property value could not be converted to its target type.
    #[error("Invalid value '{value}' for property '{key}': {reason}")]
    InvalidPropertyValue {
        /// Property key the value came from
        key: String,
        /// The rejected value
        value: String,
        /// Why the conversion failed
        reason: String,
    },

    /// The Minecraft version is not a numeric `major.minor[.patch]` triple.
    ///
    /// The descriptor file name selection compares numeric components, so a
    /// non-numeric version cannot be classified.
    #[error("Cannot parse minecraft version '{version}' as major.minor[.patch]")]
    InvalidMinecraftVersion {
        /// The version string that failed to parse
        version: String,
    },

    /// The setting graph contains a derivation cycle.
    ///
    /// Cycles are a programming error and are rejected when the graph is
    /// constructed, never resolved silently.
    #[error("Setting derivation cycle detected: {cycle}")]
    SettingCycle {
        /// The cycle path, e.g. `a -> b -> a`
        cycle: String,
    },

    /// Two dependency entries share the same mod id for one consumer.
    #[error("Duplicate dependency entry for mod id '{mod_id}'")]
    DuplicateDependency {
        /// The duplicated mod id
        mod_id: String,
    },

    /// A dependency entry was declared without a mod id.
    #[error("Dependency entry with empty mod id")]
    EmptyDependencyId,

    /// A property file line could not be parsed.
    #[error("Invalid property file syntax in {file} at line {line}: {reason}")]
    PropertiesParseError {
        /// Path of the property file
        file: String,
        /// 1-based line number of the offending line
        line: usize,
        /// Why the line was rejected
        reason: String,
    },

    /// A serialized descriptor could not be parsed back.
    #[error("Invalid descriptor document: {reason}")]
    DescriptorParseError {
        /// The underlying parse failure
        reason: String,
    },

    /// `GITHUB_OUTPUT` is not set but the actions output was requested.
    #[error("GITHUB_OUTPUT environment variable is not set")]
    GithubOutputNotSet,

    /// Generic error with a message, used for wrapped foreign errors.
    #[error("{message}")]
    Other {
        /// Description of the failure
        message: String,
    },

    /// IO operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A [`ModmetaError`] enriched with user-facing details and a suggestion.
///
/// The error message states what failed; `details` explains why it happened
/// and `suggestion` tells the user what to do about it. [`display`] renders
/// the three parts color-coded to stderr.
///
/// [`display`]: ErrorContext::display
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying modmeta error
    pub error: ModmetaError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: ModmetaError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, displayed in green.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining why the error occurred, displayed in yellow.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr with terminal colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`ModmetaError`] variants get targeted suggestions; IO and TOML
/// errors are classified by kind; everything else falls back to the plain
/// message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(modmeta_error) = error.downcast_ref::<ModmetaError>() {
        return create_error_context(modmeta_error);
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        let context = ErrorContext::new(ModmetaError::Other {
            message: format!("IO error: {io_error}"),
        });
        return match io_error.kind() {
            std::io::ErrorKind::NotFound => context
                .with_suggestion("Check that the file or directory exists and the path is correct"),
            std::io::ErrorKind::PermissionDenied => context
                .with_suggestion("Check file ownership or run with sufficient permissions"),
            _ => context,
        };
    }

    ErrorContext::new(ModmetaError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: &ModmetaError) -> ErrorContext {
    match error {
        ModmetaError::MissingConfiguration { setting } => {
            ErrorContext::new(ModmetaError::MissingConfiguration {
                setting: setting.clone(),
            })
            .with_details(
                "the setting has no configured override and its default derivation \
                 produced no value",
            )
            .with_suggestion(format!(
                "Define the backing property in gradle.properties or pass it on the \
                 command line with -P (setting: '{setting}')"
            ))
        }
        ModmetaError::InvalidEnumValue {
            field,
            value,
            expected,
        } => ErrorContext::new(ModmetaError::InvalidEnumValue {
            field: field.clone(),
            value: value.clone(),
            expected,
        })
        .with_suggestion(format!("Use one of: {expected}")),
        ModmetaError::SettingCycle { cycle } => ErrorContext::new(ModmetaError::SettingCycle {
            cycle: cycle.clone(),
        })
        .with_details("a setting cannot derive its default from itself, directly or indirectly"),
        ModmetaError::DuplicateDependency { mod_id } => {
            ErrorContext::new(ModmetaError::DuplicateDependency {
                mod_id: mod_id.clone(),
            })
            .with_suggestion(
                "Remove the duplicate entry from the 'dependencies' property or the \
                 programmatic container",
            )
        }
        ModmetaError::GithubOutputNotSet => ErrorContext::new(ModmetaError::GithubOutputNotSet)
            .with_details("the actions subcommand appends step outputs to the file GitHub names")
            .with_suggestion(
                "Run inside GitHub Actions, or export GITHUB_OUTPUT=<file> to test locally",
            ),
        ModmetaError::PropertiesParseError { file, line, reason } => {
            ErrorContext::new(ModmetaError::PropertiesParseError {
                file: file.clone(),
                line: *line,
                reason: reason.clone(),
            })
            .with_suggestion("Property lines take the form 'key=value'; comments start with # or !")
        }
        other => ErrorContext::new(ModmetaError::Other {
            message: other.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_configuration_message_names_setting() {
        let err = ModmetaError::MissingConfiguration {
            setting: "project_group".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required configuration: 'project_group'"
        );
    }

    #[test]
    fn test_user_friendly_error_adds_suggestion() {
        let err = anyhow::Error::from(ModmetaError::MissingConfiguration {
            setting: "loader_version".to_string(),
        });
        let ctx = user_friendly_error(err);
        assert!(ctx.suggestion.unwrap().contains("loader_version"));
    }

    #[test]
    fn test_unknown_error_falls_back_to_message() {
        let ctx = user_friendly_error(anyhow::anyhow!("boom"));
        assert_eq!(ctx.error.to_string(), "boom");
        assert!(ctx.suggestion.is_none());
    }

    #[test]
    fn test_error_context_display_format() {
        let ctx = ErrorContext::new(ModmetaError::GithubOutputNotSet)
            .with_details("d")
            .with_suggestion("s");
        let rendered = format!("{ctx}");
        assert!(rendered.contains("GITHUB_OUTPUT"));
        assert!(rendered.contains("Details: d"));
        assert!(rendered.contains("Suggestion: s"));
    }
}
