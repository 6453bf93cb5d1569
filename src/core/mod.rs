//! Core types and error handling for modmeta.
//!
//! This module hosts the error taxonomy shared by every other module. The
//! generation pass is deterministic and single-shot, so the core carries no
//! state of its own - it defines what can go wrong and how failures are
//! presented to the user.

pub mod error;

pub use error::{ErrorContext, ModmetaError, user_friendly_error};

/// Convenience result type for fallible modmeta operations.
pub type Result<T> = std::result::Result<T, ModmetaError>;
