//! Error types for initcheck operations.
//!
//! This module defines [`InitCheckError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration errors (missing environment, bad tag tests, unreadable
//!   catalogs) are raised at setup time, before any run
//! - Errors from caller-supplied predicates and callbacks arrive as
//!   `anyhow::Error` and are wrapped with the check or outcome they belong to
//! - A failing check that resolves no message is not an error

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for initcheck operations.
#[derive(Debug, Error)]
pub enum InitCheckError {
    /// The environment string was empty or missing.
    #[error("Environment string is required")]
    MissingEnvironment,

    /// A tag test was registered under the reserved fallback tag name.
    #[error("Tag '{tag}' is reserved for fallback messages and cannot be defined")]
    ReservedTagName { tag: String },

    /// A pattern tag test is not a valid regular expression.
    #[error("Tag '{tag}' has an invalid pattern: {message}")]
    InvalidTagPattern { tag: String, message: String },

    /// A tag test of a type that cannot be evaluated.
    #[error("Tag '{tag}' is not a supported type of tag test (found {found})")]
    UnsupportedTagTest { tag: String, found: String },

    /// Catalog file not found at the given location.
    #[error("Catalog not found: {path}")]
    CatalogNotFound { path: PathBuf },

    /// Failed to parse a catalog file.
    #[error("Failed to parse catalog at {path}: {message}")]
    CatalogParseError { path: PathBuf, message: String },

    /// A catalog check declares a probe that cannot be built.
    #[error("Check '{check}' has an invalid probe: {message}")]
    InvalidProbe { check: String, message: String },

    /// A check predicate returned an error.
    #[error("Check '{check}' failed to execute: {source}")]
    CheckExecution {
        check: String,
        #[source]
        source: anyhow::Error,
    },

    /// A check-level pass/fail callback returned an error.
    #[error("Callback for check '{check}' failed: {source}")]
    CheckCallback {
        check: String,
        #[source]
        source: anyhow::Error,
    },

    /// A global pass/fail callback returned an error.
    #[error("{outcome} callback failed: {source}")]
    CallbackFailed {
        outcome: &'static str,
        #[source]
        source: anyhow::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl InitCheckError {
    /// Whether this error stems from configuration rather than a run.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            InitCheckError::MissingEnvironment
                | InitCheckError::ReservedTagName { .. }
                | InitCheckError::InvalidTagPattern { .. }
                | InitCheckError::UnsupportedTagTest { .. }
                | InitCheckError::CatalogNotFound { .. }
                | InitCheckError::CatalogParseError { .. }
                | InitCheckError::InvalidProbe { .. }
        )
    }
}

/// Result type alias for initcheck operations.
pub type Result<T> = std::result::Result<T, InitCheckError>;
