//! Error handling for the oasgen configuration pipeline.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! Specification validation failures carry the full error and warning sets so
//! callers can render them separately:
//!
//! ```
//! use oasgen_core::error::Error;
//! use std::collections::BTreeSet;
//!
//! let err = Error::spec_validation(
//!     BTreeSet::from(["attribute info is missing".to_string()]),
//!     BTreeSet::new(),
//! );
//! assert_eq!(err.validation_errors().map(|e| e.len()), Some(1));
//! ```

use std::collections::BTreeSet;

use thiserror::Error;

/// Result type for oasgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for oasgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// HTTP error while fetching a remote document
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// OpenAPI error
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The specification has validation messages and validation is enabled
    #[error(
        "There were issues with the specification. The option can be disabled via validateSpec (config file) or --skip-validate-spec (CLI). {} error(s), {} warning(s)",
        .errors.len(),
        .warnings.len()
    )]
    SpecValidation {
        errors: BTreeSet<String>,
        warnings: BTreeSet<String>,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new specification validation error
    pub fn spec_validation(errors: BTreeSet<String>, warnings: BTreeSet<String>) -> Self {
        Self::SpecValidation { errors, warnings }
    }

    /// Validation errors, if this is a specification validation failure
    pub fn validation_errors(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::SpecValidation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Validation warnings, if this is a specification validation failure
    pub fn validation_warnings(&self) -> Option<&BTreeSet<String>> {
        match self {
            Self::SpecValidation { warnings, .. } => Some(warnings),
            _ => None,
        }
    }

    /// Whether this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}
