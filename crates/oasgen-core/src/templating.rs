//! Templating engine identifiers.
//!
//! Rendering happens in the external generation engine; this crate only
//! resolves which engine a run asks for and attaches it to the configured
//! generator.
//!
//! # Examples
//!
//! ```
//! use oasgen_core::templating::TemplatingEngine;
//! use std::str::FromStr;
//!
//! let engine = TemplatingEngine::from_str("Handlebars").unwrap();
//! assert_eq!(engine, TemplatingEngine::Handlebars);
//! assert_eq!(engine.to_string(), "handlebars");
//! assert_eq!(TemplatingEngine::default(), TemplatingEngine::Mustache);
//! ```

// Internal imports (std, crate)
use std::fmt;
use std::str::FromStr;

use crate::Error;

// External imports (alphabetized)
use serde::{Deserialize, Serialize};

/// Supported templating engines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplatingEngine {
    /// Logic-less mustache templates
    #[default]
    Mustache,
    /// Handlebars templates
    Handlebars,
}

impl FromStr for TemplatingEngine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mustache" => Ok(TemplatingEngine::Mustache),
            "handlebars" => Ok(TemplatingEngine::Handlebars),
            _ => Err(format!("Unknown templating engine: {}", s)),
        }
    }
}

impl TemplatingEngine {
    /// Returns the engine identifier as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mustache => "mustache",
            Self::Handlebars => "handlebars",
        }
    }

    /// Resolve an engine by identifier
    pub fn by_identifier(identifier: &str) -> crate::Result<Self> {
        identifier.parse().map_err(Error::config)
    }

    /// Returns an iterator over all available engines
    pub fn all() -> impl Iterator<Item = Self> {
        use TemplatingEngine::*;
        [Mustache, Handlebars].iter().copied()
    }
}

impl fmt::Display for TemplatingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
