//! Name-keyed registry of generator factories.
//!
//! # Examples
//!
//! ```
//! use oasgen_core::generator::GeneratorRegistry;
//!
//! let registry = GeneratorRegistry::with_builtins();
//! let generator = registry.create("typescript-express-server").unwrap();
//! assert_eq!(generator.name(), "typescript-express-server");
//! assert!(registry.create("cobol-client").is_err());
//! ```

use std::collections::BTreeMap;

use super::{CodeGenerator, TypescriptExpressServerGenerator};
use crate::{Error, Result};

/// Produces a fresh generator instance
pub type GeneratorFactory = fn() -> Box<dyn CodeGenerator>;

#[derive(Debug, Clone, Default)]
pub struct GeneratorRegistry {
    factories: BTreeMap<String, GeneratorFactory>,
}

impl GeneratorRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every generator shipped with this crate
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(
            TypescriptExpressServerGenerator::NAME,
            typescript_express_server,
        );
        registry
    }

    /// Register a factory, returning the one it replaced
    pub fn register(
        &mut self,
        name: impl Into<String>,
        factory: GeneratorFactory,
    ) -> Option<GeneratorFactory> {
        self.factories.insert(name.into(), factory)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name.trim())
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Instantiate the generator registered under `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn CodeGenerator>> {
        let factory = self.factories.get(name.trim()).ok_or_else(|| {
            Error::config(format!(
                "Can't load config class with name '{}'. Available: {}",
                name,
                self.names().collect::<Vec<_>>().join(", ")
            ))
        })?;
        Ok(factory())
    }

    /// One instance of every registered generator
    pub fn generators(&self) -> Vec<Box<dyn CodeGenerator>> {
        self.factories.values().map(|factory| factory()).collect()
    }
}

fn typescript_express_server() -> Box<dyn CodeGenerator> {
    Box::new(TypescriptExpressServerGenerator::new())
}
