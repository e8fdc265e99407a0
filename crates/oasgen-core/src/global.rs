//! Global properties shared by every step of a generation run.
//!
//! The map is an ordinary value owned by the caller and passed down
//! explicitly. Reusing one instance across runs carries its entries over: a
//! non-verbose run sets `verbose` to `false` but leaves debug flags written
//! by an earlier verbose run in place.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Debug categories switched on by verbose mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebugFlag {
    /// Print the specification as interpreted by the generator
    OpenApi,
    /// Print models passed to the template engine
    Models,
    /// Print operations passed to the template engine
    Operations,
    /// Print additional data passed to the template engine
    SupportingFiles,
}

impl DebugFlag {
    /// Property key written into [`GlobalSettings`]
    pub fn key(&self) -> &'static str {
        match self {
            Self::OpenApi => "debugOpenAPI",
            Self::Models => "debugModels",
            Self::Operations => "debugOperations",
            Self::SupportingFiles => "debugSupportingFiles",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::OpenApi => "prints the OpenAPI specification as interpreted by the codegen",
            Self::Models => "prints models passed to the template engine",
            Self::Operations => "prints operations passed to the template engine",
            Self::SupportingFiles => "prints additional data passed to the template engine",
        }
    }

    pub fn all() -> impl Iterator<Item = Self> {
        use DebugFlag::*;
        [OpenApi, Models, Operations, SupportingFiles].iter().copied()
    }
}

impl fmt::Display for DebugFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Key holding the verbose flag
pub const VERBOSE: &str = "verbose";
/// Key holding the alias-as-model flag
pub const GENERATE_ALIAS_AS_MODEL: &str = "generateAliasAsModel";

/// Explicit replacement for process-wide generator properties
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GlobalSettings {
    properties: BTreeMap<String, String>,
}

impl GlobalSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property, replacing any previous value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn clear_property(&mut self, key: &str) -> Option<String> {
        self.properties.remove(key)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Drop every property
    pub fn reset(&mut self) {
        self.properties.clear();
    }

    pub fn is_verbose(&self) -> bool {
        self.property(VERBOSE) == Some("true")
    }

    pub fn is_debug_enabled(&self, flag: DebugFlag) -> bool {
        self.contains(flag.key())
    }

    /// Debug flags currently present
    pub fn enabled_debug_flags(&self) -> Vec<DebugFlag> {
        DebugFlag::all().filter(|f| self.is_debug_enabled(*f)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_overwrite() {
        let mut globals = GlobalSettings::new();
        globals.set_property("models", "Pet");
        globals.set_property("models", "Order");
        assert_eq!(globals.property("models"), Some("Order"));
        assert_eq!(globals.properties().len(), 1);
        assert_eq!(globals.clear_property("models"), Some("Order".to_string()));
        assert!(!globals.contains("models"));
    }

    #[test]
    fn test_debug_flags() {
        let mut globals = GlobalSettings::new();
        assert!(globals.enabled_debug_flags().is_empty());
        globals.set_property(DebugFlag::Models.key(), "");
        assert!(globals.is_debug_enabled(DebugFlag::Models));
        assert_eq!(globals.enabled_debug_flags(), vec![DebugFlag::Models]);
        globals.reset();
        assert!(globals.properties().is_empty());
    }

    #[test]
    fn test_verbose_flag() {
        let mut globals = GlobalSettings::new();
        assert!(!globals.is_verbose());
        globals.set_property(VERBOSE, "true");
        assert!(globals.is_verbose());
        globals.set_property(VERBOSE, "false");
        assert!(!globals.is_verbose());
    }
}
