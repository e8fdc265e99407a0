//! Generator identity and per-generator mapping tables.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::{Error, Result};

/// Immutable snapshot of generator settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratorSettings {
    generator_name: String,
    library: Option<String>,
    api_package: Option<String>,
    model_package: Option<String>,
    package_name: Option<String>,
    model_name_prefix: Option<String>,
    model_name_suffix: Option<String>,
    api_name_suffix: Option<String>,
    instantiation_types: BTreeMap<String, String>,
    type_mappings: BTreeMap<String, String>,
    import_mappings: BTreeMap<String, String>,
    schema_mappings: BTreeMap<String, String>,
    inline_schema_name_mappings: BTreeMap<String, String>,
    inline_schema_name_defaults: BTreeMap<String, String>,
    language_specific_primitives: BTreeSet<String>,
    reserved_words_mappings: BTreeMap<String, String>,
    additional_properties: BTreeMap<String, JsonValue>,
    server_variables: BTreeMap<String, String>,
}

impl GeneratorSettings {
    pub fn builder() -> GeneratorSettingsBuilder {
        GeneratorSettingsBuilder::default()
    }

    pub fn generator_name(&self) -> &str {
        &self.generator_name
    }

    pub fn library(&self) -> Option<&str> {
        self.library.as_deref()
    }

    pub fn api_package(&self) -> Option<&str> {
        self.api_package.as_deref()
    }

    pub fn model_package(&self) -> Option<&str> {
        self.model_package.as_deref()
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    pub fn model_name_prefix(&self) -> Option<&str> {
        self.model_name_prefix.as_deref()
    }

    pub fn model_name_suffix(&self) -> Option<&str> {
        self.model_name_suffix.as_deref()
    }

    pub fn api_name_suffix(&self) -> Option<&str> {
        self.api_name_suffix.as_deref()
    }

    pub fn instantiation_types(&self) -> &BTreeMap<String, String> {
        &self.instantiation_types
    }

    pub fn type_mappings(&self) -> &BTreeMap<String, String> {
        &self.type_mappings
    }

    pub fn import_mappings(&self) -> &BTreeMap<String, String> {
        &self.import_mappings
    }

    pub fn schema_mappings(&self) -> &BTreeMap<String, String> {
        &self.schema_mappings
    }

    pub fn inline_schema_name_mappings(&self) -> &BTreeMap<String, String> {
        &self.inline_schema_name_mappings
    }

    pub fn inline_schema_name_defaults(&self) -> &BTreeMap<String, String> {
        &self.inline_schema_name_defaults
    }

    pub fn language_specific_primitives(&self) -> &BTreeSet<String> {
        &self.language_specific_primitives
    }

    pub fn reserved_words_mappings(&self) -> &BTreeMap<String, String> {
        &self.reserved_words_mappings
    }

    pub fn additional_properties(&self) -> &BTreeMap<String, JsonValue> {
        &self.additional_properties
    }

    pub fn server_variables(&self) -> &BTreeMap<String, String> {
        &self.server_variables
    }

    /// Package and naming options keyed the way templates expect them
    pub fn naming_properties(&self) -> BTreeMap<&'static str, &str> {
        [
            ("apiPackage", self.api_package()),
            ("modelPackage", self.model_package()),
            ("packageName", self.package_name()),
            ("modelNamePrefix", self.model_name_prefix()),
            ("modelNameSuffix", self.model_name_suffix()),
            ("apiNameSuffix", self.api_name_suffix()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v)))
        .collect()
    }
}

/// Mutable accumulator for [`GeneratorSettings`]
#[derive(Debug, Clone, Default)]
pub struct GeneratorSettingsBuilder {
    generator_name: Option<String>,
    library: Option<String>,
    api_package: Option<String>,
    model_package: Option<String>,
    package_name: Option<String>,
    model_name_prefix: Option<String>,
    model_name_suffix: Option<String>,
    api_name_suffix: Option<String>,
    instantiation_types: BTreeMap<String, String>,
    type_mappings: BTreeMap<String, String>,
    import_mappings: BTreeMap<String, String>,
    schema_mappings: BTreeMap<String, String>,
    inline_schema_name_mappings: BTreeMap<String, String>,
    inline_schema_name_defaults: BTreeMap<String, String>,
    language_specific_primitives: BTreeSet<String>,
    reserved_words_mappings: BTreeMap<String, String>,
    additional_properties: BTreeMap<String, JsonValue>,
    server_variables: BTreeMap<String, String>,
}

impl GeneratorSettingsBuilder {
    pub fn with_generator_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.generator_name = Some(name.into());
        self
    }

    pub fn with_library(&mut self, library: impl Into<String>) -> &mut Self {
        self.library = Some(library.into());
        self
    }

    pub fn with_api_package(&mut self, package: impl Into<String>) -> &mut Self {
        self.api_package = Some(package.into());
        self
    }

    pub fn with_model_package(&mut self, package: impl Into<String>) -> &mut Self {
        self.model_package = Some(package.into());
        self
    }

    pub fn with_package_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.package_name = Some(name.into());
        self
    }

    pub fn with_model_name_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.model_name_prefix = Some(prefix.into());
        self
    }

    pub fn with_model_name_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.model_name_suffix = Some(suffix.into());
        self
    }

    pub fn with_api_name_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.api_name_suffix = Some(suffix.into());
        self
    }

    pub fn with_instantiation_types(&mut self, types: BTreeMap<String, String>) -> &mut Self {
        self.instantiation_types = types;
        self
    }

    pub fn with_instantiation_type(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.instantiation_types.insert(key.into(), value.into());
        self
    }

    pub fn with_type_mappings(&mut self, mappings: BTreeMap<String, String>) -> &mut Self {
        self.type_mappings = mappings;
        self
    }

    pub fn with_type_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.type_mappings.insert(key.into(), value.into());
        self
    }

    pub fn with_import_mappings(&mut self, mappings: BTreeMap<String, String>) -> &mut Self {
        self.import_mappings = mappings;
        self
    }

    pub fn with_import_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.import_mappings.insert(key.into(), value.into());
        self
    }

    pub fn with_schema_mappings(&mut self, mappings: BTreeMap<String, String>) -> &mut Self {
        self.schema_mappings = mappings;
        self
    }

    pub fn with_schema_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.schema_mappings.insert(key.into(), value.into());
        self
    }

    pub fn with_inline_schema_name_mappings(
        &mut self,
        mappings: BTreeMap<String, String>,
    ) -> &mut Self {
        self.inline_schema_name_mappings = mappings;
        self
    }

    pub fn with_inline_schema_name_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.inline_schema_name_mappings.insert(key.into(), value.into());
        self
    }

    pub fn with_inline_schema_name_defaults(
        &mut self,
        defaults: BTreeMap<String, String>,
    ) -> &mut Self {
        self.inline_schema_name_defaults = defaults;
        self
    }

    pub fn with_inline_schema_name_default(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.inline_schema_name_defaults.insert(key.into(), value.into());
        self
    }

    pub fn with_language_specific_primitives(&mut self, primitives: BTreeSet<String>) -> &mut Self {
        self.language_specific_primitives = primitives;
        self
    }

    pub fn with_language_specific_primitive(&mut self, primitive: impl Into<String>) -> &mut Self {
        self.language_specific_primitives.insert(primitive.into());
        self
    }

    pub fn with_reserved_words_mappings(
        &mut self,
        mappings: BTreeMap<String, String>,
    ) -> &mut Self {
        self.reserved_words_mappings = mappings;
        self
    }

    pub fn with_reserved_words_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.reserved_words_mappings.insert(key.into(), value.into());
        self
    }

    pub fn with_additional_properties(
        &mut self,
        properties: BTreeMap<String, JsonValue>,
    ) -> &mut Self {
        self.additional_properties = properties;
        self
    }

    pub fn with_additional_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> &mut Self {
        self.additional_properties.insert(key.into(), value.into());
        self
    }

    pub fn with_server_variables(&mut self, variables: BTreeMap<String, String>) -> &mut Self {
        self.server_variables = variables;
        self
    }

    pub fn with_server_variable(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.server_variables.insert(key.into(), value.into());
        self
    }

    /// Snapshot the accumulated values. The generator name must be non-blank.
    pub fn build(&self) -> Result<GeneratorSettings> {
        let generator_name = self
            .generator_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| Error::config("generator name must be specified"))?;

        Ok(GeneratorSettings {
            generator_name,
            library: self.library.clone(),
            api_package: self.api_package.clone(),
            model_package: self.model_package.clone(),
            package_name: self.package_name.clone(),
            model_name_prefix: self.model_name_prefix.clone(),
            model_name_suffix: self.model_name_suffix.clone(),
            api_name_suffix: self.api_name_suffix.clone(),
            instantiation_types: self.instantiation_types.clone(),
            type_mappings: self.type_mappings.clone(),
            import_mappings: self.import_mappings.clone(),
            schema_mappings: self.schema_mappings.clone(),
            inline_schema_name_mappings: self.inline_schema_name_mappings.clone(),
            inline_schema_name_defaults: self.inline_schema_name_defaults.clone(),
            language_specific_primitives: self.language_specific_primitives.clone(),
            reserved_words_mappings: self.reserved_words_mappings.clone(),
            additional_properties: self.additional_properties.clone(),
            server_variables: self.server_variables.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_fidelity() -> Result<()> {
        let type_mappings = BTreeMap::from([("DateTime".to_string(), "string".to_string())]);
        let primitives = BTreeSet::from(["bigint".to_string()]);

        let settings = GeneratorSettings::builder()
            .with_generator_name("typescript-express-server")
            .with_library("express5")
            .with_api_package("api")
            .with_model_package("model")
            .with_package_name("petstore")
            .with_model_name_prefix("Api")
            .with_model_name_suffix("Dto")
            .with_api_name_suffix("Controller")
            .with_type_mappings(type_mappings.clone())
            .with_instantiation_type("array", "Array")
            .with_import_mapping("Money", "./money")
            .with_schema_mapping("Pet", "./pet")
            .with_inline_schema_name_mapping("inline_object", "Body")
            .with_inline_schema_name_default("arrayItemSuffix", "_item")
            .with_language_specific_primitives(primitives.clone())
            .with_reserved_words_mapping("delete", "remove")
            .with_additional_property("supportsES6", true)
            .with_server_variable("port", "8080")
            .build()?;

        assert_eq!(settings.generator_name(), "typescript-express-server");
        assert_eq!(settings.library(), Some("express5"));
        assert_eq!(settings.api_package(), Some("api"));
        assert_eq!(settings.model_package(), Some("model"));
        assert_eq!(settings.package_name(), Some("petstore"));
        assert_eq!(settings.model_name_prefix(), Some("Api"));
        assert_eq!(settings.model_name_suffix(), Some("Dto"));
        assert_eq!(settings.api_name_suffix(), Some("Controller"));
        assert_eq!(settings.type_mappings(), &type_mappings);
        assert_eq!(settings.instantiation_types()["array"], "Array");
        assert_eq!(settings.import_mappings()["Money"], "./money");
        assert_eq!(settings.schema_mappings()["Pet"], "./pet");
        assert_eq!(settings.inline_schema_name_mappings()["inline_object"], "Body");
        assert_eq!(settings.inline_schema_name_defaults()["arrayItemSuffix"], "_item");
        assert_eq!(settings.language_specific_primitives(), &primitives);
        assert_eq!(settings.reserved_words_mappings()["delete"], "remove");
        assert_eq!(settings.additional_properties()["supportsES6"], json!(true));
        assert_eq!(settings.server_variables()["port"], "8080");
        assert_eq!(settings.naming_properties().len(), 6);
        Ok(())
    }

    #[test]
    fn test_blank_generator_name_rejected() {
        for name in ["", "   ", "\t\n"] {
            let err = GeneratorSettings::builder()
                .with_generator_name(name)
                .build()
                .unwrap_err();
            assert!(err.is_config());
        }
        assert!(GeneratorSettings::builder().build().is_err());
    }

    #[test]
    fn test_snapshot_is_detached_from_builder() -> Result<()> {
        let mut builder = GeneratorSettings::builder();
        builder
            .with_generator_name("typescript-express-server")
            .with_type_mapping("a", "b");
        let first = builder.build()?;
        builder.with_type_mapping("a", "c");
        let second = builder.build()?;
        assert_eq!(first.type_mappings()["a"], "b");
        assert_eq!(second.type_mappings()["a"], "c");
        Ok(())
    }
}
