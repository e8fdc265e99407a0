//! Run configuration loaded from a file.
//!
//! Files use the camelCase keys of the upstream generator tooling and may be
//! YAML, JSON or TOML. Keys that are not recognized become additional
//! properties for the generator.
//!
//! # Examples
//!
//! ```no_run
//! use oasgen_core::config::ConfigFile;
//!
//! # #[tokio::main]
//! # async fn main() -> oasgen_core::Result<()> {
//! let file = ConfigFile::from_file("oasgen.yaml").await?;
//! let configurator = file.into_configurator();
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::BTreeMap;
use std::path::Path;

use crate::configurator::CodegenConfigurator;
use crate::generator::TemplateDefinition;

// External imports (alphabetized)
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use serde_value::Value as SerdeValue;
use tokio::fs;

/// Settings for one generation run as written in a config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub generator_name: Option<String>,
    pub input_spec: Option<String>,
    pub output_dir: Option<String>,
    pub template_dir: Option<String>,
    pub templating_engine: Option<String>,
    pub library: Option<String>,
    /// `name:value` credential pairs, comma separated
    pub auth: Option<String>,
    pub api_package: Option<String>,
    pub model_package: Option<String>,
    pub package_name: Option<String>,
    pub model_name_prefix: Option<String>,
    pub model_name_suffix: Option<String>,
    pub api_name_suffix: Option<String>,
    pub ignore_file_override: Option<String>,

    pub skip_overwrite: Option<bool>,
    pub validate_spec: Option<bool>,
    pub strict_spec_behavior: Option<bool>,
    pub verbose: Option<bool>,
    pub enable_minimal_update: Option<bool>,
    pub enable_post_process_file: Option<bool>,
    pub remove_operation_id_prefix: Option<bool>,
    pub skip_operation_example: Option<bool>,
    pub generate_alias_as_model: Option<bool>,

    #[serde(default)]
    pub instantiation_types: BTreeMap<String, String>,
    #[serde(default)]
    pub type_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub import_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub schema_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub inline_schema_name_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub inline_schema_name_defaults: BTreeMap<String, String>,
    #[serde(default)]
    pub reserved_words_mappings: BTreeMap<String, String>,
    #[serde(default)]
    pub server_variables: BTreeMap<String, String>,
    #[serde(default)]
    pub global_properties: BTreeMap<String, String>,

    /// Either a list or a single comma-separated string
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub language_specific_primitives: Vec<String>,

    /// User-defined templates added to the generator's own
    #[serde(default)]
    pub files: Vec<TemplateDefinition>,

    #[serde(default)]
    pub additional_properties: BTreeMap<String, JsonValue>,

    /// Keys not listed above, passed through as additional properties
    #[serde(flatten)]
    pub extra: BTreeMap<String, JsonValue>,
}

impl ConfigFile {
    /// Load a config file, picking the format from its extension
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await?;
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase);
        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(&content)?),
            Some("json") => Ok(serde_json::from_str(&content)?),
            _ => Ok(serde_yaml::from_str(&content)?),
        }
    }

    /// Write the configuration as YAML
    pub async fn save<P: AsRef<Path>>(&self, path: P) -> crate::Result<()> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Copy every value that was set onto `configurator`
    pub fn apply(&self, configurator: &mut CodegenConfigurator) {
        if let Some(name) = &self.generator_name {
            configurator.set_generator_name(name);
        }
        if let Some(spec) = &self.input_spec {
            configurator.set_input_spec(spec);
        }
        if let Some(dir) = &self.output_dir {
            configurator.set_output_dir(dir);
        }
        if let Some(dir) = &self.template_dir {
            configurator.set_template_dir(dir);
        }
        if let Some(engine) = &self.templating_engine {
            configurator.set_templating_engine_name(engine);
        }
        if let Some(library) = &self.library {
            configurator.set_library(library);
        }
        if let Some(auth) = &self.auth {
            configurator.set_auth(auth);
        }
        if let Some(package) = &self.api_package {
            configurator.set_api_package(package);
        }
        if let Some(package) = &self.model_package {
            configurator.set_model_package(package);
        }
        if let Some(name) = &self.package_name {
            configurator.set_package_name(name);
        }
        if let Some(prefix) = &self.model_name_prefix {
            configurator.set_model_name_prefix(prefix);
        }
        if let Some(suffix) = &self.model_name_suffix {
            configurator.set_model_name_suffix(suffix);
        }
        if let Some(suffix) = &self.api_name_suffix {
            configurator.set_api_name_suffix(suffix);
        }
        if let Some(path) = &self.ignore_file_override {
            configurator.set_ignore_file_override(path);
        }

        if let Some(value) = self.skip_overwrite {
            configurator.set_skip_overwrite(value);
        }
        if let Some(value) = self.validate_spec {
            configurator.set_validate_spec(value);
        }
        if let Some(value) = self.strict_spec_behavior {
            configurator.set_strict_spec_behavior(value);
        }
        if let Some(value) = self.verbose {
            configurator.set_verbose(value);
        }
        if let Some(value) = self.enable_minimal_update {
            configurator.set_enable_minimal_update(value);
        }
        if let Some(value) = self.enable_post_process_file {
            configurator.set_enable_post_process_file(value);
        }
        if let Some(value) = self.remove_operation_id_prefix {
            configurator.set_remove_operation_id_prefix(value);
        }
        if let Some(value) = self.skip_operation_example {
            configurator.set_skip_operation_example(value);
        }
        if let Some(value) = self.generate_alias_as_model {
            configurator.set_generate_alias_as_model(value);
        }

        for (key, value) in &self.instantiation_types {
            configurator.add_instantiation_type(key, value);
        }
        for (key, value) in &self.type_mappings {
            configurator.add_type_mapping(key, value);
        }
        for (key, value) in &self.import_mappings {
            configurator.add_import_mapping(key, value);
        }
        for (key, value) in &self.schema_mappings {
            configurator.add_schema_mapping(key, value);
        }
        for (key, value) in &self.inline_schema_name_mappings {
            configurator.add_inline_schema_name_mapping(key, value);
        }
        for (key, value) in &self.inline_schema_name_defaults {
            configurator.add_inline_schema_name_default(key, value);
        }
        for (key, value) in &self.reserved_words_mappings {
            configurator.add_reserved_words_mapping(key, value);
        }
        for (key, value) in &self.server_variables {
            configurator.add_server_variable(key, value);
        }
        for (key, value) in &self.global_properties {
            configurator.add_global_property(key, value);
        }
        for primitive in &self.language_specific_primitives {
            configurator.add_language_specific_primitive(primitive);
        }
        for (key, value) in self.extra.iter().chain(&self.additional_properties) {
            configurator.add_additional_property(key, value.clone());
        }
        if !self.files.is_empty() {
            configurator.set_user_defined_templates(self.files.clone());
        }
    }

    /// A configurator holding every value from this file
    pub fn into_configurator(self) -> CodegenConfigurator {
        let mut configurator = CodegenConfigurator::new();
        self.apply(&mut configurator);
        configurator
    }
}

/// Accept either a list of strings or one comma-separated string
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = SerdeValue::deserialize(deserializer)?;

    match value {
        SerdeValue::String(s) => Ok(s
            .split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(String::from)
            .collect()),
        SerdeValue::Seq(seq) => {
            let mut result = Vec::new();
            for item in seq {
                if let SerdeValue::String(s) = item {
                    result.push(s);
                } else {
                    return Err(serde::de::Error::custom(
                        "Expected string or array of strings",
                    ));
                }
            }
            Ok(result)
        }
        SerdeValue::Unit | SerdeValue::Option(None) => Ok(Vec::new()),
        _ => Err(serde::de::Error::custom(
            "Expected string or array of strings",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::TemplateFileType;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_yaml_config() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("oasgen.yaml");
        fs::write(
            &path,
            r#"
generatorName: typescript-express-server
inputSpec: petstore.yaml
outputDir: out
validateSpec: false
typeMappings:
  DateTime: string
languageSpecificPrimitives: bigint, Blob
supportsES6: true
files:
  - templateFile: package.mustache
    destinationFilename: package.json
    templateType: supporting_files
"#,
        )
        .await?;

        let config = ConfigFile::from_file(&path).await?;
        assert_eq!(config.generator_name.as_deref(), Some("typescript-express-server"));
        assert_eq!(config.validate_spec, Some(false));
        assert_eq!(config.verbose, None);
        assert_eq!(config.type_mappings["DateTime"], "string");
        assert_eq!(config.language_specific_primitives, vec!["bigint", "Blob"]);
        assert_eq!(config.extra["supportsES6"], JsonValue::Bool(true));
        assert_eq!(config.files[0].template_type, TemplateFileType::SupportingFiles);
        assert_eq!(config.files[0].folder, "");
        Ok(())
    }

    #[tokio::test]
    async fn test_toml_and_json_configs() -> crate::Result<()> {
        let dir = tempdir()?;
        let toml_path = dir.path().join("oasgen.toml");
        fs::write(
            &toml_path,
            "generatorName = \"typescript-express-server\"\nlanguageSpecificPrimitives = [\"bigint\"]\n\n[globalProperties]\nmodels = \"Pet\"\n",
        )
        .await?;
        let config = ConfigFile::from_file(&toml_path).await?;
        assert_eq!(config.language_specific_primitives, vec!["bigint"]);
        assert_eq!(config.global_properties["models"], "Pet");

        let json_path = dir.path().join("oasgen.json");
        fs::write(&json_path, r#"{"inputSpec": "spec.json", "npmName": "petstore"}"#).await?;
        let config = ConfigFile::from_file(&json_path).await?;
        assert_eq!(config.input_spec.as_deref(), Some("spec.json"));
        assert_eq!(config.extra["npmName"], "petstore");
        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_list_is_rejected() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("oasgen.yml");
        fs::write(&path, "languageSpecificPrimitives: [1, 2]\n").await?;
        assert!(ConfigFile::from_file(&path).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_roundtrip() -> crate::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("saved.yaml");
        let config = ConfigFile {
            generator_name: Some("typescript-express-server".to_string()),
            input_spec: Some("openapi.yaml".to_string()),
            ..ConfigFile::default()
        };
        config.save(&path).await?;

        let loaded = ConfigFile::from_file(&path).await?;
        assert_eq!(loaded.generator_name, config.generator_name);
        assert_eq!(loaded.input_spec, config.input_spec);
        assert!(loaded.extra.is_empty());
        Ok(())
    }
}
