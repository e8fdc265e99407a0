//! A generator instance populated with the settings of one run.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;

use super::{CodeGenerator, SupportingFile};
use crate::templating::TemplatingEngine;
use crate::utils::{camelize_with_affixes, package_to_path};
use crate::{Error, Result};

/// Additional-property key recording a template directory override
pub const TEMPLATE_DIR: &str = "templateDir";

const DEFAULT_API_NAME_SUFFIX: &str = "Api";

/// The configured generator handed to the generation engine.
///
/// Mapping tables start from the generator's own defaults; run settings are
/// merged on top, so caller entries win on key collisions.
#[derive(Debug, Serialize)]
pub struct GeneratorConfig {
    #[serde(rename = "generatorName", serialize_with = "serialize_generator_name")]
    generator: Box<dyn CodeGenerator>,
    pub library: Option<String>,
    pub input_spec: String,
    pub output_dir: String,
    pub template_dir: String,
    pub templating_engine: TemplatingEngine,
    pub ignore_file_override: Option<String>,
    pub skip_overwrite: bool,
    pub remove_operation_id_prefix: bool,
    pub skip_operation_example: bool,
    pub enable_post_process_file: bool,
    pub enable_minimal_update: bool,
    pub strict_spec_behavior: bool,
    pub api_package: String,
    pub model_package: String,
    pub model_name_prefix: Option<String>,
    pub model_name_suffix: Option<String>,
    pub api_name_suffix: String,
    pub model_template_files: BTreeMap<String, String>,
    pub api_template_files: BTreeMap<String, String>,
    pub supporting_files: Vec<SupportingFile>,
    pub instantiation_types: BTreeMap<String, String>,
    pub type_mapping: BTreeMap<String, String>,
    pub import_mapping: BTreeMap<String, String>,
    pub schema_mapping: BTreeMap<String, String>,
    pub inline_schema_name_mapping: BTreeMap<String, String>,
    pub inline_schema_name_default: BTreeMap<String, String>,
    pub language_specific_primitives: BTreeSet<String>,
    pub reserved_words: BTreeSet<String>,
    pub reserved_words_mappings: BTreeMap<String, String>,
    pub additional_properties: BTreeMap<String, JsonValue>,
    pub server_variable_overrides: BTreeMap<String, String>,
}

fn serialize_generator_name<S: Serializer>(
    generator: &Box<dyn CodeGenerator>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(generator.name())
}

impl GeneratorConfig {
    /// Seed a configuration from the generator's declared defaults
    pub fn new(generator: Box<dyn CodeGenerator>) -> Self {
        Self {
            library: None,
            input_spec: String::new(),
            output_dir: generator.output_folder(),
            template_dir: generator.embedded_template_dir().to_string(),
            templating_engine: generator.default_templating_engine(),
            ignore_file_override: None,
            skip_overwrite: false,
            remove_operation_id_prefix: false,
            skip_operation_example: false,
            enable_post_process_file: false,
            enable_minimal_update: false,
            strict_spec_behavior: true,
            api_package: generator.api_package().to_string(),
            model_package: generator.model_package().to_string(),
            model_name_prefix: None,
            model_name_suffix: None,
            api_name_suffix: DEFAULT_API_NAME_SUFFIX.to_string(),
            model_template_files: generator.model_template_files(),
            api_template_files: generator.api_template_files(),
            supporting_files: generator.supporting_files(),
            instantiation_types: generator.instantiation_types(),
            type_mapping: generator.type_mapping(),
            import_mapping: generator.import_mapping(),
            schema_mapping: BTreeMap::new(),
            inline_schema_name_mapping: BTreeMap::new(),
            inline_schema_name_default: BTreeMap::new(),
            language_specific_primitives: generator.language_specific_primitives(),
            reserved_words: generator.reserved_words(),
            reserved_words_mappings: BTreeMap::new(),
            additional_properties: BTreeMap::new(),
            server_variable_overrides: BTreeMap::new(),
            generator,
        }
    }

    /// The generator this configuration was built from
    pub fn generator(&self) -> &dyn CodeGenerator {
        self.generator.as_ref()
    }

    pub fn generator_name(&self) -> &'static str {
        self.generator.name()
    }

    /// Select a library variant; rejected when the generator lists its
    /// libraries and this one is not among them
    pub fn set_library(&mut self, library: &str) -> Result<()> {
        let supported = self.generator.supported_libraries();
        if !supported.is_empty() && !supported.contains_key(library) {
            return Err(Error::config(format!(
                "Unknown library: {}\nAvailable libraries:\n  {}",
                library,
                supported.keys().cloned().collect::<Vec<_>>().join("\n  ")
            )));
        }
        self.library = Some(library.to_string());
        Ok(())
    }

    /// Folder that model files are written to
    pub fn model_file_folder(&self) -> String {
        join_path(&self.output_dir, &package_to_path(&self.model_package))
    }

    /// Folder that API files are written to
    pub fn api_file_folder(&self) -> String {
        join_path(&self.output_dir, &package_to_path(&self.api_package))
    }

    /// File stem for a model, with the configured prefix and suffix
    pub fn model_filename(&self, model_name: &str) -> String {
        self.generator.to_model_filename(&camelize_with_affixes(
            self.model_name_prefix.as_deref(),
            model_name,
            self.model_name_suffix.as_deref(),
        ))
    }

    /// File stem for an API group
    pub fn api_filename(&self, group: &str) -> String {
        let group = if group.trim().is_empty() { "default" } else { group };
        self.generator.to_api_filename(&camelize_with_affixes(
            None,
            group,
            Some(&self.api_name_suffix),
        ))
    }

    /// Is `word` reserved in the target language, after caller remappings
    pub fn is_reserved_word(&self, word: &str) -> bool {
        !self.reserved_words_mappings.contains_key(word)
            && self.reserved_words.contains(&word.to_lowercase())
    }
}

/// Join two relative path fragments with `/`, skipping empty ones
pub(crate) fn join_path(base: &str, rest: &str) -> String {
    match (base.trim_end_matches('/'), rest.trim_start_matches('/')) {
        ("", rest) => rest.to_string(),
        (base, "") => base.to_string(),
        (base, rest) => format!("{}/{}", base, rest),
    }
}
