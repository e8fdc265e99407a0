//! Assembles a [`GenerationRequest`] from caller settings.
//!
//! The configurator accumulates generator and workflow options, reads and
//! validates the input specification, and packages the configured generator
//! together with the parsed document for the generation engine.
//!
//! # Examples
//!
//! ```no_run
//! use oasgen_core::configurator::CodegenConfigurator;
//! use oasgen_core::global::GlobalSettings;
//!
//! # #[tokio::main]
//! # async fn main() -> oasgen_core::Result<()> {
//! let mut configurator = CodegenConfigurator::new();
//! configurator
//!     .set_generator_name("typescript-express-server")
//!     .set_input_spec("petstore.yaml")
//!     .set_output_dir("out")
//!     .add_type_mapping("DateTime", "string");
//!
//! let mut globals = GlobalSettings::new();
//! let request = configurator.to_generation_request(&mut globals).await?;
//! for file in request.planned_files() {
//!     println!("{} -> {}", file.template, file.destination);
//! }
//! # Ok(())
//! # }
//! ```

// Internal imports (std, crate)
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::auth::parse_auth;
use crate::config::ConfigFile;
use crate::generator::{
    plan_files, GeneratorConfig, GeneratorRegistry, PlannedFile, TemplateDefinition, TEMPLATE_DIR,
};
use crate::global::{DebugFlag, GlobalSettings, GENERATE_ALIAS_AS_MODEL, VERBOSE};
use crate::openapi::{SpecDocument, SpecLoader, SpecParseResult};
use crate::settings::{
    GeneratorSettings, GeneratorSettingsBuilder, WorkflowSettings, WorkflowSettingsBuilder,
};
use crate::templating::TemplatingEngine;
use crate::{Error, Result};

// External imports (alphabetized)
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Validation messages split the way they are reported
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: BTreeSet<String>,
    /// Only collected when there are errors
    pub warnings: BTreeSet<String>,
}

impl ValidationReport {
    fn from_parse_result(result: &SpecParseResult) -> Self {
        if result.messages.is_empty() {
            return Self::default();
        }
        Self {
            errors: result.messages.clone(),
            warnings: result.warnings(),
        }
    }

    /// No issues were found
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Warning text logged when issues are found but validation is disabled
    pub fn disabled_validation_message(&self) -> String {
        let mut message = String::from(
            "There were issues with the specification, but validation has been explicitly disabled.\n",
        );
        message.push_str("Errors: \n");
        for error in &self.errors {
            message.push_str(&format!("\t-{}\n", error));
        }
        if !self.warnings.is_empty() {
            message.push_str("Warnings: \n");
            for warning in &self.warnings {
                message.push_str(&format!("\t-{}\n", warning));
            }
        }
        message
    }
}

/// Settings and document produced by [`CodegenConfigurator::to_context`]
#[derive(Debug, Clone)]
pub struct Context {
    /// Absent only when validation is disabled and the input could not be parsed
    pub spec: Option<SpecDocument>,
    pub generator_settings: GeneratorSettings,
    pub workflow_settings: WorkflowSettings,
    pub validation: ValidationReport,
}

/// Everything the generation engine needs for one run
#[derive(Debug, Serialize)]
pub struct GenerationRequest {
    pub config: GeneratorConfig,
    pub spec: SpecDocument,
    pub user_defined_templates: Vec<TemplateDefinition>,
    /// Global properties as they stood when the request was assembled
    pub global_settings: GlobalSettings,
    pub validation: ValidationReport,
}

impl GenerationRequest {
    /// The files the configured generator emits for this document
    pub fn planned_files(&self) -> Vec<PlannedFile> {
        plan_files(&self.config, &self.spec, &self.user_defined_templates)
    }
}

/// Collects run options and turns them into a [`GenerationRequest`]
#[derive(Debug, Clone)]
pub struct CodegenConfigurator {
    registry: GeneratorRegistry,
    loader: SpecLoader,
    generator_settings: GeneratorSettingsBuilder,
    workflow_settings: WorkflowSettingsBuilder,
    templating_engine_name: Option<String>,
    auth: Option<String>,
    user_defined_templates: Vec<TemplateDefinition>,
}

impl Default for CodegenConfigurator {
    fn default() -> Self {
        Self {
            registry: GeneratorRegistry::with_builtins(),
            loader: SpecLoader::new(),
            generator_settings: GeneratorSettingsBuilder::default(),
            workflow_settings: WorkflowSettingsBuilder::default(),
            templating_engine_name: None,
            auth: None,
            user_defined_templates: Vec::new(),
        }
    }
}

impl CodegenConfigurator {
    /// A configurator backed by the built-in generators
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every option from a YAML, JSON or TOML config file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(ConfigFile::from_file(path).await?.into_configurator())
    }

    /// Look generators up in `registry` instead of the built-in one
    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Read specifications with a preconfigured loader
    pub fn with_loader(mut self, loader: SpecLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn set_generator_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.generator_settings.with_generator_name(name);
        self
    }

    pub fn set_input_spec(&mut self, input_spec: impl Into<String>) -> &mut Self {
        self.workflow_settings.with_input_spec(input_spec);
        self
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<String>) -> &mut Self {
        self.workflow_settings.with_output_dir(output_dir);
        self
    }

    pub fn set_template_dir(&mut self, template_dir: impl Into<String>) -> &mut Self {
        self.workflow_settings.with_template_dir(template_dir);
        self
    }

    /// Explicit templating engine; the generator's default is used otherwise
    pub fn set_templating_engine_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.templating_engine_name = Some(name.into());
        self
    }

    /// Credentials for remote specifications, as `name:value` pairs
    pub fn set_auth(&mut self, auth: impl Into<String>) -> &mut Self {
        self.auth = Some(auth.into());
        self
    }

    pub fn set_library(&mut self, library: impl Into<String>) -> &mut Self {
        self.generator_settings.with_library(library);
        self
    }

    pub fn set_api_package(&mut self, package: impl Into<String>) -> &mut Self {
        self.generator_settings.with_api_package(package);
        self
    }

    pub fn set_model_package(&mut self, package: impl Into<String>) -> &mut Self {
        self.generator_settings.with_model_package(package);
        self
    }

    pub fn set_package_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.generator_settings.with_package_name(name);
        self
    }

    pub fn set_model_name_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.generator_settings.with_model_name_prefix(prefix);
        self
    }

    pub fn set_model_name_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.generator_settings.with_model_name_suffix(suffix);
        self
    }

    pub fn set_api_name_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.generator_settings.with_api_name_suffix(suffix);
        self
    }

    pub fn set_ignore_file_override(&mut self, path: impl Into<String>) -> &mut Self {
        self.workflow_settings.with_ignore_file_override(path);
        self
    }

    pub fn set_skip_overwrite(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_skip_overwrite(value);
        self
    }

    pub fn set_validate_spec(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_validate_spec(value);
        self
    }

    pub fn set_strict_spec_behavior(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_strict_spec_behavior(value);
        self
    }

    pub fn set_verbose(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_verbose(value);
        self
    }

    pub fn set_enable_minimal_update(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_enable_minimal_update(value);
        self
    }

    pub fn set_enable_post_process_file(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_enable_post_process_file(value);
        self
    }

    pub fn set_remove_operation_id_prefix(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_remove_operation_id_prefix(value);
        self
    }

    pub fn set_skip_operation_example(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_skip_operation_example(value);
        self
    }

    pub fn set_generate_alias_as_model(&mut self, value: bool) -> &mut Self {
        self.workflow_settings.with_generate_alias_as_model(value);
        self
    }

    pub fn set_instantiation_types(&mut self, types: BTreeMap<String, String>) -> &mut Self {
        self.generator_settings.with_instantiation_types(types);
        self
    }

    pub fn add_instantiation_type(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_instantiation_type(key, value);
        self
    }

    pub fn set_type_mappings(&mut self, mappings: BTreeMap<String, String>) -> &mut Self {
        self.generator_settings.with_type_mappings(mappings);
        self
    }

    pub fn add_type_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_type_mapping(key, value);
        self
    }

    pub fn set_import_mappings(&mut self, mappings: BTreeMap<String, String>) -> &mut Self {
        self.generator_settings.with_import_mappings(mappings);
        self
    }

    pub fn add_import_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_import_mapping(key, value);
        self
    }

    pub fn set_schema_mappings(&mut self, mappings: BTreeMap<String, String>) -> &mut Self {
        self.generator_settings.with_schema_mappings(mappings);
        self
    }

    pub fn add_schema_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_schema_mapping(key, value);
        self
    }

    pub fn set_inline_schema_name_mappings(
        &mut self,
        mappings: BTreeMap<String, String>,
    ) -> &mut Self {
        self.generator_settings.with_inline_schema_name_mappings(mappings);
        self
    }

    pub fn add_inline_schema_name_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_inline_schema_name_mapping(key, value);
        self
    }

    pub fn set_inline_schema_name_defaults(
        &mut self,
        defaults: BTreeMap<String, String>,
    ) -> &mut Self {
        self.generator_settings.with_inline_schema_name_defaults(defaults);
        self
    }

    pub fn add_inline_schema_name_default(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_inline_schema_name_default(key, value);
        self
    }

    pub fn set_language_specific_primitives(&mut self, primitives: BTreeSet<String>) -> &mut Self {
        self.generator_settings.with_language_specific_primitives(primitives);
        self
    }

    pub fn add_language_specific_primitive(&mut self, primitive: impl Into<String>) -> &mut Self {
        self.generator_settings.with_language_specific_primitive(primitive);
        self
    }

    pub fn set_reserved_words_mappings(&mut self, mappings: BTreeMap<String, String>) -> &mut Self {
        self.generator_settings.with_reserved_words_mappings(mappings);
        self
    }

    pub fn add_reserved_words_mapping(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_reserved_words_mapping(key, value);
        self
    }

    pub fn set_additional_properties(
        &mut self,
        properties: BTreeMap<String, JsonValue>,
    ) -> &mut Self {
        self.generator_settings.with_additional_properties(properties);
        self
    }

    pub fn add_additional_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> &mut Self {
        self.generator_settings.with_additional_property(key, value);
        self
    }

    pub fn set_server_variables(&mut self, variables: BTreeMap<String, String>) -> &mut Self {
        self.generator_settings.with_server_variables(variables);
        self
    }

    pub fn add_server_variable(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.generator_settings.with_server_variable(key, value);
        self
    }

    pub fn set_global_properties(&mut self, properties: BTreeMap<String, String>) -> &mut Self {
        self.workflow_settings.with_global_properties(properties);
        self
    }

    pub fn add_global_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.workflow_settings.with_global_property(key, value);
        self
    }

    pub fn set_user_defined_templates(&mut self, templates: Vec<TemplateDefinition>) -> &mut Self {
        self.user_defined_templates = templates;
        self
    }

    pub fn add_user_defined_template(&mut self, template: TemplateDefinition) -> &mut Self {
        self.user_defined_templates.push(template);
        self
    }

    /// Build the settings snapshots, update `globals`, then read and
    /// validate the input specification.
    ///
    /// Missing generator name or input spec fails before anything is read.
    /// When validation finds issues the run fails with
    /// [`Error::SpecValidation`], unless validation is disabled, in which
    /// case the issues are logged and the run continues.
    pub async fn to_context(&self, globals: &mut GlobalSettings) -> Result<Context> {
        let generator_settings = self.generator_settings.build()?;
        let mut workflow_settings = self.workflow_settings.clone();
        // input spec is required before the generator is looked up
        workflow_settings.build()?;

        let generator = self.registry.create(generator_settings.generator_name())?;
        match self
            .templating_engine_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
        {
            Some(name) => workflow_settings.with_templating_engine_name(name),
            None => workflow_settings
                .with_templating_engine_name(generator.default_templating_engine().as_str()),
        };
        let workflow_settings = workflow_settings.build()?;

        apply_global_settings(&workflow_settings, globals);

        let auth = parse_auth(self.auth.as_deref());
        let result = self
            .loader
            .read_location(workflow_settings.input_spec(), &auth)
            .await;

        let validation = ValidationReport::from_parse_result(&result);
        if !validation.is_clean() {
            if workflow_settings.is_validate_spec() {
                return Err(Error::spec_validation(
                    validation.errors,
                    validation.warnings,
                ));
            }
            log::warn!("{}", validation.disabled_validation_message());
        }

        Ok(Context {
            spec: result.document,
            generator_settings,
            workflow_settings,
            validation,
        })
    }

    /// Run [`to_context`](Self::to_context) and populate the selected
    /// generator with the resulting settings.
    ///
    /// Caller mappings are merged over the generator's defaults and win on
    /// collisions.
    pub async fn to_generation_request(
        &self,
        globals: &mut GlobalSettings,
    ) -> Result<GenerationRequest> {
        let Context {
            spec,
            generator_settings,
            workflow_settings,
            validation,
        } = self.to_context(globals).await?;

        let mut config =
            GeneratorConfig::new(self.registry.create(generator_settings.generator_name())?);

        if let Some(library) = generator_settings.library().filter(|l| !l.is_empty()) {
            config.set_library(library)?;
        }

        config.input_spec = workflow_settings.input_spec().to_string();
        if let Some(output_dir) = workflow_settings.output_dir() {
            config.output_dir = output_dir.to_string();
        }
        config.skip_overwrite = workflow_settings.is_skip_overwrite();
        config.ignore_file_override = workflow_settings.ignore_file_override().map(String::from);
        config.remove_operation_id_prefix = workflow_settings.is_remove_operation_id_prefix();
        config.skip_operation_example = workflow_settings.is_skip_operation_example();
        config.enable_post_process_file = workflow_settings.is_enable_post_process_file();
        config.enable_minimal_update = workflow_settings.is_enable_minimal_update();
        config.strict_spec_behavior = workflow_settings.is_strict_spec_behavior();
        config.templating_engine =
            TemplatingEngine::by_identifier(workflow_settings.templating_engine_name())?;

        merge(&mut config.instantiation_types, generator_settings.instantiation_types());
        merge(&mut config.type_mapping, generator_settings.type_mappings());
        merge(&mut config.import_mapping, generator_settings.import_mappings());
        merge(&mut config.schema_mapping, generator_settings.schema_mappings());
        merge(
            &mut config.inline_schema_name_mapping,
            generator_settings.inline_schema_name_mappings(),
        );
        merge(
            &mut config.inline_schema_name_default,
            generator_settings.inline_schema_name_defaults(),
        );
        config.language_specific_primitives.extend(
            generator_settings
                .language_specific_primitives()
                .iter()
                .cloned(),
        );
        merge(
            &mut config.reserved_words_mappings,
            generator_settings.reserved_words_mappings(),
        );
        merge(
            &mut config.additional_properties,
            generator_settings.additional_properties(),
        );

        for (key, value) in generator_settings.naming_properties() {
            config
                .additional_properties
                .entry(key.to_string())
                .or_insert_with(|| JsonValue::from(value));
        }
        if let Some(package) = generator_settings.api_package() {
            config.api_package = package.to_string();
        }
        if let Some(package) = generator_settings.model_package() {
            config.model_package = package.to_string();
        }
        config.model_name_prefix = generator_settings.model_name_prefix().map(String::from);
        config.model_name_suffix = generator_settings.model_name_suffix().map(String::from);
        if let Some(suffix) = generator_settings.api_name_suffix() {
            config.api_name_suffix = suffix.to_string();
        }

        let server_variables = generator_settings.server_variables();
        if !server_variables.is_empty() {
            log::warn!("user-defined server variable support is experimental.");
            merge(&mut config.server_variable_overrides, server_variables);
        }

        if let Some(template_dir) = workflow_settings.template_dir() {
            config.template_dir = template_dir.to_string();
            config
                .additional_properties
                .insert(TEMPLATE_DIR.to_string(), JsonValue::from(template_dir));
        }

        let spec = spec.ok_or_else(|| {
            Error::openapi(format!(
                "no specification document could be read from {}",
                config.input_spec
            ))
        })?;

        Ok(GenerationRequest {
            config,
            spec,
            user_defined_templates: self.user_defined_templates.clone(),
            global_settings: globals.clone(),
            validation,
        })
    }
}

fn merge<V: Clone>(target: &mut BTreeMap<String, V>, overrides: &BTreeMap<String, V>) {
    target.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
}

/// Notice logged when verbose mode switches the debug flags on
pub fn verbose_notice() -> String {
    let mut notice = String::from("\nVERBOSE MODE: ON. Additional debug options are injected");
    for flag in DebugFlag::all() {
        notice.push_str(&format!("\n - [{}] {}", flag.key(), flag.description()));
    }
    notice
}

fn apply_global_settings(workflow: &WorkflowSettings, globals: &mut GlobalSettings) {
    if workflow.is_verbose() {
        log::info!("{}", verbose_notice());
        for flag in DebugFlag::all() {
            globals.set_property(flag.key(), "");
        }
        globals.set_property(VERBOSE, "true");
    } else {
        globals.set_property(VERBOSE, "false");
    }

    for (key, value) in workflow.global_properties() {
        globals.set_property(key.clone(), value.clone());
    }

    globals.set_property(
        GENERATE_ALIAS_AS_MODEL,
        workflow.is_generate_alias_as_model().to_string(),
    );
}
