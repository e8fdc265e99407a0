//! Run-level options: where the input comes from, where output goes, and how
//! strictly the run treats the specification.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::templating::TemplatingEngine;
use crate::{Error, Result};

/// Immutable snapshot of workflow settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSettings {
    input_spec: String,
    output_dir: Option<String>,
    template_dir: Option<String>,
    templating_engine_name: String,
    ignore_file_override: Option<String>,
    skip_overwrite: bool,
    strict_spec_behavior: bool,
    validate_spec: bool,
    verbose: bool,
    enable_minimal_update: bool,
    enable_post_process_file: bool,
    remove_operation_id_prefix: bool,
    skip_operation_example: bool,
    generate_alias_as_model: bool,
    global_properties: BTreeMap<String, String>,
}

impl WorkflowSettings {
    pub fn builder() -> WorkflowSettingsBuilder {
        WorkflowSettingsBuilder::default()
    }

    pub fn input_spec(&self) -> &str {
        &self.input_spec
    }

    /// Explicit output directory; the generator's convention applies when absent
    pub fn output_dir(&self) -> Option<&str> {
        self.output_dir.as_deref()
    }

    pub fn template_dir(&self) -> Option<&str> {
        self.template_dir.as_deref()
    }

    pub fn templating_engine_name(&self) -> &str {
        &self.templating_engine_name
    }

    pub fn ignore_file_override(&self) -> Option<&str> {
        self.ignore_file_override.as_deref()
    }

    pub fn is_skip_overwrite(&self) -> bool {
        self.skip_overwrite
    }

    pub fn is_strict_spec_behavior(&self) -> bool {
        self.strict_spec_behavior
    }

    pub fn is_validate_spec(&self) -> bool {
        self.validate_spec
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn is_enable_minimal_update(&self) -> bool {
        self.enable_minimal_update
    }

    pub fn is_enable_post_process_file(&self) -> bool {
        self.enable_post_process_file
    }

    pub fn is_remove_operation_id_prefix(&self) -> bool {
        self.remove_operation_id_prefix
    }

    pub fn is_skip_operation_example(&self) -> bool {
        self.skip_operation_example
    }

    pub fn is_generate_alias_as_model(&self) -> bool {
        self.generate_alias_as_model
    }

    pub fn global_properties(&self) -> &BTreeMap<String, String> {
        &self.global_properties
    }
}

/// Mutable accumulator for [`WorkflowSettings`]
#[derive(Debug, Clone)]
pub struct WorkflowSettingsBuilder {
    input_spec: Option<String>,
    output_dir: Option<String>,
    template_dir: Option<String>,
    templating_engine_name: String,
    ignore_file_override: Option<String>,
    skip_overwrite: bool,
    strict_spec_behavior: bool,
    validate_spec: bool,
    verbose: bool,
    enable_minimal_update: bool,
    enable_post_process_file: bool,
    remove_operation_id_prefix: bool,
    skip_operation_example: bool,
    generate_alias_as_model: bool,
    global_properties: BTreeMap<String, String>,
}

impl Default for WorkflowSettingsBuilder {
    fn default() -> Self {
        Self {
            input_spec: None,
            output_dir: None,
            template_dir: None,
            templating_engine_name: TemplatingEngine::default().as_str().to_string(),
            ignore_file_override: None,
            skip_overwrite: false,
            strict_spec_behavior: true,
            validate_spec: true,
            verbose: false,
            enable_minimal_update: false,
            enable_post_process_file: false,
            remove_operation_id_prefix: false,
            skip_operation_example: false,
            generate_alias_as_model: false,
            global_properties: BTreeMap::new(),
        }
    }
}

impl WorkflowSettingsBuilder {
    pub fn with_input_spec(&mut self, input_spec: impl Into<String>) -> &mut Self {
        self.input_spec = Some(input_spec.into());
        self
    }

    pub fn with_output_dir(&mut self, output_dir: impl Into<String>) -> &mut Self {
        self.output_dir = Some(output_dir.into());
        self
    }

    pub fn with_template_dir(&mut self, template_dir: impl Into<String>) -> &mut Self {
        self.template_dir = Some(template_dir.into());
        self
    }

    pub fn with_templating_engine_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.templating_engine_name = name.into();
        self
    }

    pub fn with_ignore_file_override(&mut self, path: impl Into<String>) -> &mut Self {
        self.ignore_file_override = Some(path.into());
        self
    }

    pub fn with_skip_overwrite(&mut self, value: bool) -> &mut Self {
        self.skip_overwrite = value;
        self
    }

    pub fn with_strict_spec_behavior(&mut self, value: bool) -> &mut Self {
        self.strict_spec_behavior = value;
        self
    }

    pub fn with_validate_spec(&mut self, value: bool) -> &mut Self {
        self.validate_spec = value;
        self
    }

    pub fn with_verbose(&mut self, value: bool) -> &mut Self {
        self.verbose = value;
        self
    }

    pub fn with_enable_minimal_update(&mut self, value: bool) -> &mut Self {
        self.enable_minimal_update = value;
        self
    }

    pub fn with_enable_post_process_file(&mut self, value: bool) -> &mut Self {
        self.enable_post_process_file = value;
        self
    }

    pub fn with_remove_operation_id_prefix(&mut self, value: bool) -> &mut Self {
        self.remove_operation_id_prefix = value;
        self
    }

    pub fn with_skip_operation_example(&mut self, value: bool) -> &mut Self {
        self.skip_operation_example = value;
        self
    }

    pub fn with_generate_alias_as_model(&mut self, value: bool) -> &mut Self {
        self.generate_alias_as_model = value;
        self
    }

    pub fn with_global_properties(&mut self, properties: BTreeMap<String, String>) -> &mut Self {
        self.global_properties = properties;
        self
    }

    pub fn with_global_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.global_properties.insert(key.into(), value.into());
        self
    }

    /// Snapshot the accumulated values. The input spec must be non-blank.
    pub fn build(&self) -> Result<WorkflowSettings> {
        let input_spec = self
            .input_spec
            .clone()
            .filter(|spec| !spec.trim().is_empty())
            .ok_or_else(|| Error::config("input spec must be specified"))?;

        Ok(WorkflowSettings {
            input_spec,
            output_dir: self.output_dir.clone(),
            template_dir: self.template_dir.clone(),
            templating_engine_name: self.templating_engine_name.clone(),
            ignore_file_override: self.ignore_file_override.clone(),
            skip_overwrite: self.skip_overwrite,
            strict_spec_behavior: self.strict_spec_behavior,
            validate_spec: self.validate_spec,
            verbose: self.verbose,
            enable_minimal_update: self.enable_minimal_update,
            enable_post_process_file: self.enable_post_process_file,
            remove_operation_id_prefix: self.remove_operation_id_prefix,
            skip_operation_example: self.skip_operation_example,
            generate_alias_as_model: self.generate_alias_as_model,
            global_properties: self.global_properties.clone(),
        })
    }
}
