//! Generator capability, registry and configured generator instances.
//!
//! A generator declares which templates produce which files, its default
//! mapping tables and its naming conventions. Generators are looked up by
//! name in a [`GeneratorRegistry`]; the assembler then populates a
//! [`GeneratorConfig`] from the run's settings.

pub mod config;
pub mod plan;
pub mod registry;
pub mod typescript_express;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::templating::TemplatingEngine;
use crate::utils::camelize;

pub use config::{GeneratorConfig, TEMPLATE_DIR};
pub use plan::{plan_files, PlannedFile, PlannedKind};
pub use registry::{GeneratorFactory, GeneratorRegistry};
pub use typescript_express::TypescriptExpressServerGenerator;

/// What kind of artifact a generator produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorType {
    Client,
    Server,
    Documentation,
    Schema,
    Config,
    Other,
}

impl GeneratorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
            Self::Documentation => "documentation",
            Self::Schema => "schema",
            Self::Config => "config",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for GeneratorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file rendered once per run from a single template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportingFile {
    /// Template path, relative to the template directory
    pub template_file: String,
    /// Destination folder, relative to the output directory
    pub folder: String,
    pub destination_filename: String,
}

impl SupportingFile {
    pub fn new(
        template_file: impl Into<String>,
        folder: impl Into<String>,
        destination_filename: impl Into<String>,
    ) -> Self {
        Self {
            template_file: template_file.into(),
            folder: folder.into(),
            destination_filename: destination_filename.into(),
        }
    }
}

/// Which family of files a user-defined template belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateFileType {
    Api,
    Model,
    ApiDocs,
    ModelDocs,
    ApiTests,
    ModelTests,
    SupportingFiles,
}

impl TemplateFileType {
    /// Rendered once per API group
    pub fn is_per_api(&self) -> bool {
        matches!(self, Self::Api | Self::ApiDocs | Self::ApiTests)
    }

    /// Rendered once per model
    pub fn is_per_model(&self) -> bool {
        matches!(self, Self::Model | Self::ModelDocs | Self::ModelTests)
    }
}

/// A user-supplied template added to the generator's own
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub template_file: String,
    #[serde(default)]
    pub folder: String,
    pub destination_filename: String,
    pub template_type: TemplateFileType,
}

impl TemplateDefinition {
    pub fn new(
        template_file: impl Into<String>,
        folder: impl Into<String>,
        destination_filename: impl Into<String>,
        template_type: TemplateFileType,
    ) -> Self {
        Self {
            template_file: template_file.into(),
            folder: folder.into(),
            destination_filename: destination_filename.into(),
            template_type,
        }
    }
}

/// A pluggable code generator
pub trait CodeGenerator: fmt::Debug + Send + Sync {
    /// Registry name, e.g. `typescript-express-server`
    fn name(&self) -> &'static str;

    fn help(&self) -> &'static str;

    fn generator_type(&self) -> GeneratorType;

    /// Output location used when the run does not set one
    fn output_folder(&self) -> String;

    /// Built-in template directory name
    fn embedded_template_dir(&self) -> &'static str;

    fn default_templating_engine(&self) -> TemplatingEngine {
        TemplatingEngine::default()
    }

    fn api_package(&self) -> &'static str {
        ""
    }

    fn model_package(&self) -> &'static str {
        ""
    }

    /// Model templates mapped to the suffix of the file each one produces
    fn model_template_files(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// API templates mapped to the suffix of the file each one produces
    fn api_template_files(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn supporting_files(&self) -> Vec<SupportingFile> {
        Vec::new()
    }

    fn type_mapping(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn instantiation_types(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn import_mapping(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn language_specific_primitives(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    fn reserved_words(&self) -> BTreeSet<String> {
        BTreeSet::new()
    }

    /// Library variants mapped to a description; empty means any value is accepted
    fn supported_libraries(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    fn to_model_filename(&self, model_name: &str) -> String {
        camelize(model_name)
    }

    fn to_api_filename(&self, api_name: &str) -> String {
        camelize(api_name)
    }
}
