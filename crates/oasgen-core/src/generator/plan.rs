//! The files a configured generator emits for a document.
//!
//! Rendering is done by the external engine; the plan only records which
//! template becomes which file so callers can inspect the output contract.

use std::collections::BTreeSet;

use serde::Serialize;

use super::config::{join_path, GeneratorConfig};
use super::TemplateDefinition;
use crate::openapi::SpecDocument;
use crate::utils::package_to_path;

/// What a planned file is generated from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannedKind {
    Model,
    Api,
    SupportingFile,
    UserTemplate,
}

/// One output file and the template that produces it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedFile {
    pub template: String,
    pub destination: String,
    pub kind: PlannedKind,
}

impl PlannedFile {
    fn new(template: &str, destination: String, kind: PlannedKind) -> Self {
        Self {
            template: template.to_string(),
            destination,
            kind,
        }
    }
}

/// Expand the generator's template bindings over the document's models and
/// API groups
pub fn plan_files(
    config: &GeneratorConfig,
    spec: &SpecDocument,
    user_templates: &[TemplateDefinition],
) -> Vec<PlannedFile> {
    let models = spec.model_names();
    let groups = api_groups(spec);
    let mut files = Vec::new();

    let model_folder = config.model_file_folder();
    for model in &models {
        for (template, suffix) in &config.model_template_files {
            let name = format!("{}{}", config.model_filename(model), suffix);
            files.push(PlannedFile::new(
                template,
                join_path(&model_folder, &name),
                PlannedKind::Model,
            ));
        }
    }

    let api_folder = config.api_file_folder();
    for group in &groups {
        for (template, suffix) in &config.api_template_files {
            let name = format!("{}{}", config.api_filename(group), suffix);
            files.push(PlannedFile::new(
                template,
                join_path(&api_folder, &name),
                PlannedKind::Api,
            ));
        }
    }

    for supporting in &config.supporting_files {
        let folder = join_path(&config.output_dir, &supporting.folder);
        files.push(PlannedFile::new(
            &supporting.template_file,
            join_path(&folder, &supporting.destination_filename),
            PlannedKind::SupportingFile,
        ));
    }

    for definition in user_templates {
        let folder = join_path(&config.output_dir, &package_to_path(&definition.folder));
        let kind = definition.template_type;
        let destinations: Vec<String> = if kind.is_per_model() {
            models
                .iter()
                .map(|model| {
                    format!("{}{}", config.model_filename(model), definition.destination_filename)
                })
                .collect()
        } else if kind.is_per_api() {
            groups
                .iter()
                .map(|group| {
                    format!("{}{}", config.api_filename(group), definition.destination_filename)
                })
                .collect()
        } else {
            vec![definition.destination_filename.clone()]
        };
        files.extend(destinations.into_iter().map(|name| {
            PlannedFile::new(
                &definition.template_file,
                join_path(&folder, &name),
                PlannedKind::UserTemplate,
            )
        }));
    }

    files
}

/// Distinct API groups in sorted order
fn api_groups(spec: &SpecDocument) -> BTreeSet<String> {
    spec.operations()
        .iter()
        .map(|op| op.group().to_string())
        .collect()
}
