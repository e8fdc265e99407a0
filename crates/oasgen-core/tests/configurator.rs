//! End-to-end tests for assembling generation requests

use std::path::PathBuf;

use oasgen_core::generator::{PlannedKind, TEMPLATE_DIR};
use oasgen_core::global::{DebugFlag, GENERATE_ALIAS_AS_MODEL, VERBOSE};
use oasgen_core::{
    CodeGenerator, CodegenConfigurator, Error, GeneratorRegistry, GlobalSettings, Result,
};

const GENERATOR: &str = "typescript-express-server";

fn fixture(name: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
        .to_string_lossy()
        .into_owned()
}

fn configurator_for(spec: &str) -> CodegenConfigurator {
    let mut configurator = CodegenConfigurator::new();
    configurator
        .set_generator_name(GENERATOR)
        .set_input_spec(fixture(spec));
    configurator
}

#[tokio::test]
async fn test_blank_generator_name_is_config_error() {
    let mut configurator = CodegenConfigurator::new();
    configurator
        .set_generator_name("")
        .set_input_spec("/nowhere/openapi.yaml");
    let mut globals = GlobalSettings::new();

    let err = configurator
        .to_generation_request(&mut globals)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(globals.properties().is_empty());
}

#[tokio::test]
async fn test_blank_input_spec_is_config_error() {
    let mut configurator = CodegenConfigurator::new();
    configurator.set_generator_name(GENERATOR).set_input_spec("   ");
    let mut globals = GlobalSettings::new();

    let err = configurator.to_context(&mut globals).await.unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(globals.properties().is_empty());
}

#[tokio::test]
async fn test_unknown_generator_is_config_error() {
    let mut configurator = configurator_for("openapi/petstore.yaml");
    configurator.set_generator_name("cobol-client");

    let err = configurator
        .to_context(&mut GlobalSettings::new())
        .await
        .unwrap_err();
    assert!(err.is_config());
    assert!(err.to_string().contains(GENERATOR));
}

#[tokio::test]
async fn test_valid_spec_produces_request() -> Result<()> {
    let mut configurator = configurator_for("openapi/petstore.yaml");
    configurator.set_output_dir("out");
    let mut globals = GlobalSettings::new();

    let request = configurator.to_generation_request(&mut globals).await?;
    assert!(request.validation.is_clean());
    assert_eq!(request.spec.title(), Some("Swagger Petstore"));
    assert_eq!(request.config.generator_name(), GENERATOR);
    assert_eq!(request.config.input_spec, fixture("openapi/petstore.yaml"));
    assert_eq!(request.config.output_dir, "out");
    assert!(request.config.strict_spec_behavior);
    assert!(!request.config.additional_properties.contains_key(TEMPLATE_DIR));

    let files = request.planned_files();
    let destinations = |kind: PlannedKind| {
        files
            .iter()
            .filter(|f| f.kind == kind)
            .map(|f| f.destination.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(
        destinations(PlannedKind::Model),
        vec![
            "out/Models/Error.zz",
            "out/Models/NewPet.zz",
            "out/Models/Pet.zz"
        ]
    );
    assert_eq!(
        destinations(PlannedKind::Api),
        vec![
            "out/Apis/DefaultApi.zz",
            "out/Apis/PetsApi.zz",
            "out/Apis/StoreApi.zz"
        ]
    );
    assert_eq!(destinations(PlannedKind::SupportingFile), vec!["out/README.md"]);
    Ok(())
}

#[tokio::test]
async fn test_output_dir_defaults_to_generator_folder() -> Result<()> {
    let request = configurator_for("openapi/petstore.yaml")
        .to_generation_request(&mut GlobalSettings::new())
        .await?;
    assert_eq!(
        request.config.output_dir,
        "generated-code/typescript-express-server"
    );
    Ok(())
}

#[tokio::test]
async fn test_broken_reference_fails_validation() {
    let err = configurator_for("openapi/broken_ref.yaml")
        .to_generation_request(&mut GlobalSettings::new())
        .await
        .unwrap_err();

    let errors = err.validation_errors().expect("validation failure");
    assert!(errors
        .iter()
        .any(|e| e.contains("Could not resolve reference: #/components/schemas/Missing")));
    let warnings = err.validation_warnings().expect("validation failure");
    assert!(warnings.contains("Unused model: Orphan"));
    assert!(err.to_string().contains("--skip-validate-spec"));
}

#[tokio::test]
async fn test_disabled_validation_continues_with_warning() -> Result<()> {
    let mut configurator = configurator_for("openapi/broken_ref.yaml");
    configurator.set_validate_spec(false);

    let request = configurator
        .to_generation_request(&mut GlobalSettings::new())
        .await?;
    assert!(!request.validation.is_clean());

    let message = request.validation.disabled_validation_message();
    assert!(message
        .starts_with("There were issues with the specification, but validation has been explicitly disabled."));
    assert!(message.contains("\t-Could not resolve reference: #/components/schemas/Missing"));
    assert!(message.contains("Warnings: \n\t-Unused model: Orphan"));
    Ok(())
}

#[tokio::test]
async fn test_unreadable_input() {
    let mut configurator = CodegenConfigurator::new();
    configurator
        .set_generator_name(GENERATOR)
        .set_input_spec(fixture("openapi/does_not_exist.yaml"));

    let err = configurator
        .to_context(&mut GlobalSettings::new())
        .await
        .unwrap_err();
    let errors = err.validation_errors().expect("validation failure");
    assert!(errors.iter().any(|e| e.starts_with("Unable to read location")));

    configurator.set_validate_spec(false);
    let context = configurator.to_context(&mut GlobalSettings::new()).await;
    assert!(context.as_ref().is_ok_and(|c| c.spec.is_none()));

    let err = configurator
        .to_generation_request(&mut GlobalSettings::new())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::OpenApi(_)));
}

#[tokio::test]
async fn test_caller_mappings_win() -> Result<()> {
    let mut configurator = configurator_for("openapi/petstore.yaml");
    configurator
        .add_type_mapping("DateTime", "string")
        .add_instantiation_type("map", "Map")
        .add_import_mapping("Decimal", "decimal.js")
        .add_language_specific_primitive("bigint")
        .add_reserved_words_mapping("delete", "remove")
        .add_additional_property("supportsES6", true);

    let request = configurator
        .to_generation_request(&mut GlobalSettings::new())
        .await?;
    let config = &request.config;
    assert_eq!(config.type_mapping["DateTime"], "string");
    assert_eq!(config.type_mapping["integer"], "number");
    assert_eq!(config.instantiation_types["map"], "Map");
    assert_eq!(config.instantiation_types["array"], "Array");
    assert_eq!(config.import_mapping["Decimal"], "decimal.js");
    assert!(config.language_specific_primitives.contains("bigint"));
    assert!(config.language_specific_primitives.contains("string"));
    assert!(!config.is_reserved_word("delete"));
    assert_eq!(config.additional_properties["supportsES6"], true);
    Ok(())
}

#[tokio::test]
async fn test_workflow_flags_reach_generator() -> Result<()> {
    let mut configurator = configurator_for("openapi/petstore.yaml");
    configurator
        .set_skip_overwrite(true)
        .set_strict_spec_behavior(false)
        .set_remove_operation_id_prefix(true)
        .set_skip_operation_example(true)
        .set_enable_post_process_file(true)
        .set_enable_minimal_update(true)
        .set_ignore_file_override(".oasgen-ignore")
        .set_template_dir("templates/custom")
        .set_server_variables([("region".to_string(), "eu".to_string())].into());

    let request = configurator
        .to_generation_request(&mut GlobalSettings::new())
        .await?;
    let config = &request.config;
    assert!(config.skip_overwrite);
    assert!(!config.strict_spec_behavior);
    assert!(config.remove_operation_id_prefix);
    assert!(config.skip_operation_example);
    assert!(config.enable_post_process_file);
    assert!(config.enable_minimal_update);
    assert_eq!(config.ignore_file_override.as_deref(), Some(".oasgen-ignore"));
    assert_eq!(config.template_dir, "templates/custom");
    assert_eq!(config.additional_properties[TEMPLATE_DIR], "templates/custom");
    assert_eq!(config.server_variable_overrides["region"], "eu");
    Ok(())
}

#[tokio::test]
async fn test_verbose_sets_debug_flags() -> Result<()> {
    let mut configurator = configurator_for("openapi/petstore.yaml");
    configurator.set_verbose(true).set_generate_alias_as_model(true);
    let mut globals = GlobalSettings::new();

    let request = configurator.to_generation_request(&mut globals).await?;
    assert!(globals.is_verbose());
    for flag in DebugFlag::all() {
        assert_eq!(globals.property(flag.key()), Some(""));
    }
    assert_eq!(globals.property(GENERATE_ALIAS_AS_MODEL), Some("true"));
    assert_eq!(request.global_settings, globals);
    Ok(())
}

#[tokio::test]
async fn test_non_verbose_run_keeps_earlier_debug_flags() -> Result<()> {
    let mut globals = GlobalSettings::new();

    let mut verbose = configurator_for("openapi/petstore.yaml");
    verbose.set_verbose(true);
    verbose.to_context(&mut globals).await?;

    let quiet = configurator_for("openapi/petstore.yaml");
    quiet.to_context(&mut globals).await?;
    assert_eq!(globals.property(VERBOSE), Some("false"));
    assert_eq!(globals.enabled_debug_flags().len(), 4);

    let mut fresh = GlobalSettings::new();
    quiet.to_context(&mut fresh).await?;
    assert_eq!(fresh.property(VERBOSE), Some("false"));
    assert_eq!(fresh.property(GENERATE_ALIAS_AS_MODEL), Some("false"));
    assert!(fresh.enabled_debug_flags().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_global_property_overrides() -> Result<()> {
    let mut configurator = configurator_for("openapi/petstore.yaml");
    configurator
        .add_global_property(VERBOSE, "true")
        .add_global_property("models", "Pet");
    let mut globals = GlobalSettings::new();

    configurator.to_context(&mut globals).await?;
    assert_eq!(globals.property(VERBOSE), Some("true"));
    assert_eq!(globals.property("models"), Some("Pet"));
    assert!(globals.enabled_debug_flags().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_config_file_with_cli_overrides() -> Result<()> {
    let mut configurator = CodegenConfigurator::from_file(fixture("oasgen.yaml")).await?;
    configurator.set_input_spec(fixture("openapi/petstore.yaml"));
    let mut globals = GlobalSettings::new();

    let request = configurator.to_generation_request(&mut globals).await?;
    let config = &request.config;
    assert_eq!(config.output_dir, "generated/petstore");
    assert_eq!(config.type_mapping["DateTime"], "string");
    assert!(config.language_specific_primitives.contains("Blob"));
    assert_eq!(config.additional_properties["npmName"], "petstore-server");
    assert_eq!(config.additional_properties["modelNameSuffix"], "Dto");
    assert_eq!(config.server_variable_overrides["region"], "eu");
    assert_eq!(globals.property("models"), Some("Pet"));

    let files = request.planned_files();
    assert!(files
        .iter()
        .any(|f| f.destination == "generated/petstore/Models/PetDto.zz"));
    assert!(files.iter().any(|f| f.kind == PlannedKind::UserTemplate
        && f.destination == "generated/petstore/package.json"));
    Ok(())
}

#[derive(Debug)]
struct SchemaDump;

impl CodeGenerator for SchemaDump {
    fn name(&self) -> &'static str {
        "schema-dump"
    }

    fn help(&self) -> &'static str {
        "Writes one JSON file per schema."
    }

    fn generator_type(&self) -> oasgen_core::generator::GeneratorType {
        oasgen_core::generator::GeneratorType::Schema
    }

    fn output_folder(&self) -> String {
        "schemas".to_string()
    }

    fn embedded_template_dir(&self) -> &'static str {
        "schema-dump"
    }

    fn default_templating_engine(&self) -> oasgen_core::TemplatingEngine {
        oasgen_core::TemplatingEngine::Handlebars
    }

    fn model_template_files(&self) -> std::collections::BTreeMap<String, String> {
        [("schema.hbs".to_string(), ".json".to_string())].into()
    }
}

fn schema_dump() -> Box<dyn CodeGenerator> {
    Box::new(SchemaDump)
}

#[tokio::test]
async fn test_custom_registry() -> Result<()> {
    let mut registry = GeneratorRegistry::new();
    registry.register("schema-dump", schema_dump);

    let mut configurator = CodegenConfigurator::new().with_registry(registry);
    configurator
        .set_generator_name("schema-dump")
        .set_input_spec(fixture("openapi/petstore.yaml"));

    let request = configurator
        .to_generation_request(&mut GlobalSettings::new())
        .await?;
    assert_eq!(
        request.config.templating_engine,
        oasgen_core::TemplatingEngine::Handlebars
    );
    let destinations: Vec<_> = request
        .planned_files()
        .into_iter()
        .map(|f| f.destination)
        .collect();
    assert_eq!(
        destinations,
        vec!["schemas/Error.json", "schemas/NewPet.json", "schemas/Pet.json"]
    );
    Ok(())
}
