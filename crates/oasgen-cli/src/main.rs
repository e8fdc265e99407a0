//! oasgen CLI entrypoint
//! Parses command-line arguments and dispatches to the core configurator.

// Internal imports (std, crate)
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::{Args, Parser};
use oasgen_core::generator::TypescriptExpressServerGenerator;
use oasgen_core::{
    parse_auth, CodegenConfigurator, ConfigFile, Error, GeneratorRegistry, GlobalSettings,
    SpecLoader,
};
use tokio::fs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "oasgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    fn is_verbose(&self) -> bool {
        matches!(&self.command, Commands::Generate(args) if args.verbose)
    }
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Validate a spec and assemble a generation request for it
    Generate(GenerateArgs),
    /// Validate a spec and report errors and warnings
    Validate {
        /// Path or URL of the OpenAPI specification
        #[arg(short, long)]
        input_spec: String,
        /// Credentials for remote specs, as comma separated name:value pairs
        #[arg(short, long)]
        auth: Option<String>,
    },
    /// List available generators
    List,
}

#[derive(Args, Debug, Default)]
pub struct GenerateArgs {
    /// Generator to use
    #[arg(short, long)]
    generator_name: Option<String>,
    /// Path or URL of the OpenAPI specification
    ///
    /// Example: -i petstore.yaml
    /// Example: -i https://example.com/openapi.json
    #[arg(short, long)]
    input_spec: Option<String>,
    /// Output directory (defaults to the generator's output folder)
    #[arg(short, long)]
    output: Option<String>,
    /// Directory with templates overriding the built-in ones
    #[arg(short, long)]
    template_dir: Option<String>,
    /// Templating engine (mustache or handlebars)
    #[arg(short, long)]
    engine: Option<String>,
    /// Library variant of the generator
    #[arg(long)]
    library: Option<String>,
    /// Credentials for remote specs, as comma separated name:value pairs
    #[arg(short, long)]
    auth: Option<String>,
    /// YAML, JSON or TOML config file; command-line options take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    ignore_file_override: Option<String>,
    #[arg(long)]
    api_package: Option<String>,
    #[arg(long)]
    model_package: Option<String>,
    #[arg(long)]
    package_name: Option<String>,
    #[arg(long)]
    model_name_prefix: Option<String>,
    #[arg(long)]
    model_name_suffix: Option<String>,
    #[arg(long)]
    api_name_suffix: Option<String>,

    /// Keep existing files in the output directory
    #[arg(short, long)]
    skip_overwrite: bool,
    /// Continue even when the spec has issues
    #[arg(long)]
    skip_validate_spec: bool,
    #[arg(long)]
    strict_spec: Option<bool>,
    /// Log extra detail and switch on the generator debug flags
    #[arg(short, long)]
    verbose: bool,
    #[arg(long)]
    minimal_update: bool,
    #[arg(long)]
    enable_post_process_file: bool,
    #[arg(long)]
    remove_operation_id_prefix: bool,
    #[arg(long)]
    skip_operation_example: bool,
    #[arg(long)]
    generate_alias_as_model: bool,

    /// key=value pairs, comma separated or repeated
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    type_mappings: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    import_mappings: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    schema_mappings: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    instantiation_types: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    inline_schema_name_mappings: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    inline_schema_name_defaults: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    reserved_words_mappings: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    additional_properties: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    server_variables: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',', value_parser = parse_key_val)]
    global_property: Vec<(String, String)>,
    #[arg(long, value_delimiter = ',')]
    language_specific_primitives: Vec<String>,

    /// Write the planned files as JSON instead of printing them
    #[arg(long)]
    plan_json: Option<PathBuf>,
}

impl GenerateArgs {
    /// Copy every option given on the command line onto `configurator`
    fn apply(&self, configurator: &mut CodegenConfigurator) {
        if let Some(value) = &self.generator_name {
            configurator.set_generator_name(value);
        }
        if let Some(value) = &self.input_spec {
            configurator.set_input_spec(value);
        }
        if let Some(value) = &self.output {
            configurator.set_output_dir(value);
        }
        if let Some(value) = &self.template_dir {
            configurator.set_template_dir(value);
        }
        if let Some(value) = &self.engine {
            configurator.set_templating_engine_name(value);
        }
        if let Some(value) = &self.library {
            configurator.set_library(value);
        }
        if let Some(value) = &self.auth {
            configurator.set_auth(value);
        }
        if let Some(value) = &self.ignore_file_override {
            configurator.set_ignore_file_override(value);
        }
        if let Some(value) = &self.api_package {
            configurator.set_api_package(value);
        }
        if let Some(value) = &self.model_package {
            configurator.set_model_package(value);
        }
        if let Some(value) = &self.package_name {
            configurator.set_package_name(value);
        }
        if let Some(value) = &self.model_name_prefix {
            configurator.set_model_name_prefix(value);
        }
        if let Some(value) = &self.model_name_suffix {
            configurator.set_model_name_suffix(value);
        }
        if let Some(value) = &self.api_name_suffix {
            configurator.set_api_name_suffix(value);
        }

        if self.skip_overwrite {
            configurator.set_skip_overwrite(true);
        }
        if self.skip_validate_spec {
            configurator.set_validate_spec(false);
        }
        if let Some(strict) = self.strict_spec {
            configurator.set_strict_spec_behavior(strict);
        }
        if self.verbose {
            configurator.set_verbose(true);
        }
        if self.minimal_update {
            configurator.set_enable_minimal_update(true);
        }
        if self.enable_post_process_file {
            configurator.set_enable_post_process_file(true);
        }
        if self.remove_operation_id_prefix {
            configurator.set_remove_operation_id_prefix(true);
        }
        if self.skip_operation_example {
            configurator.set_skip_operation_example(true);
        }
        if self.generate_alias_as_model {
            configurator.set_generate_alias_as_model(true);
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
        for (key, value) in &self.instantiation_types {
            configurator.add_instantiation_type(key, value);
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
        for (key, value) in &self.additional_properties {
            configurator.add_additional_property(key, value.as_str());
        }
        for (key, value) in &self.server_variables {
            configurator.add_server_variable(key, value);
        }
        for (key, value) in &self.global_property {
            configurator.add_global_property(key, value);
        }
        for primitive in &self.language_specific_primitives {
            configurator.add_language_specific_primitive(primitive);
        }
    }
}

/// Parse a single `key=value` pair
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: no `=` found in `{s}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid key=value pair: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.is_verbose() { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Generate(args) => generate(&args).await,
        Commands::Validate { input_spec, auth } => validate(&input_spec, auth.as_deref()).await,
        Commands::List => {
            list();
            Ok(())
        }
    }
}

async fn generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut configurator = CodegenConfigurator::new();
    configurator.set_generator_name(TypescriptExpressServerGenerator::NAME);
    if let Some(path) = &args.config {
        ConfigFile::from_file(path)
            .await
            .with_context(|| format!("Failed to load config file {}", path.display()))?
            .apply(&mut configurator);
    }
    args.apply(&mut configurator);

    let mut globals = GlobalSettings::new();
    let request = match configurator.to_generation_request(&mut globals).await {
        Ok(request) => request,
        Err(e) => {
            print_validation_issues(&e);
            return Err(e).context("Failed to assemble generation request");
        }
    };

    tracing::debug!(
        "Assembled request for {} with {} global properties",
        request.config.generator_name(),
        request.global_settings.properties().len()
    );

    let files = request.planned_files();
    match &args.plan_json {
        Some(path) => write_plan(path, &files).await?,
        None => {
            println!(
                "{} -> {} ({} files)",
                request.config.generator_name(),
                request.config.output_dir,
                files.len()
            );
            for file in &files {
                println!("  {} -> {}", file.template, file.destination);
            }
        }
    }
    Ok(())
}

async fn write_plan(path: &Path, files: &[oasgen_core::PlannedFile]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(files)?;
    fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write plan to {}", path.display()))?;
    tracing::info!("Wrote {} planned files to {}", files.len(), path.display());
    Ok(())
}

async fn validate(input_spec: &str, auth: Option<&str>) -> anyhow::Result<()> {
    let result = SpecLoader::new()
        .read_location(input_spec, &parse_auth(auth))
        .await;

    if result.is_valid() {
        println!("No validation issues detected in {}", input_spec);
        for warning in result.warnings() {
            println!("[warning] {}", warning);
        }
        return Ok(());
    }

    let err = Error::spec_validation(result.messages.clone(), result.warnings());
    print_validation_issues(&err);
    Err(err).with_context(|| format!("Validation failed for {}", input_spec))
}

/// Print errors and warnings of a validation failure as separate sections
fn print_validation_issues(err: &Error) {
    let (Some(errors), Some(warnings)) = (err.validation_errors(), err.validation_warnings())
    else {
        return;
    };
    eprintln!("Errors:");
    for error in errors {
        eprintln!("\t-{}", error);
    }
    if !warnings.is_empty() {
        eprintln!("Warnings:");
        for warning in warnings {
            eprintln!("\t-{}", warning);
        }
    }
}

fn list() {
    let registry = GeneratorRegistry::with_builtins();
    println!("Available generators:");
    for generator in registry.generators() {
        println!(
            "  {} ({}): {}",
            generator.name(),
            generator.generator_type(),
            generator.help()
        );
    }
}
