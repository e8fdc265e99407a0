//! oasgen Core Library
//!
//! Loads and validates OpenAPI specifications and assembles configured
//! generation requests for an external templating engine.

pub mod auth;
pub mod config;
pub mod configurator;
pub mod error;
pub mod generator;
pub mod global;
pub mod openapi;
pub mod settings;
pub mod templating;
pub mod utils;

pub use crate::{
    auth::{parse_auth, AuthPlacement, AuthorizationValue},
    config::ConfigFile,
    configurator::{CodegenConfigurator, Context, GenerationRequest, ValidationReport},
    error::{Error, Result},
    generator::{CodeGenerator, GeneratorConfig, GeneratorRegistry, PlannedFile},
    global::{DebugFlag, GlobalSettings},
    openapi::{SpecDocument, SpecLoader, SpecParseResult},
    settings::{GeneratorSettings, WorkflowSettings},
    templating::TemplatingEngine,
};
