//! OpenAPI specification loading and validation

pub mod document;
pub mod loader;
pub mod unused;
pub mod validate;

pub use document::{OpenApiOperation, SpecDocument, SpecVersion};
pub use loader::{SpecLoader, SpecParseResult};
pub use unused::unused_schemas;
