//! Generator and workflow settings.
//!
//! Both settings types are built in two phases: values accumulate in a
//! mutable builder, and `build()` produces an immutable snapshot with getters
//! only.

pub mod generator;
pub mod workflow;

pub use generator::{GeneratorSettings, GeneratorSettingsBuilder};
pub use workflow::{WorkflowSettings, WorkflowSettingsBuilder};
