//! Service Module
//!
//! Business logic layer for the server.
//! Services orchestrate between the pipeline and the project store.

pub mod generation;
pub mod project;

// Re-export for convenience
pub use generation::{GenerateError, GenerationOutcome, GenerationService};
pub use project as project_service;
