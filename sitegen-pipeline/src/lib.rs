//! Sitegen Pipeline
//!
//! Turns a prompt into a complete HTML site by chaining model calls.
//!
//! The staged path runs a fixed chain of four stages. Each stage reads only
//! fields produced by earlier stages, makes one model call and contributes
//! exactly one new field:
//!
//! ```text
//! prompt ──> structure ──> content ──> design ──> html
//!    │                                              ▲
//!    └───────────── structure, content, design ─────┘
//! ```
//!
//! The [`Pipeline`] owns the chain and the injected [`ModelClient`]; a run
//! either yields a complete [`SiteArtifact`] or fails on the first stage
//! error, discarding the partial state.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use sitegen_pipeline::{OpenAiClient, OpenAiConfig, Pipeline, PipelineState};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new(OpenAiConfig::new("sk-..."))?;
//! let pipeline = Pipeline::new(Arc::new(client));
//!
//! let site = pipeline
//!     .run(PipelineState::new("landing page for a bakery", "gpt-4o-mini"))
//!     .await?;
//! println!("{}", site.html_code);
//! # Ok(())
//! # }
//! ```

pub mod chain;
mod direct;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod slug;
pub mod stage;
pub mod state;
mod template;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use chain::Chain;
pub use direct::DIRECT_TEMPERATURE;
pub use error::{ChainError, PipelineError, ProviderError};
pub use model::{ModelClient, ModelRequest};
pub use orchestrator::{NoopObserver, Pipeline, StageObserver};
pub use provider::openai::{OpenAiClient, OpenAiConfig};
pub use stage::StageId;
pub use state::{Field, PipelineState, SiteArtifact, StageOutput};
pub use tokio_util::sync::CancellationToken;
