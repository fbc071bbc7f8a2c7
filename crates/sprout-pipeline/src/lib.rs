//! The Sprout screen pipeline.
//!
//! A pipeline instance runs three stages in strict sequence:
//!
//! 1. **Acquire**: ask a [`SchemaSource`] for a candidate tree and extract the
//!    JSON payload from its response.
//! 2. **Validate**: check the candidate against the component grammar.
//! 3. **Emit**: generate the screen module from the validated tree.
//!
//! Each stage consumes the [`PipelineState`] and returns the next one. Failures
//! are recorded in the state as diagnostics and never escape [`Pipeline::run`].
//! Instances share no mutable state, so any number may run concurrently.

mod extract;
mod pipeline;
mod prompt;
mod source;
pub mod stages;
mod state;

pub use extract::extract_json;
pub use pipeline::{Pipeline, PipelineOptions};
pub use prompt::build_instruction;
pub use source::{CommandSource, SchemaSource, StaticSource};
pub use state::{PipelinePhase, PipelineState, Role, TranscriptEntry};
