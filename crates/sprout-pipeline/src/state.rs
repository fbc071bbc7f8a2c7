//! The record threaded through a pipeline instance.

use serde::Serialize;
use serde_json::Value;
use sprout_core::{ComponentTree, ValidationError};

/// Where a pipeline instance currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PipelinePhase {
    Acquiring,
    Validating,
    Emitting,
    Done,
    Failed,
}

impl PipelinePhase {
    /// Whether no further stage will run.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Author of a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A user-visible message describing pipeline progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptEntry {
    pub id: String,
    pub role: Role,
    pub content: String,
}

/// State of one pipeline instance.
///
/// Created once per request; every stage consumes it and returns the next one.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineState {
    /// The originating request text.
    pub prompt: String,
    pub phase: PipelinePhase,
    /// Candidate tree extracted from the acquisition response.
    pub raw_tree: Option<Value>,
    pub validated: bool,
    pub tree: Option<ComponentTree>,
    /// The structured failure of the validation stage, if it failed.
    pub validation_error: Option<ValidationError>,
    pub code: Option<String>,
    /// Diagnostics accumulated by failed stages.
    pub errors: Vec<String>,
    /// Transcript for the transport layer; append-only.
    pub messages: Vec<TranscriptEntry>,
}

impl PipelineState {
    /// Start a new instance for `prompt`. The transcript opens with the
    /// user's request.
    pub fn new(prompt: impl Into<String>) -> Self {
        let prompt = prompt.into();
        let state = Self {
            prompt: prompt.clone(),
            phase: PipelinePhase::Acquiring,
            raw_tree: None,
            validated: false,
            tree: None,
            validation_error: None,
            code: None,
            errors: Vec::new(),
            messages: Vec::new(),
        };
        state.record(Role::User, prompt)
    }

    /// Whether the instance finished with emitted code.
    pub fn succeeded(&self) -> bool {
        self.phase == PipelinePhase::Done && self.code.is_some()
    }

    /// Append a transcript entry. Ids are sequential within the instance.
    pub(crate) fn record(mut self, role: Role, content: impl Into<String>) -> Self {
        let id = format!("msg-{}", self.messages.len() + 1);
        self.messages.push(TranscriptEntry {
            id,
            role,
            content: content.into(),
        });
        self
    }

    /// Terminate in `Failed` with one diagnostic and one transcript entry.
    pub(crate) fn fail(mut self, diagnostic: impl Into<String>, message: impl Into<String>) -> Self {
        self.errors.push(diagnostic.into());
        self.phase = PipelinePhase::Failed;
        self.record(Role::Assistant, message)
    }
}
