//! Individual pipeline stages.
//!
//! Each stage consumes the state and returns its successor with exactly one
//! transcript entry appended. Stages never return errors; failures move the
//! state to [`PipelinePhase::Failed`].

use crate::extract::extract_json;
use crate::prompt::build_instruction;
use crate::source::SchemaSource;
use crate::state::{PipelinePhase, PipelineState, Role};
use sprout_codegen::{emit_with_options, EmitOptions};
use sprout_validator::{validate_with_options, ValidatorOptions};

/// Ask `source` for a candidate tree and extract its JSON payload.
pub async fn acquire<S>(state: PipelineState, source: &S) -> PipelineState
where
    S: SchemaSource + ?Sized,
{
    let instruction = build_instruction(&state.prompt);
    tracing::debug!(source = source.name(), "requesting candidate tree");

    let result = match source.generate(&instruction).await {
        Ok(response) => extract_json(&response),
        Err(e) => Err(e),
    };

    match result {
        Ok(raw) => {
            let json = raw.to_string();
            PipelineState {
                raw_tree: Some(raw),
                phase: PipelinePhase::Validating,
                ..state
            }
            .record(Role::Assistant, format!("Generated schema: {json}"))
        }
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "acquisition failed");
            state.fail(e.to_string(), format!("Schema generation failed: {e}"))
        }
    }
}

/// Validate the acquired candidate tree.
pub fn validate(state: PipelineState, options: &ValidatorOptions) -> PipelineState {
    let result = match state.raw_tree.as_ref() {
        Some(raw) => validate_with_options(raw, options),
        None => {
            return state.fail(
                "No schema to validate",
                "Validation failed: no schema to validate",
            )
        }
    };

    match result {
        Ok(tree) => {
            tracing::debug!(nodes = tree.node_count(), "candidate tree is valid");
            PipelineState {
                validated: true,
                tree: Some(tree),
                phase: PipelinePhase::Emitting,
                ..state
            }
            .record(Role::Assistant, "Schema validation passed")
        }
        Err(e) => {
            tracing::warn!(kind = %e.kind, path = %e.path, "validation failed");
            let message = format!("Validation failed: {e}");
            PipelineState {
                validation_error: Some(e.clone()),
                ..state
            }
            .fail(e.to_string(), message)
        }
    }
}

/// Emit the screen module for a validated state.
pub fn emit(state: PipelineState, options: &EmitOptions) -> PipelineState {
    let module = match (state.validated, state.tree.as_ref()) {
        (true, Some(tree)) => emit_with_options(tree, options),
        _ => {
            return state.fail(
                "Cannot generate code without valid schema",
                "Code generation skipped: no valid schema",
            )
        }
    };

    let content = format!("```tsx\n{}\n```", module.code);
    PipelineState {
        code: Some(module.code),
        phase: PipelinePhase::Done,
        ..state
    }
    .record(Role::Assistant, content)
}
