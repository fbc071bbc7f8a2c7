//! Orchestration of the acquire, validate, and emit stages.

use crate::source::SchemaSource;
use crate::stages;
use crate::state::{PipelinePhase, PipelineState};
use sprout_codegen::EmitOptions;
use sprout_validator::ValidatorOptions;

/// Options for a pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub validator: ValidatorOptions,
    pub emit: EmitOptions,
}

/// Runs pipeline instances against one schema source.
///
/// `run` takes `&self`, so a single pipeline may serve concurrent requests;
/// each call owns its own [`PipelineState`].
pub struct Pipeline<S> {
    source: S,
    options: PipelineOptions,
}

impl<S: SchemaSource> Pipeline<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            options: PipelineOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run one instance for `prompt` to a terminal state.
    pub async fn run(&self, prompt: impl Into<String>) -> PipelineState {
        let state = PipelineState::new(prompt);

        let state = stages::acquire(state, &self.source).await;
        if state.phase == PipelinePhase::Failed {
            return state;
        }

        let state = stages::validate(state, &self.options.validator);
        if !state.validated {
            return state;
        }

        let state = stages::emit(state, &self.options.emit);
        tracing::info!(
            phase = ?state.phase,
            messages = state.messages.len(),
            "pipeline finished"
        );
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StaticSource;
    use crate::state::Role;
    use async_trait::async_trait;
    use sprout_core::{AcquisitionError, ValidationErrorKind};
    use sprout_validator::DEFAULT_MAX_DEPTH;

    const SCENARIO_RESPONSE: &str = r#"Here is your screen:
```json
{ "components": [{ "kind": "Container", "properties": {}, "children": [
    { "kind": "Text", "properties": { "style": "title" }, "children": [] }
] }] }
```"#;

    struct FailingSource;

    #[async_trait]
    impl SchemaSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn generate(&self, _instruction: &str) -> Result<String, AcquisitionError> {
            Err(AcquisitionError::Transport {
                reason: "connection reset".to_string(),
            })
        }
    }

    /// Answers with a tree whose button title echoes the request.
    struct EchoSource;

    #[async_trait]
    impl SchemaSource for EchoSource {
        fn name(&self) -> &str {
            "echo"
        }

        async fn generate(&self, instruction: &str) -> Result<String, AcquisitionError> {
            let request = if instruction.contains("login") { "login" } else { "signup" };
            tokio::task::yield_now().await;
            Ok(format!(
                r#"{{"components": [{{"kind": "Button", "properties": {{"title": "{request}"}}}}]}}"#
            ))
        }
    }

    #[tokio::test]
    async fn test_run_scenario_to_done() {
        let pipeline = Pipeline::new(StaticSource::new(SCENARIO_RESPONSE));
        let state = pipeline.run("a title on a blank screen").await;

        assert!(state.succeeded());
        assert!(state.validated);
        assert!(state.errors.is_empty());

        let code = state.code.as_deref().unwrap();
        assert!(code.starts_with("import { Container, Text, StyleSheet } from 'react-native-web';"));
        assert!(code.contains("    <Container>\n      <Text style={styles.title}></Text>\n    </Container>"));

        let ids: Vec<_> = state.messages.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["msg-1", "msg-2", "msg-3", "msg-4"]);
        assert_eq!(state.messages[0].role, Role::User);
        assert_eq!(state.messages[2].content, "Schema validation passed");
        assert_eq!(state.messages[3].content, format!("```tsx\n{code}\n```"));
    }

    #[tokio::test]
    async fn test_prose_without_json_stops_before_validation() {
        let pipeline = Pipeline::new(StaticSource::new("I would rather describe it in words."));
        let state = pipeline.run("a login screen").await;

        assert_eq!(state.phase, PipelinePhase::Failed);
        assert!(state.raw_tree.is_none());
        assert!(state.validation_error.is_none());
        assert!(!state.validated);
        assert!(state.code.is_none());
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.messages.len(), 2);
        assert!(state.messages[1].content.starts_with("Schema generation failed"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let pipeline = Pipeline::new(FailingSource);
        let state = pipeline.run("anything").await;

        assert_eq!(state.phase, PipelinePhase::Failed);
        assert_eq!(state.errors, vec!["Transport failure: connection reset"]);
    }

    #[tokio::test]
    async fn test_empty_tree_never_emits() {
        let pipeline = Pipeline::new(StaticSource::new("{\"components\": []}"));
        let state = pipeline.run("nothing at all").await;

        assert_eq!(state.phase, PipelinePhase::Failed);
        assert_eq!(
            state.validation_error.map(|e| e.kind),
            Some(ValidationErrorKind::EmptyTree)
        );
        assert!(state.code.is_none());
        assert_eq!(state.messages.len(), 3);
    }

    #[tokio::test]
    async fn test_options_reach_stages() {
        let options = PipelineOptions {
            validator: ValidatorOptions { max_depth: 1 },
            emit: EmitOptions::default(),
        };
        let pipeline = Pipeline::new(StaticSource::new(SCENARIO_RESPONSE)).with_options(options);
        let state = pipeline.run("too deep").await;

        assert_eq!(state.phase, PipelinePhase::Failed);
        assert_eq!(
            state.validation_error.map(|e| e.kind),
            Some(ValidationErrorKind::MalformedInput)
        );
    }

    #[tokio::test]
    async fn test_deep_tree_fails_validation_not_acquisition() {
        let mut node = r#"{"kind": "Text"}"#.to_string();
        for _ in 0..39 {
            node = format!(r#"{{"kind": "Container", "children": [{node}]}}"#);
        }
        let response = format!(r#"{{"components": [{node}]}}"#);

        let pipeline = Pipeline::new(StaticSource::new(response));
        let state = pipeline.run("deep").await;

        assert_eq!(state.phase, PipelinePhase::Failed);
        assert!(state.raw_tree.is_some());
        let error = state.validation_error.unwrap();
        assert_eq!(error.kind, ValidationErrorKind::MalformedInput);
        assert_eq!(
            error.path,
            format!("components[0]{}", ".children[0]".repeat(DEFAULT_MAX_DEPTH))
        );
    }

    #[tokio::test]
    async fn test_concurrent_instances_are_isolated() {
        let pipeline = Pipeline::new(EchoSource);
        let (login, signup) = tokio::join!(pipeline.run("a login form"), pipeline.run("a signup form"));

        assert!(login.succeeded() && signup.succeeded());
        assert_eq!(login.prompt, "a login form");
        assert!(login.code.unwrap().contains(r#"title={"login"}"#));
        assert!(signup.code.unwrap().contains(r#"title={"signup"}"#));
        assert_eq!(login.messages.len(), 4);
        assert_eq!(signup.messages.len(), 4);
    }
}
