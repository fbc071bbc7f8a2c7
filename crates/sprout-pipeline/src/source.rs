//! Schema sources: the external text-generation step.

use async_trait::async_trait;
use sprout_core::AcquisitionError;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A service that answers an instruction with text containing a candidate tree.
///
/// Called at most once per pipeline instance and never retried.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produce the raw response for `instruction`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service cannot be reached or refuses the call.
    async fn generate(&self, instruction: &str) -> Result<String, AcquisitionError>;
}

#[async_trait]
impl<T: SchemaSource + ?Sized> SchemaSource for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn generate(&self, instruction: &str) -> Result<String, AcquisitionError> {
        (**self).generate(instruction).await
    }
}

/// A source that always answers with the same recorded response.
#[derive(Debug, Clone)]
pub struct StaticSource {
    response: String,
}

impl StaticSource {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl SchemaSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn generate(&self, _instruction: &str) -> Result<String, AcquisitionError> {
        Ok(self.response.clone())
    }
}

/// A source backed by an external program.
///
/// The instruction is written to the program's stdin and its stdout is the
/// response. The child is killed if the pipeline instance is dropped.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    credential_env: Option<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            credential_env: None,
        }
    }

    /// Set the program arguments.
    #[must_use]
    pub fn with_args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Require a non-empty environment variable (such as an API key) before
    /// spawning. The child inherits it.
    #[must_use]
    pub fn with_credential_env(mut self, name: impl Into<String>) -> Self {
        self.credential_env = Some(name.into());
        self
    }

    fn check_credential(&self) -> Result<(), AcquisitionError> {
        match &self.credential_env {
            Some(name) if std::env::var_os(name).map_or(true, |value| value.is_empty()) => {
                Err(AcquisitionError::MissingCredential { name: name.clone() })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl SchemaSource for CommandSource {
    fn name(&self) -> &str {
        &self.program
    }

    async fn generate(&self, instruction: &str) -> Result<String, AcquisitionError> {
        self.check_credential()?;

        let transport = |reason: String| AcquisitionError::Transport { reason };

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| transport(format!("failed to spawn {}: {e}", self.program)))?;

        // Stdin is fed while stdout and stderr drain, and closed once written.
        let stdin = child.stdin.take();
        let feed = async move {
            match stdin {
                Some(mut stdin) => stdin.write_all(instruction.as_bytes()).await,
                None => Ok(()),
            }
        };
        let (written, output) = tokio::join!(feed, child.wait_with_output());

        let output = output.map_err(|e| transport(format!("failed to read response: {e}")))?;
        match written {
            // The program is free to ignore its input.
            Err(e) if e.kind() != ErrorKind::BrokenPipe => {
                return Err(transport(format!("failed to write instruction: {e}")));
            }
            _ => {}
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(transport(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| transport(format!("response is not valid UTF-8: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticSource::new("{\"components\": []}");
        assert_eq!(source.generate("ignored").await.unwrap(), "{\"components\": []}");
    }

    #[tokio::test]
    async fn test_boxed_source() {
        let source: Box<dyn SchemaSource> = Box::new(StaticSource::new("ok"));
        assert_eq!(source.name(), "static");
        assert_eq!(source.generate("x").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let source = CommandSource::new("sh").with_credential_env("SPROUT_TEST_UNSET_CREDENTIAL");
        let err = source.generate("x").await.unwrap_err();
        assert!(matches!(
            err,
            AcquisitionError::MissingCredential { ref name } if name == "SPROUT_TEST_UNSET_CREDENTIAL"
        ));
    }

    #[tokio::test]
    async fn test_spawn_failure() {
        let source = CommandSource::new("sprout-test-no-such-program");
        let err = source.generate("x").await.unwrap_err();
        assert!(matches!(err, AcquisitionError::Transport { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_reads_instruction_and_answers() {
        let source = CommandSource::new("sh").with_args([
            "-c",
            "read first; printf '{\"echo\": \"%s\"}' \"$first\"",
        ]);
        let response = source.generate("hello\nworld").await.unwrap();
        assert_eq!(response, "{\"echo\": \"hello\"}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_large_instruction_does_not_block() {
        let instruction = "x".repeat(512 * 1024);
        let source = CommandSource::new("cat");
        let response = tokio::time::timeout(Duration::from_secs(10), source.generate(&instruction))
            .await
            .expect("cat should echo the whole instruction")
            .unwrap();
        assert_eq!(response.len(), instruction.len());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_command_nonzero_exit() {
        let source = CommandSource::new("sh").with_args(["-c", "echo quota exceeded >&2; exit 3"]);
        let err = source.generate("x").await.unwrap_err();
        match err {
            AcquisitionError::Transport { reason } => assert!(reason.contains("quota exceeded")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
