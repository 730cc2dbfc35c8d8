//! External command execution.
//!
//! The engine only needs "run this command in this directory and tell me
//! whether it worked". `CommandRunner` is that seam; `ProcessRunner` is the
//! real implementation on top of `tokio::process`.

use crate::domain::CommandLine;
use crate::error::{InvokeError, InvokeResult};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

/// What happens to the child's stdout/stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Pass output through to the user's terminal
    Inherit,
    /// Throw output away
    Discard,
}

impl OutputMode {
    fn stdio(self) -> Stdio {
        match self {
            Self::Inherit => Stdio::inherit(),
            Self::Discard => Stdio::null(),
        }
    }
}

/// Runs one external command to completion
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `command`, returning an error if it cannot start or exits unsuccessfully
    async fn run(&self, command: &CommandLine, output: OutputMode) -> InvokeResult<()>;
}

/// Spawns real processes
#[derive(Debug, Default, Clone)]
pub struct ProcessRunner;

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, command: &CommandLine, output: OutputMode) -> InvokeResult<()> {
        tracing::debug!("Running {}", command);

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(&command.dir)
            .stdin(Stdio::null())
            .stdout(output.stdio())
            .stderr(output.stdio())
            .status()
            .await
            .map_err(|e| InvokeError::failed(command.display_command(), e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(InvokeError::failed(
                command.display_command(),
                status.to_string(),
            ))
        }
    }
}
