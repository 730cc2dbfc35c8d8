//! Service invocation: one compose command per service spec or project.

use super::runner::{CommandRunner, OutputMode};
use crate::config::ComposeConfig;
use crate::domain::{CommandLine, ComposeAction, Project, ServiceSpec, Workspace};
use crate::error::{InvokeError, InvokeResult};
use crate::ui::term;
use std::sync::Arc;

/// Settings fixed for the duration of one CLI command
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    /// Print commands instead of running them
    pub dry_run: bool,
    pub compose: ComposeConfig,
}

/// Issues compose invocations against the workspace's projects.
///
/// Cheap to clone; every clone shares the same workspace, runner and context.
#[derive(Clone)]
pub struct ServiceInvoker {
    workspace: Arc<Workspace>,
    runner: Arc<dyn CommandRunner>,
    context: Arc<ExecutionContext>,
}

impl ServiceInvoker {
    /// Create a new invoker
    pub fn new(
        workspace: Arc<Workspace>,
        runner: Arc<dyn CommandRunner>,
        context: ExecutionContext,
    ) -> Self {
        Self {
            workspace,
            runner,
            context: Arc::new(context),
        }
    }

    /// Get the workspace this invoker runs against
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// Bring one service spec up in detached mode.
    ///
    /// Verbose mode prints progress and passes compose output through;
    /// otherwise compose output is discarded.
    pub async fn up(
        &self,
        spec: &ServiceSpec,
        verbose: bool,
        extra_args: &[String],
    ) -> InvokeResult<()> {
        let project = self.lookup(spec.project())?;

        if verbose {
            term::step(&format!("Starting {}", spec));
        }

        let action = ComposeAction::Up {
            extra_args: extra_args.to_vec(),
            service: spec.service().map(str::to_string),
        };
        let output = if verbose {
            OutputMode::Inherit
        } else {
            OutputMode::Discard
        };
        self.execute(project, &action, output).await?;

        if verbose {
            term::success(&format!("{} ready", spec.project()));
        }
        Ok(())
    }

    /// Run a project-wide action with output passed through
    pub async fn project_action(&self, project_name: &str, action: &ComposeAction) -> InvokeResult<()> {
        let project = self.lookup(project_name)?;
        term::step(&format!("{} {}", action.verb(), project_name));
        self.execute(project, action, OutputMode::Inherit).await
    }

    /// Build the command line for an action without running it
    pub fn command_for(&self, project: &Project, action: &ComposeAction) -> CommandLine {
        let mut args = self.context.compose.args.clone();
        args.extend(action.args());

        CommandLine {
            dir: self.workspace.project_dir(project),
            program: self.context.compose.command.clone(),
            args,
        }
    }

    fn lookup(&self, project_name: &str) -> InvokeResult<&Project> {
        self.workspace
            .project(project_name)
            .ok_or_else(|| InvokeError::ProjectNotFound(project_name.to_string()))
    }

    async fn execute(
        &self,
        project: &Project,
        action: &ComposeAction,
        output: OutputMode,
    ) -> InvokeResult<()> {
        let command = self.command_for(project, action);
        if self.context.dry_run {
            term::dry_run(&command);
            return Ok(());
        }

        tracing::debug!("Invoking {}", command);
        self.runner.run(&command, output).await
    }
}
