//! Application: wires configuration, workspace and services to CLI commands.

use crate::cli::WorkspaceCommand;
use crate::config::ToolConfig;
use crate::domain::{ServiceSpec, Workspace};
use crate::error::{AppError, Result, WorkspaceError};
use crate::services::{
    validate, BatchExecutor, CommandRunner, ExecutionContext, GroupResolver, ServiceInvoker,
};
use crate::ui::{report, term};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// One CLI invocation against a loaded workspace
pub struct App {
    workspace: Arc<Workspace>,
    executor: BatchExecutor,
}

impl App {
    /// Create a new application instance
    pub fn new(
        config: &ToolConfig,
        workspace: Workspace,
        runner: Arc<dyn CommandRunner>,
        dry_run: bool,
    ) -> Self {
        let workspace = Arc::new(workspace);
        let context = ExecutionContext {
            dry_run,
            compose: config.compose.clone(),
        };
        let invoker = ServiceInvoker::new(workspace.clone(), runner, context);

        Self {
            workspace,
            executor: BatchExecutor::new(invoker),
        }
    }

    /// Find and load the workspace file.
    ///
    /// An explicit path is used as-is; otherwise the configured file name is
    /// searched for from `start` upwards.
    pub fn load_workspace(
        config: &ToolConfig,
        explicit: Option<&Path>,
        start: &Path,
    ) -> Result<Workspace> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => Workspace::discover(start, &config.workspace.file)
                .ok_or_else(|| WorkspaceError::NotFound(PathBuf::from(&config.workspace.file)))?,
        };

        tracing::info!("Using workspace {:?}", path);
        Ok(Workspace::load(&path)?)
    }

    /// Write the starter workspace, refusing to overwrite an existing file
    pub fn init_workspace(config: &ToolConfig, explicit: Option<&Path>, dir: &Path) -> Result<PathBuf> {
        let path = explicit
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dir.join(&config.workspace.file));
        Workspace::starter().create(&path)?;
        Ok(path)
    }

    /// Version and platform line
    pub fn version_line() -> String {
        format!(
            "dcm {} ({}-{})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }

    /// Dispatch a command
    pub async fn run(&self, command: WorkspaceCommand) -> Result<()> {
        match command {
            WorkspaceCommand::Up { target, build } => self.up(&target, build).await,
            WorkspaceCommand::Down { group, volumes } => self.down(group.as_deref(), volumes).await,
            WorkspaceCommand::Restart => {
                term::header("🔄", "Restarting all projects...");
                self.executor.restart_all().await;
                Ok(())
            }
            WorkspaceCommand::Logs => {
                term::header("📋", "Logs for all projects:");
                self.executor.logs_all().await;
                Ok(())
            }
            WorkspaceCommand::Status => {
                term::header("📊", "Status of all projects:");
                self.executor.status_all().await;
                Ok(())
            }
            WorkspaceCommand::List => {
                println!("{}", report::render_list(&self.workspace));
                Ok(())
            }
            WorkspaceCommand::Inspect { group } => self.inspect(&group),
            WorkspaceCommand::Validate => self.validate(),
        }
    }

    async fn up(&self, target: &str, build: bool) -> Result<()> {
        let extra_args = if build {
            vec!["--build".to_string()]
        } else {
            Vec::new()
        };

        if self.workspace.group(target).is_some() {
            let resolution = GroupResolver::new(&self.workspace).resolve(target)?;
            term::header(
                "🔄",
                &format!(
                    "Starting group '{}' (parallel={})...",
                    target, resolution.parallel
                ),
            );
            self.executor.up(&resolution, &extra_args).await?;
            term::success(&format!("Group '{}' is up", target));
            return Ok(());
        }

        let spec = ServiceSpec::parse(target);
        if self.workspace.project(spec.project()).is_none() {
            return Err(AppError::UnknownTarget(target.to_string()));
        }
        self.executor.invoker().up(&spec, true, &extra_args).await?;
        Ok(())
    }

    async fn down(&self, group: Option<&str>, remove_volumes: bool) -> Result<()> {
        let volumes = if remove_volumes { " and removing volumes" } else { "" };

        match group {
            Some(group) => {
                let resolution = GroupResolver::new(&self.workspace).resolve(group)?;
                term::header("⏹️", &format!("Stopping group '{}'{}...", group, volumes));
                self.executor.down_group(&resolution, remove_volumes).await;
                term::success(&format!("Group '{}' stopped", group));
            }
            None => {
                term::header("⏹️", &format!("Stopping all projects{}...", volumes));
                self.executor.down_all(remove_volumes).await;
                term::success("All projects stopped");
            }
        }
        Ok(())
    }

    fn inspect(&self, group: &str) -> Result<()> {
        let resolution = GroupResolver::new(&self.workspace).resolve(group)?;
        term::header("🔍", &format!("Inspecting group '{}'", group));
        println!("{}", report::render_inspect(group, &resolution, &self.workspace));
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        term::header("🔍", "Validating workspace...");
        let issues = validate(&self.workspace);
        if issues.is_empty() {
            term::success("Workspace is valid");
            return Ok(());
        }

        for issue in &issues {
            term::failure(issue);
        }
        Err(AppError::Validation {
            issues: issues.len(),
        })
    }
}
