//! Batch execution of resolved groups and all-project commands.

use super::invoker::ServiceInvoker;
use super::resolver::Resolution;
use crate::domain::{ComposeAction, ServiceSpec};
use crate::error::{BatchError, InvokeError, InvokeResult, ServiceFailure};
use crate::ui::term;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tokio::task::JoinSet;

/// Runs the invoker across many services or projects
pub struct BatchExecutor {
    invoker: ServiceInvoker,
}

impl BatchExecutor {
    /// Create a new executor
    pub fn new(invoker: ServiceInvoker) -> Self {
        Self { invoker }
    }

    /// Get the underlying invoker
    pub fn invoker(&self) -> &ServiceInvoker {
        &self.invoker
    }

    /// Bring up every service of a resolved group.
    ///
    /// Sequential batches report failures and keep going but never return an
    /// error. Parallel batches return `PartialFailure` once every service has
    /// finished if any of them failed.
    pub async fn up(&self, resolution: &Resolution, extra_args: &[String]) -> Result<(), BatchError> {
        tracing::info!(
            "Bringing up {} service(s), parallel={}",
            resolution.services.len(),
            resolution.parallel
        );

        if resolution.parallel {
            self.up_parallel(&resolution.services, extra_args).await
        } else {
            self.up_sequential(&resolution.services, extra_args).await;
            Ok(())
        }
    }

    async fn up_sequential(&self, services: &[ServiceSpec], extra_args: &[String]) {
        for spec in services {
            if let Err(e) = self.invoker.up(spec, true, extra_args).await {
                tracing::warn!("Service {} failed: {}", spec, e);
                term::failure(ServiceFailure {
                    service: spec.clone(),
                    error: e,
                });
            }
        }
    }

    async fn up_parallel(&self, services: &[ServiceSpec], extra_args: &[String]) -> Result<(), BatchError> {
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<(usize, InvokeResult<()>)>();
        let mut tasks = JoinSet::new();

        for (index, spec) in services.iter().enumerate() {
            let invoker = self.invoker.clone();
            let spec = spec.clone();
            let extra_args = extra_args.to_vec();
            let tx = outcome_tx.clone();

            tasks.spawn(async move {
                let result = invoker.up(&spec, false, &extra_args).await;
                let _ = tx.send((index, result));
            });
        }
        drop(outcome_tx);

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Service task terminated abnormally: {}", e);
            }
        }

        let mut reported = HashSet::new();
        let mut failures = Vec::new();
        while let Some((index, result)) = outcome_rx.recv().await {
            reported.insert(index);
            let spec = &services[index];
            match result {
                Ok(()) => term::success(&format!("{} ready", spec)),
                Err(error) => {
                    let failure = ServiceFailure {
                        service: spec.clone(),
                        error,
                    };
                    tracing::warn!("Service {}", failure);
                    term::failure(&failure);
                    failures.push(failure);
                }
            }
        }

        for (index, spec) in services.iter().enumerate() {
            if !reported.contains(&index) {
                let failure = ServiceFailure {
                    service: spec.clone(),
                    error: InvokeError::failed(
                        format!("up {}", spec),
                        "task ended before reporting",
                    ),
                };
                term::failure(&failure);
                failures.push(failure);
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(BatchError::PartialFailure {
                attempted: services.len(),
                failures,
            })
        }
    }

    /// Stop every project referenced by a resolved group, once each, in order
    pub async fn down_group(&self, resolution: &Resolution, remove_volumes: bool) {
        let mut seen = HashSet::new();
        let projects: Vec<&str> = resolution
            .services
            .iter()
            .map(ServiceSpec::project)
            .filter(|project| seen.insert(*project))
            .collect();

        self.each_project(projects, &ComposeAction::Down { remove_volumes })
            .await;
    }

    /// Stop every declared project
    pub async fn down_all(&self, remove_volumes: bool) {
        self.each_declared(&ComposeAction::Down { remove_volumes })
            .await;
    }

    /// Restart every declared project
    pub async fn restart_all(&self) {
        self.each_declared(&ComposeAction::Restart).await;
    }

    /// Show `ps` for every declared project
    pub async fn status_all(&self) {
        self.each_declared(&ComposeAction::Status).await;
    }

    /// Show logs for every declared project
    pub async fn logs_all(&self) {
        self.each_declared(&ComposeAction::Logs).await;
    }

    async fn each_declared(&self, action: &ComposeAction) {
        let projects: Vec<String> = self.invoker.workspace().projects.keys().cloned().collect();
        self.each_project(projects.iter().map(String::as_str), action)
            .await;
    }

    async fn each_project<'p>(&self, projects: impl IntoIterator<Item = &'p str>, action: &ComposeAction) {
        for project in projects {
            if let Err(e) = self.invoker.project_action(project, action).await {
                tracing::warn!("{} failed for {}: {}", action.verb(), project, e);
                term::failure(format!("{}: {}", project, e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::invoker::tests::{context, sample_workspace};
    use crate::services::runner::testing::RecordingRunner;
    use crate::services::runner::{CommandRunner, OutputMode};
    use crate::domain::CommandLine;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Barrier;
    use tokio_test::{assert_err, assert_ok};

    fn executor(runner: Arc<dyn CommandRunner>, dry_run: bool) -> BatchExecutor {
        BatchExecutor::new(ServiceInvoker::new(sample_workspace(), runner, context(dry_run)))
    }

    fn resolution(services: &[&str], parallel: bool) -> Resolution {
        Resolution {
            services: services.iter().map(|s| ServiceSpec::parse(s)).collect(),
            parallel,
        }
    }

    #[tokio::test]
    async fn test_parallel_reports_each_failure_once() {
        let runner = Arc::new(
            RecordingRunner::new()
                .failing_in("./p2")
                .failing_in("./p4"),
        );
        let exec = executor(runner.clone(), false);

        let err = assert_err!(
            exec.up(&resolution(&["p1", "p2", "p3", "p4:web"], true), &[])
                .await
        );

        let BatchError::PartialFailure { attempted, failures } = err;
        assert_eq!(attempted, 4);
        let mut failed: Vec<&str> = failures.iter().map(|f| f.service.as_str()).collect();
        failed.sort();
        assert_eq!(failed, vec!["p2", "p4:web"]);
        assert_eq!(runner.calls().len(), 4);
    }

    #[tokio::test]
    async fn test_parallel_unknown_project_is_attributed() {
        let runner = Arc::new(RecordingRunner::new());
        let exec = executor(runner.clone(), false);

        let err = assert_err!(exec.up(&resolution(&["p1", "ghost:api"], true), &[]).await);

        let BatchError::PartialFailure { failures, .. } = err;
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].service.as_str(), "ghost:api");
        assert_eq!(
            failures[0].error,
            InvokeError::ProjectNotFound("ghost".to_string())
        );
        assert_eq!(runner.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_parallel_discards_output() {
        let runner = Arc::new(RecordingRunner::new());
        let exec = executor(runner.clone(), false);

        assert_ok!(exec.up(&resolution(&["p1", "p2"], true), &[]).await);
        assert!(runner
            .calls()
            .iter()
            .all(|(_, output)| *output == OutputMode::Discard));
    }

    /// Every run waits until all expected runs have started
    struct BarrierRunner {
        barrier: Barrier,
    }

    #[async_trait]
    impl CommandRunner for BarrierRunner {
        async fn run(&self, _command: &CommandLine, _output: OutputMode) -> InvokeResult<()> {
            self.barrier.wait().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_parallel_runs_services_concurrently() {
        let runner = Arc::new(BarrierRunner {
            barrier: Barrier::new(3),
        });
        let exec = executor(runner, false);

        let result = tokio::time::timeout(
            Duration::from_secs(5),
            exec.up(&resolution(&["p1", "p2", "p3"], true), &[]),
        )
        .await
        .expect("services were not started concurrently");
        assert_ok!(result);
    }

    /// Panics instead of reporting for one project directory
    struct PanicRunner {
        project: &'static str,
    }

    #[async_trait]
    impl CommandRunner for PanicRunner {
        async fn run(&self, command: &CommandLine, _output: OutputMode) -> InvokeResult<()> {
            if command.dir.ends_with(self.project) {
                panic!("runner crashed in {}", self.project);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_parallel_panicked_task_is_attributed() {
        let exec = executor(Arc::new(PanicRunner { project: "p2" }), false);

        let err = assert_err!(exec.up(&resolution(&["p1", "p2", "p3"], true), &[]).await);

        let BatchError::PartialFailure { attempted, failures } = err;
        assert_eq!(attempted, 3);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].service.as_str(), "p2");
        assert!(matches!(
            &failures[0].error,
            InvokeError::Failed { reason, .. } if reason == "task ended before reporting"
        ));
    }

    #[tokio::test]
    async fn test_sequential_continues_after_failure() {
        let runner = Arc::new(RecordingRunner::new().failing_in("./p1"));
        let exec = executor(runner.clone(), false);
        let extra = vec!["--build".to_string()];

        assert_ok!(exec.up(&resolution(&["p1", "p2", "p3:db"], false), &extra).await);

        assert_eq!(
            runner.commands(),
            vec![
                "cd ./p1 && docker-compose up -d --build",
                "cd ./p2 && docker-compose up -d --build",
                "cd ./p3 && docker-compose up -d --build db",
            ]
        );
        assert!(runner
            .calls()
            .iter()
            .all(|(_, output)| *output == OutputMode::Inherit));
    }

    #[tokio::test]
    async fn test_sequential_all_failing_still_succeeds() {
        let runner = Arc::new(
            RecordingRunner::new()
                .failing_in("./p1")
                .failing_in("./p2"),
        );
        let exec = executor(runner.clone(), false);

        assert_ok!(exec.up(&resolution(&["p1", "p2"], false), &[]).await);
        assert_eq!(runner.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_dry_run_spawns_nothing() {
        let runner = Arc::new(RecordingRunner::new().failing_in("./p1"));
        let exec = executor(runner.clone(), true);

        assert_ok!(exec.up(&resolution(&["p1", "p2"], true), &[]).await);
        assert_ok!(exec.up(&resolution(&["p1", "p2"], false), &[]).await);
        exec.down_all(true).await;
        exec.status_all().await;

        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_project_commands_run_in_name_order() {
        let runner = Arc::new(RecordingRunner::new().failing_in("./p2"));
        let exec = executor(runner.clone(), false);

        exec.restart_all().await;

        assert_eq!(
            runner.commands(),
            vec![
                "cd ./p1 && docker-compose restart",
                "cd ./p2 && docker-compose restart",
                "cd ./p3 && docker-compose restart",
                "cd ./p4 && docker-compose restart",
            ]
        );
    }

    #[tokio::test]
    async fn test_down_group_visits_each_project_once() {
        let runner = Arc::new(RecordingRunner::new());
        let exec = executor(runner.clone(), false);

        exec.down_group(&resolution(&["p3:web", "p1", "p3:db", "ghost"], true), true)
            .await;

        assert_eq!(
            runner.commands(),
            vec![
                "cd ./p3 && docker-compose down -v",
                "cd ./p1 && docker-compose down -v",
            ]
        );
    }
}
