//! Unified error types for dcm.

use crate::domain::ServiceSpec;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Main application error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Workspace(#[from] WorkspaceError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("'{0}' is neither a group nor a declared project")]
    UnknownTarget(String),

    #[error("Workspace has {issues} problem(s)")]
    Validation { issues: usize },
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Workspace file errors
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("{0} not found")]
    NotFound(PathBuf),

    #[error("{0} already exists")]
    AlreadyExists(PathBuf),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error on workspace file: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Group resolution errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("group '{0}' not found")]
    GroupNotFound(String),

    #[error("inheritance cycle detected at group '{0}'")]
    Cycle(String),
}

/// Errors from a single compose invocation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    /// The command could not be started or exited unsuccessfully.
    #[error("`{command}` failed: {reason}")]
    Failed { command: String, reason: String },
}

impl InvokeError {
    /// Create an invocation failure
    pub fn failed(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Failed {
            command: command.into(),
            reason: reason.into(),
        }
    }
}

/// One contained failure inside a batch, attributed to its service spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    pub service: ServiceSpec,
    pub error: InvokeError,
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.service, self.error)
    }
}

/// Aggregate batch errors
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("{} of {attempted} service(s) failed to start", .failures.len())]
    PartialFailure {
        attempted: usize,
        failures: Vec<ServiceFailure>,
    },
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for workspace file operations
pub type WorkspaceResult<T> = std::result::Result<T, WorkspaceError>;

/// Result type alias for group resolution
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;

/// Result type alias for compose invocations
pub type InvokeResult<T> = std::result::Result<T, InvokeError>;
