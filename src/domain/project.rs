//! Project entity: one compose-managed directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A named directory containing a compose definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Directory holding the compose file (relative to the workspace root)
    pub path: PathBuf,
    /// Human readable description shown by `list`
    #[serde(default)]
    pub description: String,
}

impl Project {
    /// Create a new project
    pub fn new(path: impl Into<PathBuf>, description: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            description: description.into(),
        }
    }
}
