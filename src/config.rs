//! Configuration management for dcm.
//!
//! Supports layered configuration: defaults → project → user → env

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub compose: ComposeConfig,
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ToolConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            config::File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (.dcm.toml in the working directory)
        if let Some(dir) = project_dir {
            let project_config = dir.join(".dcm.toml");
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/dcm/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("com", "dcm", "dcm") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (DCM_COMPOSE__COMMAND, DCM_COMPOSE__ARGS="compose", ...)
        builder = builder.add_source(
            Environment::with_prefix("DCM")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(" ")
                .with_list_parse_key("compose.args"),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// External compose tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Program to run, e.g. `docker-compose` or `docker`
    #[serde(default = "default_compose_command")]
    pub command: String,
    /// Arguments placed before every compose sub-command (e.g. `["compose"]`)
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            command: default_compose_command(),
            args: Vec::new(),
        }
    }
}

fn default_compose_command() -> String {
    "docker-compose".to_string()
}

/// Workspace file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// File name searched for from the working directory upwards
    #[serde(default = "default_workspace_file")]
    pub file: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            file: default_workspace_file(),
        }
    }
}

fn default_workspace_file() -> String {
    "workspace.json".to_string()
}

/// Terminal output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}
