use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// dcm - run docker compose across a workspace of projects
#[derive(Debug, Parser)]
#[command(name = "dcm")]
#[command(about = "Bring groups of compose projects up and down from one workspace file")]
#[command(version)]
pub struct Cli {
    /// Print the compose commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Workspace file to use instead of searching upwards for one
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a starter workspace file
    Init,
    /// Print version information
    Version,
    #[command(flatten)]
    Workspace(WorkspaceCommand),
}

/// Commands that run against a loaded workspace
#[derive(Debug, Subcommand)]
pub enum WorkspaceCommand {
    /// Start a group, a project, or a single project:service
    Up {
        /// Group name, project name, or project:service
        target: String,
        /// Build images before starting containers
        #[arg(long)]
        build: bool,
    },
    /// Stop a group's projects, or every project
    Down {
        /// Group to stop (all projects when omitted)
        group: Option<String>,
        /// Remove named volumes as well
        #[arg(short = 'v', long = "volumes")]
        volumes: bool,
    },
    /// Restart every project
    Restart,
    /// Show logs for every project
    Logs,
    /// Show container status for every project
    Status,
    /// List projects and groups
    List,
    /// Show how a group resolves
    Inspect {
        /// Group to inspect
        group: String,
    },
    /// Check the workspace file for mistakes
    Validate,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_no_args() {
        let cli = Cli::try_parse_from(["dcm"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_cli_up_with_flags() {
        let cli = Cli::try_parse_from(["dcm", "up", "dev", "--build", "--dry-run"]).unwrap();
        assert!(cli.dry_run);
        match cli.command {
            Some(Commands::Workspace(WorkspaceCommand::Up { target, build })) => {
                assert_eq!(target, "dev");
                assert!(build);
            }
            _ => panic!("Expected Up command"),
        }
    }

    #[test]
    fn test_cli_up_requires_target() {
        assert!(Cli::try_parse_from(["dcm", "up"]).is_err());
    }

    #[test]
    fn test_cli_down_group_with_volumes() {
        let cli = Cli::try_parse_from(["dcm", "down", "dev", "-v"]).unwrap();
        match cli.command {
            Some(Commands::Workspace(WorkspaceCommand::Down { group, volumes })) => {
                assert_eq!(group.as_deref(), Some("dev"));
                assert!(volumes);
            }
            _ => panic!("Expected Down command"),
        }
    }

    #[test]
    fn test_cli_down_all() {
        let cli = Cli::try_parse_from(["dcm", "down"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Workspace(WorkspaceCommand::Down {
                group: None,
                volumes: false
            }))
        ));
    }

    #[test]
    fn test_cli_init_and_version_are_top_level() {
        let cli = Cli::try_parse_from(["dcm", "init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Init)));

        let cli = Cli::try_parse_from(["dcm", "version"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Version)));

        let cli = Cli::try_parse_from(["dcm", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Workspace(WorkspaceCommand::Status))
        ));
    }

    #[test]
    fn test_cli_global_file() {
        let cli = Cli::try_parse_from(["dcm", "inspect", "dev", "-f", "ws/workspace.json"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("ws/workspace.json")));
        assert!(matches!(cli.command, Some(Commands::Workspace(WorkspaceCommand::Inspect { group })) if group == "dev"));
    }
}
