//! Compose actions and the command lines they produce.

use std::fmt;
use std::path::PathBuf;

/// A compose sub-command issued against one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeAction {
    /// `up -d [extra...] [service]`
    Up {
        extra_args: Vec<String>,
        service: Option<String>,
    },
    /// `down [-v]`
    Down { remove_volumes: bool },
    Restart,
    Logs,
    /// `ps`
    Status,
}

impl ComposeAction {
    /// Arguments passed to the compose tool for this action
    pub fn args(&self) -> Vec<String> {
        match self {
            Self::Up {
                extra_args,
                service,
            } => {
                let mut args = vec!["up".to_string(), "-d".to_string()];
                args.extend(extra_args.iter().cloned());
                if let Some(service) = service {
                    args.push(service.clone());
                }
                args
            }
            Self::Down { remove_volumes } => {
                let mut args = vec!["down".to_string()];
                if *remove_volumes {
                    args.push("-v".to_string());
                }
                args
            }
            Self::Restart => vec!["restart".to_string()],
            Self::Logs => vec!["logs".to_string()],
            Self::Status => vec!["ps".to_string()],
        }
    }

    /// Verb used in progress lines
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Up { .. } => "Starting",
            Self::Down { .. } => "Stopping",
            Self::Restart => "Restarting",
            Self::Logs => "Logs for",
            Self::Status => "Status of",
        }
    }
}

/// A fully built external command: program, arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub dir: PathBuf,
    pub program: String,
    pub args: Vec<String>,
}

impl CommandLine {
    /// Program followed by its arguments, space separated
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cd {} && {}", self.dir.display(), self.display_command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_up_args_order() {
        let action = ComposeAction::Up {
            extra_args: vec!["--build".to_string()],
            service: Some("worker".to_string()),
        };
        assert_eq!(action.args(), vec!["up", "-d", "--build", "worker"]);
    }

    #[test]
    fn test_down_args() {
        assert_eq!(
            ComposeAction::Down {
                remove_volumes: true
            }
            .args(),
            vec!["down", "-v"]
        );
        assert_eq!(
            ComposeAction::Down {
                remove_volumes: false
            }
            .args(),
            vec!["down"]
        );
        assert_eq!(ComposeAction::Status.args(), vec!["ps"]);
    }

    #[test]
    fn test_command_line_display() {
        let command = CommandLine {
            dir: PathBuf::from("./services/api"),
            program: "docker-compose".to_string(),
            args: vec!["up".to_string(), "-d".to_string()],
        };
        assert_eq!(
            command.to_string(),
            "cd ./services/api && docker-compose up -d"
        );
    }
}
