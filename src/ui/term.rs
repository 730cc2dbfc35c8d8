//! Colorized status lines written to stdout.

use crate::domain::CommandLine;
use colored::Colorize;

/// Turn ANSI colors on or off for the whole process
pub fn set_color(enabled: bool) {
    if !enabled {
        colored::control::set_override(false);
    }
}

/// Section header, e.g. "Starting group 'dev'"
pub fn header(icon: &str, message: &str) {
    println!("{} {}", icon.cyan(), message);
}

/// Per-project progress line
pub fn step(message: &str) {
    println!("{} {}", "🚀".blue(), message);
}

pub fn success(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Marked failure line
pub fn failure(message: impl std::fmt::Display) {
    println!("{} {}", "❌".red(), message.to_string().red());
}

/// Echo of a command that would have run
pub fn dry_run(command: &CommandLine) {
    println!("{} [DRY-RUN] {}", "🛠️".yellow(), command);
}

/// Failure line for `main`, written to stderr
pub fn fatal(message: impl std::fmt::Display) {
    eprintln!("{} {}", "❌".red(), message);
}
