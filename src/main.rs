//! dcm: run docker compose across a workspace of projects and groups.

use anyhow::Result;
use clap::CommandFactory;
use std::io;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dcm::cli::{Cli, Commands};
use dcm::services::ProcessRunner;
use dcm::ui::term;
use dcm::{App, ToolConfig};

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = ToolConfig::load(Some(cwd.as_path())).unwrap_or_else(|e| {
        tracing::warn!("Ignoring configuration: {}", e);
        ToolConfig::default()
    });
    term::set_color(config.output.color);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Version => println!("{}", App::version_line()),
        Commands::Init => {
            let path = App::init_workspace(&config, cli.file.as_deref(), &cwd)?;
            term::success(&format!("Created {}", path.display()));
        }
        Commands::Workspace(command) => {
            let workspace = App::load_workspace(&config, cli.file.as_deref(), &cwd)?;
            let app = App::new(&config, workspace, Arc::new(ProcessRunner), cli.dry_run);
            app.run(command).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse_args();
    tracing::debug!("Parsed arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        term::fatal(e);
        std::process::exit(1);
    }
}
