use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use trellis_core::configs::engine::{load_engine_config, EngineConfig, FailurePolicy};

mod commands;
mod tasks;

/// Trellis - Scaffold project folders with dependent tasks
///
/// Everything from the command on is handed to the task engine, so task
/// params and flags go after the command name.
#[derive(Parser)]
#[command(name = "trellis")]
#[command(about = "Scaffold project folders with dependent tasks")]
#[command(version, disable_help_flag = true)]
struct Cli {
    /// Engine configuration file (defaults to trellis.yml in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip tasks whose dependencies did not succeed
    #[arg(long)]
    fail_fast: bool,

    /// Hide progress spinners
    #[arg(long)]
    no_progress: bool,

    /// Print the task dependency graph instead of running a command
    #[arg(long)]
    graph: bool,

    /// Increase diagnostic output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Show available commands
    #[arg(short, long)]
    help: bool,

    /// Command, params and flags
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = std::env::current_dir().context("Failed to read the working directory")?;
    let mut config = match &cli.config {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::discover(&root)?,
    };
    if cli.fail_fast {
        config.failure_policy = FailurePolicy::FailFast;
    }
    if cli.no_progress {
        config.progress = false;
    }
    debug!(?config, root = %root.display(), "configuration loaded");

    let tool = tasks::build_tool(config, root)
        .map_err(|e| anyhow::anyhow!("Failed to register tasks: {}", e))?;

    if cli.graph {
        commands::graph::execute(&tool);
        return Ok(ExitCode::SUCCESS);
    }

    let mut args = cli.args;
    if cli.help {
        args.push("--help".to_string());
    }
    Ok(tool.execute(args).await)
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
