//! o3de-setup: interactive installer for an O3DE engine source tree
//!
//! Clones, configures and registers the engine, then creates and
//! configures a new project, optionally building it.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use o3de_setup::domain::{PathDefaults, SetupMode, SetupPaths};
use o3de_setup::services::{LinePrompter, SystemRunner};
use o3de_setup::ui::Console;
use o3de_setup::{SetupApp, SetupConfig, SetupPlan};

/// Set up an O3DE engine source install and a first project
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Extra configuration file, applied after the project and user files
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the interactive setup (default)
    Install {
        /// Offer to delete existing installations first and verify the new clone
        #[arg(long)]
        fresh: bool,
    },
    /// Print the commands a setup would run for the default paths
    Plan {
        /// Include the removal and verification steps of a fresh install
        #[arg(long)]
        fresh: bool,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn mode(fresh: bool) -> SetupMode {
    if fresh {
        SetupMode::Fresh
    } else {
        SetupMode::Standard
    }
}

/// Initialize logging with RUST_LOG environment variable support
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn print_plan(config: &SetupConfig, mode: SetupMode, json: bool) -> Result<()> {
    let paths = SetupPaths::from_defaults(config.platform(), PathDefaults::resolve(config));
    let plan = SetupPlan::build(config, &paths, mode);
    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", plan.render());
    }
    Ok(())
}

fn runner_for(config: &SetupConfig) -> SystemRunner {
    let Some(dir) = config.run_log_dir() else {
        return SystemRunner::new();
    };
    match SystemRunner::with_log_dir(&dir) {
        Ok(runner) => runner,
        Err(e) => {
            tracing::warn!("Run log disabled, cannot write to {:?}: {}", dir, e);
            SystemRunner::new()
        }
    }
}

async fn install(config: SetupConfig, mode: SetupMode) -> Result<ExitCode> {
    // prompts and child processes block, keep them off the async workers
    let task = tokio::task::spawn_blocking(move || {
        let runner = runner_for(&config);
        if let Some(log) = runner.log_file() {
            tracing::info!("Logging commands to {:?}", log);
        }
        let mut app = SetupApp::new(
            config,
            mode,
            runner,
            LinePrompter::stdio(),
            Console::stdout(),
        );
        app.run()
    });

    tokio::select! {
        joined = task => {
            let outcome = joined??;
            tracing::info!(?outcome, "setup finished");
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl+C, stopping setup");
            eprintln!("\nSetup interrupted.");
            // the blocking task cannot be cancelled and would hold runtime shutdown
            std::process::exit(130);
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    init_logging();

    let cli = Cli::parse();

    let working_dir = std::env::current_dir().ok();
    let config = SetupConfig::load(working_dir.as_deref(), cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");

    match cli.command.unwrap_or(Command::Install { fresh: false }) {
        Command::Install { fresh } => install(config, mode(fresh)).await,
        Command::Plan { fresh, json } => {
            print_plan(&config, mode(fresh), json)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
