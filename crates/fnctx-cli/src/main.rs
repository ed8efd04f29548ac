//! fnctx CLI
//!
//! Bootstraps the context store, resolves the active context, and runs the
//! requested command against it.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use fnctx_core::{ContextResolver, Layout, Resolution, Settings, ensure_configuration};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Setup tracing if verbose
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    let layout = Layout::from_home_dir()?;
    ensure_configuration(&layout)?;

    let mut settings = Settings::from_process_env();
    let resolution =
        ContextResolver::new(&layout).load_configuration(&mut settings, cli.context.as_deref())?;
    report_fallback(&resolution);

    match cli.command {
        Some(cmd) => execute_command(cmd, &layout, &settings),
        None => {
            // No command provided - show help hint
            println!("{} context configuration", "fnctx".green().bold());
            println!();
            println!("Run {} for available commands.", "fnctx --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, layout: &Layout, settings: &Settings) -> Result<()> {
    match cmd {
        Commands::Show { json } => commands::run_show(settings, json),
        Commands::List => commands::run_list(layout),
        Commands::Use { name } => commands::run_use(layout, &name),
    }
}

/// Tell the user the current context was reset.
fn report_fallback(resolution: &Resolution) {
    if let Resolution::FallbackTriggered { requested, reason } = resolution {
        eprintln!(
            "{}: context '{}' could not be loaded: {}",
            "warning".yellow().bold(),
            requested,
            reason
        );
        eprintln!("current context has been set to default");
    }
}
