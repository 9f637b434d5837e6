//! keepsync CLI - Command-line interface for resolving sync conflicts
//!
//! Provides commands for:
//! - Resolving one conflict (keep local, keep remote, keep both)
//! - Resolving a batch of conflicts listed in a file
//! - Previewing the name a kept-aside copy would get
//! - Managing configuration

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use keepsync_core::config::{Config, LoggingConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod prompt;

use commands::{
    batch::BatchCommand, completions::CompletionsCommand, config::ConfigCommand,
    name::NameCommand, resolve::ResolveCommand, AppContext,
};
use output::{get_formatter, OutputFormat};

#[derive(Debug, Parser)]
#[command(
    name = "keepsync",
    version,
    about = "Resolve conflicts between local and remote copies of synced files"
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Use alternate config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a single conflict
    Resolve(ResolveCommand),
    /// Resolve every conflict listed in a YAML or JSON file
    Batch(BatchCommand),
    /// Print where "keep both" would move a file, without moving it
    Name(NameCommand),
    /// View and manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Generate shell completions
    Completions(CompletionsCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let format = OutputFormat::from_flags(cli.json, cli.quiet);

    match run(cli, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            get_formatter(format).error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, format: OutputFormat) -> Result<()> {
    let ctx = AppContext::new(cli.config.as_deref());

    // Logging settings never block a command; a broken file is reported by the command
    let logging = Config::load(&ctx.config_path)
        .map(|c| c.logging)
        .unwrap_or_default();
    init_tracing(cli.verbose, cli.quiet, &logging);

    match cli.command {
        Commands::Resolve(cmd) => cmd.execute(format, &ctx),
        Commands::Batch(cmd) => cmd.execute(format, &ctx),
        Commands::Name(cmd) => cmd.execute(format, &ctx),
        Commands::Config(cmd) => cmd.execute(format, &ctx),
        Commands::Completions(cmd) => cmd.execute(format),
    }
}

/// `RUST_LOG` wins, then `-v`/`--quiet`, then `logging.level` from the config file
fn filter_directive(verbose: u8, quiet: bool, logging: &LoggingConfig) -> String {
    match (verbose, quiet) {
        (0, true) => "error".to_string(),
        (0, false) => logging.level.clone(),
        (1, _) => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

fn init_tracing(verbose: u8, quiet: bool, logging: &LoggingConfig) {
    let filter = filter_directive(verbose, quiet, logging);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // stdout is reserved for command output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
