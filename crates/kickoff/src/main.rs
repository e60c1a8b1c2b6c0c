//! Kickoff CLI - scaffold projects from template repositories
//!
//! This is the main entry point for the kickoff command-line interface.

mod cli;
mod commands;
mod output;
mod prompt;

use anyhow::{Context, Result};
use camino::Utf8Path;
use clap::{CommandFactory, Parser};
use kickoff_projects::TemplateRegistry;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize rustls crypto provider (required for rustls 0.23+)
    // This must be done before any TLS operations
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Parse CLI args
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.quiet);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let registry = load_registry(cli.registry.as_deref())?;

    // Run command
    match command {
        Commands::Create(args) => commands::create::run(args, &registry).await,
        Commands::List => commands::list::run(&registry),
    }
}

/// Load the template registry once for the whole run
fn load_registry(path: Option<&Utf8Path>) -> Result<TemplateRegistry> {
    match path {
        Some(path) => TemplateRegistry::from_file(path)
            .with_context(|| format!("Failed to load template registry: {}", path)),
        None => TemplateRegistry::from_embedded().context("Failed to load bundled templates"),
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            // Keep logs out of the way of the prompts unless asked for
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
