//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};

/// Kickoff - create a new project from a template
#[derive(Parser, Debug)]
#[command(name = "kickoff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a template registry YAML file (defaults to the bundled registry)
    #[arg(long, global = true)]
    pub registry: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project
    #[command(visible_alias = "c")]
    Create(CreateArgs),

    /// List available templates
    #[command(visible_alias = "ls")]
    List,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Project folder name (prompted for when omitted)
    pub name: Option<String>,

    /// Template id (prompted for when omitted)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Use a shallow `git clone` instead of downloading the archive
    #[arg(long)]
    pub clone: bool,
}
