//! CLI entry point for the sign-in screen host.

pub mod run;
pub mod scenario;
pub mod terminal;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Drive the sign-in session controller from a terminal
#[derive(Parser, Debug)]
#[command(name = "signin", version, about = "Sign-in screen session controller")]
pub struct Cli {
    /// Config file (defaults to ~/.signin/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play a scenario against a scripted SDK
    Run(RunArgs),
    /// Print the effective configuration
    Config,
}

/// Arguments for `signin run`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Print screen events as JSON lines instead of rendering the screen
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
