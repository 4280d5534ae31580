use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Helios simple climate model coupler.
#[derive(Parser)]
#[command(
    name = "helios",
    version,
    about = "Run simple climate models through a shared parameter store"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run a model from a TOML scenario configuration.
    Run(RunArgs),
    /// Convert a value between two unit expressions.
    Convert(ConvertArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "helios.toml")]
    pub config: PathBuf,

    /// Override the model name from config.
    #[arg(short, long)]
    pub model: Option<String>,
}

/// Arguments for the `convert` subcommand.
#[derive(clap::Args)]
pub struct ConvertArgs {
    /// Value to convert.
    pub value: f64,

    /// Source unit expression (e.g. "ktC/d").
    pub from: String,

    /// Target unit expression (e.g. "GtCO2/a").
    pub to: String,
}
