use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Keel - deployment bootstrap controller
#[derive(Parser, Debug)]
#[command(name = "keel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit one JSON event per command instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a service template into the instance store
    Deploy(DeployArgs),

    /// Record a template and its inputs without deploying
    Init(InitArgs),
}

#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Service template (defaults to the one already recorded)
    pub template: Option<PathBuf>,

    /// Instance store directory (must already exist)
    #[arg(short = 'p', long, value_name = "DIR")]
    pub instance_path: Option<PathBuf>,

    /// YAML or JSON file with input values, replacing the recorded ones
    #[arg(short, long, value_name = "FILE")]
    pub inputs: Option<PathBuf>,

    /// Number of concurrent deploy workers
    #[arg(short, long, allow_negative_numbers = true)]
    pub workers: Option<i64>,

    /// Continue deploying on top of an existing instance model
    #[arg(short, long)]
    pub resume: bool,

    /// Discard an existing instance model and deploy from scratch
    #[arg(short, long)]
    pub force: bool,

    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Service template to record
    pub template: PathBuf,

    /// Instance store directory (must already exist)
    #[arg(short = 'p', long, value_name = "DIR")]
    pub instance_path: Option<PathBuf>,

    /// YAML or JSON file with input values
    #[arg(short, long, value_name = "FILE")]
    pub inputs: Option<PathBuf>,

    /// Remove a previous instance model first
    #[arg(long)]
    pub clean: bool,

    /// Answer yes to the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}
