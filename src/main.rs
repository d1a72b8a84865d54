//! Keel CLI - deployment bootstrap controller
//!
//! Usage: keel <COMMAND>
//!
//! Commands:
//!   deploy  Deploy a service template into the instance store
//!   init    Record a template and its inputs without deploying

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use keel::config::Verbosity;
use keel::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() {
    let cli = Cli::parse();
    let command = match &cli.command {
        Commands::Deploy(_) => "deploy",
        Commands::Init(_) => "init",
    };

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            if cli.json {
                let _ = ui::json::emit(ui::json::error_event(command, &err));
            } else {
                ui::output::print_error(&err);
            }
            1
        }
    };
    std::process::exit(code);
}

fn run(cli: &Cli) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let (config, warnings) = Config::load_layered(&cwd)?;

    init_tracing(config.output.verbosity.raised(cli.verbose));
    if cli.json {
        for warning in &warnings {
            tracing::warn!("{}", warning);
        }
    } else {
        ui::output::print_config_warnings(&warnings);
    }

    let ctx = CommandContext::new(config, cli.json);
    match &cli.command {
        Commands::Deploy(args) => commands::deploy::cmd_deploy(args, &ctx),
        Commands::Init(args) => commands::init::cmd_init(args, &ctx),
    }
}

/// `RUST_LOG` wins; otherwise the configured verbosity picks the level.
fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("keel={}", verbosity.filter_directive())));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
