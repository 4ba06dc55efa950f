//! recon CLI
//!
//! Reconciles an environment against a TOML description of its desired state.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use recon_core::RunOptions;
use recon_envs::{LinuxEnv, MemoryEnv};

use cli::{Cli, Commands, EnvKind};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!(command = ?cli.command, "Parsed command line");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Run {
            config,
            env,
            strategy,
            dry_run,
            json,
        } => {
            let options = RunOptions::new(strategy).with_dry_run(dry_run);
            match env {
                EnvKind::Memory => commands::run_run::<MemoryEnv>(&config, options, json),
                EnvKind::Linux => commands::run_run::<LinuxEnv>(&config, options, json),
            }
        }
        Commands::Plan { config, env, json } => match env {
            EnvKind::Memory => commands::run_plan::<MemoryEnv>(&config, json),
            EnvKind::Linux => commands::run_plan::<LinuxEnv>(&config, json),
        },
        Commands::Check { config, env, json } => match env {
            EnvKind::Memory => commands::run_check::<MemoryEnv>(&config, json),
            EnvKind::Linux => commands::run_check::<LinuxEnv>(&config, json),
        },
        Commands::Namespaces { env } => match env {
            EnvKind::Memory => commands::run_namespaces::<MemoryEnv>(),
            EnvKind::Linux => commands::run_namespaces::<LinuxEnv>(),
        },
    }
}
