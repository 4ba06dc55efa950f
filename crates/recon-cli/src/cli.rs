//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use recon_core::Strategy;

/// recon - Reconcile an environment against a declarative configuration
#[derive(Parser, Debug)]
#[command(name = "recon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Environment back-end to reconcile
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EnvKind {
    /// Simulated in-memory state, empty at the start of every invocation
    #[default]
    Memory,
    /// The local Linux host, through `sh -c`
    Linux,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Probe every component and apply the resulting actions
    ///
    /// Examples:
    ///   recon run main.toml                     # Batch strategy, memory env
    ///   recon run main.toml --strategy series   # Apply after each probe
    ///   recon run main.toml --env linux --dry-run
    Run {
        /// Path to the TOML configuration
        config: PathBuf,

        /// Environment back-end
        #[arg(long, value_enum, default_value_t = EnvKind::Memory, env = "RECON_ENV")]
        env: EnvKind,

        /// Execution strategy (all or series)
        #[arg(long, default_value_t = Strategy::Batch)]
        strategy: Strategy,

        /// Probe without applying anything
        #[arg(long)]
        dry_run: bool,

        /// Output the run report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the actions a run would apply
    Plan {
        /// Path to the TOML configuration
        config: PathBuf,

        /// Environment back-end
        #[arg(long, value_enum, default_value_t = EnvKind::Memory, env = "RECON_ENV")]
        env: EnvKind,

        /// Output the actions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check whether the environment has converged
    ///
    /// Exits with status 1 when any component still has pending actions.
    ///
    /// The memory environment holds no state between invocations, so against
    /// it every non-empty configuration reports drift. Use `--env linux` to
    /// check a real host.
    Check {
        /// Path to the TOML configuration
        config: PathBuf,

        /// Environment back-end
        #[arg(long, value_enum, default_value_t = EnvKind::Memory, env = "RECON_ENV")]
        env: EnvKind,

        /// Output the check report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the components of a back-end and their dependencies
    Namespaces {
        /// Environment back-end
        #[arg(long, value_enum, default_value_t = EnvKind::Memory, env = "RECON_ENV")]
        env: EnvKind,
    },
}
