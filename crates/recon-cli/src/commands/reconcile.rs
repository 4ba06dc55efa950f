//! Run, plan, and check command implementations
//!
//! Each command loads the configuration, instantiates the back-end's root
//! components, and drives them against a freshly connected environment.

use std::path::Path;

use colored::Colorize;

use recon_core::{Application, CheckReport, CheckStatus, RunOptions, RunReport};

use super::backend::Backend;
use crate::error::{CliError, Result};

/// Run the run command
///
/// Probes and applies with the selected strategy. The memory back-end's
/// final state is printed after a real run.
pub fn run_run<B: Backend>(path: &Path, options: RunOptions, json: bool) -> Result<()> {
    let app = Application::<B>::load(path, B::roots())?;
    let mut env = B::connect();

    if !json {
        println!(
            "{} Reconciling {} against the {} environment ({} strategy)...",
            "=>".blue().bold(),
            path.display().to_string().cyan(),
            B::NAME,
            options.strategy
        );
    }

    let report = app.run(&mut env, options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_report(&report);

    if !report.dry_run
        && let Some(state) = env.snapshot()
    {
        println!();
        println!("{}", "State:".bold());
        println!("{}", serde_json::to_string_pretty(&state)?);
    }

    Ok(())
}

/// Run the plan command
///
/// Lists the actions a batch run would apply, without applying them.
pub fn run_plan<B: Backend>(path: &Path, json: bool) -> Result<()> {
    let app = Application::<B>::load(path, B::roots())?;
    let env = B::connect();

    let actions = app.probe_all(&env)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&actions)?);
        return Ok(());
    }

    if actions.is_empty() {
        println!("{} Nothing to do.", "OK".green().bold());
        return Ok(());
    }

    println!("{} {} pending action(s):", "PLAN".yellow().bold(), actions.len());
    for action in &actions {
        println!("   {} {}", "+".yellow(), action);
    }

    Ok(())
}

/// Run the check command
///
/// Fails when the environment has not converged, so scripts can branch on
/// the exit status.
pub fn run_check<B: Backend>(path: &Path, json: bool) -> Result<()> {
    let app = Application::<B>::load(path, B::roots())?;
    let env = B::connect();

    let report = app.check(&env)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_check(&report);
    }

    match report.status {
        CheckStatus::Converged => Ok(()),
        CheckStatus::Drifted => Err(CliError::user(format!(
            "{} component(s) have pending actions",
            report.pending.len()
        ))),
    }
}

fn print_report<A: std::fmt::Display>(report: &RunReport<A>) {
    for step in report.steps.iter().filter(|s| !s.actions.is_empty()) {
        match &step.parent {
            Some(parent) => println!(
                "   {} {} {}",
                "*".cyan(),
                step.namespace.cyan(),
                format!("(dependency of {})", parent).dimmed()
            ),
            None => println!("   {} {}", "*".cyan(), step.namespace.cyan()),
        }
        for action in &step.actions {
            println!("      {} {}", "+".green(), action);
        }
    }

    let count = report.action_count();
    if count == 0 {
        println!("{} Already converged. No changes needed.", "OK".green().bold());
    } else if report.dry_run {
        println!(
            "{} {} action(s) would be applied.",
            "DRY RUN".yellow().bold(),
            count
        );
    } else {
        println!("{} Applied {} action(s).", "OK".green().bold(), count);
    }
}

fn print_check<A: std::fmt::Display>(report: &CheckReport<A>) {
    match report.status {
        CheckStatus::Converged => {
            println!("{} Environment has converged.", "OK".green().bold());
        }
        CheckStatus::Drifted => {
            println!("{} Environment has drifted:", "DRIFTED".red().bold());
            for item in &report.pending {
                let label = match &item.parent {
                    Some(parent) => format!("{} (dependency of {})", item.namespace, parent),
                    None => item.namespace.clone(),
                };
                println!("   {} {}", "!".red(), label.cyan());
                for action in &item.actions {
                    println!("      {} {}", "-".dimmed(), action);
                }
            }
            println!();
            println!("Run {} to converge.", "recon run".cyan());
        }
    }
}
