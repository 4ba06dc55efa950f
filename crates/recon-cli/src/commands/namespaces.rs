//! Namespaces command implementation

use colored::Colorize;

use recon_core::{Application, ComponentNode, Config};

use super::backend::Backend;
use crate::error::Result;

/// Run the namespaces command
///
/// Prints each root component of the back-end followed by the dependencies
/// it probes first.
pub fn run_namespaces<B: Backend>() -> Result<()> {
    let app = Application::<B>::new(Config::default(), B::roots())?;

    println!("{} {} components:", "=>".blue().bold(), B::NAME);
    for line in tree_lines(app.components()) {
        println!("{}", line);
    }

    Ok(())
}

fn tree_lines<B: Backend>(roots: &[ComponentNode<B>]) -> Vec<String> {
    let mut lines = Vec::new();
    for root in roots {
        lines.push(format!("   {}", root.name()));
        for dep in root.dependencies() {
            lines.push(format!("     {} {}", "<-".dimmed(), dep.name()));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_envs::{LinuxEnv, MemoryEnv};

    #[test]
    fn test_memory_tree() {
        colored::control::set_override(false);
        let app = Application::<MemoryEnv>::new(Config::default(), MemoryEnv::roots()).unwrap();
        assert_eq!(tree_lines(app.components()), vec!["   sshd", "     <- network"]);
    }

    #[test]
    fn test_linux_namespaces() {
        assert!(run_namespaces::<LinuxEnv>().is_ok());
    }
}
