//! Command implementations for recon-cli

pub mod backend;
pub mod namespaces;
pub mod reconcile;

pub use namespaces::run_namespaces;
pub use reconcile::{run_check, run_plan, run_run};
