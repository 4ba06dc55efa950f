//! Application orchestration
//!
//! This module provides:
//! - **application**: the [`Application`] owning the root component list
//! - **strategy**: batch and serial execution strategies
//! - **report**: what a run probed and applied
//! - **check**: convergence verification without applying

mod application;
mod check;
mod report;
mod strategy;

pub use application::Application;
pub use check::{CheckReport, CheckStatus, PendingItem};
pub use report::{RunReport, Step};
pub use strategy::{RunOptions, Strategy};
