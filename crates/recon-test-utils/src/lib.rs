//! Shared test utilities for the recon workspace.
//!
//! This crate provides standardised doubles so crate test suites don't each
//! grow their own. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`env`]: [`RecordingEnv`], an environment that records probe/apply calls
//! - [`component`]: [`KeyValue`] components and [`key_value_component!`]
//! - [`fixture`]: configuration files in temporary directories
//! - [`host`]: [`FakeHost`], a simulated Linux host behind the `Shell` seam

pub mod component;
pub mod env;
pub mod fixture;
pub mod host;

pub use component::KeyValue;
pub use env::{Call, RecordingEnv, Write};
pub use fixture::ConfigFixture;
pub use host::FakeHost;

pub use recon_core;
