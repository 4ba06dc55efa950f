//! Environment back-ends for recon.
//!
//! Each back-end pairs an [`Environment`](recon_core::Environment) with the
//! components that know how to drive it, and a `ROOTS` list naming the
//! top-level components of its application.
//!
//! - [`memory`]: simulated state, structured `namespace:key:value` actions
//! - [`linux`]: a real host, literal shell command actions

pub mod linux;
pub mod memory;

pub use linux::{Command, LinuxEnv, Shell, SystemShell};
pub use memory::{MemoryEnv, SetAction};
