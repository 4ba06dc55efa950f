//! Declarative configuration reconciliation
//!
//! A caller describes the desired state of named configuration domains
//! ("namespaces"). Components diff that desired state against what an
//! environment reports and produce actions; applying the actions converges
//! the environment.
//!
//! - **Subconfig**: ordered key/value state with difference and union
//! - **Environment**: probe a namespace, apply actions
//! - **Component**: diff one namespace, declaring static dependencies
//! - **Application**: batch and serial orchestration over root components
//!
//! # Architecture
//!
//! ```text
//!   Config ──slice──> Component ──probe──> Environment
//!                        │                     ▲
//!                        └──── actions ──apply─┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use recon_core::{Application, RunOptions, Strategy};
//!
//! let app = Application::load(path, &[&SSHD])?;
//! let report = app.run(&mut env, RunOptions::new(Strategy::Serial))?;
//! assert!(app.check(&env)?.is_converged());
//! ```

pub mod component;
pub mod config;
pub mod diff;
pub mod environment;
pub mod error;
pub mod run;
pub mod subconfig;

pub use component::{Component, ComponentNode, ComponentType};
pub use config::Config;
pub use environment::Environment;
pub use error::{Error, Result};
pub use run::{
    Application, CheckReport, CheckStatus, PendingItem, RunOptions, RunReport, Step, Strategy,
};
pub use subconfig::Subconfig;

pub use serde_json::Value;
