//! Components: per-namespace units of desired state
//!
//! - [`Component`]: the probing contract every component implements
//! - [`ComponentType`]: static descriptor naming a component's dependencies
//! - [`ComponentNode`]: an instantiated component owning its dependencies

mod kind;
mod node;

pub use kind::ComponentType;
pub use node::ComponentNode;

use crate::Result;
use crate::environment::Environment;
use crate::subconfig::Subconfig;

/// A named configuration domain that can compute what it still needs.
pub trait Component<E: Environment> {
    /// Namespace this component manages
    fn namespace(&self) -> &str;

    /// Desired state, sliced from the loaded configuration
    fn subconfig(&self) -> Result<Subconfig>;

    /// Compute the actions that would move `env` towards the desired state.
    ///
    /// Must not change `env`. Most components delegate to
    /// [`diff::plan`](crate::diff::plan).
    fn probe(&self, env: &E) -> Result<Vec<E::Action>>;
}
