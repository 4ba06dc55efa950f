//! Environment trait for observing and changing external state

use std::fmt::Debug;

use crate::Result;
use crate::subconfig::Subconfig;

/// The world a reconciliation run converges.
///
/// Each back-end picks its own [`Action`](Environment::Action) type: a
/// structured triple for an in-memory simulation, a literal shell command for
/// a real host. Nothing is shared across back-ends beyond "a sequence of
/// actions can be applied in order".
pub trait Environment {
    /// Unit of effect produced by probing components
    type Action: Clone + Debug;

    /// Observe the current state of a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNamespace`](crate::Error::UnknownNamespace) for
    /// namespaces this environment cannot observe.
    fn probe(&self, namespace: &str) -> Result<Subconfig>;

    /// Execute `actions` in order.
    ///
    /// An empty slice must leave the environment untouched. There is no
    /// rollback: actions applied before a failing one stay applied.
    fn apply(&mut self, actions: &[Self::Action]) -> Result<()>;
}
