//! Instantiated component trees

use std::fmt;

use super::{Component, ComponentType};
use crate::Result;
use crate::environment::Environment;

/// A built component together with the dependency instances it owns.
///
/// Nodes are created by [`ComponentType::instantiate`] and never shared
/// between parents.
pub struct ComponentNode<E: Environment + 'static> {
    kind: &'static ComponentType<E>,
    component: Box<dyn Component<E>>,
    dependencies: Vec<ComponentNode<E>>,
}

impl<E: Environment + 'static> ComponentNode<E> {
    pub(crate) fn new(
        kind: &'static ComponentType<E>,
        component: Box<dyn Component<E>>,
        dependencies: Vec<ComponentNode<E>>,
    ) -> Self {
        Self {
            kind,
            component,
            dependencies,
        }
    }

    /// Name of the component type this node was built from
    pub fn name(&self) -> &'static str {
        self.kind.name
    }

    /// Namespace managed by the component
    pub fn namespace(&self) -> &str {
        self.component.namespace()
    }

    pub fn component(&self) -> &dyn Component<E> {
        self.component.as_ref()
    }

    /// Immediate dependencies only; their own dependencies are not flattened.
    pub fn dependencies(&self) -> &[ComponentNode<E>] {
        &self.dependencies
    }

    /// Probe the component itself, without its dependencies
    pub fn probe(&self, env: &E) -> Result<Vec<E::Action>> {
        self.component.probe(env)
    }
}

impl<E: Environment + 'static> fmt::Debug for ComponentNode<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentNode")
            .field("name", &self.name())
            .field("namespace", &self.namespace())
            .field("dependencies", &self.dependencies)
            .finish()
    }
}
