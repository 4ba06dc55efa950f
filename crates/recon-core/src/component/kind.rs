//! Static component descriptors

use std::fmt;
use std::sync::Arc;

use super::{Component, ComponentNode};
use crate::config::Config;
use crate::environment::Environment;
use crate::{Error, Result};

/// Static description of a component type.
///
/// Dependency lists are fixed at compile time and refer to other
/// descriptors, never to instances:
///
/// ```ignore
/// static NETWORK: ComponentType<MemoryEnv> = ComponentType {
///     name: "network",
///     dependencies: &[],
///     build: build_network,
/// };
///
/// static SSHD: ComponentType<MemoryEnv> = ComponentType {
///     name: "sshd",
///     dependencies: &[&NETWORK],
///     build: build_sshd,
/// };
/// ```
pub struct ComponentType<E: Environment + 'static> {
    /// Identifier used in logs and error messages, usually the namespace
    pub name: &'static str,
    /// Component types instantiated for, and owned by, each instance
    pub dependencies: &'static [&'static ComponentType<E>],
    /// Constructor receiving the shared configuration
    pub build: fn(Arc<Config>) -> Box<dyn Component<E>>,
}

impl<E: Environment + 'static> ComponentType<E> {
    /// Build this component and, recursively, every dependency it declares.
    ///
    /// Each call produces fresh dependency instances: two parents declaring
    /// the same dependency type each own a private instance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DependencyCycle`] when the declared dependencies
    /// lead back to a type already being built.
    pub fn instantiate(&'static self, config: &Arc<Config>) -> Result<ComponentNode<E>> {
        self.instantiate_within(config, &mut Vec::new())
    }

    fn instantiate_within(
        &'static self,
        config: &Arc<Config>,
        path: &mut Vec<&'static ComponentType<E>>,
    ) -> Result<ComponentNode<E>> {
        if path.iter().any(|seen| std::ptr::eq(*seen, self)) {
            let chain = path
                .iter()
                .map(|kind| kind.name)
                .chain(std::iter::once(self.name))
                .collect::<Vec<_>>()
                .join(" -> ");
            return Err(Error::DependencyCycle { chain });
        }

        path.push(self);
        let dependencies = self
            .dependencies
            .iter()
            .map(|dep| dep.instantiate_within(config, path))
            .collect::<Result<Vec<_>>>()?;
        path.pop();

        Ok(ComponentNode::new(
            self,
            (self.build)(Arc::clone(config)),
            dependencies,
        ))
    }
}

impl<E: Environment + 'static> fmt::Debug for ComponentType<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("name", &self.name)
            .field(
                "dependencies",
                &self.dependencies.iter().map(|d| d.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}
