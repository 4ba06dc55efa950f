//! Application implementation
//!
//! The Application owns the instantiated root components and drives them
//! against an environment with one of two strategies.

use std::path::Path;
use std::sync::Arc;

use super::check::{CheckReport, PendingItem};
use super::report::{RunReport, Step};
use super::strategy::{RunOptions, Strategy};
use crate::Result;
use crate::component::{ComponentNode, ComponentType};
use crate::config::Config;
use crate::environment::Environment;

/// A reconciliation application over environments of type `E`.
///
/// Only one level of dependencies is consulted: for every root component,
/// its immediate dependencies are probed (and, in the serial strategy,
/// applied) before the component itself. Dependencies of dependencies are
/// built but never probed.
pub struct Application<E: Environment + 'static> {
    config: Arc<Config>,
    components: Vec<ComponentNode<E>>,
}

impl<E: Environment + 'static> Application<E> {
    /// Instantiate `roots`, in order, against `config`
    ///
    /// # Errors
    ///
    /// Returns an error if a declared dependency graph contains a cycle.
    pub fn new(config: Config, roots: &[&'static ComponentType<E>]) -> Result<Self> {
        let config = Arc::new(config);
        let components = roots
            .iter()
            .map(|root| root.instantiate(&config))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            components = ?components.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "Instantiated application"
        );

        Ok(Self { config, components })
    }

    /// Load the configuration file at `path` and instantiate `roots`
    pub fn load(path: &Path, roots: &[&'static ComponentType<E>]) -> Result<Self> {
        Self::new(Config::load(path)?, roots)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Root components in declaration order
    pub fn components(&self) -> &[ComponentNode<E>] {
        &self.components
    }

    /// Probe every root component and its immediate dependencies against
    /// the current state of `env`, without applying anything.
    ///
    /// Actions are ordered dependencies-of-A, A, dependencies-of-B, B, ...
    pub fn probe_all(&self, env: &E) -> Result<Vec<E::Action>> {
        let steps = self.probe_steps(env)?;
        let actions: Vec<E::Action> = steps.into_iter().flat_map(|s| s.actions).collect();
        tracing::debug!(actions = ?actions, "Probe all finished");
        Ok(actions)
    }

    /// Batch strategy: probe everything first, then apply all actions in a
    /// single call.
    ///
    /// Every probe sees the pre-run state of `env`.
    pub fn run_all(&self, env: &mut E) -> Result<RunReport<E::Action>> {
        let report = RunReport::new(Strategy::Batch, self.probe_steps(env)?);
        let actions: Vec<E::Action> = report.actions().cloned().collect();

        tracing::info!(count = actions.len(), "Running all");
        env.apply(&actions).inspect_err(|e| {
            tracing::warn!(error = %e, "Batch apply failed");
        })?;

        Ok(report)
    }

    /// Serial strategy: for each root component, probe and apply each
    /// immediate dependency, then probe and apply the component.
    ///
    /// Later probes observe the effects of earlier applies.
    pub fn run_in_series(&self, env: &mut E) -> Result<RunReport<E::Action>> {
        let mut steps = Vec::new();

        for component in &self.components {
            for dep in component.dependencies() {
                let step = probe_step(dep, Some(component), env)?;
                tracing::info!(
                    dependency = dep.namespace(),
                    component = component.namespace(),
                    actions = ?step.actions,
                    "Running dependency"
                );
                apply_step(env, &step)?;
                steps.push(step);
            }

            let step = probe_step(component, None, env)?;
            tracing::info!(
                component = component.namespace(),
                actions = ?step.actions,
                "Running component"
            );
            apply_step(env, &step)?;
            steps.push(step);
        }

        Ok(RunReport::new(Strategy::Serial, steps))
    }

    /// Run with the given options
    ///
    /// A dry run probes every component against the current state and
    /// applies nothing, whichever strategy is selected.
    pub fn run(&self, env: &mut E, options: RunOptions) -> Result<RunReport<E::Action>> {
        if options.dry_run {
            let steps = self.probe_steps(env)?;
            return Ok(RunReport::dry_run(options.strategy, steps));
        }

        match options.strategy {
            Strategy::Batch => self.run_all(env),
            Strategy::Serial => self.run_in_series(env),
        }
    }

    /// Check whether `env` has converged to the desired state
    ///
    /// Probes like [`probe_all`](Self::probe_all) and lists every component
    /// that still has actions pending.
    pub fn check(&self, env: &E) -> Result<CheckReport<E::Action>> {
        let pending = self
            .probe_steps(env)?
            .into_iter()
            .filter(|step| !step.actions.is_empty())
            .map(|step| PendingItem {
                namespace: step.namespace,
                parent: step.parent,
                actions: step.actions,
            })
            .collect();

        Ok(CheckReport::with_pending(pending))
    }

    fn probe_steps(&self, env: &E) -> Result<Vec<Step<E::Action>>> {
        let mut steps = Vec::new();
        for component in &self.components {
            for dep in component.dependencies() {
                steps.push(probe_step(dep, Some(component), env)?);
            }
            steps.push(probe_step(component, None, env)?);
        }
        Ok(steps)
    }
}

fn probe_step<E: Environment + 'static>(
    node: &ComponentNode<E>,
    parent: Option<&ComponentNode<E>>,
    env: &E,
) -> Result<Step<E::Action>> {
    let actions = node.probe(env)?;
    tracing::debug!(
        component = node.namespace(),
        count = actions.len(),
        "Probed component"
    );
    Ok(Step {
        namespace: node.namespace().to_string(),
        parent: parent.map(|p| p.namespace().to_string()),
        actions,
    })
}

fn apply_step<E: Environment>(env: &mut E, step: &Step<E::Action>) -> Result<()> {
    env.apply(&step.actions).inspect_err(|e| {
        tracing::warn!(component = %step.namespace, error = %e, "Apply failed");
    })
}
