//! Reports produced by reconciliation runs

use serde::Serialize;

use super::strategy::Strategy;

/// One probed component and the actions it produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step<A> {
    /// Namespace of the probed component
    pub namespace: String,
    /// Namespace of the top-level component this dependency was probed for
    pub parent: Option<String>,
    /// Actions produced by the probe, in order
    pub actions: Vec<A>,
}

/// Report from a run, one step per probe in probe order
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<A> {
    pub strategy: Strategy,
    /// True when nothing was applied
    pub dry_run: bool,
    pub steps: Vec<Step<A>>,
}

impl<A> RunReport<A> {
    pub fn new(strategy: Strategy, steps: Vec<Step<A>>) -> Self {
        Self {
            strategy,
            dry_run: false,
            steps,
        }
    }

    pub fn dry_run(strategy: Strategy, steps: Vec<Step<A>>) -> Self {
        Self {
            strategy,
            dry_run: true,
            steps,
        }
    }

    /// Every action in probe order
    pub fn actions(&self) -> impl Iterator<Item = &A> {
        self.steps.iter().flat_map(|step| step.actions.iter())
    }

    pub fn action_count(&self) -> usize {
        self.steps.iter().map(|step| step.actions.len()).sum()
    }

    /// True when no component wanted to change anything
    pub fn is_noop(&self) -> bool {
        self.action_count() == 0
    }
}
