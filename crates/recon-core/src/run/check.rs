//! Convergence check types
//!
//! A check probes every component like a batch run does but applies
//! nothing, reporting which components still want to act.

use serde::{Deserialize, Serialize};

/// Whether the environment already matches the desired state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    /// Probing produced no actions
    Converged,
    /// At least one component still has actions to apply
    Drifted,
}

/// A component with pending actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingItem<A> {
    pub namespace: String,
    /// Top-level component this dependency was probed for
    pub parent: Option<String>,
    /// Actions a run would apply, in order
    pub actions: Vec<A>,
}

/// Report from a convergence check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport<A> {
    pub status: CheckStatus,
    pub pending: Vec<PendingItem<A>>,
}

impl<A> CheckReport<A> {
    /// Create a converged report with nothing pending
    pub fn converged() -> Self {
        Self {
            status: CheckStatus::Converged,
            pending: Vec::new(),
        }
    }

    /// Create a report from pending items, converged when there are none
    pub fn with_pending(pending: Vec<PendingItem<A>>) -> Self {
        if pending.is_empty() {
            return Self::converged();
        }
        Self {
            status: CheckStatus::Drifted,
            pending,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.status == CheckStatus::Converged
    }
}
