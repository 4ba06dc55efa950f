//! Execution strategies

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How an [`Application`](super::Application) interleaves probing and applying
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Probe everything against the pre-run state, then apply once
    #[default]
    Batch,
    /// Probe and apply each component in turn, so later probes see earlier effects
    Serial,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Batch => write!(f, "all"),
            Strategy::Serial => write!(f, "series"),
        }
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" | "batch" => Ok(Strategy::Batch),
            "series" | "serial" => Ok(Strategy::Serial),
            other => Err(format!(
                "unknown strategy '{}', expected 'all' or 'series'",
                other
            )),
        }
    }
}

/// Options for [`Application::run`](super::Application::run)
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub strategy: Strategy,
    /// Probe only. Nothing is applied, whatever the strategy.
    pub dry_run: bool,
}

impl RunOptions {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            dry_run: false,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
