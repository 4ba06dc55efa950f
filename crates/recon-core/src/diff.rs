//! The desired-versus-observed diff shared by key/value components

use serde_json::Value;

use crate::Result;
use crate::environment::Environment;
use crate::subconfig::Subconfig;

/// Probe `namespace` in `env` and turn every desired entry that is missing
/// or different into one action.
///
/// Actions follow `desired`'s order. Observed keys that are not desired are
/// left alone: the diff only adds or overwrites, it never removes. The
/// namespace is probed even when `desired` is empty, so an environment that
/// cannot observe it still fails loudly.
///
/// # Errors
///
/// Propagates probe errors and the first error returned by `to_action`.
pub fn plan<E, F>(
    namespace: &str,
    desired: &Subconfig,
    env: &E,
    mut to_action: F,
) -> Result<Vec<E::Action>>
where
    E: Environment,
    F: FnMut(&str, &Value) -> Result<E::Action>,
{
    let observed = env.probe(namespace)?;
    let delta = desired.difference(&observed);
    tracing::debug!(
        namespace,
        desired = desired.len(),
        observed = observed.len(),
        delta = delta.len(),
        "Computed delta"
    );
    delta.iter().map(|(key, value)| to_action(key, value)).collect()
}
