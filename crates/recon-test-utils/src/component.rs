//! [`KeyValue`] component and the [`key_value_component!`] declaration macro.

use std::sync::Arc;

use recon_core::{Component, Config, Result, Subconfig, diff};

use crate::env::{RecordingEnv, Write};

/// Diffs its configuration slice against a [`RecordingEnv`] namespace.
pub struct KeyValue {
    namespace: &'static str,
    config: Arc<Config>,
}

impl KeyValue {
    pub fn new(namespace: &'static str, config: Arc<Config>) -> Self {
        Self { namespace, config }
    }
}

impl Component<RecordingEnv> for KeyValue {
    fn namespace(&self) -> &str {
        self.namespace
    }

    fn subconfig(&self) -> Result<Subconfig> {
        Ok(self.config.slice(self.namespace))
    }

    fn probe(&self, env: &RecordingEnv) -> Result<Vec<Write>> {
        let desired = self.subconfig()?;
        diff::plan(self.namespace, &desired, env, |key, value| {
            Ok(Write::new(self.namespace, key, value.clone()))
        })
    }
}

/// Declare a static [`KeyValue`] component type.
///
/// ```rust,ignore
/// key_value_component!(static NETWORK = "network", deps = []);
/// key_value_component!(static SSHD = "sshd", deps = [NETWORK]);
/// ```
#[macro_export]
macro_rules! key_value_component {
    ($vis:vis static $ident:ident = $name:literal, deps = [$($dep:ident),* $(,)?]) => {
        $vis static $ident: $crate::recon_core::ComponentType<$crate::RecordingEnv> =
            $crate::recon_core::ComponentType {
                name: $name,
                dependencies: &[$(&$dep),*],
                build: |config| {
                    ::std::boxed::Box::new($crate::KeyValue::new($name, config))
                        as ::std::boxed::Box<dyn $crate::recon_core::Component<$crate::RecordingEnv>>
                },
            };
    };
}
