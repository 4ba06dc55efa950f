//! Tests for Application orchestration: ordering, observation and failure

use std::sync::Arc;

use pretty_assertions::assert_eq;
use recon_core::{
    Application, CheckStatus, Component, ComponentType, Config, Environment, Error, Result,
    RunOptions, Strategy, Subconfig, diff,
};
use recon_test_utils::{Call, ConfigFixture, RecordingEnv, Write, key_value_component};
use serde_json::json;

key_value_component!(static NETWORK = "network", deps = []);
key_value_component!(static SSHD = "sshd", deps = [NETWORK]);
key_value_component!(static FIREWALL = "firewall", deps = [NETWORK]);
key_value_component!(static DNS = "dns", deps = []);
key_value_component!(static RESOLVER = "resolver", deps = [DNS]);
key_value_component!(static GATEWAY = "gateway", deps = [RESOLVER]);

/// Desires `hosts.entry` to equal whatever hostname the network namespace
/// currently reports, so its plan depends on earlier applies.
struct Hosts;

impl Component<RecordingEnv> for Hosts {
    fn namespace(&self) -> &str {
        "hosts"
    }

    fn subconfig(&self) -> Result<Subconfig> {
        Ok(Subconfig::new())
    }

    fn probe(&self, env: &RecordingEnv) -> Result<Vec<Write>> {
        let network = env.probe("network")?;
        let Some(hostname) = network.get("hostname") else {
            return Ok(Vec::new());
        };
        let desired = Subconfig::from_pairs([("entry", hostname.clone())]);
        diff::plan("hosts", &desired, env, |key, value| {
            Ok(Write::new("hosts", key, value.clone()))
        })
    }
}

fn build_hosts(_: Arc<Config>) -> Box<dyn Component<RecordingEnv>> {
    Box::new(Hosts)
}

static HOSTS: ComponentType<RecordingEnv> = ComponentType {
    name: "hosts",
    dependencies: &[&NETWORK],
    build: build_hosts,
};

fn config(toml: &str) -> Config {
    Config::parse(toml).unwrap()
}

fn network_and_sshd() -> Config {
    config(
        r#"
[network]
hostname = "web1"

[sshd]
listen = "0.0.0.0"
port = 22
"#,
    )
}

fn hostname_write() -> Write {
    Write::new("network", "hostname", json!("web1"))
}

#[test]
fn test_run_all_orders_dependency_before_component() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::new();

    let report = app.run_all(&mut env).unwrap();

    assert_eq!(
        env.applies(),
        vec![vec![
            hostname_write(),
            Write::new("sshd", "listen", json!("0.0.0.0")),
            Write::new("sshd", "port", json!(22)),
        ]]
    );
    assert_eq!(report.strategy, Strategy::Batch);
    assert_eq!(report.steps[0].namespace, "network");
    assert_eq!(report.steps[0].parent.as_deref(), Some("sshd"));
    assert_eq!(report.steps[1].parent, None);
}

#[test]
fn test_run_all_probes_everything_before_single_apply() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::new();

    app.run_all(&mut env).unwrap();

    let calls = env.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], Call::Probe("network".to_string()));
    assert_eq!(calls[1], Call::Probe("sshd".to_string()));
    assert!(matches!(calls[2], Call::Apply(_)));
}

#[test]
fn test_run_in_series_applies_after_each_probe() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::new();

    app.run_in_series(&mut env).unwrap();

    assert_eq!(
        env.calls(),
        vec![
            Call::Probe("network".to_string()),
            Call::Apply(vec![hostname_write()]),
            Call::Probe("sshd".to_string()),
            Call::Apply(vec![
                Write::new("sshd", "listen", json!("0.0.0.0")),
                Write::new("sshd", "port", json!(22)),
            ]),
        ]
    );
}

#[test]
fn test_run_in_series_applies_empty_batches() {
    let app = Application::new(config("[network]\nhostname = \"web1\"\n"), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::new();

    app.run_in_series(&mut env).unwrap();

    let applies = env.applies();
    assert_eq!(applies.len(), 2);
    assert!(applies[1].is_empty());
    assert!(env.state("sshd").is_empty());
}

#[test]
fn test_components_keep_declaration_order() {
    let config = config(
        r#"
[network]
hostname = "web1"

[sshd]
port = 22

[firewall]
policy = "drop"
"#,
    );
    let app = Application::new(config, &[&FIREWALL, &SSHD]).unwrap();
    let env = RecordingEnv::new();

    app.probe_all(&env).unwrap();

    assert_eq!(env.probes(), vec!["network", "firewall", "network", "sshd"]);
}

#[test]
fn test_shared_dependency_is_probed_per_parent_in_batch() {
    let config = config("[network]\nhostname = \"web1\"\n");
    let app = Application::new(config, &[&SSHD, &FIREWALL]).unwrap();
    let mut env = RecordingEnv::new();

    let report = app.run_all(&mut env).unwrap();

    // both private network instances probe pristine state
    assert_eq!(
        report.actions().cloned().collect::<Vec<_>>(),
        vec![hostname_write(), hostname_write()]
    );
}

#[test]
fn test_shared_dependency_converges_once_in_series() {
    let config = config("[network]\nhostname = \"web1\"\n");
    let app = Application::new(config, &[&SSHD, &FIREWALL]).unwrap();
    let mut env = RecordingEnv::new();

    let report = app.run_in_series(&mut env).unwrap();

    assert_eq!(report.actions().cloned().collect::<Vec<_>>(), vec![hostname_write()]);
    assert_eq!(env.probes(), vec!["network", "sshd", "network", "firewall"]);
}

#[test]
fn test_serial_probe_observes_dependency_effects() {
    let app = Application::new(config("[network]\nhostname = \"web1\"\n"), &[&HOSTS]).unwrap();
    let mut env = RecordingEnv::new();

    let report = app.run_in_series(&mut env).unwrap();

    assert_eq!(
        report.actions().cloned().collect::<Vec<_>>(),
        vec![hostname_write(), Write::new("hosts", "entry", json!("web1"))]
    );
    assert_eq!(env.state("hosts").get("entry"), Some(&json!("web1")));
}

#[test]
fn test_batch_probe_does_not_observe_dependency_effects() {
    let app = Application::new(config("[network]\nhostname = \"web1\"\n"), &[&HOSTS]).unwrap();
    let mut env = RecordingEnv::new();

    let report = app.run_all(&mut env).unwrap();

    assert_eq!(report.actions().cloned().collect::<Vec<_>>(), vec![hostname_write()]);
    assert!(env.state("hosts").is_empty());

    // a second batch run picks up what the first one changed
    app.run_all(&mut env).unwrap();
    assert_eq!(env.state("hosts").get("entry"), Some(&json!("web1")));
}

#[test]
fn test_only_immediate_dependencies_are_probed() {
    let config = config(
        r#"
[dns]
server = "1.1.1.1"

[resolver]
search = "lan"

[gateway]
address = "10.0.0.1"
"#,
    );
    let app = Application::new(config, &[&GATEWAY]).unwrap();
    let mut env = RecordingEnv::new();

    app.run_in_series(&mut env).unwrap();

    assert_eq!(env.probes(), vec!["resolver", "gateway"]);
    assert!(env.state("dns").is_empty());
    // the grandchild is still built and owned by its parent
    let resolver = &app.components()[0].dependencies()[0];
    assert_eq!(resolver.dependencies()[0].namespace(), "dns");
}

#[test]
fn test_hostname_scenario_reaches_fixed_point() {
    let app = Application::new(config("[network]\nhostname = \"web1\"\n"), &[&NETWORK]).unwrap();
    let mut env = RecordingEnv::new().seed("network", &[]);

    assert!(env.state("network").is_empty());
    let report = app.run_in_series(&mut env).unwrap();

    assert_eq!(report.actions().cloned().collect::<Vec<_>>(), vec![hostname_write()]);
    assert_eq!(env.state("network").get("hostname"), Some(&json!("web1")));
    assert!(app.probe_all(&env).unwrap().is_empty());
    assert!(app.run_in_series(&mut env).unwrap().is_noop());
}

#[test]
fn test_check_reports_drift_then_convergence() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::new().seed("sshd", &[("port", json!(22))]);

    let before = app.check(&env).unwrap();
    assert_eq!(before.status, CheckStatus::Drifted);
    assert_eq!(before.pending.len(), 2);
    assert_eq!(before.pending[0].namespace, "network");
    assert_eq!(before.pending[0].parent.as_deref(), Some("sshd"));
    assert_eq!(before.pending[0].actions, vec![hostname_write()]);
    assert_eq!(
        before.pending[1].actions,
        vec![Write::new("sshd", "listen", json!("0.0.0.0"))]
    );

    app.run_all(&mut env).unwrap();

    let after = app.check(&env).unwrap();
    assert!(after.is_converged());
    assert!(env.applies().len() == 1, "check must never apply");
}

#[test]
fn test_dry_run_applies_nothing() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::new();

    let report = app
        .run(&mut env, RunOptions::new(Strategy::Serial).with_dry_run(true))
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.action_count(), 3);
    assert!(env.applies().is_empty());
    assert!(env.state("network").is_empty());
}

#[test]
fn test_run_dispatches_on_strategy() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();

    let mut batch_env = RecordingEnv::new();
    app.run(&mut batch_env, RunOptions::new(Strategy::Batch)).unwrap();
    assert_eq!(batch_env.applies().len(), 1);

    let mut serial_env = RecordingEnv::new();
    app.run(&mut serial_env, RunOptions::new(Strategy::Serial)).unwrap();
    assert_eq!(serial_env.applies().len(), 2);
}

#[test]
fn test_unknown_namespace_aborts_run_without_rollback() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::strict(&["network"]);

    let err = app.run_in_series(&mut env).unwrap_err();

    assert!(matches!(err, Error::UnknownNamespace { ref namespace } if namespace == "sshd"));
    // the dependency applied before the failure stays applied
    assert_eq!(env.state("network").get("hostname"), Some(&json!("web1")));
}

#[test]
fn test_unknown_namespace_in_batch_applies_nothing() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::strict(&["network"]);

    let err = app.run_all(&mut env).unwrap_err();

    assert!(matches!(err, Error::UnknownNamespace { .. }));
    assert!(env.applies().is_empty());
}

#[test]
fn test_apply_failure_keeps_earlier_actions() {
    let app = Application::new(network_and_sshd(), &[&SSHD]).unwrap();
    let mut env = RecordingEnv::new().failing_on("sshd", "port");

    let err = app.run_all(&mut env).unwrap_err();

    assert!(matches!(err, Error::ActionFailed { .. }));
    assert_eq!(env.state("network").get("hostname"), Some(&json!("web1")));
    assert_eq!(env.state("sshd").get("listen"), Some(&json!("0.0.0.0")));
    assert_eq!(env.state("sshd").get("port"), None);
}

#[test]
fn test_empty_apply_is_noop() {
    let mut env = RecordingEnv::new().seed("network", &[("hostname", json!("web0"))]);
    env.apply(&[]).unwrap();
    assert_eq!(env.state("network").get("hostname"), Some(&json!("web0")));
}

#[test]
fn test_load_application_from_file() {
    let fixture = ConfigFixture::new("[network]\nhostname = \"web1\"\n");
    let app: Application<RecordingEnv> = Application::load(fixture.path(), &[&SSHD]).unwrap();

    assert_eq!(app.config().slice("network").len(), 1);
    assert_eq!(app.components().len(), 1);
    assert_eq!(app.components()[0].namespace(), "sshd");
}

#[test]
fn test_load_application_missing_file() {
    let fixture = ConfigFixture::new("");
    let missing = fixture.dir().join("missing.toml");

    let result = Application::<RecordingEnv>::load(&missing, &[&SSHD]);

    assert!(matches!(result, Err(Error::ConfigNotFound { .. })));
}
