//! End-to-end reconciliation scenarios across recon-core and recon-envs
//!
//! Each scenario loads a configuration file from disk, instantiates a
//! back-end's root components, and reconciles an environment until it
//! converges.

use pretty_assertions::assert_eq;
use recon_core::{Application, CheckStatus, Environment, Error, RunOptions, Strategy};
use recon_envs::linux::{self, Command, LinuxEnv};
use recon_envs::memory::{self, MemoryEnv, SetAction};
use recon_test_utils::{ConfigFixture, FakeHost};
use rstest::rstest;
use serde_json::json;

const MEMORY_TOML: &str = r#"
[network]
hostname = "web1"
domain = "lan"

[sshd]
port = 2222
permit_root_login = false
"#;

const LINUX_TOML: &str = r#"
[network]
hostname = "web1"

[aider]
packages = ["git", "curl", "jq"]
"#;

// =============================================================================
// Memory back-end
// =============================================================================

#[rstest]
#[case::batch("all")]
#[case::serial("series")]
fn test_memory_reconciles_from_file(#[case] strategy: &str) {
    let fixture = ConfigFixture::new(MEMORY_TOML);
    let app = Application::load(fixture.path(), memory::ROOTS).unwrap();
    let mut env = MemoryEnv::new();
    let options = RunOptions::new(strategy.parse::<Strategy>().unwrap());

    assert_eq!(app.check(&env).unwrap().status, CheckStatus::Drifted);

    let report = app.run(&mut env, options).unwrap();

    assert_eq!(report.action_count(), 4);
    assert_eq!(
        env.to_json(),
        json!({
            "network": {"hostname": "web1", "domain": "lan"},
            "sshd": {"port": 2222, "permit_root_login": false}
        })
    );
    assert!(app.check(&env).unwrap().is_converged());
}

#[test]
fn test_memory_dry_run_leaves_environment_untouched() {
    let fixture = ConfigFixture::new(MEMORY_TOML);
    let app = Application::load(fixture.path(), memory::ROOTS).unwrap();
    let mut env = MemoryEnv::new();

    let report = app
        .run(&mut env, RunOptions::new(Strategy::Serial).with_dry_run(true))
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.action_count(), 4);
    assert_eq!(env.to_json(), json!({}));
}

#[test]
fn test_memory_drift_is_repaired() {
    let fixture = ConfigFixture::new(MEMORY_TOML);
    let app = Application::load(fixture.path(), memory::ROOTS).unwrap();
    let mut env = MemoryEnv::new();
    app.run_all(&mut env).unwrap();

    // someone edits the port out from under us
    env.apply(&[SetAction::new("sshd", "port", json!(22))]).unwrap();

    let check = app.check(&env).unwrap();
    assert_eq!(check.status, CheckStatus::Drifted);
    assert_eq!(check.pending.len(), 1);
    assert_eq!(check.pending[0].namespace, "sshd");
    assert_eq!(check.pending[0].parent, None);

    let report = app.run_all(&mut env).unwrap();
    assert_eq!(
        report.actions().cloned().collect::<Vec<_>>(),
        vec![SetAction::new("sshd", "port", json!(2222))]
    );
}

#[test]
fn test_memory_encoded_interop() {
    let mut env = MemoryEnv::new();
    env.apply_encoded(&["network:hostname:web1", "network:domain:lan"])
        .unwrap();

    let fixture = ConfigFixture::new(MEMORY_TOML);
    let app = Application::load(fixture.path(), memory::ROOTS).unwrap();

    let pending: Vec<String> = app
        .probe_all(&env)
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(pending, vec!["sshd:port:2222", "sshd:permit_root_login:false"]);
}

#[test]
fn test_memory_rejects_malformed_encoded_action() {
    let mut env = MemoryEnv::new();
    let err = env
        .apply_encoded(&["network:hostname:web1", "network-hostname"])
        .unwrap_err();

    assert!(matches!(err, Error::MalformedAction { .. }));
    assert_eq!(env.to_json(), json!({}));
}

// =============================================================================
// Linux back-end
// =============================================================================

#[rstest]
#[case::batch(Strategy::Batch)]
#[case::serial(Strategy::Serial)]
fn test_linux_installs_missing_packages(#[case] strategy: Strategy) {
    let fixture = ConfigFixture::new(LINUX_TOML);
    let app = Application::load(fixture.path(), linux::ROOTS).unwrap();
    let host = FakeHost::new().with_packages(&["git", "bash"]).with_hostname("web1");
    let mut env = LinuxEnv::with_shell(host.clone());

    let report = app.run(&mut env, RunOptions::new(strategy)).unwrap();

    assert_eq!(
        report.actions().cloned().collect::<Vec<_>>(),
        vec![
            Command::new("dnf install -y curl"),
            Command::new("dnf install -y jq"),
        ]
    );
    assert_eq!(host.packages(), vec!["bash", "curl", "git", "jq"]);
    assert!(app.check(&env).unwrap().is_converged());
}

#[test]
fn test_linux_serial_failure_keeps_earlier_changes() {
    let fixture = ConfigFixture::new(LINUX_TOML);
    let app = Application::load(fixture.path(), linux::ROOTS).unwrap();
    let host = FakeHost::new()
        .with_hostname("localhost")
        .failing("dnf install -y curl");
    let mut env = LinuxEnv::with_shell(host.clone());

    let err = app.run_in_series(&mut env).unwrap_err();

    assert!(matches!(err, Error::ActionFailed { .. }));
    // the network component ran first and is not rolled back
    assert_eq!(host.hostname().as_deref(), Some("web1"));
    assert_eq!(host.packages(), vec!["git"]);

    let check = app.check(&env).unwrap();
    let pending: Vec<&str> = check.pending.iter().map(|p| p.namespace.as_str()).collect();
    assert_eq!(pending, vec!["aider"]);
}

#[test]
fn test_linux_rejects_unsupported_network_key() {
    let fixture = ConfigFixture::new("[network]\nhostname = \"web1\"\nmtu = 9000\n\n[aider]\n");
    let app = Application::load(fixture.path(), linux::ROOTS).unwrap();
    let host = FakeHost::new();
    let mut env = LinuxEnv::with_shell(host.clone());

    let err = app.run_all(&mut env).unwrap_err();

    assert!(matches!(err, Error::InvalidKey { ref key, .. } if key == "mtu"));
    assert!(host.changes().is_empty());
}

#[test]
fn test_linux_requires_every_component_namespace() {
    let fixture = ConfigFixture::new("[network]\nhostname = \"web1\"\n");
    let app = Application::load(fixture.path(), linux::ROOTS).unwrap();
    let env = LinuxEnv::with_shell(FakeHost::new());

    let err = app.probe_all(&env).unwrap_err();

    assert!(matches!(err, Error::NamespaceNotConfigured { ref namespace } if namespace == "aider"));
}
