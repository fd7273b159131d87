//! Cross-crate scenarios: one remote configuration repository feeding
//! several hosts over repeated runs.

use confsync_core::{Error, Orchestrator, OrchestratorConfig, SyncTarget, sync_and_update};
use confsync_test_utils::{CallLog, RecordingOperator, SourceRepo};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn copy_config(entries: &[(&str, &Path)]) -> Vec<u8> {
    let map: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(source, dest)| (source.to_string(), json!(dest.to_string_lossy())))
        .collect();
    serde_json::to_vec(&map).unwrap()
}

fn orchestrator(source: &SourceRepo, work: &Path, log: &CallLog) -> Orchestrator {
    Orchestrator::new(OrchestratorConfig {
        target: SyncTarget::new(source.url(), work),
        operators: vec![
            RecordingOperator::new("reload", log).boxed(),
            RecordingOperator::new("validate", log).boxed(),
        ],
    })
    .unwrap()
}

#[test]
fn fleet_of_hosts_converges_on_each_commit() {
    let dest_a = TempDir::new().unwrap();
    let dest_b = TempDir::new().unwrap();
    let config_a = copy_config(&[("hosts/app.conf", dest_a.path())]);
    let source = SourceRepo::with_files(&[
        ("config.json", config_a.as_slice()),
        ("hosts/app.conf", b"v1"),
    ]);
    let host_a = TempDir::new().unwrap();
    let host_b = TempDir::new().unwrap();

    assert!(sync_and_update(source.url(), host_a.path()).unwrap().changed);
    assert!(sync_and_update(source.url(), host_b.path()).unwrap().changed);
    assert_eq!(fs::read_to_string(dest_a.path().join("app.conf")).unwrap(), "v1");

    let config_b = copy_config(&[("hosts/app.conf", dest_b.path())]);
    source.commit_files(
        &[("config.json", config_b.as_slice()), ("hosts/app.conf", b"v2")],
        "move destination",
    );

    for host in [host_a.path(), host_b.path()] {
        let report = sync_and_update(source.url(), host).unwrap();
        assert!(report.changed);
        assert_eq!(report.head, Some(source.head().to_string()));
    }

    // The old destination keeps the last content it was given
    assert_eq!(fs::read_to_string(dest_a.path().join("app.conf")).unwrap(), "v1");
    assert_eq!(fs::read_to_string(dest_b.path().join("app.conf")).unwrap(), "v2");
}

#[test]
fn switching_from_copy_to_task_routing() {
    let dest = TempDir::new().unwrap();
    let config = copy_config(&[("app.conf", dest.path())]);
    let source = SourceRepo::with_files(&[
        ("config.json", config.as_slice()),
        ("app.conf", b"copied"),
    ]);
    let work = TempDir::new().unwrap();
    let log = CallLog::new();
    let mut orchestrator = orchestrator(&source, work.path(), &log);

    let first = orchestrator.run().unwrap();
    assert_eq!(first.update.unwrap().written.len(), 1);
    assert!(log.all().is_empty());

    source.commit_files(
        &[(
            "config.json",
            br#"{"app.conf": [{"name": "validate"}, {"name": "reload", "args": ["app"]}]}"#,
        )],
        "route through operators",
    );
    let second = orchestrator.run().unwrap().update.unwrap();

    assert_eq!(second.submitted, 2);
    assert_eq!(
        second.operators_run,
        vec!["reload".to_string(), "validate".to_string()]
    );
    assert_eq!(
        log.run_order(),
        vec!["reload".to_string(), "validate".to_string()]
    );
}

#[test]
fn broken_config_commit_fails_until_fixed() {
    let source = SourceRepo::with_files(&[("config.json", b"{}")]);
    let work = TempDir::new().unwrap();
    let log = CallLog::new();
    let mut orchestrator = orchestrator(&source, work.path(), &log);
    orchestrator.run().unwrap();

    source.commit_files(&[("config.json", b"{ not json")], "typo");
    let err = orchestrator.run().unwrap_err();
    assert!(
        matches!(err, Error::Update(confsync_updater::Error::ConfigParse { .. })),
        "got: {}",
        err
    );

    // The broken commit is already pulled, so the next run has nothing new
    assert!(!orchestrator.run().unwrap().changed);

    source.commit_files(
        &[
            ("config.json", br#"{"a.txt": [{"name": "reload"}]}"#),
            ("a.txt", b"a"),
        ],
        "fix",
    );
    let report = orchestrator.run().unwrap();
    assert!(report.changed);
    assert_eq!(log.run_count("reload"), 1);
}

#[test]
fn local_edit_blocks_pull_and_update() {
    let dest = TempDir::new().unwrap();
    let config = copy_config(&[("app.conf", dest.path())]);
    let source = SourceRepo::with_files(&[
        ("config.json", config.as_slice()),
        ("app.conf", b"v1"),
    ]);
    let work = TempDir::new().unwrap();
    sync_and_update(source.url(), work.path()).unwrap();

    fs::write(work.path().join("app.conf"), "hand edited").unwrap();
    source.commit_files(&[("app.conf", b"v2")], "bump");

    let err = sync_and_update(source.url(), work.path()).unwrap_err();

    assert!(
        matches!(err, Error::Sync(confsync_git::Error::LocalChanges { .. })),
        "got: {}",
        err
    );
    assert_eq!(fs::read_to_string(dest.path().join("app.conf")).unwrap(), "v1");
}
