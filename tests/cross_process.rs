//! Cross-process behavior of the file backend, driven through the CLI binary.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::thread;
use tempfile::TempDir;

const BIN: &str = env!("CARGO_BIN_EXE_lockman");

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("lockman.yaml");
    let store_dir = dir.join("store");
    std::fs::write(
        &path,
        format!(
            "temporary_directory: '{}'\nsecret_key: cross-process-test\ndefault_lock_timeout: 60\n",
            store_dir.display()
        ),
    )
    .unwrap();
    path
}

fn lockman(config: &Path, args: &[&str]) -> Output {
    Command::new(BIN)
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run lockman binary")
}

fn owner_of(output: &Output) -> String {
    let handle: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    handle["owner"].as_str().unwrap().to_string()
}

#[test]
fn concurrent_processes_get_exactly_one_lock() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let processes = 8;

    let handles: Vec<_> = (0..processes)
        .map(|_| {
            let config = config.clone();
            thread::spawn(move || lockman(&config, &["acquire", "shared", "--timeout", "0"]))
        })
        .collect();

    let outputs: Vec<Output> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = outputs.iter().filter(|o| o.status.success()).count();
    let conflicts = outputs
        .iter()
        .filter(|o| o.status.code() == Some(4))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(conflicts, processes - 1);
}

#[test]
fn lock_held_by_one_process_is_released_by_another() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let first = lockman(&config, &["acquire", "doc-42"]);
    assert!(first.status.success());
    let owner = owner_of(&first);

    let blocked = lockman(&config, &["acquire", "doc-42"]);
    assert_eq!(blocked.status.code(), Some(4));
    assert!(String::from_utf8_lossy(&blocked.stderr).contains("doc-42"));

    // A stranger's release leaves the lock alone.
    let stranger = lockman(&config, &["release", "doc-42", "--owner", "someone-else"]);
    assert!(stranger.status.success());
    assert_eq!(lockman(&config, &["acquire", "doc-42"]).status.code(), Some(4));

    let released = lockman(&config, &["release", "doc-42", "--owner", &owner]);
    assert!(released.status.success());
    assert!(lockman(&config, &["acquire", "doc-42"]).status.success());
}

#[test]
fn purge_clears_locks_for_every_process() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    assert!(lockman(&config, &["acquire", "a", "--timeout", "0"]).status.success());
    assert!(lockman(&config, &["acquire", "b"]).status.success());

    assert!(lockman(&config, &["purge"]).status.success());

    let list = lockman(&config, &["list"]);
    assert!(String::from_utf8_lossy(&list.stdout).contains("No active locks."));
    assert!(lockman(&config, &["acquire", "a"]).status.success());
}

#[test]
fn path_is_shared_by_identical_configs() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());

    let a = lockman(&config, &["path"]);
    let b = lockman(&config, &["path"]);

    assert!(a.status.success());
    assert_eq!(a.stdout, b.stdout);
    assert!(String::from_utf8_lossy(&a.stdout).contains("store"));
}

#[cfg(unix)]
#[test]
fn exec_holds_lock_while_child_runs() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_config(temp_dir.path());
    let config_arg = config.display().to_string();

    // The child tries to take the same lock through a separate process.
    let script = format!("'{}' --config '{}' acquire job", BIN, config_arg);
    let output = lockman(&config, &["exec", "job", "--", "sh", "-c", &script]);

    assert_eq!(output.status.code(), Some(4));
    assert!(lockman(&config, &["acquire", "job"]).status.success());
}
