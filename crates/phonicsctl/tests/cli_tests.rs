//! CLI integration tests for phonicsctl
//!
//! Each test runs the binary against its own temporary data dir and an
//! empty config file, so no user config or save is touched.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::{tempdir, TempDir};

const SAVE_FILE: &str = "phonics_progress_v1.json";

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "").unwrap();
        Self { dir }
    }

    fn data_dir(&self) -> PathBuf {
        self.dir.path().join("data")
    }

    fn save_path(&self) -> PathBuf {
        self.data_dir().join(SAVE_FILE)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_phonicsctl"))
            .arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .args(args)
            .env("PHONICS_DATA_DIR", self.data_dir())
            .env_remove("PHONICS_CONFIG")
            .env_remove("PHONICS_LOG")
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run phonicsctl")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn read_save(path: &Path) -> serde_json::Value {
    let bytes = fs::read(path).expect("save file should exist");
    serde_json::from_slice(&bytes).expect("save file should be JSON")
}

#[test]
fn test_stages_lists_builtin_curriculum() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["stages"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("Cat Meadow"));
    assert!(out.contains("Pig Pond"));
    // Listing reads only
    assert!(!sandbox.save_path().exists());
}

#[test]
fn test_unknown_stage_exits_with_error() {
    let sandbox = Sandbox::new();
    for cmd in ["stage", "collection", "battle", "difficulty", "unlock"] {
        let output = sandbox.run(&[cmd, "99"]);
        assert!(!output.status.success(), "{} 99 should fail", cmd);
        assert!(
            stderr(&output).contains("Stage 99 not found"),
            "{} stderr: {}",
            cmd,
            stderr(&output)
        );
    }
    assert!(!sandbox.save_path().exists());
}

#[test]
fn test_locked_stage_refuses_play_events() {
    let sandbox = Sandbox::new();
    let attempts: [&[&str]; 3] = [
        &["blend", "2", "pig"],
        &["collect", "2", "10"],
        &["complete", "2", "100"],
    ];
    for args in attempts {
        let output = sandbox.run(args);
        assert!(!output.status.success(), "{:?} should be refused", args);
        assert!(stderr(&output).contains("locked"), "stderr: {}", stderr(&output));
    }
    // Nothing was recorded
    assert!(!sandbox.save_path().exists());
}

#[test]
fn test_completion_writes_save_and_opens_next_stage() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["blend", "1", "cat"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let output = sandbox.run(&["complete", "1", "120"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Stage 2 (Pig Pond) is open"));

    let save = read_save(&sandbox.save_path());
    assert_eq!(save["schemaVersion"], 1);
    assert_eq!(save["stages"]["1"]["attempts"], 1);
    assert_eq!(save["stages"]["1"]["bestScore"], 120);
    assert_eq!(save["stages"]["1"]["stars"], 3);
    assert_eq!(save["stages"]["2"]["unlocked"], true);
    // 3 stars * 50 + 120 / 10
    assert_eq!(save["currencyBalance"], 162);

    // Stage 2 is now playable
    let output = sandbox.run(&["blend", "2", "pig"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_reset_requires_confirmation() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["currency", "--add", "40"]).status.success());

    let output = sandbox.run(&["reset"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("--yes"));
    assert_eq!(read_save(&sandbox.save_path())["currencyBalance"], 40);

    let output = sandbox.run(&["reset", "--yes"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(read_save(&sandbox.save_path())["currencyBalance"], 0);
}

#[test]
fn test_export_prints_save_json() {
    let sandbox = Sandbox::new();
    assert!(sandbox.run(&["unlock", "3"]).status.success());

    let output = sandbox.run(&["export"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let exported: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(exported["stages"]["3"]["unlocked"], true);
    assert_eq!(exported, read_save(&sandbox.save_path()));
}
