// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log level precedence of the `dataflow-cep` binary: the configured level,
//! then `RUST_LOG`, then `-v`.

use std::path::Path;
use std::process::Command;

/// The second bracket is a duplicate activation, which is logged at debug.
const INPUT: &str = "\
timestamp,message,direction,value
1,1339,coming,0
2,1339,coming,0
";

fn run_analyze(dir: &Path, rust_log: Option<&str>, extra_args: &[&str]) -> String {
    let input = dir.join("events.csv");
    let output = dir.join("alerts.out");
    std::fs::write(&input, INPUT).unwrap();

    let mut command = Command::new(env!("CARGO_BIN_EXE_dataflow-cep"));
    command.env_remove("RUST_LOG").env_remove("RUST_LOG_STYLE");
    if let Some(filter) = rust_log {
        command.env("RUST_LOG", filter);
    }
    let result = command
        .args(extra_args)
        .arg("analyze")
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .unwrap();
    assert!(result.status.success());
    String::from_utf8(result.stderr).unwrap()
}

#[test]
fn test_verbose_flag_beats_rust_log() {
    let dir = tempfile::tempdir().unwrap();
    let stderr = run_analyze(dir.path(), Some("error"), &["-vv"]);
    assert!(stderr.contains("ignored bracket 1339 coming at 2"), "{}", stderr);
    assert!(stderr.contains("config log_level from command line"), "{}", stderr);
}

#[test]
fn test_rust_log_beats_default_level() {
    let dir = tempfile::tempdir().unwrap();
    let stderr = run_analyze(dir.path(), Some("debug"), &[]);
    assert!(stderr.contains("ignored bracket 1339 coming at 2"), "{}", stderr);
    assert!(stderr.contains("config pattern_a from built-in default"), "{}", stderr);
}

#[test]
fn test_rust_log_quiets_without_verbose_flag() {
    let dir = tempfile::tempdir().unwrap();
    let stderr = run_analyze(dir.path(), Some("error"), &[]);
    assert!(stderr.is_empty(), "{}", stderr);
}

#[test]
fn test_default_level_hides_debug() {
    let dir = tempfile::tempdir().unwrap();
    let stderr = run_analyze(dir.path(), None, &[]);
    assert!(!stderr.contains("ignored bracket"), "{}", stderr);
}
