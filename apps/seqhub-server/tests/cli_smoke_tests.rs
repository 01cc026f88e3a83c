#![allow(clippy::unwrap_used, clippy::expect_used)]

//! CLI smoke tests for the seqhub-server binary.

use std::io::{BufRead as _, BufReader};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

fn run_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_seqhub-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute seqhub-server")
}

#[test]
fn help_prints_usage() {
    let output = run_server(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("seqhub-server"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("--list"));
    assert!(stdout.contains("--config"));
}

#[test]
fn list_prints_the_hosted_catalog() {
    let output = run_server(&["--list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("List of implementations hosted by this server:"));
    for expected in [
        "Sequence ID: fib, kind: core",
        "Sequence ID: fac, kind: core",
        "Sequence ID: fac, kind: naive-core",
        "Sequence ID: primes, kind: core",
    ] {
        assert!(stdout.contains(expected), "missing '{expected}'");
    }
    assert!(stdout.contains("Fibonacci numbers"));
    assert!(stdout.contains("Maximal supported index:"));
}

#[test]
fn unknown_arguments_fail_with_usage_exit_code() {
    let output = run_server(&["--bogus"]);
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--bogus") || stderr.contains("unexpected"));
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.yaml");
    let output = run_server(&["--list", "--config", path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"));
}

#[test]
fn run_announces_readiness_and_stops_on_signal() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_seqhub-server"))
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to spawn seqhub-server");

    let stdout = child.stdout.take().unwrap();
    let mut lines = BufReader::new(stdout).lines();
    let deadline = Instant::now() + Duration::from_secs(30);
    let mut ready = false;
    while Instant::now() < deadline {
        match lines.next() {
            Some(Ok(line)) if line.contains("Ready for incoming requests") => {
                ready = true;
                break;
            }
            Some(Ok(_)) => {}
            _ => break,
        }
    }
    assert!(ready, "server never announced readiness");

    child.kill().unwrap();
    child.wait().unwrap();
}
