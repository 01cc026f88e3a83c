#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for the seqhub-client binary over its embedded broker.

use std::process::{Command, Stdio};

fn run_client(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_seqhub-client"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute seqhub-client")
}

#[test]
fn help_prints_usage_and_examples() {
    let output = run_client(&["--help"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("seqhub-client"));
    assert!(stdout.contains("Usage:"));
    for option in ["--seq", "--batch", "--short", "--list"] {
        assert!(stdout.contains(option), "missing '{option}'");
    }
    assert!(stdout.contains("seqhub-client fib 5 6 7"));
}

#[test]
fn list_shows_every_registered_implementation() {
    let output = run_client(&["--list"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Registered sequence implementations:"));
    for expected in [
        "Sequence ID: fac, kind: core",
        "Sequence ID: fac, kind: naive-core",
        "Sequence ID: fib, kind: core",
        "Sequence ID: primes, kind: core",
    ] {
        assert!(stdout.contains(expected), "missing '{expected}'");
    }
}

#[test]
fn batch_request_returns_known_fibonacci_values() {
    let output = run_client(&["fib", "0", "1", "2", "5", "10"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Connected to service 'Fibonacci numbers' (name: fib.core)"));
    for line in [
        "fib(0) = 0",
        "fib(1) = 1",
        "fib(2) = 1",
        "fib(5) = 5",
        "fib(10) = 55",
    ] {
        assert!(stdout.contains(line), "missing '{line}'");
    }
}

#[test]
fn separate_requests_match_the_batch_results() {
    let output = run_client(&["--seq", "fac", "10"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fac(10) = 3628800"));
}

#[test]
fn full_service_id_picks_the_exact_implementation() {
    let output = run_client(&["fac.naive-core", "5"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Connected to service 'Factorials, naive' (name: fac.naive-core)"));
    assert!(stdout.contains("fac(5) = 120"));
}

#[test]
fn negative_index_yields_an_error_response_not_a_failure() {
    let output = run_client(&["fac", "-1"]);
    assert!(output.status.success(), "error responses are data, not failures");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("error getting fac(-1): index cannot be negative"));
}

#[test]
fn mixed_batch_keeps_valid_elements_intact() {
    let output = run_client(&["fib", "5", "-1", "10"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("fib(5) = 5"));
    assert!(stdout.contains("error getting fib(-1): index cannot be negative"));
    assert!(stdout.contains("fib(10) = 55"));
}

#[test]
fn shortening_elides_long_numbers() {
    let output = run_client(&["--short", "fac", "100"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // 100! has 158 digits; 118 are elided.
    assert!(stdout.contains("[118 digits skipped]"));
}

#[test]
fn unknown_sequence_fails_with_service_exit_code() {
    let output = run_client(&["nope", "1"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no available services match the name 'nope'"));
}

#[test]
fn unknown_arguments_fail_with_usage_exit_code() {
    let output = run_client(&["--bogus", "fib", "1"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn non_integer_index_fails_with_usage_exit_code() {
    let output = run_client(&["fib", "ten"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn oversized_batch_is_rejected_before_any_request() {
    let output = Command::new(env!("CARGO_BIN_EXE_seqhub-client"))
        .env("SEQHUB__CLIENT__MAX_BATCH", "2")
        .args(["fib", "1", "2", "3"])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("failed to execute seqhub-client");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Specify no more than 2"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Getting service"), "no request may go out");
}

#[test]
fn config_file_adjusts_the_batch_cap() {
    use std::io::Write as _;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"client:\n  max_batch: 1\n").unwrap();

    let output = run_client(&[
        "--config",
        file.path().to_str().unwrap(),
        "fib",
        "1",
        "2",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Specify no more than 1"));
}
