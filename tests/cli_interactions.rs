//! CLI options interaction tests
//!
//! These run the `plp` binary from an empty working directory so no stray
//! `.env` file leaks into the configuration.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

const ENV_VARS: &[&str] = &[
    "TARGET_URL",
    "DURATION_MINUTES",
    "THRESHOLD_SECONDS",
    "PAUSE_SECONDS",
    "REQUEST_TIMEOUT_SECONDS",
    "EXPORT_FORMAT",
    "ENABLE_COLOR",
];

/// Helper function to create a test command isolated in `dir`
fn create_test_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("plp").unwrap();
    cmd.current_dir(dir.path()).env("NO_COLOR", "1");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

async fn page_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(50)))
        .mount(&server)
        .await;
    server
}

#[test]
fn test_help_lists_core_flags() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--threshold"))
        .stdout(predicate::str::contains("--pause"))
        .stdout(predicate::str::contains("--no-export"));
}

#[test]
fn test_invalid_numeric_input_is_rejected() {
    let dir = TempDir::new().unwrap();
    for (flag, value) in [
        ("--duration", "abc"),
        ("--duration", "0"),
        ("--threshold", "-1"),
        ("--pause", "NaN"),
    ] {
        create_test_cmd(&dir)
            .args(["--url", "http://127.0.0.1:9/", flag, value])
            .assert()
            .code(1)
            .stderr(predicate::str::contains(flag));
    }
}

#[test]
fn test_oversized_timing_values_rejected_before_start() {
    let dir = TempDir::new().unwrap();
    for args in [["--duration", "1e300", "--pause", "1"], ["--duration", "0.001", "--pause", "1e20"]] {
        create_test_cmd(&dir)
            .args(["--url", "http://127.0.0.1:9/", "--no-export"])
            .args(args)
            .assert()
            .code(1)
            .stdout(predicate::str::contains("Target URL").not())
            .stderr(predicate::str::contains("too large"));
    }
}

#[test]
fn test_missing_url_is_a_configuration_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TARGET_URL"));
}

#[test]
fn test_invalid_url_scheme_rejected() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["--url", "ftp://example.com/"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_env_file_supplies_invalid_value() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "TARGET_URL=http://127.0.0.1:9/\nPAUSE_SECONDS=zero\n").unwrap();

    create_test_cmd(&dir)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("PAUSE_SECONDS"));
}

#[test]
fn test_conflicting_color_flags() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["--url", "http://127.0.0.1:9/", "--color", "--no-color"])
        .assert()
        .code(1);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_short_run_writes_csv_to_output() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("series.csv");

    let mut cmd = create_test_cmd(&dir);
    cmd.args(["--url", &server.uri(), "--duration", "0.01", "--threshold", "1", "--pause", "1"])
        .arg("--output")
        .arg(&output);

    // The mock server runs on its own thread, so blocking here is fine
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Request #1"))
        .stdout(predicate::str::contains("Data collection completed."))
        .stdout(predicate::str::contains("Counts Exceeding Expected Response Time (1.00 seconds): 0"))
        .stdout(predicate::str::contains("Data saved to"));

    let content = fs::read_to_string(&output).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("Timestamp,Load Time (Seconds)"));
    assert!(lines.next().is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_text_format_with_generated_name() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();

    let mut cmd = create_test_cmd(&dir);
    cmd.env("TARGET_URL", server.uri())
        .args(["--duration", "0.01", "--pause", "1", "--format", "text", "--no-chart"]);

    cmd.assert().success().stdout(predicate::str::contains("LoadTimes_"));

    let exported: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("LoadTimes_"))
        .collect();
    assert_eq!(exported.len(), 1);

    let name = exported[0].file_name().to_string_lossy().to_string();
    assert!(name.ends_with("_0.01min.txt"), "{}", name);
    let content = fs::read_to_string(exported[0].path()).unwrap();
    assert!(content.contains("------------Head-------------"));
    assert!(content.contains("-----------The End-----------"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_no_export_writes_nothing() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();

    let mut cmd = create_test_cmd(&dir);
    cmd.args(["--url", &server.uri(), "--duration", "0.01", "--pause", "1", "--no-export"]);

    cmd.assert().success().stdout(predicate::str::contains("Data saved to").not());

    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_verbose_log_stays_off_stdout() {
    let server = page_server().await;
    let dir = TempDir::new().unwrap();

    let mut cmd = create_test_cmd(&dir);
    cmd.args(["--url", &server.uri(), "--duration", "0.01", "--pause", "1", "--no-export", "--verbose"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Request #1"))
        .stdout(predicate::str::contains("Run started").not())
        .stderr(predicate::str::contains("Run started"));
}
