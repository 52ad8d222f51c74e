use std::path::Path;

use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;

const TOKEN: &str = "AstraCS:integration";

/// Binary invocation isolated from the caller's environment and config files.
fn astra(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("astra").unwrap();
    cmd.current_dir(dir)
        .env("ASTRA_CONFIG", dir.join("config.toml"))
        .env_remove("ASTRA_TOKEN")
        .env_remove("ASTRA_TOKEN_PATH")
        .env_remove("ASTRA_API_URL")
        .env_remove("ASTRA_TIMEOUT_SECS")
        .env_remove("RUST_LOG");
    cmd
}

fn logged_in(dir: &Path, server: &MockServer) -> Command {
    let mut cmd = astra(dir);
    cmd.env("ASTRA_API_URL", server.base_url())
        .env("ASTRA_TOKEN", TOKEN);
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("astra").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("astra").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_sec_bundle_help_lists_flags() {
    let mut cmd = Command::cargo_bin("astra").unwrap();
    cmd.args(["db", "secBundle", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--location"))
        .stdout(predicate::str::contains("secureBundle.zip"));
}

#[test]
fn test_sec_bundle_json_output() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/databases/db-123/secureBundleURL")
            .header("authorization", format!("Bearer {TOKEN}"));
        then.status(200)
            .json_body(json!({ "DownloadURL": "https://x/y.zip", "Name": "foo" }));
    });

    let output = logged_in(dir.path(), &server)
        .args(["db", "secBundle", "db-123", "--output", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    lookup.assert();
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("\"DownloadURL\": \"https://x/y.zip\""));
    assert!(stdout.contains("\"Name\": \"foo\""));
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["DownloadURL"], "https://x/y.zip");
    assert!(!dir.path().join("secureBundle.zip").exists());
}

#[test]
fn test_sec_bundle_zip_download() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    let body = vec![7_u8; 500];
    let download = server.mock(|when, then| {
        when.method(GET).path("/bundles/db-123.zip");
        then.status(200).body(body.clone());
    });
    server.mock(|when, then| {
        when.method(POST).path("/v2/databases/db-123/secureBundleURL");
        then.status(200)
            .json_body(json!({ "downloadURL": server.url("/bundles/db-123.zip") }));
    });

    logged_in(dir.path(), &server)
        .args(["db", "secBundle", "db-123", "--output", "zip", "--location", "out.zip"])
        .assert()
        .success()
        .stdout("file out.zip saved 500 bytes written\n");

    download.assert();
    assert_eq!(std::fs::read(dir.path().join("out.zip")).unwrap(), body);
}

#[test]
fn test_sec_bundle_zip_is_default_format() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/b.zip");
        then.status(200).body("PK");
    });
    server.mock(|when, then| {
        when.method(POST).path("/v2/databases/db-1/secureBundleURL");
        then.status(200)
            .json_body(json!({ "downloadURL": server.url("/b.zip") }));
    });

    logged_in(dir.path(), &server)
        .args(["db", "secBundle", "db-1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("secureBundle.zip saved 2 bytes written"));

    assert_eq!(
        std::fs::read_to_string(dir.path().join("secureBundle.zip")).unwrap(),
        "PK"
    );
}

#[test]
fn test_sec_bundle_rejects_invalid_output() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(POST).path("/v2/databases/db-123/secureBundleURL");
        then.status(200).json_body(json!({ "downloadURL": "https://x/y.zip" }));
    });

    logged_in(dir.path(), &server)
        .args(["db", "secBundle", "db-123", "--output", "text"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("text"));

    lookup.assert_calls(0);
    assert!(!dir.path().join("secureBundle.zip").exists());
}

#[test]
fn test_sec_bundle_login_failure_skips_lookup() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({ "downloadURL": "https://x/y.zip" }));
    });

    astra(dir.path())
        .env("ASTRA_API_URL", server.base_url())
        .args(["db", "secBundle", "db-123"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to login with error"));

    lookup.assert_calls(0);
    assert!(!dir.path().join("secureBundle.zip").exists());
}

#[test]
fn test_sec_bundle_lookup_failure_names_id() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v2/databases/db-404/secureBundleURL");
        then.status(404).body("database not found");
    });
    let download = server.mock(|when, then| {
        when.method(GET);
        then.status(200).body("zip");
    });

    logged_in(dir.path(), &server)
        .args(["db", "secBundle", "db-404"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to get 'db-404'"))
        .stderr(predicate::str::contains("database not found"));

    download.assert_calls(0);
    assert!(!dir.path().join("secureBundle.zip").exists());
}

#[test]
fn test_sec_bundle_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/b.zip");
        then.status(200).body("zip");
    });
    server.mock(|when, then| {
        when.method(POST).path("/v2/databases/db-1/secureBundleURL");
        then.status(200)
            .json_body(json!({ "downloadURL": server.url("/b.zip") }));
    });

    logged_in(dir.path(), &server)
        .args(["db", "secBundle", "db-1", "-l", "nested/out.zip"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to create file"));

    assert!(!dir.path().join("nested").exists());
}

#[test]
fn test_sec_bundle_reads_token_from_config_file() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/databases/db-9/secureBundleURL")
            .header("authorization", "Bearer from-config");
        then.status(200).json_body(json!({ "downloadURL": "https://x/z.zip" }));
    });

    let config_path = dir.path().join("astra.toml");
    std::fs::write(
        &config_path,
        format!(
            "[api]\nurl = \"{}\"\n\n[auth]\ntoken = \"from-config\"\n",
            server.base_url()
        ),
    )
    .unwrap();

    astra(dir.path())
        .arg("--config")
        .arg(&config_path)
        .args(["db", "secBundle", "db-9", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://x/z.zip"));

    lookup.assert();
}

#[test]
fn test_sec_bundle_reads_config_from_env_path() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/databases/db-7/secureBundleURL")
            .header("authorization", "Bearer from-env-config");
        then.status(200).json_body(json!({ "downloadURL": "https://x/e.zip" }));
    });

    std::fs::write(
        dir.path().join("config.toml"),
        format!(
            "[api]\nurl = \"{}\"\n\n[auth]\ntoken = \"from-env-config\"\n",
            server.base_url()
        ),
    )
    .unwrap();

    astra(dir.path())
        .args(["db", "secBundle", "db-7", "-o", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://x/e.zip"));

    lookup.assert();
}

#[test]
fn test_sec_bundle_rejects_zero_timeout() {
    let dir = tempdir().unwrap();
    let server = MockServer::start();
    let lookup = server.mock(|when, then| {
        when.method(POST);
        then.status(200).json_body(json!({ "downloadURL": "https://x/y.zip" }));
    });

    logged_in(dir.path(), &server)
        .env("ASTRA_TIMEOUT_SECS", "0")
        .args(["db", "secBundle", "db-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_secs"));

    lookup.assert_calls(0);
}
