//! Argument handling of the `newsdesk` binary.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use shared::config::ClientConfig;
use tempfile::TempDir;

#[test]
fn test_help_lists_commands() {
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("session"))
        .stdout(predicates::str::contains("articles"))
        .stdout(predicates::str::contains("submissions"))
        .stdout(predicates::str::contains("--server"));
}

#[test]
fn test_session_login_help() {
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.args(["session", "login", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Log in and store the issued token"))
        .stdout(predicates::str::contains("--email"));
}

#[test]
fn test_users_create_rejects_unknown_role() {
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.args([
        "users", "create", "--username", "sam", "--email", "sam@example.com", "--role", "intern",
    ]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("invalid value"))
        .stderr(predicates::str::contains("unknown user role"));
}

#[test]
fn test_submissions_rejects_unknown_filter() {
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.args(["submissions", "list", "--status", "spam"]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("unknown submission filter"));
}

#[test]
fn test_invalid_server_url() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.env_remove("NEWSDESK_API_URL")
        .arg("--credentials")
        .arg(dir.path().join("credentials.json"))
        .args(["--server", "ftp://example.com", "session", "whoami"]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("failed to resolve client configuration"));
}

#[test]
fn test_whoami_without_credentials() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.env_remove("NEWSDESK_API_URL")
        .arg("--credentials")
        .arg(dir.path().join("credentials.json"))
        .args(["--server", "http://127.0.0.1:9/api", "session", "whoami"]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("not logged in"));
}

#[test]
fn test_logout_is_idempotent() {
    let dir = TempDir::new().unwrap();
    for _ in 0..2 {
        let mut cmd = cargo_bin_cmd!("newsdesk");
        cmd.arg("--credentials")
            .arg(dir.path().join("credentials.json"))
            .args(["session", "logout"]);
        cmd.assert().success().stdout(predicates::str::contains("Logged out"));
    }
    assert!(!dir.path().join("credentials.json").exists());
}

#[test]
fn test_completion_generates_script() {
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.args(["completion", "--shell", "bash"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("newsdesk").and(predicates::str::contains("complete")));
}

#[test]
fn test_config_writes_yaml() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.current_dir(dir.path()).args(["config", "--format", "yaml"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("newsdesk.yaml"));
    let written = std::fs::read_to_string(dir.path().join("newsdesk.yaml")).unwrap();
    let config: ClientConfig = serde_yml::from_str(&written).unwrap();
    assert_eq!(config, ClientConfig::with_defaults());
}

#[test]
fn test_config_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.current_dir(dir.path()).args(["config", "--format", "toml"]);

    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Unsupported format"));
}

#[test]
fn test_submissions_list_accepts_status_flag() {
    let mut cmd = cargo_bin_cmd!("newsdesk");
    cmd.args(["submissions", "list", "--help"]);

    cmd.assert()
        .success()
        .stdout(predicates::str::contains("--status"));
}
