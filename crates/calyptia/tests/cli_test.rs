use assert_cmd::Command;
use predicates::prelude::*;

/// A structurally valid project token: base64url of
/// `{"project_id":"8f0c2a6e-0cd4-4a10-8c5b-19b0db24f80a"}` plus a dummy
/// signature segment.
const TEST_TOKEN: &str = "eyJwcm9qZWN0X2lkIjoiOGYwYzJhNmUtMGNkNC00YTEwLThjNWItMTliMGRiMjRmODBhIn0.sig";

fn calyptia() -> Command {
    let mut cmd = Command::cargo_bin("calyptia").unwrap();
    // Keep tests away from the user's real stored config.
    cmd.env_remove("CALYPTIA_CLOUD_TOKEN");
    cmd.env_remove("CALYPTIA_CLOUD_URL");
    cmd
}

#[test]
fn test_cli_help() {
    calyptia()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Calyptia Cloud CLI"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_get_help() {
    calyptia()
        .args(["get", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("agents"))
        .stdout(predicate::str::contains("core_instances"))
        .stdout(predicate::str::contains("pipelines"))
        .stdout(predicate::str::contains("endpoints"))
        .stdout(predicate::str::contains("environments"));
}

#[test]
fn test_get_endpoints_requires_pipeline() {
    calyptia()
        .args(["--token", TEST_TOKEN, "get", "endpoints"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--pipeline"));
}

#[test]
fn test_delete_agent_help() {
    calyptia()
        .args(["delete", "agent", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--yes"))
        .stdout(predicate::str::contains("--environment"));
}

#[test]
fn test_missing_token_is_a_clear_error() {
    let dir = tempfile::tempdir().unwrap();
    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["get", "agents"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no project token configured"));
}

#[test]
fn test_config_token_roundtrip() {
    let dir = tempfile::tempdir().unwrap();

    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["config", "set_token", TEST_TOKEN])
        .assert()
        .success();

    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["config", "current_token"])
        .assert()
        .success()
        .stdout(predicate::str::contains(TEST_TOKEN));

    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["config", "unset_token"])
        .assert()
        .success();

    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["config", "current_token"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_config_rejects_malformed_token() {
    let dir = tempfile::tempdir().unwrap();
    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["config", "set_token", "definitely-not-a-token"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid project token"));
}

#[test]
fn test_config_rejects_bad_url_scheme() {
    let dir = tempfile::tempdir().unwrap();
    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["config", "set_url", "ftp://example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid cloud url scheme"));
}

#[test]
fn test_create_core_instance_aws_is_not_implemented() {
    let dir = tempfile::tempdir().unwrap();
    calyptia()
        .env("CALYPTIA_CONFIG_DIR", dir.path())
        .args(["--token", TEST_TOKEN, "create", "core_instance", "aws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not implemented"));
}
