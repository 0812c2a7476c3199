//! Error scenario integration tests

use std::process::Command;

fn notify_router_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notify-router"));
    // Prevent reading or writing the user's config file
    cmd.env("HOME", "/nonexistent")
        .env("XDG_CONFIG_HOME", "/nonexistent")
        .env_remove("NOTIFY_ROUTER_SHOW_POLICY")
        .env_remove("NOTIFY_ROUTER_APP_NAME");
    cmd
}

#[test]
fn post_without_title_is_usage_error() {
    let output = notify_router_bin()
        .arg("post")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("--title"),
        "Expected error about missing title, got: {}",
        stderr
    );
}

#[test]
fn post_invalid_policy_is_usage_error() {
    let output = notify_router_bin()
        .args(["post", "--title", "Hi", "--policy", "sometimes"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("sometimes") || stderr.contains("invalid"),
        "Expected error about invalid policy, got: {}",
        stderr
    );
}

#[test]
fn post_invalid_payload_is_usage_error() {
    let output = notify_router_bin()
        .args([
            "post",
            "--title",
            "Hi",
            "--payload",
            "{broken",
            "--no-native",
            "--no-legacy",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("payload"),
        "Expected error about payload, got: {}",
        stderr
    );
}

#[test]
fn config_get_unknown_key() {
    let output = notify_router_bin()
        .args(["config", "get", "unknown_key"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_unknown_key() {
    let output = notify_router_bin()
        .args(["config", "set", "unknown_key", "value"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown") || stderr.contains("unknown") || stderr.contains("Valid"),
        "Expected error about unknown key, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_policy() {
    let output = notify_router_bin()
        .args(["config", "set", "show_policy", "sometimes"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid show policy") && stderr.contains("never-show-legacy"),
        "Expected error listing valid policies, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_boolean() {
    let output = notify_router_bin()
        .args(["config", "set", "auto_remove_delivered", "maybe"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("true") || stderr.contains("false"),
        "Expected error about invalid boolean, got: {}",
        stderr
    );
}

#[test]
fn config_set_invalid_wait() {
    let output = notify_router_bin()
        .args(["config", "set", "wait", "soon"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("wait"),
        "Expected error about wait, got: {}",
        stderr
    );
}

#[test]
fn config_list_with_no_file() {
    // Lists every key as unset when no config file exists
    let output = notify_router_bin()
        .args(["config", "list"])
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("not set") && stdout.contains("legacy.command"),
        "Expected config list output, got: {}",
        stdout
    );
}
