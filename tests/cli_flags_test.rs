//! CLI flag contract tests
//!
//! Runs the real binary. Every invocation points `--config` at an empty temp
//! file and clears the NETBOX_* variables so the host environment never leaks in.

mod common;

use std::path::PathBuf;
use std::process::{Command, Output};

fn netimpact_bin() -> String {
    env!("CARGO_BIN_EXE_netimpact").to_string()
}

struct Sandbox {
    _dir: tempfile::TempDir,
    config: PathBuf,
}

fn sandbox(config_body: &str) -> Sandbox {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, config_body).unwrap();
    Sandbox { _dir: dir, config }
}

fn run(sandbox: &Sandbox, args: &[&str]) -> Output {
    Command::new(netimpact_bin())
        .arg("--config")
        .arg(&sandbox.config)
        .args(args)
        .env_remove("NETBOX_URL")
        .env_remove("NETBOX_TOKEN")
        .env_remove("NETIMPACT_AUTH_SCHEME")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[test]
fn test_help_lists_commands() {
    let sb = sandbox("");
    let out = run(&sb, &["--help"]);
    assert!(out.status.success());
    let text = stdout(&out);
    for cmd in ["serve", "interactive", "calculate", "config", "doctor"] {
        assert!(text.contains(cmd), "--help missing {cmd}");
    }
}

#[test]
fn test_version() {
    let sb = sandbox("");
    let out = run(&sb, &["version"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_config_path_honors_flag() {
    let sb = sandbox("");
    let out = run(&sb, &["config", "path"]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), sb.config.display().to_string());
}

#[test]
fn test_config_show_masks_token() {
    let sb = sandbox("[inventory]\ntoken = \"0123456789abcdef\"\n[server]\nport = 8080\n");
    let out = run(&sb, &["config", "show"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let text = stdout(&out);
    assert!(text.contains("************cdef"));
    assert!(!text.contains("0123456789abcdef"));
    assert!(text.contains("0.0.0.0:8080"));
}

#[test]
fn test_invalid_config_file_fails() {
    let sb = sandbox("[server]\nport = \"eighty\"\n");
    let out = run(&sb, &["config", "show"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("Invalid config file"));
}

#[test]
fn test_calculate_devices_and_interfaces_without_netbox() {
    let sb = sandbox("");
    let out = run(
        &sb,
        &["calculate", "--devices", "1,2", "--interfaces", "10", "--impact-type", "electrical-work"],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    assert_eq!(json["total_impact"], 22.0);
    assert_eq!(json["total_impact_before_multiplier"], 11.0);
    assert_eq!(json["multiplier"], 2.0);
}

#[test]
fn test_calculate_circuits_requires_token() {
    let sb = sandbox("");
    let out = run(&sb, &["calculate", "--circuits", "1"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("NETBOX_TOKEN"));
}

#[test]
fn test_calculate_against_netbox() {
    let base = common::spawn_netbox();
    let sb = sandbox("");
    let out = run(
        &sb,
        &[
            "--netbox-url",
            &base,
            "--netbox-token",
            common::TOKEN,
            "calculate",
            "--circuits",
            "1,2",
            "--impact-type",
            "incident-work",
        ],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let json: serde_json::Value = serde_json::from_str(&stdout(&out)).unwrap();
    // (2.4 + 3 + implicit 5) x 10
    assert!((json["total_impact"].as_f64().unwrap() - 104.0).abs() < 1e-9);
    assert_eq!(json["breakdown"]["circuits"]["items"][0]["cid"], "AMS-AMS-RING");
}

#[test]
fn test_calculate_unknown_circuit_fails() {
    let base = common::spawn_netbox();
    let sb = sandbox("");
    let out = run(
        &sb,
        &["--netbox-url", &base, "--netbox-token", common::TOKEN, "calculate", "--circuits", "404"],
    );
    assert!(!out.status.success());
    let err = stderr(&out);
    assert!(err.contains("Error calculating impact"), "stderr: {err}");
    assert!(err.contains("failed to fetch circuit 404"), "stderr: {err}");
}

#[test]
fn test_calculate_text_format() {
    let sb = sandbox("");
    let out = run(&sb, &["calculate", "--devices", "1", "--format", "text"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("BREAKDOWN"));
}

#[test]
fn test_unknown_format_is_rejected() {
    let sb = sandbox("");
    let out = run(&sb, &["calculate", "--devices", "1", "--format", "sarif"]);
    assert!(!out.status.success());
}

#[test]
fn test_doctor_reaches_netbox() {
    let base = common::spawn_netbox();
    let sb = sandbox("");
    let out = run(&sb, &["--netbox-url", &base, "--netbox-token", common::TOKEN, "doctor"]);
    assert!(out.status.success(), "stdout: {}", stdout(&out));
    assert!(stdout(&out).contains("2 devices"));
}

#[test]
fn test_serve_without_token_exits() {
    let sb = sandbox("");
    let out = run(&sb, &["serve", "--port", "0"]);
    assert!(!out.status.success());
    assert!(stderr(&out).contains("No NetBox token configured"));
}
