use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todoapp-{nanos}-{file_name}"))
}

#[test]
fn cli_smoke_help() {
    let exe = env!("CARGO_BIN_EXE_todo_server");
    let output = Command::new(exe)
        .arg("--help")
        .output()
        .expect("failed to run todo_server --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("serve"));
    assert!(stdout.contains("purge"));
}

#[test]
fn purge_command_reports_json_count_on_empty_database() {
    let exe = env!("CARGO_BIN_EXE_todo_server");
    let database_path = temp_path("cli-purge.db");
    let config_path = temp_path("cli-purge-config.json");
    let database_url = format!("sqlite://{}", database_path.display());

    let output = Command::new(exe)
        .args(["purge", "--json", "--config-override"])
        .arg(format!("database_url={database_url}"))
        .env("TODOAPP_CONFIG_PATH", &config_path)
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run purge command");
    std::fs::remove_file(&database_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(payload["deleted"], 0);
}

#[test]
fn unknown_override_key_fails() {
    let exe = env!("CARGO_BIN_EXE_todo_server");
    let config_path = temp_path("cli-bad-override.json");

    let output = Command::new(exe)
        .args(["purge", "--config-override", "theme=noir"])
        .env("TODOAPP_CONFIG_PATH", &config_path)
        .output()
        .expect("failed to run purge command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown config field"));
}
