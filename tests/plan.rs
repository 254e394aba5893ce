//! Drives the built binary's `plan` subcommand; nothing external is executed.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("setup.toml");
    std::fs::write(
        &path,
        r#"
platform = "windows"

[paths]
source = "/srv/engine"
packages = "/srv/pkgs"
project = "/srv/games/Orchard"

[log]
run_log = false
"#,
    )
    .unwrap();
    path
}

fn plan(args: &[&str]) -> std::process::Output {
    let temp = TempDir::new().unwrap();
    let config = write_config(temp.path());
    Command::new(env!("CARGO_BIN_EXE_o3de-setup"))
        .arg("--config")
        .arg(&config)
        .arg("plan")
        .args(args)
        .current_dir(temp.path())
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn test_plan_json() {
    let output = plan(&["--json"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["platform"], "windows");
    assert_eq!(json["fresh"], false);
    assert_eq!(json["paths"]["project_name"], "Orchard");

    let steps = json["steps"].as_array().unwrap();
    let configure = steps
        .iter()
        .find(|s| s["step"] == "configure_engine")
        .unwrap();
    let args: Vec<&str> = configure["commands"][0]["args"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a.as_str().unwrap())
        .collect();
    assert!(args.contains(&"Visual Studio 16"));
    assert!(args.contains(&"-DLY_3RDPARTY_PATH=/srv/pkgs"));

    let build = steps.iter().find(|s| s["step"] == "build_project").unwrap();
    let build_args = build["commands"][0]["args"].as_array().unwrap();
    assert_eq!(build_args.last().unwrap(), "/m");
}

#[test]
fn test_plan_fresh_text() {
    let output = plan(&["--fresh"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let text = String::from_utf8(output.stdout).unwrap();
    assert!(text.starts_with("Platform: windows\n"));
    assert!(text.contains("Remove Existing Installations"));
    assert!(text.contains("Verify Repository"));
    assert!(text.contains("$ git remote get-url origin"));
    assert!(text.contains("Orchard.GameLauncher"));
}

#[test]
fn test_missing_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_o3de-setup"))
        .args(["--config", "does-not-exist.toml", "plan"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("not found"));
}
