//! CLI 集成测试

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const STALE: &str =
    "[ext_resource type=\"Script\" uid=\"old999\" path=\"res://scripts/Player.gd\" id=\"1\"]";
const FIXED: &str =
    "[ext_resource type=\"Script\" uid=\"abc123\" path=\"res://scripts/Player.gd\" id=\"1\"]";

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("project.godot"), "config_version=5\n").unwrap();
    fs::create_dir_all(root.join("scripts")).unwrap();
    fs::create_dir_all(root.join("scenes")).unwrap();
    fs::write(root.join("scripts/Player.gd"), "extends CharacterBody2D\n").unwrap();
    fs::write(root.join("scripts/Player.gd.uid"), "abc123\n").unwrap();
    fs::write(
        root.join("scenes/player.tscn"),
        format!("[gd_scene load_steps=2 format=3]\n\n{}\n\n[node name=\"Player\" type=\"CharacterBody2D\"]\n", STALE),
    )
    .unwrap();
    temp
}

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("godot-uid-fix").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_fixes_scene_from_project_root() {
    let temp = project();

    cmd(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("player.tscn"))
        .stdout(predicate::str::contains("old999"))
        .stdout(predicate::str::contains("Updated 1 scene file(s)"));

    let scene = fs::read_to_string(temp.path().join("scenes/player.tscn")).unwrap();
    assert!(scene.contains(FIXED));
    assert!(!scene.contains("old999"));
}

#[test]
fn test_finds_root_from_subdirectory() {
    let temp = project();

    cmd(&temp.path().join("scenes")).assert().success();

    let scene = fs::read_to_string(temp.path().join("scenes/player.tscn")).unwrap();
    assert!(scene.contains(FIXED));
}

#[test]
fn test_dry_run_leaves_files() {
    let temp = project();

    cmd(temp.path())
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update 1 scene file(s)"));

    let scene = fs::read_to_string(temp.path().join("scenes/player.tscn")).unwrap();
    assert!(scene.contains(STALE));
}

#[test]
fn test_json_output() {
    let temp = project();

    let output = cmd(temp.path()).args(["--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["updated"], 1);
    assert_eq!(value["errors"], 0);
    assert_eq!(value["changes"][0]["script_path"], "res://scripts/Player.gd");
}

#[test]
fn test_scene_error_exit_code() {
    let temp = project();
    fs::write(temp.path().join("scenes/broken.tscn"), [0xff, 0xfe, 0xfd]).unwrap();

    cmd(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("broken.tscn"));

    // 其余场景照常修复
    let scene = fs::read_to_string(temp.path().join("scenes/player.tscn")).unwrap();
    assert!(scene.contains(FIXED));
}

#[test]
fn test_allow_errors_exits_zero() {
    let temp = project();
    fs::write(temp.path().join("scenes/broken.tscn"), [0xff, 0xfe, 0xfd]).unwrap();

    cmd(temp.path())
        .arg("--allow-errors")
        .assert()
        .success()
        .stdout(predicate::str::contains("Errors: 1"));
}

#[test]
fn test_unknown_format_rejected() {
    let temp = project();

    cmd(temp.path())
        .args(["--format", "yaml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown format"));
}

#[test]
fn test_explicit_root() {
    let temp = project();
    let elsewhere = TempDir::new().unwrap();

    cmd(elsewhere.path())
        .arg("--root")
        .arg(temp.path())
        .assert()
        .success();

    let scene = fs::read_to_string(temp.path().join("scenes/player.tscn")).unwrap();
    assert!(scene.contains(FIXED));
}
