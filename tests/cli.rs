// Author: Eshan Roy
// SPDX-License-Identifier: MIT

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// A temp dir holding a config whose store lives next to it.
fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("gk.toml");
    fs::write(
        &config,
        "[ui]\ncolor = false\n\n[store]\npath = \"variables.json\"\n",
    )
    .unwrap();
    (dir, config)
}

fn gk(config: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("gk").unwrap();
    cmd.arg("--config").arg(config).arg("--non-interactive");
    cmd
}

#[test]
fn lists_commands_by_category() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["commands", "--category", "branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git checkout -b <branch-name>"))
        .stdout(predicate::str::contains("git status").not());
}

#[test]
fn commands_json_is_an_array() {
    let (_dir, config) = setup();
    let output = gk(&config)
        .args(["--format", "json", "commands", "-f", "stash"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let commands = json.as_array().unwrap();
    assert!(!commands.is_empty());
    assert!(commands
        .iter()
        .all(|c| c["full_command"].as_str().unwrap().contains("stash")));
}

#[test]
fn fuzzy_search_tolerates_typos() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["search", "comit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git commit"));
}

#[test]
fn search_json_carries_highlights() {
    let (_dir, config) = setup();
    let output = gk(&config)
        .args(["--format", "json", "search", "git status"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["commands"][0]["id"], "status");
    let highlighted = json["commands"][0]["matches"][0]["highlighted"]
        .as_str()
        .unwrap();
    assert!(highlighted.contains("<mark>"));
}

#[test]
fn show_substitutes_set_values() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["show", "feature-branch", "--set", "<branch-name>=login-form"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git checkout -b login-form"))
        .stdout(predicate::str::contains("git push -u origin login-form"));
}

#[test]
fn show_script_prints_comments() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["show", "status", "--script"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("# "))
        .stdout(predicate::str::contains("git status"));
}

#[test]
fn show_unknown_id_fails() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["show", "git-frobnicate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("git-frobnicate"));
}

#[test]
fn show_rejects_bad_assignment() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["show", "feature-branch", "--set", "novalue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("PLACEHOLDER=VALUE"));
}

#[test]
fn builtin_catalog_lints_clean() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["lint", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid"));
}

#[test]
fn lint_fails_on_broken_catalog() {
    let (dir, _) = setup();
    fs::write(
        dir.path().join("extra.toml"),
        "[[scenarios]]\nid = \"broken\"\ncategory = \"fix\"\nsteps = [{ command_id = \"missing\" }]\n",
    )
    .unwrap();
    let config = dir.path().join("broken.toml");
    fs::write(&config, "[catalog]\npath = \"extra.toml\"\n").unwrap();

    gk(&config)
        .arg("lint")
        .assert()
        .failure()
        .stdout(predicate::str::contains("unknown-command-ref"));
}

#[test]
fn remembered_values_fill_placeholders() {
    let (dir, config) = setup();
    gk(&config)
        .args(["vars", "set", "<branch-name>", "feature/search"])
        .assert()
        .success();
    assert!(dir.path().join("variables.json").exists());

    gk(&config)
        .args(["vars", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature/search"));

    gk(&config)
        .args(["vars", "history", "branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature/search"));

    gk(&config)
        .args(["show", "switch-branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("git switch feature/search"));

    gk(&config).args(["vars", "reset"]).assert().success();
    gk(&config)
        .args(["vars", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("feature/search").not());
}

#[test]
fn configure_non_interactive_saves_values() {
    let (_dir, config) = setup();
    gk(&config)
        .args([
            "configure",
            "daily-commit",
            "--set",
            "message=Fix login redirect",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("git commit -m \"Fix login redirect\""));

    gk(&config)
        .args(["vars", "history", "commit"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fix login redirect"));
}

#[test]
fn configure_no_save_leaves_store_alone() {
    let (dir, config) = setup();
    gk(&config)
        .args([
            "configure",
            "feature-branch",
            "--no-save",
            "--set",
            "<branch-name>=topic",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("git checkout -b topic"));
    assert!(!dir.path().join("variables.json").exists());
}

#[test]
fn assistant_actions_from_stdin() {
    let (_dir, config) = setup();
    gk(&config)
        .args(["assistant", "actions"])
        .write_stdin("Merge it :::action{type=\"merge\" source=\"dev\"}::: then push.")
        .assert()
        .success()
        .stdout(predicate::str::contains("Merge dev"))
        .stdout(predicate::str::contains("git merge dev"));
}

#[test]
fn assistant_prompt_includes_context() {
    let (_dir, config) = setup();
    gk(&config)
        .args([
            "assistant",
            "prompt",
            "--canned",
            "cherry-pick",
            "--branch",
            "main",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch: main"))
        .stdout(predicate::str::contains("cherry-pick a specific commit"));
}

#[test]
fn init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("gk").unwrap();
    cmd.current_dir(dir.path())
        .args(["init", "--preset", "minimal"])
        .assert()
        .success();
    assert!(dir.path().join("gitking.toml").exists());

    let mut cmd = Command::cargo_bin("gk").unwrap();
    cmd.current_dir(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    let mut cmd = Command::cargo_bin("gk").unwrap();
    cmd.current_dir(dir.path())
        .args(["init", "--force", "--preset", "standard"])
        .assert()
        .success();
    let content = fs::read_to_string(dir.path().join("gitking.toml")).unwrap();
    assert!(content.contains("(standard)"));
}

#[test]
fn version_prints_name() {
    let mut cmd = Command::cargo_bin("gk").unwrap();
    cmd.arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("gk "));
}
