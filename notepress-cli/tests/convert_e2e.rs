//! End-to-end runs against the core crate's fixture vault

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const NOTE: &str = "Reading a Ruby gem with VSCode";

fn fixture_vault() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../notepress-core/tests/fixtures/vault")
}

/// Isolated from the user's config, .env and environment
fn notepress(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("notepress").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("NOTEPRESS_CONFIG")
        .env_remove("NOTEPRESS_VAULT")
        .env_remove("DEV_TO_API_KEY")
        .arg("--vault")
        .arg(fixture_vault());
    cmd
}

#[test]
fn convert_writes_post_directory() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("content");

    notepress(&home)
        .args(["convert", NOTE, "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("index.md"));

    let post = out.join("reading-a-ruby-gem-with-vscode");
    assert!(post.join("Mocha_opened_in_VSCode.png").is_file());
    let index = fs::read_to_string(post.join("index.md")).unwrap();
    assert!(index.contains("(./Mocha_opened_in_VSCode.png)"));
    assert!(!index.contains("REJECTED IDEAS"));
}

#[test]
fn convert_dry_run_json() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("content");

    notepress(&home)
        .args(["convert", NOTE, "--dry-run", "--json", "--out"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\": true"));

    assert!(!out.exists());
}

#[test]
fn convert_missing_note_fails() {
    let home = TempDir::new().unwrap();

    notepress(&home)
        .args(["convert", "No such note"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read note"));
}

#[test]
fn push_dry_run_prints_payload() {
    let home = TempDir::new().unwrap();

    notepress(&home)
        .args(["push", NOTE, "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"body_markdown\""))
        .stdout(predicate::str::contains(
            "reading-a-ruby-gem-with-vscode/Mocha%20opened%20in%20VSCode.png",
        ));
}

#[test]
fn push_without_api_key_fails() {
    let home = TempDir::new().unwrap();

    notepress(&home)
        .args(["push", NOTE])
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_key"));
}

#[test]
fn sync_then_pages_and_related() {
    let home = TempDir::new().unwrap();
    let out = home.path().join("content");

    notepress(&home)
        .args(["sync", "--published-only", "--out"])
        .arg(&out)
        .assert()
        .success();

    let other = out.join("vscode-tips");
    fs::create_dir_all(&other).unwrap();
    fs::write(
        other.join("index.md"),
        "---\ntitle: \"VSCode tips\"\ndate: 2021-01-01\npublished: true\ntags: [\"vscode\"]\n---\n",
    )
    .unwrap();

    notepress(&home)
        .args(["pages", "--slug", "/blog/vscode-tips/", "--content"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"next\""))
        .stdout(predicate::str::contains("/blog/reading-a-ruby-gem-with-vscode/"));

    notepress(&home)
        .args(["related", NOTE, "--content"])
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("VSCode tips"));
}

#[test]
fn migrate_images_dry_run() {
    let home = TempDir::new().unwrap();
    let post = home.path().join("content/legacy-post");
    fs::create_dir_all(&post).unwrap();
    fs::write(post.join("Screen Shot.png"), b"img").unwrap();
    fs::write(post.join("index.md"), "---\n---\n![Screen Shot.png](./Screen Shot.png)\n").unwrap();

    notepress(&home)
        .args(["migrate-images", "--dry-run", "--content"])
        .arg(home.path().join("content"))
        .assert()
        .success()
        .stdout(predicate::str::contains("would rename Screen Shot.png -> Screen_Shot.png"));

    assert!(post.join("Screen Shot.png").exists());
}

#[test]
fn config_init_then_refuses_overwrite() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("notepress.toml");

    notepress(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success();
    assert!(fs::read_to_string(&path).unwrap().contains("[paths]"));

    notepress(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
