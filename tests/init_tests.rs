//! Integration tests for init and first-run behavior

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod common;
use common::{init_blog, read_record, rosetint_cmd, DATA_FILE};

#[test]
fn test_init_creates_config_and_default_data() {
    let temp = TempDir::new().unwrap();

    rosetint_cmd(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized rosetint blog"));

    assert!(temp.path().join("config.toml").exists());
    assert!(temp.path().join(DATA_FILE).exists());

    let record = read_record(temp.path());
    assert_eq!(record["posts"].as_array().unwrap().len(), 1);
    assert_eq!(record["posts"][0]["title"], "你好，世界");
    assert_eq!(record["categories"].as_array().unwrap().len(), 3);
    assert!(record["images"].as_array().unwrap().is_empty());
    assert!(record["settings"]["backgroundImageId"].is_null());
    assert!(record["settings"]["lockScreenImageId"].is_null());
    assert_eq!(record["settings"]["editorFontSize"], 100);
    assert_eq!(record["settings"]["previewFontSize"], 100);
    assert_eq!(record["settings"]["labels"]["blogTitle"], "RoseTint");
}

#[test]
fn test_init_into_new_directory() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("blog");

    init_blog(&root);

    assert!(root.join("config.toml").exists());
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();

    init_blog(temp.path());

    rosetint_cmd(temp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn test_commands_require_init() {
    let temp = TempDir::new().unwrap();

    rosetint_cmd(temp.path())
        .arg("post")
        .arg("list")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("rosetint init"));
}

#[test]
fn test_root_from_environment() {
    let temp = TempDir::new().unwrap();
    init_blog(temp.path());

    Command::cargo_bin("rosetint")
        .unwrap()
        .env("ROSETINT_ROOT", temp.path())
        .arg("category")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("general  默认分类 (1)"));
}
