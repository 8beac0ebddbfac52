#![allow(dead_code)]

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::Path;

pub const DATA_FILE: &str = "rosetint_blog_data_v3.json";
pub const CORRUPT_FILE: &str = "rosetint_blog_data_v3.corrupt.json";

pub fn rosetint_cmd(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("rosetint").unwrap();
    cmd.env_remove("ROSETINT_ROOT");
    cmd.env_remove("EDITOR");
    cmd.env_remove("VISUAL");
    cmd.env_remove("RUST_LOG");
    cmd.arg("--root").arg(root);
    cmd
}

pub fn init_blog(root: &Path) {
    rosetint_cmd(root).arg("init").assert().success();
}

/// Parse the stored record
pub fn read_record(root: &Path) -> Value {
    let raw = fs::read_to_string(root.join(DATA_FILE)).unwrap();
    serde_json::from_str(&raw).unwrap()
}

pub fn write_record(root: &Path, value: &Value) {
    fs::write(root.join(DATA_FILE), value.to_string()).unwrap();
}
