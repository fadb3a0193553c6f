//! Integration tests for xorpack-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

fn xorpack_cmd() -> Command {
    cargo_bin_cmd!("xorpack")
}

/// Creates `src/x.bin` (5 bytes) and `src/sub/y.bin` (3 bytes) under `root`.
fn sample_tree(root: &Path) -> PathBuf {
    let src = root.join("src");
    fs::create_dir_all(src.join("sub")).unwrap();
    fs::write(src.join("x.bin"), b"12345").unwrap();
    fs::write(src.join("sub/y.bin"), b"abc").unwrap();
    src
}

fn packed_sample(temp: &TempDir) -> PathBuf {
    let src = sample_tree(temp.path());
    let archive = temp.path().join("src.xpk");
    xorpack_cmd()
        .arg("pack")
        .arg(&archive)
        .arg(&src)
        .assert()
        .success();
    archive
}

#[test]
fn test_version_flag() {
    xorpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("xorpack"));
}

#[test]
fn test_help_flag() {
    xorpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pack"))
        .stdout(predicate::str::contains("unpack"))
        .stdout(predicate::str::contains("list"));
}

#[test]
fn test_pack_help() {
    xorpack_cmd()
        .arg("pack")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--read-only"))
        .stdout(predicate::str::contains("--chunk-size"));
}

#[test]
fn test_pack_command_basic() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = sample_tree(temp.path());
    let archive = temp.path().join("out.xpk");

    xorpack_cmd()
        .arg("pack")
        .arg(&archive)
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    assert!(archive.exists());
}

#[test]
fn test_pack_alias_and_multiple_inputs() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = sample_tree(temp.path());
    let extra = temp.path().join("README");
    fs::write(&extra, b"hi").unwrap();
    let archive = temp.path().join("out.xpk");

    xorpack_cmd()
        .arg("c")
        .arg(&archive)
        .arg(&src)
        .arg(&extra)
        .assert()
        .success();

    xorpack_cmd()
        .arg("l")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("src/x.bin"))
        .stdout(predicate::str::contains("README"));
}

#[test]
fn test_pack_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = sample_tree(temp.path());
    let archive = temp.path().join("out.xpk");

    let output = xorpack_cmd()
        .arg("pack")
        .arg("--json")
        .arg(&archive)
        .arg(&src)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "pack");
    assert_eq!(json["data"]["files_packed"], 2);
    assert_eq!(json["data"]["content_bytes"], 8);
    assert_eq!(
        json["data"]["archive_bytes"].as_u64().unwrap(),
        fs::metadata(&archive).unwrap().len()
    );
}

#[test]
fn test_pack_quiet_mode() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = sample_tree(temp.path());

    xorpack_cmd()
        .arg("pack")
        .arg("--quiet")
        .arg(temp.path().join("out.xpk"))
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_pack_chunk_size_suffix() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = sample_tree(temp.path());

    xorpack_cmd()
        .arg("pack")
        .arg("--chunk-size")
        .arg("4K")
        .arg(temp.path().join("out.xpk"))
        .arg(&src)
        .assert()
        .success();
}

#[test]
fn test_pack_chunk_size_too_large() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = sample_tree(temp.path());

    xorpack_cmd()
        .arg("pack")
        .arg("--chunk-size")
        .arg("65M")
        .arg(temp.path().join("out.xpk"))
        .arg(&src)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"))
        .stderr(predicate::str::contains("HINT"));
}

#[test]
fn test_pack_missing_input() {
    let temp = TempDir::new().expect("failed to create temp dir");

    xorpack_cmd()
        .arg("pack")
        .arg(temp.path().join("out.xpk"))
        .arg(temp.path().join("missing"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("missing"));
}

#[cfg(unix)]
#[test]
fn test_pack_read_only() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let src = sample_tree(temp.path());
    let archive = temp.path().join("out.xpk");

    xorpack_cmd()
        .arg("pack")
        .arg("--read-only")
        .arg(&archive)
        .arg(&src)
        .assert()
        .success();

    assert!(fs::metadata(&archive).unwrap().permissions().readonly());
}

#[test]
fn test_unpack_creates_files() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = packed_sample(&temp);
    let dest = temp.path().join("restore");

    xorpack_cmd()
        .arg("unpack")
        .arg(&archive)
        .arg(&dest)
        .assert()
        .success()
        .stdout(predicate::str::contains("Extraction complete"));

    assert_eq!(fs::read(dest.join("src/x.bin")).unwrap(), b"12345");
    assert_eq!(fs::read(dest.join("src/sub/y.bin")).unwrap(), b"abc");
}

#[test]
fn test_unpack_defaults_to_current_dir() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = packed_sample(&temp);
    let dest = temp.path().join("cwd");
    fs::create_dir(&dest).unwrap();

    xorpack_cmd()
        .current_dir(&dest)
        .arg("x")
        .arg(&archive)
        .assert()
        .success();

    assert!(dest.join("src/x.bin").exists());
}

#[test]
fn test_unpack_json_output() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = packed_sample(&temp);

    let output = xorpack_cmd()
        .arg("unpack")
        .arg("--json")
        .arg(&archive)
        .arg(temp.path().join("restore"))
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "success");
    assert_eq!(json["operation"], "unpack");
    assert_eq!(json["data"]["files_extracted"], 2);
    assert_eq!(json["data"]["bytes_written"], 8);
}

#[test]
fn test_unpack_nonexistent_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");

    xorpack_cmd()
        .arg("unpack")
        .arg(temp.path().join("nonexistent.xpk"))
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_unpack_truncated_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = packed_sample(&temp);
    let bytes = fs::read(&archive).unwrap();
    fs::write(&archive, &bytes[..bytes.len() - 3]).unwrap();

    xorpack_cmd()
        .arg("unpack")
        .arg(&archive)
        .arg(temp.path().join("restore"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid archive"));
}

#[test]
fn test_unpack_traversal_archive() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = temp.path().join("evil.xpk");
    let path = b"../../etc/passwd";
    let key = 0x42_u8;
    let mut bytes = vec![key];
    bytes.extend_from_slice(&(path.len() as u64).to_be_bytes());
    bytes.extend_from_slice(path);
    bytes.extend_from_slice(&0_u64.to_be_bytes());
    for b in &mut bytes[1..] {
        *b ^= key;
    }
    fs::write(&archive, bytes).unwrap();

    xorpack_cmd()
        .arg("unpack")
        .arg(&archive)
        .arg(temp.path().join("x/y"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsafe relative path"))
        .stderr(predicate::str::contains("HINT"));

    assert!(!temp.path().join("etc/passwd").exists());
}

#[test]
fn test_unpack_json_error() {
    let temp = TempDir::new().expect("failed to create temp dir");

    let output = xorpack_cmd()
        .arg("unpack")
        .arg("--json")
        .arg(temp.path().join("nonexistent.xpk"))
        .arg(temp.path())
        .assert()
        .failure()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["status"], "error");
    assert_eq!(json["operation"], "unpack");
    assert!(json["error"].as_str().unwrap().contains("nonexistent.xpk"));
}

#[test]
fn test_list_short() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = packed_sample(&temp);

    xorpack_cmd()
        .arg("list")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("src/x.bin  5"))
        .stdout(predicate::str::contains("src/sub/y.bin  3"));
}

#[test]
fn test_list_long() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = packed_sample(&temp);

    xorpack_cmd()
        .arg("list")
        .arg("--long")
        .arg(&archive)
        .assert()
        .success()
        .stdout(predicate::str::contains("OFFSET"))
        .stdout(predicate::str::contains("0x"))
        .stdout(predicate::str::contains("Total: 2 records"));
}

#[test]
fn test_list_json() {
    let temp = TempDir::new().expect("failed to create temp dir");
    let archive = packed_sample(&temp);

    let output = xorpack_cmd()
        .arg("list")
        .arg("--json")
        .arg(&archive)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("invalid JSON output");
    assert_eq!(json["operation"], "list");
    assert_eq!(json["data"]["total_records"], 2);
    assert_eq!(json["data"]["total_content_bytes"], 8);
    let records = json["data"]["records"].as_array().unwrap();
    assert!(records.iter().all(|r| r["key"].as_u64().unwrap() > 0));
    assert_eq!(records[0]["offset"], 0);
}

#[test]
fn test_completion_bash() {
    xorpack_cmd()
        .arg("completion")
        .arg("bash")
        .assert()
        .success()
        .stdout(predicate::str::contains("xorpack"));
}
