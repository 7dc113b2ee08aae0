//! CLI tests for uimage

use std::fs;
use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{NamedTempFile, TempDir};
use uimage::{IH_HEADER_SIZE, calculate_crc32, unpack_multi, verify_image};

fn payload_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg("--version").assert().success();
}

#[test]
fn test_cli_help_lists_choices() {
    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("X86_64"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_cli_create_default() {
    let input = payload_file(&[0u8; 10]);
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("uImage");

    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(input.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let image = fs::read(&output).unwrap();
    assert_eq!(image.len(), 74);
    let (header, data) = verify_image(&image).unwrap();
    let codes = (header.os, header.arch, header.type_, header.comp);
    assert_eq!(codes, (5, 24, 2, 0));
    assert_eq!(header.dcrc, calculate_crc32(data));
}

#[test]
fn test_cli_all_options() {
    let input = payload_file(b"Test kernel data");
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("uImage");

    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(input.path())
        .args(["-l", "0x80008000", "-e", "32776"])
        .args(["-s", "netbsd", "-a", "ARM", "-i", "FIRMWARE", "-c", "none"])
        .args(["-t", "1234", "-n", "Test Firmware"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let image = fs::read(&output).unwrap();
    let (header, data) = verify_image(&image).unwrap();
    assert_eq!(header.load, 0x8000_8000);
    assert_eq!(header.ep, 0x8008);
    assert_eq!((header.os, header.arch, header.type_), (2, 2, 5));
    assert_eq!(header.time, 1234);
    assert_eq!(header.name_str(), "Test Firmware");
    assert_eq!(data, b"Test kernel data");
}

#[test]
fn test_cli_dry_run_writes_nothing() {
    let input = payload_file(b"dry");
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("uImage");

    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(input.path())
        .arg("--dry-run")
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert!(!output.exists());
}

#[test]
fn test_cli_compression_not_implemented() {
    let input = payload_file(b"data");
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("uImage");

    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(input.path())
        .args(["-c", "GZIP", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not yet implemented"));

    assert!(!output.exists());
}

#[test]
fn test_cli_rejects_unknown_choice() {
    let input = payload_file(b"data");
    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(input.path())
        .args(["-a", "BOGUS"])
        .assert()
        .failure();
}

#[test]
fn test_cli_missing_input() {
    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg("/nonexistent/file.bin")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_cli_debug_logs_header_fields() {
    let input = payload_file(b"debug");
    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.env_remove("RUST_LOG")
        .arg(input.path())
        .args(["--debug", "--dry-run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("ih_magic 0x27051956"))
        .stderr(predicate::str::contains("ih_size 0x5"));
}

#[test]
fn test_cli_multi() {
    let first = payload_file(b"kernel");
    let second = payload_file(b"initrd!");
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("multi.img");

    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(first.path())
        .args(["-i", "MULTI", "-m"])
        .arg(second.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let image = fs::read(&output).unwrap();
    let (header, data) = verify_image(&image).unwrap();
    assert_eq!(header.type_, 4);
    assert_eq!(image.len(), IH_HEADER_SIZE + data.len());
    let parts = unpack_multi(data).unwrap();
    assert_eq!(parts, vec![b"kernel".as_slice(), b"initrd!".as_slice()]);
}

#[test]
fn test_cli_multi_requires_multi_type() {
    let first = payload_file(b"kernel");
    let second = payload_file(b"initrd!");
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("multi.img");

    // -i defaults to KERNEL
    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(first.path())
        .arg("-m")
        .arg(second.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("MULTI"));
    assert!(!output.exists());

    let mut cmd = Command::cargo_bin("uimage").unwrap();
    cmd.arg(first.path())
        .args(["-i", "multi", "-m"])
        .arg(second.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();
    assert!(output.exists());
}
