//! End to end tests for the `pfind` binary.
//!
//! These run the built executable and check stdout, stderr and the exit status.

use std::error;
use std::fs::{self, File};
use std::process::Command;
use tempfile::tempdir;

fn pfind() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pfind"));
    cmd.env("PFIND_CONFIG", "/nonexistent/pfind.toml");
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_invalid_pattern_exits_nonzero_without_output() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("a.txt"))?;

    let out = pfind().arg("-d").arg(dir.path()).arg("[").output()?;
    assert_eq!(out.status.code(), Some(2));
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
    Ok(())
}

#[test]
fn test_escaped_dash_in_class() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    File::create(dir.path().join("-"))?;
    File::create(dir.path().join("b"))?;

    let out = pfind().arg("-d").arg(dir.path()).arg(r"[a\-z]").output()?;
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout)?,
        format!("{}\n", dir.path().join("-").display())
    );
    Ok(())
}

#[test]
fn test_unreadable_root_exits_zero() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    let out = pfind()
        .arg("--dir")
        .arg(dir.path().join("missing"))
        .arg("*")
        .output()?;
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
    assert_eq!(String::from_utf8(out.stderr)?.lines().count(), 1);
    Ok(())
}

#[test]
fn test_grepoutput_flag() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("sub"))?;

    let out = pfind().arg("-n").arg("-d").arg(dir.path()).arg("sub").output()?;
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8(out.stdout)?,
        format!("{}:1: d\n", dir.path().join("sub").display())
    );
    Ok(())
}

#[test]
fn test_plain_output_streams_matches() -> Result<(), Box<dyn error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("sub"))?;
    File::create(dir.path().join("x.txt"))?;
    File::create(dir.path().join("sub").join("x.txt"))?;
    File::create(dir.path().join("y.log"))?;

    let out = pfind().arg("-d").arg(dir.path()).arg("*.txt").output()?;
    assert!(out.status.success());
    let mut got: Vec<String> = String::from_utf8(out.stdout)?
        .lines()
        .map(str::to_string)
        .collect();
    got.sort();
    let mut want = vec![
        dir.path().join("x.txt").display().to_string(),
        dir.path().join("sub").join("x.txt").display().to_string(),
    ];
    want.sort();
    assert_eq!(got, want);
    Ok(())
}
