use assert_cmd::Command;

const BIN: &str = "sepctl";

#[test]
fn test_empty_args() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.assert().failure();
}

#[test]
fn test_help() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("-h").assert().success();
}

#[test]
fn test_version_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("help").assert().success();
}

#[test]
fn test_bad_keyword() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("bouh").assert().failure();
}

#[test]
fn test_version_subcmd() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("version").assert().success();
}

#[test]
fn test_list_empty() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").assert().failure();
}

#[test]
fn test_list_formats() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").arg("formats").assert().success();
}

#[test]
fn test_list_sources() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("list").arg("sources").assert().success();
}

#[test]
fn test_completion_bash() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("completion").arg("bash").assert().success();
}

#[test]
fn test_watch_bad_interval() {
    let mut cmd = Command::cargo_bin(BIN).unwrap();
    cmd.arg("watch").arg("-i").arg("nope").assert().failure();
}
