use assert_cmd::Command;

fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8(assert.get_output().stdout.clone()).unwrap()
}

#[test]
fn cleans_positional_paths() {
    let assert = cmd()
        .args(["/a/./b", "/a/b/../c", "abc", "", "/abc/"])
        .assert()
        .success();
    assert_eq!("/a/b\n/a/c\n/abc\n/\n/abc/\n", stdout_of(&assert));
}

#[test]
fn cleans_stdin_lines() {
    let assert = cmd()
        .write_stdin("/../../a\r\n//x//y//\n")
        .assert()
        .success();
    assert_eq!("/a\n/x/y/\n", stdout_of(&assert));
}

#[test]
fn check_fails_on_non_canonical_input() {
    let assert = cmd()
        .args(["--check", "/ok", "/not//ok"])
        .assert()
        .code(1);
    assert_eq!("/not/ok\n", stdout_of(&assert));

    let assert = cmd().args(["--check", "/ok", "/"]).assert().success();
    assert_eq!("", stdout_of(&assert));
}

#[test]
fn uri_mode_keeps_query_and_reports_errors() {
    let assert = cmd()
        .args(["--uri", "--format", "json", "/a/../b?x=/..", "/bad target"])
        .assert()
        .code(1);
    let lines: Vec<serde_json::Value> = stdout_of(&assert)
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(2, lines.len());
    assert_eq!("/b?x=/..", lines[0]["output"]);
    assert_eq!(true, lines[0]["rewritten"]);
    assert!(lines[1]["error"].is_string());
    assert!(lines[1].get("output").is_none());
}

#[test]
fn config_file_sets_format_and_input() {
    let assert = cmd()
        .args(["--config", "tests/data/config.yaml"])
        .assert()
        .success();
    let outputs: Vec<String> = stdout_of(&assert)
        .lines()
        .map(|l| {
            let v: serde_json::Value = serde_json::from_str(l).unwrap();
            v["output"].as_str().unwrap().to_string()
        })
        .collect();
    assert_eq!(vec!["/a/b", "/ok", "/x"], outputs);
}

#[test]
fn flags_override_config() {
    let assert = cmd()
        .args(["--config", "tests/data/config.yaml", "--format", "plain"])
        .assert()
        .success();
    assert_eq!("/a/b\n/ok\n/x\n", stdout_of(&assert));
}

#[test]
fn missing_config_is_an_error() {
    cmd()
        .args(["--config", "tests/data/nope.yaml", "/a"])
        .assert()
        .failure();
}

#[test]
fn plain_uri_failures_are_printed_with_logging_off() {
    let assert = cmd()
        .env("RUST_LOG", "off")
        .args(["--uri", "/bad target", "/ok"])
        .assert()
        .code(1);
    assert_eq!("/ok\n", stdout_of(&assert));
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.starts_with("/bad target: invalid request target"), "{stderr}");
}
