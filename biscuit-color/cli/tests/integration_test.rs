//! Integration tests for the `bcolor` CLI binary.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_no_args_shows_summary() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Color Support"))
        .stdout(predicate::str::contains("Level:"));
}

#[test]
fn test_json_flag_outputs_json() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.arg("--json")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"color_level\""))
        .stdout(predicate::str::contains("\"source\""))
        .stdout(predicate::str::contains("\"env\"").not());
}

#[test]
fn test_verbose_json_includes_env() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.env("TERM", "xterm-256color")
        .args(["--json", "--verbose"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"env\""))
        .stdout(predicate::str::contains("xterm-256color"));
}

#[test]
fn test_help_flag() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detect terminal color support"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("bcolor"));
}

#[test]
fn test_respects_no_color() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.env("NO_COLOR", "1")
        .env("COLORTERM", "truecolor")
        .assert()
        .success()
        // Should NOT contain escape codes when NO_COLOR is set
        .stdout(predicate::str::contains("\x1b[").not());
}

#[test]
fn test_render_with_level_none_strips_tags() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.args(["render", "--level", "none", "<info>done</> in <comment>3s</>"])
        .assert()
        .success()
        .stdout("done in 3s\n");
}

#[test]
fn test_render_with_level_256_emits_escapes() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.env_remove("NO_COLOR")
        .args(["render", "--level", "256", "<info>hi</>"])
        .assert()
        .success()
        .stdout("\x1b[0;32mhi\x1b[0m\n");
}

#[test]
fn test_render_strip_removes_markup() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.args(["render", "--strip", "<error>plain</>", "text"])
        .assert()
        .success()
        .stdout("plain text\n");
}

#[test]
fn test_render_rejects_unknown_level() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.args(["render", "--level", "sepia", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sepia"));
}

#[test]
fn test_tags_json_lists_table() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.args(["tags", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"danger\""))
        .stdout(predicate::str::contains("\"1;31\""));
}

#[test]
fn test_paint_json_reports_code() {
    let mut cmd = Command::cargo_bin("bcolor").unwrap();
    cmd.env("NO_COLOR", "1")
        .args(["paint", "--fg", "white", "--bg", "red", "--opt", "bold", "--json", "boom"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"code\": \"37;41;1\""))
        .stdout(predicate::str::contains("\"rendered\": \"boom\""));
}
