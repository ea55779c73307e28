mod common;

use std::path::Path;
use std::process::Output;

use common::pyret_sitter;

fn write_source(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, source).unwrap();
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn parse_prints_sexp() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_source(dir.path(), "ok.arr", "x = 1\n");
    let output = pyret_sitter().arg("parse").arg(&file).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).trim(), common::sexp("x = 1\n"));
}

#[test]
fn parse_json() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_source(dir.path(), "ok.arr", "f(1)");
    let output = pyret_sitter().args(["parse", "--json"]).arg(&file).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["language"], "pyret");
    assert_eq!(json["has_error"], false);
    assert_eq!(json["root"]["kind"], "source_file");
    assert_eq!(json["root"]["end"], 4);
}

#[test]
fn parse_errors_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_source(dir.path(), "bad.arr", "x = (1 + 2\n");
    let output = pyret_sitter().arg("parse").arg(&file).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("(MISSING \")\")"));
    let err = stderr(&output);
    assert!(err.contains("1 syntax error(s)"), "stderr: {err}");
    assert!(err.contains("missing token error"), "stderr: {err}");
}

#[test]
fn quiet_parse_prints_nothing_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_source(dir.path(), "ok.arr", "x = 1");
    let output = pyret_sitter().args(["parse", "-q"]).arg(&file).output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}

#[test]
fn parse_with_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_source(dir.path(), "bad.arr", "x = ");
    let config = write_source(dir.path(), "parse.toml", "[recovery]\ninsert_missing = false\n");
    let output = pyret_sitter()
        .arg("parse")
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!stdout(&output).contains("MISSING"));
    assert!(stdout(&output).contains("(ERROR"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_source(dir.path(), "ok.arr", "x = 1");
    let config = write_source(dir.path(), "parse.toml", "[recovery]\nreduction_limit = 0\n");
    let output = pyret_sitter()
        .arg("parse")
        .arg(&file)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid config"));
}

#[test]
fn missing_source_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = pyret_sitter().arg("parse").arg(dir.path().join("nope.arr")).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("could not read"));
}

#[test]
fn symbols_lists_the_grammar() {
    let output = pyret_sitter().arg("symbols").output().unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("source_file"));
    assert!(out.contains("_binop_expr"));
    assert_eq!(out.lines().count(), common::language().symbol_count());
}

#[test]
fn dump_then_check_table() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = dir.path().join("pyret.pgtb");
    let output = pyret_sitter().args(["dump-table", "-o"]).arg(&artifact).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stderr(&output).contains("wrote"));

    let output = pyret_sitter().arg("check-table").arg(&artifact).output().unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("language: pyret"));
    assert!(out.contains(&format!("states:   {}", common::language().state_count())));
}

#[test]
fn check_table_rejects_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = write_source(dir.path(), "junk.pgtb", "not a table at all, just text");
    let output = pyret_sitter().arg("check-table").arg(&artifact).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid magic"));
}

#[test]
fn debug_logging_goes_to_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let file = write_source(dir.path(), "ok.arr", "x = 1");
    let output = pyret_sitter().args(["--log", "debug", "parse"]).arg(&file).output().unwrap();
    assert!(output.status.success());
    let err = stderr(&output);
    assert!(err.contains("loaded language"), "stderr: {err}");
    assert!(err.contains("parsed"), "stderr: {err}");
    assert!(!stdout(&output).contains("loaded language"));
}
