//! End-to-end tests running the `inienv` binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn inienv(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_inienv"))
        .args(args)
        .env_clear()
        .env("PATH", std::env::var_os("PATH").unwrap_or_default())
        .env("AMBIENT", "yes")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn prints_single_assignment_in_clean_mode() {
    let output = inienv(&["-i", "-e", "Z=9"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Z=9\n");
}

#[test]
fn copies_ambient_environment_by_default() {
    let output = inienv(&["-e", "A=1"], "");
    let text = stdout(&output);
    assert!(text.lines().any(|line| line == "A=1"));
    assert!(text.lines().any(|line| line == "AMBIENT=yes"));
}

#[test]
fn imports_only_requested_variables() {
    let output = inienv(&["-m", "AMB*"], "");
    assert_eq!(stdout(&output), "AMBIENT=yes\n");
}

#[test]
fn reads_ini_from_stdin() {
    let output = inienv(&["-i", "-n", "-e", "s.k=cli", "-f", "-"], "[s]\nk = file\n");
    assert_eq!(stdout(&output), "s.k=file\n");

    let output = inienv(&["-i", "-N", "-e", "s.k=cli", "-f", "-"], "[s]\nk = file\n");
    assert_eq!(stdout(&output), "s.k=cli\n");
}

#[test]
fn joins_with_unescaped_separator() {
    let output = inienv(&["-i", "-s", r"\x2c", "-e", "Y=a", "-e", "Y=b"], "");
    assert_eq!(stdout(&output), "Y=a,b\n");
}

#[test]
fn parse_errors_are_reported_and_skipped() {
    let output = inienv(&["-i", "-f", "-", "-f", "/nonexistent/inienv.ini"], "ok = 1\n[broken\n");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ok=1\n");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("/nonexistent/inienv.ini"));
    assert!(stderr.contains("line 2"));
}

#[test]
fn missing_program_exits_127() {
    let output = inienv(&["-i", "inienv-test-no-such-program"], "");
    assert_eq!(output.status.code(), Some(127));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
#[test]
fn execs_with_composed_environment() {
    let output = inienv(&["-i", "-e", "GREETING=hello", "sh", "-c", "echo \"$GREETING:$AMBIENT\""], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "hello:\n");
}

#[test]
fn invalid_defaults_file_warning_has_no_blank_line() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "separator = ").unwrap();
    let path = config.path().to_str().unwrap().to_string();

    let output = inienv(&["--config", &path, "-i", "-e", "Y=a", "-e", "Y=b"], "");
    assert!(output.status.success());
    assert_eq!(stdout(&output), "Y=a b\n");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ignoring configured defaults"));
    assert!(!stderr.contains("\n\n"), "blank line in: {stderr:?}");
}

#[test]
fn negated_flags_override_defaults_file() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "clean = true\ndrop_repeats = true").unwrap();
    let path = config.path().to_str().unwrap().to_string();

    let output = inienv(&["--config", &path, "-e", "Y=a", "-e", "Y=b"], "");
    assert_eq!(stdout(&output), "Y=b\n");

    let output = inienv(
        &["--config", &path, "--no-clean", "--no-drop-repeats", "-e", "Y=a", "-e", "Y=b"],
        "",
    );
    let text = stdout(&output);
    assert!(text.lines().any(|line| line == "Y=a b"));
    assert!(text.lines().any(|line| line == "AMBIENT=yes"));
}
