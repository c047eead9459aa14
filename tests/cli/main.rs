use std::{
    io::{self, Write},
    process::{Command, Output, Stdio},
};

use pretty_assertions::assert_eq;

const FLAT: &[&str] = &[
    "tests/sample_test_suites/flat/test_sample.py::test_sample",
    "tests/sample_test_suites/flat/integration/test_some_integration.py::test_integration",
    "tests/sample_test_suites/flat/ui/test_some_ui.py::test_ui",
    "tests/sample_test_suites/flat/unit/test_some_unit.py::test_unit",
];

const NESTED: &[&str] = &[
    "tests/sample_test_suites/nested/app_1/tests/integration/test_some_integration.py",
    "tests/sample_test_suites/nested/app_1/tests/ui/test_some_ui.py",
    "tests/sample_test_suites/nested/app_1/tests/unit/test_some_unit.py",
    "tests/sample_test_suites/nested/app_2/tests/test_sth.py",
    "tests/sample_test_suites/nested/app_2/tests/test_unit.py",
];

fn kireorder(args: &[&str], tests: &[&str]) -> io::Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_kireorder"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take().ok_or_else(|| io::Error::other("no stdin"))?;
    for test in tests {
        writeln!(stdin, "{test}")?;
    }
    drop(stdin);

    child.wait_with_output()
}

fn reordered(args: &[&str], tests: &[&str]) -> Vec<String> {
    let output = kireorder(args, tests).unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn no_option_keeps_discovery_order() {
    assert_eq!(reordered(&[], FLAT), FLAT);
}

#[test]
fn bare_option_applies_default_order() {
    assert_eq!(
        reordered(&["--reorder"], FLAT),
        [FLAT[3], FLAT[0], FLAT[1], FLAT[2]]
    );
}

#[test]
fn bare_option_handles_nested_suites() {
    assert_eq!(
        reordered(&["--reorder"], NESTED),
        [NESTED[2], NESTED[4], NESTED[3], NESTED[0], NESTED[1]]
    );
}

#[test]
fn custom_option_applies_patterns() {
    let args = [
        "--reorder",
        "*",
        "(test_|.*/)unit",
        "(test_|.*/)ui",
        "(test_|.*/)integration",
    ];
    assert_eq!(
        reordered(&args, FLAT),
        [FLAT[0], FLAT[3], FLAT[2], FLAT[1]]
    );
}

#[test]
fn auto_prefix_mode_reorders_without_option() {
    let tests = ["test_other.py", "test_integration.py", "test_ui.py", "test_unit.py"];
    assert_eq!(
        reordered(&["--auto", "prefix"], &tests),
        ["test_unit.py", "test_other.py", "test_integration.py", "test_ui.py"]
    );
}

#[test]
fn identifiers_can_be_passed_as_arguments() {
    let args = ["test_ui.py", "test_unit.py", "--reorder"];
    assert_eq!(reordered(&args, &[]), ["test_unit.py", "test_ui.py"]);
}

#[test]
fn blank_lines_are_skipped() {
    assert_eq!(
        reordered(&["--reorder"], &["tests/ui/a.py", "", "tests/unit/b.py"]),
        ["tests/unit/b.py", "tests/ui/a.py"]
    );
}

#[test]
fn missing_unmatched_marker_fails_the_run() {
    let output = kireorder(&["--reorder", "match_a", "match_b", "match_c"], FLAT).unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains(
            "MissingUnmatchedMarkerError]: the ordering list does not specify the order of unmatched tests"
        ),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn invalid_pattern_fails_the_run() {
    let output = kireorder(&["--reorder", "(unclosed", "*"], FLAT).unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[InvalidPatternError]"), "unexpected stderr: {stderr}");
    assert!(stderr.contains("caused by:"), "unexpected stderr: {stderr}");
}

#[test]
fn unbalanced_pattern_fails_the_run() {
    let output = kireorder(&["--reorder", "a)|(b", "*"], &["xxb", "a"]).unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error[InvalidPatternError]"), "unexpected stderr: {stderr}");
}

#[test]
fn empty_pattern_fails_the_run() {
    let output = kireorder(&["--reorder", "", "*"], FLAT).unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(
        stderr.contains("error[EmptyPatternError]: the pattern at position 0 is empty"),
        "unexpected stderr: {stderr}"
    );
}
