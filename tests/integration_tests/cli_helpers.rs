use crate::common::{run_uw, stdout};
use rstest::rstest;

#[rstest]
#[case::normalize(&["path", "normalize", r"\assets//img\logo.png/"], "assets/img/logo.png")]
#[case::name(&["path", "name", "META-INF/services/app.Codec"], "app.Codec")]
#[case::trim(&["string", "trim", "[value]", "1"], "value")]
#[case::trim_middle(&["string", "trim", "abcdef", "-1"], "abef")]
#[case::trim_middle_odd(&["string", "trim", "abcdefg", "-1"], "abcefg")]
#[case::trim_middle_odd_consumed(&["string", "trim", "abcde", "-1"], "")]
#[case::rebase(&["string", "rebase", "0110", "01", "ab"], "abba")]
fn test_helper_prints_value(#[case] args: &[&str], #[case] expected: &str) {
    let output = run_uw(args);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), format!("{expected}\n"));
}

#[rstest]
#[case::empty_path(&["path", "normalize", "///"])]
#[case::empty_name(&["path", "name", "  "])]
#[case::foreign_char(&["string", "rebase", "012", "01", "ab"])]
fn test_no_value_exits_2(#[case] args: &[&str]) {
    let output = run_uw(args);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
}

#[test]
fn test_no_arguments_shows_help() {
    let output = run_uw(&[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: uw"));
}
