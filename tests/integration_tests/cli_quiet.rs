use crate::common::{run_uw, stderr, stdout};

#[test]
fn test_quiet_suppresses_stdout() {
    let output = run_uw(&["quiet", "--", "should", "not", "appear"]);
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "");
    insta::assert_snapshot!(stderr(&output), @"○ Suppressed 18 byte(s) on output; output is enabled again");
}

#[test]
fn test_quiet_suppresses_stderr() {
    let output = run_uw(&["quiet", "--stderr", "--", "hidden"]);
    assert!(output.status.success(), "{output:?}");
    assert!(!stderr(&output).contains("hidden\n"));
    assert!(stderr(&output).contains("Suppressed 7 byte(s) on error"));
}
