use crate::common::{stderr, stdout, uw_command};

#[test]
fn test_config_show_defaults() {
    let output = uw_command().args(["config", "show"]).output().unwrap();
    assert!(output.status.success(), "{output:?}");
    assert!(stderr(&output).contains("CONFIG  /nonexistent/test/config.toml"));

    let shown = stdout(&output);
    assert!(shown.contains("failure-policy = \"log\""));
    assert!(shown.contains("max-depth = 64"));
}

#[test]
fn test_env_override_applies() {
    let output = uw_command()
        .args(["config", "show"])
        .env("UWUTILS_REDIRECT_FAILURE_POLICY", "propagate")
        .env("UWUTILS_REDIRECT_MAX_DEPTH", "3")
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    let shown = stdout(&output);
    assert!(shown.contains("failure-policy = \"propagate\""));
    assert!(shown.contains("max-depth = 3"));
}

#[test]
fn test_invalid_env_override() {
    let output = uw_command()
        .args(["path", "name", "a/b"])
        .env("UWUTILS_REDIRECT_MAX_DEPTH", "lots")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    insta::assert_snapshot!(stderr(&output), @r#"
    ✗ Invalid value for UWUTILS_REDIRECT_MAX_DEPTH: "lots"
    ↳ Unset UWUTILS_REDIRECT_MAX_DEPTH to use the config file value
    "#);
}

#[test]
fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[redirect]\nmax-depth = \"deep\"\n").unwrap();

    let output = uw_command()
        .args(["--config", path.to_str().unwrap(), "path", "name", "a/b"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    let message = stderr(&output);
    assert!(message.contains("Invalid config file"), "{message}");
    assert!(message.contains("UWUTILS_CONFIG_PATH"), "{message}");
}

#[test]
fn test_unknown_config_key_warns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "colour = \"auto\"\n[redirect]\nmax-depth = 2\n").unwrap();

    let output = uw_command()
        .args(["--config", path.to_str().unwrap(), "path", "name", "a/b"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "b\n");
    let message = stderr(&output);
    assert!(message.contains("▲ Ignoring unknown key \"colour\""), "{message}");
    assert!(message.contains("config.toml"), "{message}");
}
