use crate::common::{ResourceRoots, roots, run_uw, stdout, uw_command};
use rstest::rstest;

fn args<'a>(head: &[&'a str], roots: &'a [String]) -> Vec<&'a str> {
    head.iter().copied().chain(roots.iter().map(String::as_str)).collect()
}

#[rstest]
fn test_resource_first_root_wins(roots: ResourceRoots) {
    roots.write(&roots.first(), "greeting.txt", "hello from first\n");
    roots.write(&roots.second(), "greeting.txt", "hello from second\n");
    roots.write(&roots.second(), "only/second.txt", "deep\n");
    let root_args = roots.root_args();

    let output = run_uw(&args(&["resource", "greeting.txt"], &root_args));
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "hello from first\n");

    let output = run_uw(&args(&["resource", "only/second.txt"], &root_args));
    assert_eq!(stdout(&output), "deep\n");
}

#[rstest]
fn test_missing_resource_exits_2(roots: ResourceRoots) {
    let output = run_uw(&args(&["resource", "absent.txt"], &roots.root_args()));
    assert_eq!(output.status.code(), Some(2));
}

#[rstest]
fn test_resource_roots_from_config(roots: ResourceRoots) {
    roots.write(&roots.second(), "from-config.txt", "configured\n");
    let config = roots.path().join("config.toml");
    std::fs::write(
        &config,
        format!("[resource]\nroots = [{:?}]\n", roots.second().display().to_string()),
    )
    .unwrap();

    let output = uw_command()
        .args(["resource", "from-config.txt"])
        .env("UWUTILS_CONFIG_PATH", &config)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");
    assert_eq!(stdout(&output), "configured\n");
}

#[rstest]
fn test_services_lists_names_in_order(roots: ResourceRoots) {
    roots.write(
        &roots.first(),
        "META-INF/services/app.Codec",
        "# built in\ncodecs.Zstd\n\ncodecs.Gzip\n",
    );
    roots.write(
        &roots.second(),
        "META-INF/services/app.Codec",
        "codecs.Gzip\ncodecs.Brotli\n",
    );

    let output = run_uw(&args(&["services", "app.Codec"], &roots.root_args()));
    assert!(output.status.success(), "{output:?}");
    insta::assert_snapshot!(stdout(&output), @r"
    codecs.Zstd
    codecs.Gzip
    codecs.Brotli
    ");
}

#[rstest]
fn test_services_none_exits_2(roots: ResourceRoots) {
    let output = run_uw(&args(&["services", "app.Missing"], &roots.root_args()));
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout(&output), "");
}
