//! Shared helpers for integration tests.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use insta_cmd::get_cargo_bin;
use rstest::fixture;
use tempfile::TempDir;

/// Create a `uw` command isolated from the host environment.
///
/// - All host `UWUTILS_*` variables are cleared
/// - The config path points at a file that does not exist
/// - Color output is disabled so assertions see plain text
#[must_use]
pub fn uw_command() -> Command {
    let mut cmd = Command::new(get_cargo_bin("uw"));
    for (key, _) in std::env::vars() {
        if key.starts_with("UWUTILS_") {
            cmd.env_remove(&key);
        }
    }
    cmd.env("UWUTILS_CONFIG_PATH", "/nonexistent/test/config.toml");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("CLICOLOR_FORCE");
    cmd.env("RUST_LOG", "warn");
    cmd
}

/// Run `uw` with `args` and return its output.
pub fn run_uw(args: &[&str]) -> Output {
    uw_command().args(args).output().unwrap()
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Two resource roots in a temporary directory.
pub struct ResourceRoots {
    dir: TempDir,
}

impl ResourceRoots {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("first")).unwrap();
        std::fs::create_dir_all(dir.path().join("second")).unwrap();
        Self { dir }
    }

    pub fn first(&self) -> PathBuf {
        self.dir.path().join("first")
    }

    pub fn second(&self) -> PathBuf {
        self.dir.path().join("second")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, root: &Path, relative: &str, contents: &str) {
        let file = root.join(relative);
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(file, contents).unwrap();
    }

    /// `--root` arguments for both roots, first root first.
    pub fn root_args(&self) -> Vec<String> {
        [self.first(), self.second()]
            .iter()
            .flat_map(|root| ["--root".to_string(), root.display().to_string()])
            .collect()
    }
}

#[fixture]
pub fn roots() -> ResourceRoots {
    ResourceRoots::new()
}
