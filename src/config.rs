//! User configuration.
//!
//! Settings come from a TOML file and can be overridden by environment variables. Every
//! key is optional:
//!
//! ```toml
//! [redirect]
//! failure-policy = "log"   # or "propagate"
//! max-depth = 64
//!
//! [resource]
//! roots = ["resources", "/usr/share/app"]
//! lossy = false
//! ```
//!
//! The file is looked up at, in order: the path given to [`set_config_path`] (the CLI
//! `--config` flag), `$UWUTILS_CONFIG_PATH`, then `<config dir>/uwutils/config.toml`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};

use crate::error::UwError;
use crate::redirect::{DEFAULT_MAX_DEPTH, FailurePolicy};
use crate::resource::ResourceLocator;

pub const CONFIG_PATH_ENV: &str = "UWUTILS_CONFIG_PATH";
pub const FAILURE_POLICY_ENV: &str = "UWUTILS_REDIRECT_FAILURE_POLICY";
pub const MAX_DEPTH_ENV: &str = "UWUTILS_REDIRECT_MAX_DEPTH";
pub const RESOURCE_ROOTS_ENV: &str = "UWUTILS_RESOURCE_ROOTS";
pub const RESOURCE_LOSSY_ENV: &str = "UWUTILS_RESOURCE_LOSSY";

/// Override for the config path, set via the `--config` CLI flag.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Set the config path override. Only the first call has an effect.
pub fn set_config_path(path: PathBuf) {
    CONFIG_PATH.set(path).ok();
}

pub fn get_config_path() -> Option<PathBuf> {
    if let Some(path) = CONFIG_PATH.get() {
        return Some(path.clone());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    // XDG on Linux and macOS, %APPDATA% on Windows
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("uwutils").join("config.toml"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RedirectConfig {
    pub failure_policy: FailurePolicy,
    pub max_depth: usize,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ResourceConfig {
    pub roots: Vec<PathBuf>,
    pub lossy: bool,
}

impl ResourceConfig {
    pub fn locator(&self) -> ResourceLocator {
        ResourceLocator::new(self.roots.clone()).lossy(self.lossy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct UwConfig {
    pub redirect: RedirectConfig,
    pub resource: ResourceConfig,

    /// Keys this version doesn't know about. They are otherwise ignored; `uw` reports them
    /// as warnings.
    #[serde(flatten, skip_serializing)]
    pub unknown: BTreeMap<String, toml::Value>,
}

impl UwConfig {
    /// Load the configuration from the default location plus environment overrides.
    ///
    /// A missing file is not an error.
    pub fn load() -> Result<Self, UwError> {
        let mut config = match get_config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            Some(path) => {
                log::debug!("No config file at {}", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load a config file, without environment overrides.
    pub fn load_from(path: &Path) -> Result<Self, UwError> {
        let invalid = |message: String| UwError::InvalidConfig {
            path: path.to_path_buf(),
            message,
        };
        let contents = std::fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
        let config = Self::parse(&contents).map_err(|e| invalid(e.message().to_string()))?;

        for key in config.unknown.keys() {
            log::debug!("Unknown key {key:?} in config file {}", path.display());
        }
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply overrides read through `lookup` (normally the process environment).
    pub fn apply_env_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), UwError> {
        let invalid = |name: &str, value: &str| UwError::InvalidEnvOverride {
            name: name.to_string(),
            value: value.to_string(),
        };

        if let Some(value) = lookup(FAILURE_POLICY_ENV) {
            self.redirect.failure_policy = value
                .trim()
                .parse()
                .map_err(|_| invalid(FAILURE_POLICY_ENV, &value))?;
        }
        if let Some(value) = lookup(MAX_DEPTH_ENV) {
            self.redirect.max_depth = value
                .trim()
                .parse()
                .map_err(|_| invalid(MAX_DEPTH_ENV, &value))?;
        }
        if let Some(value) = lookup(RESOURCE_ROOTS_ENV) {
            self.resource.roots = std::env::split_paths(&value)
                .filter(|root| !root.as_os_str().is_empty())
                .collect();
        }
        if let Some(value) = lookup(RESOURCE_LOSSY_ENV) {
            self.resource.lossy =
                parse_bool(&value).ok_or_else(|| invalid(RESOURCE_LOSSY_ENV, &value))?;
        }
        Ok(())
    }

    /// The effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
