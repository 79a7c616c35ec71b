//! Text resources looked up across an ordered list of root directories.
//!
//! A resource path is relative (`"templates/greeting.txt"`); the first root that contains
//! it wins. Missing resources are an expected outcome and quietly produce the default;
//! anything else that goes wrong while reading is logged before the default is returned.

use std::io;
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLocator {
    roots: Vec<PathBuf>,
    lossy: bool,
}

impl ResourceLocator {
    pub fn new(roots: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            lossy: false,
        }
    }

    /// Decode invalid UTF-8 with replacement characters instead of failing.
    pub fn lossy(mut self, lossy: bool) -> Self {
        self.lossy = lossy;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn is_lossy(&self) -> bool {
        self.lossy
    }

    /// The file for `path` under the first root that has one.
    pub fn find(&self, path: &str) -> Option<PathBuf> {
        self.find_all(path).into_iter().next()
    }

    /// The file for `path` under every root that has one, in root order.
    pub fn find_all(&self, path: &str) -> Vec<PathBuf> {
        let Some(relative) = relative_path(path) else {
            return Vec::new();
        };
        self.roots
            .iter()
            .map(|root| root.join(relative))
            .filter(|candidate| candidate.is_file())
            .collect()
    }

    /// Read the resource at `path` from the first root that has it.
    pub fn read_to_string(&self, path: &str) -> Option<String> {
        let file = self.find(path)?;
        self.read_file(&file)
    }

    pub fn read_to_string_or(&self, path: &str, default: impl Into<String>) -> String {
        self.read_to_string(path).unwrap_or_else(|| default.into())
    }

    pub fn read_to_string_or_else(&self, path: &str, default: impl FnOnce() -> String) -> String {
        self.read_to_string(path).unwrap_or_else(default)
    }

    pub fn read_to_string_or_empty(&self, path: &str) -> String {
        self.read_to_string(path).unwrap_or_default()
    }

    /// Read one file with this locator's decoding rules.
    pub fn read_file(&self, file: &Path) -> Option<String> {
        let bytes = match std::fs::read(file) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", file.display());
                return None;
            }
        };

        if self.lossy {
            return Some(String::from_utf8_lossy(&bytes).into_owned());
        }
        match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("{} is not valid UTF-8: {e}", file.display());
                None
            }
        }
    }
}

/// `path` as a path relative to a root, or `None` when it is empty or tries to leave the
/// root.
fn relative_path(path: &str) -> Option<&Path> {
    let trimmed = path.trim_start_matches(['/', '\\']);
    if trimmed.is_empty() {
        return None;
    }
    let relative = Path::new(trimmed);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        log::debug!("Ignoring resource path outside the roots: {path:?}");
        return None;
    }
    Some(relative)
}
