//! Slash-separated path helpers.
//!
//! These operate on path *strings* such as resource names (`META-INF/services/x`) rather
//! than on `std::path::Path`, so they behave the same on every platform: backslashes are
//! treated as separators and the result always uses `/`.

use std::sync::LazyLock;

use regex::Regex;

use crate::string::EMPTY;

static REPEATED_SLASHES: LazyLock<Regex> = LazyLock::new(|| Regex::new("/+").unwrap());

/// Normalize a slash path.
///
/// Surrounding whitespace is trimmed, `\` becomes `/`, runs of `/` collapse to one, and a
/// single leading and trailing `/` are dropped. Returns `None` when nothing is left.
///
/// ```
/// use uwutils::path::normalize;
///
/// assert_eq!(normalize(r" \assets//img\logo.png/ ").as_deref(), Some("assets/img/logo.png"));
/// assert_eq!(normalize("///"), None);
/// ```
pub fn normalize(path: &str) -> Option<String> {
    let slashed = path.trim().replace('\\', "/");
    let collapsed = REPEATED_SLASHES.replace_all(&slashed, "/");

    let stripped = collapsed.strip_prefix('/').unwrap_or(&collapsed);
    let stripped = stripped.strip_suffix('/').unwrap_or(stripped);

    (!stripped.is_empty()).then(|| stripped.to_string())
}

pub fn normalize_or(path: &str, default: impl Into<String>) -> String {
    normalize(path).unwrap_or_else(|| default.into())
}

pub fn normalize_or_else(path: &str, default: impl FnOnce() -> String) -> String {
    normalize(path).unwrap_or_else(default)
}

pub fn normalize_or_empty(path: &str) -> String {
    normalize_or(path, EMPTY)
}

pub fn normalize_or_self(path: &str) -> String {
    normalize_or(path, path)
}

/// Last segment of the normalized path.
///
/// ```
/// use uwutils::path::file_name;
///
/// assert_eq!(file_name("a\\b\\c.txt").as_deref(), Some("c.txt"));
/// assert_eq!(file_name("plain").as_deref(), Some("plain"));
/// ```
pub fn file_name(path: &str) -> Option<String> {
    let normalized = normalize(path)?;
    let name = match normalized.rfind('/') {
        Some(idx) => &normalized[idx + 1..],
        None => &normalized,
    };
    Some(name.to_string())
}

pub fn file_name_or(path: &str, default: impl Into<String>) -> String {
    file_name(path).unwrap_or_else(|| default.into())
}

pub fn file_name_or_else(path: &str, default: impl FnOnce() -> String) -> String {
    file_name(path).unwrap_or_else(default)
}

pub fn file_name_or_empty(path: &str) -> String {
    file_name_or(path, EMPTY)
}
