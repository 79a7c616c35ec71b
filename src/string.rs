//! String helpers: symmetric trimming and alphabet re-basing.
//!
//! All positions are counted in `char`s, not bytes, so multi-byte text is never split
//! inside a code point.

/// The empty string, the `_or_empty` default.
pub const EMPTY: &str = "";

/// Trim `diff` characters symmetrically.
///
/// - `diff > 0` removes `diff` characters from both ends.
/// - `diff < 0` removes characters around the middle, keeping the ends.
/// - `diff == 0` returns the input unchanged.
///
/// When the trim would consume the whole string the result is empty.
///
/// ```
/// use uwutils::string::trim;
///
/// assert_eq!(trim("[value]", 1).as_deref(), Some("value"));
/// assert_eq!(trim("abcdef", -1).as_deref(), Some("abef"));
/// ```
pub fn trim(s: &str, diff: i32) -> Option<String> {
    if diff == 0 {
        return Some(s.to_string());
    }

    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    let half = len / 2;
    let odd = len % 2;
    let count = diff.unsigned_abs() as usize;

    // Odd lengths leave less room around the middle than at the ends.
    let consumed = if diff < 0 {
        count + odd >= half
    } else {
        count >= half + odd
    };
    if consumed {
        return Some(EMPTY.to_string());
    }

    let trimmed = if diff < 0 {
        chars[..half - count + odd]
            .iter()
            .chain(&chars[half + count..])
            .collect()
    } else {
        chars[count..len - count].iter().collect()
    };

    Some(trimmed)
}

pub fn trim_or(s: &str, diff: i32, default: impl Into<String>) -> String {
    trim(s, diff).unwrap_or_else(|| default.into())
}

pub fn trim_or_else(s: &str, diff: i32, default: impl FnOnce() -> String) -> String {
    trim(s, diff).unwrap_or_else(default)
}

pub fn trim_or_empty(s: &str, diff: i32) -> String {
    trim_or(s, diff, EMPTY)
}

pub fn trim_or_self(s: &str, diff: i32) -> String {
    trim_or(s, diff, s)
}

/// Re-express `s`, written in the `current` alphabet, in the `next` alphabet.
///
/// Each character is replaced by the character of `next` at the same index it has in
/// `current`, wrapping around when `next` is shorter. Returns `None` if `s` contains a
/// character that is not part of `current`. If any of the three inputs is empty, `s` is
/// returned unchanged.
///
/// ```
/// use uwutils::string::to_base;
///
/// assert_eq!(to_base("0110", "01", "ab").as_deref(), Some("abba"));
/// assert_eq!(to_base("012", "01", "ab"), None);
/// ```
pub fn to_base(s: &str, current: &str, next: &str) -> Option<String> {
    if s.is_empty() || current.is_empty() || next.is_empty() {
        return Some(s.to_string());
    }

    let current: Vec<char> = current.chars().collect();
    let next: Vec<char> = next.chars().collect();

    s.chars()
        .map(|c| {
            current
                .iter()
                .position(|&candidate| candidate == c)
                .map(|idx| next[idx % next.len()])
        })
        .collect()
}

pub fn to_base_or(s: &str, current: &str, next: &str, default: impl Into<String>) -> String {
    to_base(s, current, next).unwrap_or_else(|| default.into())
}

pub fn to_base_or_else(
    s: &str,
    current: &str,
    next: &str,
    default: impl FnOnce() -> String,
) -> String {
    to_base(s, current, next).unwrap_or_else(default)
}

pub fn to_base_or_empty(s: &str, current: &str, next: &str) -> String {
    to_base_or(s, current, next, EMPTY)
}

pub fn to_base_or_self(s: &str, current: &str, next: &str) -> String {
    to_base_or(s, current, next, s)
}
