//! Null-coalescing helpers.
//!
//! These are the building blocks every other helper in the crate is written in terms
//! of. They are thin on purpose: `Option` already carries the semantics, these just
//! give the "value or default" pattern one spelling across the crate.

/// Return `value`, or `default` when it is absent.
pub fn if_null<T>(value: Option<T>, default: T) -> T {
    value.unwrap_or(default)
}

/// Return `value`, or the result of `default` when it is absent.
///
/// `default` only runs when needed.
pub fn if_null_else<T>(value: Option<T>, default: impl FnOnce() -> T) -> T {
    value.unwrap_or_else(default)
}

/// Apply `f` to a present value.
///
/// `f` itself may produce nothing, in which case the result is absent too.
pub fn if_not_null<T, R>(value: Option<T>, f: impl FnOnce(T) -> Option<R>) -> Option<R> {
    value.and_then(f)
}

/// Apply `f` to a present value, falling back to `default` when either the input or the
/// mapped value is absent.
pub fn if_not_null_or<T, R>(value: Option<T>, f: impl FnOnce(T) -> Option<R>, default: R) -> R {
    if_null(if_not_null(value, f), default)
}

/// Lazy-default form of [`if_not_null_or`].
pub fn if_not_null_or_else<T, R>(
    value: Option<T>,
    f: impl FnOnce(T) -> Option<R>,
    default: impl FnOnce() -> R,
) -> R {
    if_null_else(if_not_null(value, f), default)
}
