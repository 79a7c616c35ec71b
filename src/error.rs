//! Error types
//!
//! Most helpers in this crate never fail: missing input degrades to a default value.
//! `UwError` covers the remaining cases, which are programming errors (misuse of the
//! redirector) or a configuration file that cannot be used.
//!
//! Use `.into()` to convert to `anyhow::Error`; the variant survives for pattern
//! matching via `downcast_ref`:
//!
//! ```
//! use uwutils::UwError;
//!
//! let err: anyhow::Error = UwError::SelfNesting.into();
//! assert!(matches!(err.downcast_ref::<UwError>(), Some(UwError::SelfNesting)));
//! ```

use std::path::PathBuf;
use std::thread::ThreadId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UwError {
    /// A parallel sink was asked to forward into itself.
    SelfNesting,
    /// A write came back to a parallel sink it had already passed through on this thread,
    /// through a chain of other sinks.
    RedirectLoop { thread: ThreadId },
    /// `backup` was called for a thread with no outstanding `setup` frame.
    UnbalancedBackup { thread: ThreadId },
    /// `setup` was called more times than the configured maximum without a `backup`.
    RedirectDepthExceeded { thread: ThreadId, max_depth: usize },
    /// The configuration file exists but could not be read or parsed.
    InvalidConfig { path: PathBuf, message: String },
    /// An environment override held a value that does not parse.
    InvalidEnvOverride { name: String, value: String },
}

impl std::error::Error for UwError {}

impl std::fmt::Display for UwError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UwError::SelfNesting => {
                write!(f, "A parallel sink cannot forward into itself")
            }
            UwError::RedirectLoop { thread } => {
                write!(
                    f,
                    "Output on thread {thread:?} is redirected in a loop back to the same sink"
                )
            }
            UwError::UnbalancedBackup { thread } => {
                write!(
                    f,
                    "Backup without a matching setup on thread {thread:?} (nothing to restore)"
                )
            }
            UwError::RedirectDepthExceeded { thread, max_depth } => {
                write!(
                    f,
                    "Too many nested setups on thread {thread:?} (maximum depth is {max_depth}); \
                     is a backup missing?"
                )
            }
            UwError::InvalidConfig { path, message } => {
                write!(f, "Invalid config file {}: {message}", path.display())
            }
            UwError::InvalidEnvOverride { name, value } => {
                write!(f, "Invalid value for {name}: {value:?}")
            }
        }
    }
}
