//! Value-or-default helpers and a per-thread output gate.
//!
//! Most of this crate is a flat set of small helpers that turn "missing input" or an
//! anticipated lookup failure into a caller-supplied default. Each helper comes in the
//! same family of shapes:
//!
//! - `x(..) -> Option<T>`: the primary form
//! - `x_or(.., default)`: eager default
//! - `x_or_else(.., || default)`: lazy default
//! - `x_or_empty(..)`: the type's empty value
//!
//! The one stateful component is [`redirect::ParallelSink`], a writable sink that
//! forwards or drops writes depending on a per-thread flag, and the process-wide
//! [`system`] module built on top of it.
//!
//! ```
//! use uwutils::object::if_null;
//!
//! assert_eq!(if_null(None, "fallback"), "fallback");
//! assert_eq!(if_null(Some("x"), "fallback"), "x");
//! ```

pub mod array;
pub mod bean;
pub mod collection;
pub mod compare;
pub mod config;
pub mod enums;
pub mod error;
pub mod object;
pub mod path;
pub mod redirect;
pub mod reflect;
pub mod resource;
pub mod sink;
pub mod string;
pub mod styling;
pub mod system;

pub use error::UwError;
pub use redirect::{FailurePolicy, ParallelSink};
pub use sink::SharedSink;
pub use system::Stream;
