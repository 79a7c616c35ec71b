//! Process-wide output slots.
//!
//! Each standard stream has an *active* sink (what [`print`] writes to) and a global
//! [`ParallelSink`] that can be swapped into the slot so that output becomes gateable per
//! thread. State is created lazily on first use and lives for the process.
//!
//! ```no_run
//! use uwutils::system::{self, Stream};
//!
//! system::disable_print_during(Stream::Output, None, || {
//!     system::print(Stream::Output, "not shown\n")?;
//!     Ok(())
//! })?;
//! system::print(Stream::Output, "shown\n")?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! # Root tracking
//!
//! The first [`setup_parallel_print`] on a stream records whatever was active in the slot
//! as the *root* and installs the parallel sink. Enabled output of the parallel sink is
//! forwarded to the root. Later setups (on any thread) keep the recorded root, even if
//! the active sink was swapped in between. Only the [`backup_system_print`] that leaves
//! no frame on any thread puts the root back.

use std::io::{self, Write};
use std::panic::Location;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};
use std::thread::ThreadId;

use strum::{Display, EnumIter, EnumString};

use crate::config::RedirectConfig;
use crate::error::UwError;
use crate::redirect::{FailurePolicy, ParallelSink};
use crate::sink::{SharedSink, SinkWrite};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Stream {
    Output,
    Error,
}

struct Slot {
    active: SharedSink,
    root: Option<SharedSink>,
}

struct StreamState {
    parallel: Arc<ParallelSink>,
    process: SharedSink,
    slot: Mutex<Slot>,
}

impl StreamState {
    fn new(stream: Stream, process: SharedSink) -> Self {
        let underlying = SharedSink::from_arc(Arc::new(Underlying { stream }));
        Self {
            parallel: ParallelSink::new(underlying),
            process: process.clone(),
            slot: Mutex::new(Slot {
                active: process,
                root: None,
            }),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Where enabled output of the parallel sink ends up: the root while the parallel
    /// sink is installed, otherwise the active sink.
    fn underlying(&self) -> SharedSink {
        let slot = self.slot();
        match &slot.root {
            Some(root) => root.clone(),
            None if !slot.active.points_to(&*self.parallel) => slot.active.clone(),
            None => self.process.clone(),
        }
    }
}

/// Default sink of a global parallel sink.
struct Underlying {
    stream: Stream,
}

impl SinkWrite for Underlying {
    fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        // Resolved per write, and the slot lock is released before writing.
        let target = state(self.stream).underlying();
        (&target).write_all(buf)
    }

    fn flush_sink(&self) -> io::Result<()> {
        (&state(self.stream).underlying()).flush()
    }
}

static OUTPUT: LazyLock<StreamState> =
    LazyLock::new(|| StreamState::new(Stream::Output, SharedSink::stdout()));
static ERROR: LazyLock<StreamState> =
    LazyLock::new(|| StreamState::new(Stream::Error, SharedSink::stderr()));

fn state(stream: Stream) -> &'static StreamState {
    match stream {
        Stream::Output => &OUTPUT,
        Stream::Error => &ERROR,
    }
}

/// The sink currently active for `stream`.
pub fn active(stream: Stream) -> SharedSink {
    state(stream).slot().active.clone()
}

/// Replace the active sink for `stream`, returning the previous one.
pub fn set_active(stream: Stream, sink: SharedSink) -> SharedSink {
    std::mem::replace(&mut state(stream).slot().active, sink)
}

/// The global parallel sink of `stream`.
pub fn parallel(stream: Stream) -> Arc<ParallelSink> {
    state(stream).parallel.clone()
}

/// A handle to the global parallel sink of standard output.
pub fn out() -> SharedSink {
    state(Stream::Output).parallel.handle()
}

/// A handle to the global parallel sink of standard error.
pub fn err() -> SharedSink {
    state(Stream::Error).parallel.handle()
}

/// Write `message` to the active sink of `stream`.
pub fn print(stream: Stream, message: impl AsRef<str>) -> io::Result<()> {
    // The slot lock is released before writing.
    let sink = active(stream);
    (&sink).write_all(message.as_ref().as_bytes())
}

pub fn println(stream: Stream, message: impl AsRef<str>) -> io::Result<()> {
    let sink = active(stream);
    let mut line = message.as_ref().to_owned();
    line.push('\n');
    (&sink).write_all(line.as_bytes())
}

/// Push a frame on the stream's parallel sink and make sure it is the active sink.
pub fn setup_parallel_print(stream: Stream, thread: Option<ThreadId>) -> Result<(), UwError> {
    let state = state(stream);
    let mut slot = state.slot();
    state.parallel.setup(thread)?;

    let handle = state.parallel.handle();
    if !slot.active.ptr_eq(&handle) {
        let replaced = std::mem::replace(&mut slot.active, handle);
        if slot.root.is_none() {
            slot.root = Some(replaced);
        }
        log::debug!("Installed parallel {stream} sink");
    }
    Ok(())
}

/// Pop a frame from the stream's parallel sink, restoring the root once no thread has a
/// frame left.
pub fn backup_system_print(stream: Stream, thread: Option<ThreadId>) -> Result<(), UwError> {
    let state = state(stream);
    let mut slot = state.slot();
    state.parallel.backup(thread)?;

    if state.parallel.is_empty()
        && let Some(root) = slot.root.take()
    {
        slot.active = root;
        log::debug!("Restored root {stream} sink");
    }
    Ok(())
}

/// Backs up a stream when dropped, so an unwinding operation still leaves the slot
/// balanced.
struct Installed {
    stream: Stream,
    thread: Option<ThreadId>,
}

impl Installed {
    fn new(stream: Stream, thread: Option<ThreadId>) -> Result<Self, UwError> {
        setup_parallel_print(stream, thread)?;
        Ok(Self { stream, thread })
    }
}

impl Drop for Installed {
    fn drop(&mut self) {
        if let Err(err) = backup_system_print(self.stream, self.thread) {
            log::warn!("Could not restore {} sink: {err}", self.stream);
        }
    }
}

pub fn is_print_enabled(stream: Stream, thread: Option<ThreadId>) -> bool {
    state(stream).parallel.is_enabled(thread)
}

pub fn enable_print(stream: Stream, thread: Option<ThreadId>) {
    state(stream).parallel.enable(thread);
}

pub fn disable_print(stream: Stream, thread: Option<ThreadId>) {
    state(stream).parallel.disable(thread);
}

/// Run `op` with `stream` output enabled for the thread.
///
/// The parallel sink is installed for the duration, so output written through
/// [`active`] is gated. Results are reported as in [`ParallelSink::enable_during`].
pub fn enable_print_during<R>(
    stream: Stream,
    thread: Option<ThreadId>,
    op: impl FnOnce() -> anyhow::Result<R>,
) -> anyhow::Result<Option<R>> {
    let _installed = Installed::new(stream, thread)?;
    state(stream).parallel.enable_during(thread, op)
}

/// Run `op` with `stream` output disabled for the thread.
pub fn disable_print_during<R>(
    stream: Stream,
    thread: Option<ThreadId>,
    op: impl FnOnce() -> anyhow::Result<R>,
) -> anyhow::Result<Option<R>> {
    let _installed = Installed::new(stream, thread)?;
    state(stream).parallel.disable_during(thread, op)
}

pub fn set_failure_policy(stream: Stream, policy: FailurePolicy) {
    state(stream).parallel.set_failure_policy(policy);
}

/// Apply the redirect settings to both global parallel sinks.
pub fn configure(config: &RedirectConfig) {
    for stream in [Stream::Output, Stream::Error] {
        let parallel = &state(stream).parallel;
        parallel.set_failure_policy(config.failure_policy);
        parallel.set_max_depth(config.max_depth);
    }
}

/// Source location of the code that called the function this is called from.
///
/// Only meaningful inside a `#[track_caller]` function; elsewhere it is the location of
/// the call to `caller_location` itself.
#[track_caller]
pub fn caller_location() -> &'static Location<'static> {
    Location::caller()
}
