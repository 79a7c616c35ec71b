//! Per-thread output gate.
//!
//! A [`ParallelSink`] sits in front of a default sink and decides, per writing thread,
//! whether bytes are forwarded or dropped. Each thread can also point its writes at a
//! different sink for a while, with a stack of saved states (`setup` / `backup`) so
//! redirections nest.
//!
//! All state is keyed by [`ThreadId`]. Operations that take `Option<ThreadId>` act on the
//! calling thread when given `None`.
//!
//! ```
//! use std::io::Write;
//! use uwutils::redirect::ParallelSink;
//! use uwutils::sink::Capture;
//!
//! let capture = Capture::new();
//! let gate = ParallelSink::new(capture.sink());
//!
//! write!(&*gate, "shown ").unwrap();
//! gate.disable_during(None, || {
//!     write!(&*gate, "hidden ")?;
//!     Ok(())
//! })
//! .unwrap();
//! write!(&*gate, "shown again").unwrap();
//!
//! assert_eq!(capture.contents(), "shown shown again");
//! ```

mod guard;
mod policy;

pub use guard::FlagGuard;
pub use policy::FailurePolicy;

use std::fmt;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::ThreadId;

use dashmap::{DashMap, DashSet};

use crate::error::UwError;
use crate::sink::{SharedSink, SinkWrite};

/// Nesting limit for `setup` frames on one thread.
pub const DEFAULT_MAX_DEPTH: usize = 64;

fn resolve(thread: Option<ThreadId>) -> ThreadId {
    thread.unwrap_or_else(|| std::thread::current().id())
}

/// State saved by `setup` and restored by `backup`.
struct Frame {
    /// The thread's sink override, if it had one.
    sink: Option<SharedSink>,
    enabled: bool,
}

pub struct ParallelSink {
    default: SharedSink,
    policy: Mutex<FailurePolicy>,
    max_depth: AtomicUsize,
    flags: DashMap<ThreadId, bool>,
    streams: DashMap<ThreadId, SharedSink>,
    frames: DashMap<ThreadId, Vec<Frame>>,
    /// Threads currently inside `write_bytes`.
    writing: DashSet<ThreadId>,
}

/// Marks a thread as writing through a gate until dropped.
struct Writing<'a> {
    set: &'a DashSet<ThreadId>,
    thread: ThreadId,
}

impl<'a> Writing<'a> {
    fn enter(set: &'a DashSet<ThreadId>, thread: ThreadId) -> Option<Self> {
        set.insert(thread).then_some(Self { set, thread })
    }
}

impl Drop for Writing<'_> {
    fn drop(&mut self) {
        self.set.remove(&self.thread);
    }
}

impl ParallelSink {
    pub fn new(default: SharedSink) -> Arc<Self> {
        Self::with_policy(default, FailurePolicy::default())
    }

    pub fn with_policy(default: SharedSink, policy: FailurePolicy) -> Arc<Self> {
        Arc::new(Self {
            default,
            policy: Mutex::new(policy),
            max_depth: AtomicUsize::new(DEFAULT_MAX_DEPTH),
            flags: DashMap::new(),
            streams: DashMap::new(),
            frames: DashMap::new(),
            writing: DashSet::new(),
        })
    }

    pub fn with_max_depth(self: Arc<Self>, max_depth: usize) -> Arc<Self> {
        self.set_max_depth(max_depth);
        self
    }

    /// A sink handle that writes through this gate.
    pub fn handle(self: &Arc<Self>) -> SharedSink {
        SharedSink::from_arc(self.clone())
    }

    /// The sink used by threads without an override.
    pub fn default_sink(&self) -> &SharedSink {
        &self.default
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        *self.policy.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_failure_policy(&self, policy: FailurePolicy) {
        *self.policy.lock().unwrap_or_else(PoisonError::into_inner) = policy;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth.load(Ordering::Relaxed)
    }

    pub fn set_max_depth(&self, max_depth: usize) {
        self.max_depth.store(max_depth, Ordering::Relaxed);
    }

    /// Whether the thread's writes currently reach the sink.
    ///
    /// Threads start out enabled; the first query records that.
    pub fn is_enabled(&self, thread: Option<ThreadId>) -> bool {
        *self.flags.entry(resolve(thread)).or_insert(true).value()
    }

    pub fn enable(&self, thread: Option<ThreadId>) {
        self.set_enabled(thread, true);
    }

    pub fn disable(&self, thread: Option<ThreadId>) {
        self.set_enabled(thread, false);
    }

    pub fn set_enabled(&self, thread: Option<ThreadId>, enabled: bool) {
        self.flags.insert(resolve(thread), enabled);
    }

    /// Set the flag until the returned guard is dropped.
    pub fn scoped(&self, thread: Option<ThreadId>, enabled: bool) -> FlagGuard<'_> {
        let thread = resolve(thread);
        let previous = self.is_enabled(Some(thread));
        self.set_enabled(Some(thread), enabled);
        FlagGuard::new(self, thread, previous)
    }

    /// Run `op` with the thread enabled, then restore the previous flag.
    ///
    /// Returns `Ok(Some(value))` when `op` succeeds. A failure is handled by the
    /// [`FailurePolicy`] after the flag is restored: logged and reported as `Ok(None)`,
    /// or returned. Panics are not caught, but the flag is still restored while
    /// unwinding.
    pub fn enable_during<R>(
        &self,
        thread: Option<ThreadId>,
        op: impl FnOnce() -> anyhow::Result<R>,
    ) -> anyhow::Result<Option<R>> {
        self.run_with_flag(thread, true, op)
    }

    /// Run `op` with the thread disabled, then restore the previous flag.
    ///
    /// See [`ParallelSink::enable_during`] for how results and failures are reported.
    pub fn disable_during<R>(
        &self,
        thread: Option<ThreadId>,
        op: impl FnOnce() -> anyhow::Result<R>,
    ) -> anyhow::Result<Option<R>> {
        self.run_with_flag(thread, false, op)
    }

    fn run_with_flag<R>(
        &self,
        thread: Option<ThreadId>,
        enabled: bool,
        op: impl FnOnce() -> anyhow::Result<R>,
    ) -> anyhow::Result<Option<R>> {
        let result = {
            let _guard = self.scoped(thread, enabled);
            op()
        };
        let operation = if enabled {
            "Operation with output enabled"
        } else {
            "Operation with output disabled"
        };
        self.failure_policy().settle(result, operation)
    }

    /// Save the thread's sink and flag, then point the thread back at the default sink.
    pub fn setup(&self, thread: Option<ThreadId>) -> Result<(), UwError> {
        let thread = resolve(thread);
        let max_depth = self.max_depth();
        let frame = Frame {
            sink: self.stream_override(thread),
            enabled: self.is_enabled(Some(thread)),
        };

        let depth = {
            let mut frames = self.frames.entry(thread).or_default();
            if frames.len() >= max_depth {
                return Err(UwError::RedirectDepthExceeded { thread, max_depth });
            }
            frames.push(frame);
            frames.len()
        };
        self.streams.remove(&thread);

        log::debug!("Redirect setup on {thread:?} (depth {depth})");
        Ok(())
    }

    /// Restore the sink and flag saved by the most recent `setup` on the thread.
    pub fn backup(&self, thread: Option<ThreadId>) -> Result<(), UwError> {
        let thread = resolve(thread);
        let (frame, depth) = {
            let Some(mut frames) = self.frames.get_mut(&thread) else {
                return Err(UwError::UnbalancedBackup { thread });
            };
            let frame = frames.pop();
            (frame, frames.len())
        };
        self.frames.remove_if(&thread, |_, frames| frames.is_empty());

        let Some(frame) = frame else {
            return Err(UwError::UnbalancedBackup { thread });
        };
        match frame.sink {
            Some(sink) => {
                self.streams.insert(thread, sink);
            }
            None => {
                self.streams.remove(&thread);
            }
        }
        self.flags.insert(thread, frame.enabled);

        log::debug!("Redirect backup on {thread:?} (depth {depth})");
        Ok(())
    }

    /// Send the thread's writes to `sink` instead of the default sink.
    ///
    /// Fails with [`UwError::SelfNesting`] when `sink` is this gate. A longer cycle
    /// (this gate forwarding to another one that forwards back here) is only detected when
    /// written to: the write fails with [`UwError::RedirectLoop`].
    pub fn set_stream(&self, thread: Option<ThreadId>, sink: SharedSink) -> Result<(), UwError> {
        if sink.points_to(self) {
            return Err(UwError::SelfNesting);
        }
        self.streams.insert(resolve(thread), sink);
        Ok(())
    }

    /// The sink the thread's writes currently go to.
    pub fn current_stream(&self, thread: Option<ThreadId>) -> SharedSink {
        self.stream_override(resolve(thread))
            .unwrap_or_else(|| self.default.clone())
    }

    fn stream_override(&self, thread: ThreadId) -> Option<SharedSink> {
        self.streams.get(&thread).map(|sink| sink.value().clone())
    }

    /// True when no thread has an outstanding `setup` frame.
    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(|entry| entry.value().is_empty())
    }

    /// Number of outstanding `setup` frames on the thread.
    pub fn depth(&self, thread: Option<ThreadId>) -> usize {
        self.frames
            .get(&resolve(thread))
            .map_or(0, |frames| frames.len())
    }

    /// Drop everything recorded for a thread that has finished.
    pub fn forget(&self, thread: ThreadId) {
        self.flags.remove(&thread);
        self.streams.remove(&thread);
        if let Some((_, frames)) = self.frames.remove(&thread)
            && !frames.is_empty()
        {
            log::warn!(
                "Forgot {thread:?} with {} outstanding redirect frame(s)",
                frames.len()
            );
        }
    }
}

impl ParallelSink {
    /// Run `f` on the calling thread's current target, refusing to re-enter this gate.
    fn forward(&self, f: impl FnOnce(&SharedSink) -> io::Result<()>) -> io::Result<()> {
        let thread = std::thread::current().id();
        let Some(_writing) = Writing::enter(&self.writing, thread) else {
            return Err(io::Error::other(UwError::RedirectLoop { thread }));
        };
        // Cloned out of the map so no shard lock is held while writing.
        let target = self.current_stream(Some(thread));
        f(&target)
    }
}

impl SinkWrite for ParallelSink {
    fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        if !self.is_enabled(None) {
            return Ok(());
        }
        self.forward(|mut target| target.write_all(buf))
    }

    fn flush_sink(&self) -> io::Result<()> {
        self.forward(|mut target| target.flush())
    }
}

impl Write for &ParallelSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_sink()
    }
}

impl fmt::Debug for ParallelSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParallelSink")
            .field("default", &self.default)
            .field("policy", &self.failure_policy())
            .field("max_depth", &self.max_depth())
            .field("threads", &self.flags.len())
            .finish()
    }
}
