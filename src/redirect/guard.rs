use std::thread::ThreadId;

use super::ParallelSink;

/// Restores a thread's enabled flag when dropped.
///
/// Returned by [`ParallelSink::scoped`]. The flag is restored on every exit path of the
/// enclosing block, including unwinding from a panic.
#[must_use = "the flag is restored as soon as the guard is dropped"]
pub struct FlagGuard<'a> {
    sink: &'a ParallelSink,
    thread: ThreadId,
    previous: bool,
}

impl<'a> FlagGuard<'a> {
    pub(super) fn new(sink: &'a ParallelSink, thread: ThreadId, previous: bool) -> Self {
        Self {
            sink,
            thread,
            previous,
        }
    }

    /// The flag that will be restored.
    pub fn previous(&self) -> bool {
        self.previous
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.sink.set_enabled(Some(self.thread), self.previous);
    }
}
