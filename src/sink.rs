//! Shared output sinks.
//!
//! A [`SharedSink`] is a cheap, clonable handle to something bytes can be written to from
//! any thread. Two handles are "the same sink" when they point at the same allocation, which
//! is what the redirector uses to tell sinks apart (and to refuse forwarding into itself).

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, LazyLock, Mutex, PoisonError};

/// Something that accepts whole writes through a shared reference.
///
/// Implementations must be safe to call from several threads at once. A write either
/// lands completely or reports an error.
pub trait SinkWrite: Send + Sync {
    fn write_bytes(&self, buf: &[u8]) -> io::Result<()>;

    fn flush_sink(&self) -> io::Result<()>;
}

impl<W: Write + Send> SinkWrite for Mutex<W> {
    fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        // A panic while writing leaves at worst a partial line; keep accepting output.
        let mut writer = self.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(buf)
    }

    fn flush_sink(&self) -> io::Result<()> {
        self.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

struct ProcessStdout;

impl SinkWrite for ProcessStdout {
    fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        anstream::stdout().lock().write_all(buf)
    }

    fn flush_sink(&self) -> io::Result<()> {
        anstream::stdout().flush()
    }
}

struct ProcessStderr;

impl SinkWrite for ProcessStderr {
    fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        anstream::stderr().lock().write_all(buf)
    }

    fn flush_sink(&self) -> io::Result<()> {
        anstream::stderr().flush()
    }
}

static STDOUT: LazyLock<SharedSink> = LazyLock::new(|| SharedSink::from_arc(Arc::new(ProcessStdout)));
static STDERR: LazyLock<SharedSink> = LazyLock::new(|| SharedSink::from_arc(Arc::new(ProcessStderr)));

/// Clonable handle to a thread-safe sink.
#[derive(Clone)]
pub struct SharedSink(Arc<dyn SinkWrite>);

impl SharedSink {
    /// Wrap a writer. Concurrent writes are serialized by a mutex.
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        Self(Arc::new(Mutex::new(writer)))
    }

    pub fn from_arc(sink: Arc<dyn SinkWrite>) -> Self {
        Self(sink)
    }

    /// The process standard output. Every call returns the same sink.
    ///
    /// ANSI styling is stripped when stdout is not a terminal.
    pub fn stdout() -> Self {
        STDOUT.clone()
    }

    /// The process standard error. Every call returns the same sink.
    pub fn stderr() -> Self {
        STDERR.clone()
    }

    /// Whether both handles refer to the same sink.
    pub fn ptr_eq(&self, other: &SharedSink) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), Arc::as_ptr(&other.0))
    }

    /// Whether this handle refers to `target`.
    pub fn points_to<T: ?Sized>(&self, target: &T) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.0), target as *const T)
    }
}

impl fmt::Debug for SharedSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedSink({:p})", Arc::as_ptr(&self.0))
    }
}

impl Write for &SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush_sink()
    }
}

impl Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self).flush()
    }
}

/// An in-memory sink that remembers everything written to it.
///
/// Clones share the same buffer, so a test can hand [`Capture::sink`] to the code under
/// test and read the result back afterwards.
#[derive(Clone, Default)]
pub struct Capture {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl Capture {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink writing into this capture. Every call returns the same sink.
    pub fn sink(&self) -> SharedSink {
        SharedSink(self.buf.clone())
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.buf.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Everything written so far, decoded lossily.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }

    /// Return and clear the captured output.
    pub fn take(&self) -> String {
        let bytes = std::mem::take(&mut *self.buf.lock().unwrap_or_else(PoisonError::into_inner));
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl fmt::Debug for Capture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capture")
            .field("len", &self.bytes().len())
            .finish()
    }
}
