use std::io::{self, Read, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle over a connected byte stream.
///
/// Timeout races run frame I/O on a worker thread that may outlive the call,
/// so the stream lives behind `Arc<Mutex<_>>` and each worker holds a clone.
/// The mutex also keeps one frame operation on the stream at a time: a worker
/// abandoned by a timeout keeps the lock until its I/O returns.
#[derive(Debug)]
pub struct SharedStream<S> {
    inner: Arc<Mutex<S>>,
}

impl<S> Clone for SharedStream<S> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<S> SharedStream<S> {
    pub fn new(stream: S) -> Self {
        Self { inner: Arc::new(Mutex::new(stream)) }
    }

    /// Lock the stream for exclusive use. A poisoned lock is an I/O error:
    /// the stream position is unknown after a panic mid-frame.
    pub fn lock(&self) -> io::Result<MutexGuard<'_, S>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other("stream lock poisoned"))
    }

    /// Recover the stream once no worker holds a clone.
    pub fn into_inner(self) -> Result<S, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex
                .into_inner()
                .map_err(|poisoned| Self::new(poisoned.into_inner())),
            Err(inner) => Err(Self { inner }),
        }
    }
}

impl<S> From<S> for SharedStream<S> {
    fn from(stream: S) -> Self {
        Self::new(stream)
    }
}

impl<S: Read> Read for SharedStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.lock()?.read(buf)
    }
}

impl<S: Write> Write for SharedStream<S> {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.lock()?.write(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}
