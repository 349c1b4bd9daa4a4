use std::io::Read;
use std::string::FromUtf8Error;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use std::{io, thread};
use thiserror::Error;
use crate::constants::BACKGROUND_READER_CHECK_INTERVAL;

/// Collects a child's output on a thread so that a test can wait for
/// a log line without blocking on the pipe itself.
pub struct BackgroundReader {
    thread: Option<JoinHandle<Result<(), io::Error>>>,
    inner: Arc<Mutex<Inner>>,
    timeout: Duration,
}

#[derive(Default)]
struct Inner {
    buf: Vec<u8>,
    finished: bool,
}

impl BackgroundReader {
    pub fn new(
        reader: impl Read + Send + 'static,
        timeout: Duration,
    ) -> Self {
        let inner = Arc::new(Mutex::new(Inner::default()));
        let inner2 = inner.clone();
        let thread = thread::spawn(move || Self::read_loop(reader, inner2));
        BackgroundReader {
            thread: Some(thread),
            inner,
            timeout,
        }
    }

    fn read_loop(
        mut reader: impl Read,
        inner: Arc<Mutex<Inner>>,
    ) -> Result<(), io::Error> {
        let mut read_buf = [0u8; 16 * 1024];
        let result = loop {
            match reader.read(&mut read_buf) {
                Ok(0) => break Ok(()),
                Ok(bytes_read) => lock(&inner).buf
                    .extend_from_slice(&read_buf[..bytes_read]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => (),
                Err(e) => break Err(e),
            }
        };
        lock(&inner).finished = true;
        result
    }

    /// Waits for `string` to appear and returns everything read up to and
    /// including it. The rest stays buffered for the next call.
    pub fn wait_until(
        &mut self,
        string: &str,
    ) -> Result<String, BackgroundReaderError> {
        let needle = string.as_bytes();
        let start = Instant::now();
        loop {
            {
                let mut inner = lock(&self.inner);
                if let Some(pos) = inner.buf
                    .windows(needle.len())
                    .position(|w| w == needle)
                {
                    let rest = inner.buf.split_off(pos + needle.len());
                    let found = std::mem::replace(&mut inner.buf, rest);
                    return Ok(String::from_utf8(found)?)
                }
                if inner.finished {
                    return Err(BackgroundReaderError::Eof(
                        String::from_utf8_lossy(&inner.buf).into_owned()
                    ))
                }
            }
            if start.elapsed() > self.timeout {
                return Err(BackgroundReaderError::Timeout(
                    String::from_utf8_lossy(&lock(&self.inner).buf).into_owned()
                ))
            }
            thread::sleep(BACKGROUND_READER_CHECK_INTERVAL);
        }
    }

    /// Everything not yet returned by [`Self::wait_until`]. Blocks until
    /// the writing end is closed.
    pub fn read_to_end(mut self) -> Result<String, BackgroundReaderError> {
        if let Some(thread) = self.thread.take() {
            thread.join()
                .map_err(|_| BackgroundReaderError::Panicked)?
                .map_err(BackgroundReaderError::Io)?;
        }
        let buf = std::mem::take(&mut lock(&self.inner).buf);
        Ok(String::from_utf8(buf)?)
    }
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock()
        .unwrap_or_else(|e| panic!("background reader state poisoned: {e}"))
}

#[derive(Debug, Error)]
pub enum BackgroundReaderError {
    #[error(transparent)]
    Io(io::Error),

    #[error(transparent)]
    FromUtf8(#[from] FromUtf8Error),

    #[error("timed out, last output: {0}")]
    Timeout(String),

    #[error("output ended, last output: {0}")]
    Eof(String),

    #[error("reader thread panicked")]
    Panicked,
}
