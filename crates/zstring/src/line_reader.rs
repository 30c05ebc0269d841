//! Line extraction from a shared byte stream.

use std::io::{self, BufRead};
use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use crate::ZString;

/// How a line read ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRead {
    /// A line terminator was consumed; the count includes it.
    Terminated(usize),
    /// End of stream before any terminator. A count equal to the line
    /// length distinguishes an unterminated last line from a terminated
    /// one.
    Eof(usize),
}

impl LineRead {
    /// Stream bytes consumed, regardless of how the line ended.
    #[must_use]
    pub const fn consumed(&self) -> usize {
        match self {
            Self::Terminated(n) | Self::Eof(n) => *n,
        }
    }
}

/// A line read failed partway through the stream.
#[derive(Debug, Error)]
#[error("stream read failed after {consumed} bytes")]
pub struct ReadError {
    /// Bytes consumed from the stream before the failure.
    pub consumed: usize,
    /// The underlying I/O failure.
    #[source]
    pub source: io::Error,
}

/// A byte stream shared between readers.
///
/// Wraps the stream in a lock so that one line is always read whole:
/// two callers extracting lines from the same stream can interleave
/// between lines but never within one. The lock protects the stream
/// only, not any destination string.
#[derive(Debug)]
pub struct SharedStream<R> {
    inner: Mutex<R>,
}

impl<R: BufRead> SharedStream<R> {
    /// Wraps `inner` for shared line reading.
    pub fn new(inner: R) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Releases the wrapper and hands the stream back.
    pub fn into_inner(self) -> R {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads one line into `out`, discarding `out`'s previous content.
    ///
    /// Consumes stream bytes one at a time until a `\n` or end-of-stream,
    /// holding the stream lock for the whole read; the guard releases it
    /// on every exit path. The terminator is consumed but not stored.
    /// Zero bytes in the stream vanish (they cannot enter a [`ZString`])
    /// and are not counted.
    ///
    /// # Errors
    ///
    /// Any I/O failure other than an interrupt comes back as
    /// [`ReadError`], with the count of bytes consumed before it. Bytes
    /// already read remain in `out`.
    pub fn read_line(&self, out: &mut ZString) -> Result<LineRead, ReadError> {
        out.assign(b"");
        let mut consumed = 0usize;
        // A panic while holding the lock cannot leave the stream in a
        // torn state, so a poisoned lock is recovered rather than
        // propagated.
        let mut stream = self.inner.lock().unwrap_or_else(PoisonError::into_inner);

        loop {
            let next = {
                let buf = match stream.fill_buf() {
                    Ok(buf) => buf,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        return Err(ReadError {
                            consumed,
                            source: e,
                        });
                    }
                };
                match buf.first() {
                    None => return Ok(LineRead::Eof(out.len())),
                    Some(&c) => c,
                }
            };

            stream.consume(1);
            consumed += 1;

            if next == b'\n' {
                return Ok(LineRead::Terminated(out.len() + 1));
            }
            out.push(next);
        }
    }
}
