//! CR-LF line framing for the sensor byte stream
//!
//! The device emits one JSON status message per line, but a serial read
//! returns whatever bytes happen to be in the UART buffer - a message may
//! arrive in several pieces, or several messages in one piece. The
//! [`LineAssembler`] turns that chunk stream back into discrete lines,
//! carrying any trailing partial line across calls.

/// Two-byte line delimiter emitted by the device firmware
pub const DELIMITER: &[u8; 2] = b"\r\n";

/// Recoverable framing failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Accumulated more than the configured cap without seeing a delimiter
    #[error("line exceeded {limit} bytes without a delimiter")]
    LineTooLong { limit: usize },
}

/// Reassembles delimiter-terminated lines from arbitrary byte chunks
///
/// The internal buffer holds exactly the bytes received since the last
/// emitted delimiter. Growth is bounded by `max_line_bytes`: once an
/// accumulation exceeds the cap, it is discarded, reported once as
/// [`FrameError::LineTooLong`], and framing resynchronizes at the next
/// delimiter.
pub struct LineAssembler {
    buf: Vec<u8>,
    max_line_bytes: usize,
    /// Inside an oversized line, waiting for the next delimiter
    discarding: bool,
}

impl LineAssembler {
    /// Create an assembler with the given per-line byte cap
    pub fn new(max_line_bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(256),
            max_line_bytes,
            discarding: false,
        }
    }

    /// Append `chunk` and return every line it completes, in stream order.
    ///
    /// Emitted lines exclude the delimiter. Bytes after the last delimiter
    /// stay buffered for the next call, so no line is lost or duplicated
    /// when it spans a chunk boundary. An empty line (back-to-back
    /// delimiters) is emitted as an empty `Vec`.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<Result<Vec<u8>, FrameError>> {
        self.buf.extend_from_slice(chunk);
        let mut out = Vec::new();

        loop {
            match find_delimiter(&self.buf) {
                Some(pos) => {
                    let end = pos + DELIMITER.len();
                    if self.discarding {
                        // Tail of an already-reported oversized line
                        self.buf.drain(..end);
                        self.discarding = false;
                    } else if pos > self.max_line_bytes {
                        self.buf.drain(..end);
                        out.push(Err(FrameError::LineTooLong {
                            limit: self.max_line_bytes,
                        }));
                    } else {
                        let mut line: Vec<u8> = self.buf.drain(..end).collect();
                        line.truncate(pos);
                        out.push(Ok(line));
                    }
                }
                None => {
                    // A trailing CR may be the first half of a delimiter
                    let keep = usize::from(self.buf.last() == Some(&b'\r'));
                    let pending = self.buf.len() - keep;
                    if self.discarding {
                        self.buf.drain(..pending);
                    } else if pending > self.max_line_bytes {
                        self.buf.drain(..pending);
                        self.discarding = true;
                        out.push(Err(FrameError::LineTooLong {
                            limit: self.max_line_bytes,
                        }));
                    }
                    break;
                }
            }
        }

        out
    }

    /// Bytes currently buffered while waiting for a delimiter
    pub fn pending(&self) -> usize {
        self.buf.len()
    }
}

fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(DELIMITER.len()).position(|w| w == DELIMITER)
}
