//! Request Reader: decides when a complete request has arrived.
//!
//! A request is complete once the header terminator (`\r\n\r\n`) has been
//! seen and at least `Content-Length` body bytes follow it. A missing or
//! unparseable `Content-Length` counts as zero. The accumulated bytes never
//! exceed the buffer capacity; a full buffer is treated as complete and left
//! for the parser to accept or reject.

use std::io;

/// Upper bound on the bytes accumulated for one request.
pub const MAX_REQUEST_BYTES: usize = 65536;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const CONTENT_LENGTH: &[u8] = b"content-length";
/// Largest slice a host should read into per call.
pub const READ_CHUNK: usize = 4096;

/// Framing state after feeding bytes into a `RequestBuffer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// More bytes are needed.
    Incomplete,
    /// Headers and the declared body are present, or the buffer is full.
    Complete,
}

/// Sans-IO accumulator for one request.
///
/// The host reads from its socket and calls `feed` with whatever arrived.
/// When the peer closes before `Framing::Complete` the host calls `closed`,
/// and when a read fails it calls `read_failed`. Both hand back the partial
/// bytes if anything arrived.
#[derive(Debug, Clone)]
pub struct RequestBuffer {
    buf: Vec<u8>,
    capacity: usize,
}

impl Default for RequestBuffer {
    fn default() -> Self {
        Self::with_capacity(MAX_REQUEST_BYTES)
    }
}

impl RequestBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity.min(READ_CHUNK)),
            capacity,
        }
    }

    /// Append `chunk`, dropping whatever does not fit, and report framing.
    pub fn feed(&mut self, chunk: &[u8]) -> Framing {
        let take = chunk.len().min(self.remaining());
        self.buf.extend_from_slice(&chunk[..take]);
        self.framing()
    }

    pub fn framing(&self) -> Framing {
        if self.buf.len() >= self.capacity {
            return Framing::Complete;
        }
        let Some(header_len) = find_header_end(&self.buf) else {
            return Framing::Incomplete;
        };
        let needed = header_len.saturating_add(content_length(&self.buf[..header_len]));
        if self.buf.len() >= needed {
            Framing::Complete
        } else {
            Framing::Incomplete
        }
    }

    /// Bytes that can still be accepted.
    pub fn remaining(&self) -> usize {
        self.capacity - self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Bytes the next read may ask for.
    pub fn read_len(&self) -> usize {
        self.remaining().min(READ_CHUNK)
    }

    /// The peer stopped sending. Partial data is returned as-is; fails with
    /// `UnexpectedEof` if nothing was received.
    pub fn closed(self) -> io::Result<Vec<u8>> {
        if self.buf.is_empty() {
            Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed before any request bytes",
            ))
        } else {
            Ok(self.buf)
        }
    }

    /// A read failed with `err`. Partial data is returned as-is; with
    /// nothing received the error is passed through.
    pub fn read_failed(self, err: io::Error) -> io::Result<Vec<u8>> {
        if self.buf.is_empty() {
            Err(err)
        } else {
            Ok(self.buf)
        }
    }
}

/// Offset just past the header terminator, if present.
pub fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|window| window == HEADER_TERMINATOR)
        .map(|pos| pos + HEADER_TERMINATOR.len())
}

/// Value of the first `Content-Length` header line in `headers`.
///
/// The header name is matched case-insensitively and must be followed
/// directly by `:`. Leading whitespace in the value is skipped and the
/// leading run of digits is parsed; no digits (a sign included) yields 0.
/// A digit run too large for `usize` saturates, so the request only
/// completes when the buffer fills or the peer closes.
pub fn content_length(headers: &[u8]) -> usize {
    for line in headers.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let Some(name) = line.get(..CONTENT_LENGTH.len()) else {
            continue;
        };
        if !name.eq_ignore_ascii_case(CONTENT_LENGTH)
            || line.get(CONTENT_LENGTH.len()) != Some(&b':')
        {
            continue;
        }
        let value = &line[CONTENT_LENGTH.len() + 1..];
        return value
            .iter()
            .skip_while(|b| b.is_ascii_whitespace())
            .take_while(|b| b.is_ascii_digit())
            .fold(0usize, |acc, &digit| {
                acc.saturating_mul(10).saturating_add(usize::from(digit - b'0'))
            });
    }
    0
}
