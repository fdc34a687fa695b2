//! Error types for request parsing and storage access.
//!
//! # Design
//! `RequestError` covers a start line that cannot be tokenized; it always
//! maps to 400 and never reaches storage. `StoreError` records which storage
//! step failed together with the engine's message. The step picks the generic
//! message sent to the client; the engine message is only logged.

use std::fmt;

/// Reasons a request start line is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// No space after the method token.
    MissingPath,

    /// No space after the path token.
    MissingVersion,

    EmptyMethod,

    EmptyPath,

    /// The method token is at least `MAX_METHOD_LEN` bytes long.
    MethodTooLong(usize),

    /// The path token is at least `MAX_PATH_LEN` bytes long.
    PathTooLong(usize),

    /// A token is not valid UTF-8.
    InvalidToken,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::MissingPath => write!(f, "start line has no path"),
            RequestError::MissingVersion => write!(f, "start line has no version"),
            RequestError::EmptyMethod => write!(f, "method token is empty"),
            RequestError::EmptyPath => write!(f, "path token is empty"),
            RequestError::MethodTooLong(len) => write!(f, "method token is {len} bytes long"),
            RequestError::PathTooLong(len) => write!(f, "path token is {len} bytes long"),
            RequestError::InvalidToken => write!(f, "start line token is not valid UTF-8"),
        }
    }
}

impl std::error::Error for RequestError {}

/// The storage step that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Connect,
    Bootstrap,
    Insert,
    Delete,
    Select,
}

impl StoreOp {
    /// Message surfaced to the client in the 500 body.
    pub fn client_message(self) -> &'static str {
        match self {
            StoreOp::Connect => "DB connection failed",
            StoreOp::Bootstrap => "DB schema bootstrap failed",
            StoreOp::Insert => "DB insert failed",
            StoreOp::Delete => "DB delete failed",
            StoreOp::Select => "DB select failed",
        }
    }
}

impl fmt::Display for StoreOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreOp::Connect => "connect",
            StoreOp::Bootstrap => "bootstrap",
            StoreOp::Insert => "insert",
            StoreOp::Delete => "delete",
            StoreOp::Select => "select",
        };
        f.write_str(name)
    }
}

/// A storage failure, carrying the engine-provided detail for logging.
#[derive(Debug, Clone)]
pub struct StoreError {
    pub op: StoreOp,
    pub detail: String,
}

impl StoreError {
    pub fn new(op: StoreOp, detail: impl fmt::Display) -> Self {
        Self {
            op,
            detail: detail.to_string(),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "storage {} failed: {}", self.op, self.detail)
    }
}

impl std::error::Error for StoreError {}
