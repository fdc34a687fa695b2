//! JSON bodies returned by the stack service.
//!
//! # Design
//! Field order in each struct is the order on the wire; serde keeps it.
//! The list body is a bare `Vec<i32>` and needs no wrapper.

use serde::Serialize;

/// `{"status": ...}` acknowledgement.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatusBody {
    pub status: &'static str,
}

impl StatusBody {
    pub const OK: StatusBody = StatusBody { status: "ok" };
    pub const PUSHED: StatusBody = StatusBody { status: "pushed" };
    pub const EMPTY: StatusBody = StatusBody {
        status: "stack empty",
    };
}

/// Body of a successful pop.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PoppedBody {
    pub status: &'static str,
    pub value: i32,
}

impl PoppedBody {
    pub fn new(value: i32) -> Self {
        Self {
            status: "popped",
            value,
        }
    }
}

/// `{"error": ...}` body for 4xx and 5xx responses.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl ErrorBody {
    pub const BAD_REQUEST: ErrorBody = ErrorBody {
        error: "Bad Request",
    };
    pub const INVALID_PUSH: ErrorBody = ErrorBody {
        error: "Invalid JSON: expected {\"value\": <int>}",
    };
    pub const NOT_FOUND: ErrorBody = ErrorBody {
        error: "Route Not Found",
    };
    pub const INTERNAL: ErrorBody = ErrorBody {
        error: "Internal Server Error",
    };

    pub fn new(error: &'static str) -> Self {
        Self { error }
    }
}
