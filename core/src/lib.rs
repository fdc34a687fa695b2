//! Request framing and routing core for the stack service.
//!
//! # Overview
//! Turns the raw bytes of one HTTP/1.1 request into one HTTP response. The
//! caller (host) owns the socket: it feeds received bytes into a
//! `RequestBuffer`, hands the completed buffer to `Handler::handle`, and
//! writes the bytes of the returned `HttpResponse` back to the peer.
//!
//! # Design
//! - Framing, start-line parsing, field extraction and response
//!   serialization are plain functions over byte slices, so every edge case
//!   is testable without a network.
//! - Storage is reached only through the `StackStore` trait. A connection is
//!   opened per request and dropped before the response is returned.
//! - `Route` is computed without touching storage; only the three stack
//!   operations reach the store.

pub mod error;
pub mod extract;
pub mod handler;
pub mod http;
pub mod reader;
pub mod request;
pub mod response;
pub mod router;
pub mod store;
pub mod types;

pub use error::{RequestError, StoreError, StoreOp};
pub use extract::extract_int_field;
pub use handler::Handler;
pub use http::{HttpMethod, HttpResponse, ParsedRequest};
pub use reader::{Framing, RequestBuffer, MAX_REQUEST_BYTES, READ_CHUNK};
pub use request::{parse_request, parse_request_line, MAX_METHOD_LEN, MAX_PATH_LEN};
pub use router::{route, Route, StackOp};
pub use store::{MemoryStore, StackConnection, StackStore};
