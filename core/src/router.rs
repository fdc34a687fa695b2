//! Maps `(method, path)` to a route. No storage access happens here.

use crate::extract::extract_int_field;
use crate::http::{HttpMethod, ParsedRequest};

/// Operations that need a storage connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOp {
    Push(i32),
    Pop,
    List,
}

/// Terminal outcome of routing one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `OPTIONS` on any path.
    Preflight,
    /// `GET /health`.
    Health,
    Stack(StackOp),
    /// `POST /push` whose body has no usable `value` field.
    InvalidPush,
    NotFound,
}

pub fn route(request: &ParsedRequest) -> Route {
    match (&request.method, request.path.as_str()) {
        (HttpMethod::Options, _) => Route::Preflight,
        (HttpMethod::Get, "/health") => Route::Health,
        (HttpMethod::Post, "/push") => match extract_int_field(&request.body, "value") {
            Some(value) => Route::Stack(StackOp::Push(value)),
            None => Route::InvalidPush,
        },
        (HttpMethod::Post, "/pop") => Route::Stack(StackOp::Pop),
        (HttpMethod::Get, "/stack") => Route::Stack(StackOp::List),
        _ => Route::NotFound,
    }
}
