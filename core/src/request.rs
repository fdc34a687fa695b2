//! Request Line Parser.
//!
//! Splits `METHOD PATH VERSION` on the first two spaces of the start line.
//! Token limits are validation rules: a method of `MAX_METHOD_LEN` bytes or
//! more, or a path of `MAX_PATH_LEN` bytes or more, is rejected.

use crate::error::RequestError;
use crate::http::{HttpMethod, ParsedRequest};
use crate::reader::find_header_end;

pub const MAX_METHOD_LEN: usize = 16;
pub const MAX_PATH_LEN: usize = 256;

/// Extract the method and path tokens from the start line of `raw`.
pub fn parse_request_line(raw: &[u8]) -> Result<(String, String), RequestError> {
    let line_end = raw
        .iter()
        .position(|&b| b == b'\r' || b == b'\n')
        .unwrap_or(raw.len());
    let line = &raw[..line_end];

    let method_end = line
        .iter()
        .position(|&b| b == b' ')
        .ok_or(RequestError::MissingPath)?;
    let rest = &line[method_end + 1..];
    let path_end = rest
        .iter()
        .position(|&b| b == b' ')
        .ok_or(RequestError::MissingVersion)?;

    let method = &line[..method_end];
    let path = &rest[..path_end];

    if method.is_empty() {
        return Err(RequestError::EmptyMethod);
    }
    if method.len() >= MAX_METHOD_LEN {
        return Err(RequestError::MethodTooLong(method.len()));
    }
    if path.is_empty() {
        return Err(RequestError::EmptyPath);
    }
    if path.len() >= MAX_PATH_LEN {
        return Err(RequestError::PathTooLong(path.len()));
    }

    let method = std::str::from_utf8(method).map_err(|_| RequestError::InvalidToken)?;
    let path = std::str::from_utf8(path).map_err(|_| RequestError::InvalidToken)?;
    Ok((method.to_string(), path.to_string()))
}

/// Parse the start line and slice off the body.
///
/// The body is everything after the header terminator, or empty when no
/// terminator was received.
pub fn parse_request(raw: &[u8]) -> Result<ParsedRequest, RequestError> {
    let (method, path) = parse_request_line(raw)?;
    let body = find_header_end(raw)
        .map(|end| raw[end..].to_vec())
        .unwrap_or_default();
    Ok(ParsedRequest {
        method: HttpMethod::from_token(&method),
        path,
        body,
    })
}
