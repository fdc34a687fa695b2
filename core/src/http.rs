//! HTTP request and response values exchanged with the host.
//!
//! # Design
//! Both types are plain owned data. `ParsedRequest` lives for one request
//! and is dropped after dispatch; `HttpResponse` is built by the handler and
//! serialized exactly once by the host.

use std::fmt;

/// HTTP method of a request. Matching is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Options,
    Other(String),
}

impl HttpMethod {
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "OPTIONS" => HttpMethod::Options,
            other => HttpMethod::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(token) => token,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request, split into its start-line tokens and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Vec<u8>,
}

/// A response ready to be serialized. `body` is JSON text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}
