//! Response Writer.
//!
//! Serializes an `HttpResponse` into an HTTP/1.1 response with fixed CORS
//! headers, `Connection: close`, and a `Content-Length` equal to the body's
//! byte length. The host sends the bytes from `to_bytes` in a single write
//! and does not retry a short write; the connection closes right after.

use serde::Serialize;
use tracing::error;

use crate::http::HttpResponse;
use crate::types::ErrorBody;

impl HttpResponse {
    /// Build a response whose body is `body` rendered as JSON.
    pub fn json<T: Serialize>(status: u16, body: &T) -> Self {
        match serde_json::to_string(body) {
            Ok(body) => Self { status, body },
            Err(err) => {
                error!(%err, "failed to serialize response body");
                Self {
                    status: 500,
                    body: String::from(r#"{"error":"Internal Server Error"}"#),
                }
            }
        }
    }

    pub fn bad_request() -> Self {
        Self::json(400, &ErrorBody::BAD_REQUEST)
    }

    /// Status line text. Any code other than 200, 400 and 404 is sent as 500.
    pub fn status_text(&self) -> &'static str {
        match self.status {
            200 => "200 OK",
            400 => "400 Bad Request",
            404 => "404 Not Found",
            _ => "500 Internal Server Error",
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "HTTP/1.1 {}\r\n\
             Content-Type: application/json\r\n\
             Access-Control-Allow-Origin: *\r\n\
             Access-Control-Allow-Methods: GET, POST, OPTIONS\r\n\
             Access-Control-Allow-Headers: Content-Type\r\n\
             Connection: close\r\n\
             Content-Length: {}\r\n\
             \r\n\
             {}",
            self.status_text(),
            self.body.len(),
            self.body
        )
        .into_bytes()
    }
}
