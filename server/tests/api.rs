//! The stack service over real sockets.
//!
//! Each test starts the server on a random port with a fresh in-memory
//! store. Route behaviour is driven through ureq; framing edge cases go
//! through a raw `TcpStream` so the exact bytes on the wire are controlled.

use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

use stack_core::{Handler, MemoryStore};

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            stack_server::run(listener, Handler::new(MemoryStore::new())).await
        });
    });

    addr
}

fn agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent()
}

/// Status and body of a ureq call.
fn call(
    result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
) -> (u16, serde_json::Value) {
    let mut response = result.expect("HTTP transport error");
    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap();
    (status, serde_json::from_str(&body).unwrap())
}

fn push(agent: &ureq::Agent, addr: SocketAddr, value: i32) -> (u16, serde_json::Value) {
    call(
        agent
            .post(&format!("http://{addr}/push"))
            .content_type("application/json")
            .send(format!("{{\"value\": {value}}}").as_bytes()),
    )
}

fn pop(agent: &ureq::Agent, addr: SocketAddr) -> (u16, serde_json::Value) {
    call(agent.post(&format!("http://{addr}/pop")).send_empty())
}

fn list(agent: &ureq::Agent, addr: SocketAddr) -> serde_json::Value {
    let (status, body) = call(agent.get(&format!("http://{addr}/stack")).call());
    assert_eq!(status, 200);
    body
}

/// Send `request`, half-close, and read the full response.
fn raw_exchange(addr: SocketAddr, request: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(request).unwrap();
    stream.shutdown(Shutdown::Write).unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn status_line(response: &str) -> &str {
    response.lines().next().unwrap_or_default()
}

fn body(response: &str) -> &str {
    response.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or_default()
}

#[test]
fn stack_lifecycle() {
    let addr = start_server();
    let agent = agent();

    // Step 1: health check.
    let (status, body) = call(agent.get(&format!("http://{addr}/health")).call());
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({"status": "ok"}));

    // Step 2: empty stack.
    assert_eq!(list(&agent, addr), serde_json::json!([]));
    let (status, body) = pop(&agent, addr);
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({"status": "stack empty"}));

    // Step 3: push 1, 2, 3.
    for value in [1, 2, 3] {
        let (status, body) = push(&agent, addr, value);
        assert_eq!(status, 200);
        assert_eq!(body, serde_json::json!({"status": "pushed"}));
    }
    assert_eq!(list(&agent, addr), serde_json::json!([3, 2, 1]));

    // Step 4: pop returns the newest value.
    let (status, body) = pop(&agent, addr);
    assert_eq!(status, 200);
    assert_eq!(body, serde_json::json!({"status": "popped", "value": 3}));
    assert_eq!(list(&agent, addr), serde_json::json!([2, 1]));

    // Step 5: drain.
    assert_eq!(pop(&agent, addr).1["value"], 2);
    assert_eq!(pop(&agent, addr).1["value"], 1);
    assert_eq!(pop(&agent, addr).1, serde_json::json!({"status": "stack empty"}));
    assert_eq!(list(&agent, addr), serde_json::json!([]));
}

#[test]
fn invalid_push_is_400() {
    let addr = start_server();
    let agent = agent();

    let (status, body) = call(
        agent
            .post(&format!("http://{addr}/push"))
            .content_type("application/json")
            .send(&br#"{"number": 5}"#[..]),
    );
    assert_eq!(status, 400);
    assert_eq!(
        body,
        serde_json::json!({"error": "Invalid JSON: expected {\"value\": <int>}"})
    );
    assert_eq!(list(&agent, addr), serde_json::json!([]));
}

#[test]
fn unknown_route_is_404() {
    let addr = start_server();
    let (status, body) = call(agent().get(&format!("http://{addr}/queue")).call());
    assert_eq!(status, 404);
    assert_eq!(body, serde_json::json!({"error": "Route Not Found"}));
}

#[test]
fn responses_carry_cors_and_close_headers() {
    let addr = start_server();
    let response = agent()
        .get(&format!("http://{addr}/health"))
        .call()
        .unwrap();
    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    };
    assert_eq!(header("access-control-allow-origin").as_deref(), Some("*"));
    assert_eq!(
        header("access-control-allow-methods").as_deref(),
        Some("GET, POST, OPTIONS")
    );
    assert_eq!(header("access-control-allow-headers").as_deref(), Some("Content-Type"));
    assert_eq!(header("content-type").as_deref(), Some("application/json"));
    assert_eq!(header("connection").as_deref(), Some("close"));
}

#[test]
fn options_on_any_path_is_200() {
    let addr = start_server();
    for path in ["*", "/push", "/not/a/route"] {
        let request = format!("OPTIONS {path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let response = raw_exchange(addr, request.as_bytes());
        assert_eq!(status_line(&response), "HTTP/1.1 200 OK", "{path}");
        assert_eq!(body(&response), r#"{"status":"ok"}"#, "{path}");
    }
}

#[test]
fn content_length_matches_body() {
    let addr = start_server();
    let response = raw_exchange(addr, b"GET /stack HTTP/1.1\r\n\r\n");
    assert!(response.contains("\r\nContent-Length: 2\r\n"), "{response}");
    assert_eq!(body(&response), "[]");
}

#[test]
fn oversized_path_is_400() {
    let addr = start_server();
    let request = format!("GET /{} HTTP/1.1\r\n\r\n", "x".repeat(300));
    let response = raw_exchange(addr, request.as_bytes());
    assert_eq!(status_line(&response), "HTTP/1.1 400 Bad Request");
    assert_eq!(body(&response), r#"{"error":"Bad Request"}"#);
}

#[test]
fn short_body_then_close_gets_a_response() {
    let addr = start_server();
    let response = raw_exchange(
        addr,
        b"POST /push HTTP/1.1\r\nContent-Length: 100\r\n\r\n{\"value\": 4",
    );
    // The partial body still carries a complete value.
    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
    assert_eq!(body(&response), r#"{"status":"pushed"}"#);

    let response = raw_exchange(addr, b"POST /push HTTP/1.1\r\nContent-Length: 100\r\n\r\n{\"val");
    assert_eq!(status_line(&response), "HTTP/1.1 400 Bad Request");
}

#[test]
fn framed_request_is_answered_without_half_close() {
    let addr = start_server();
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream
        .write_all(b"POST /push HTTP/1.1\r\ncontent-length: 13\r\n\r\n{\"value\": 42}")
        .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
}

#[test]
fn empty_connection_gets_no_response() {
    let addr = start_server();
    let response = raw_exchange(addr, b"");
    assert!(response.is_empty());

    // The loop keeps serving after a dropped connection.
    let response = raw_exchange(addr, b"GET /health HTTP/1.1\r\n\r\n");
    assert_eq!(status_line(&response), "HTTP/1.1 200 OK");
}
