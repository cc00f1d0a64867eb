//! Unit tests for request parsing, response encoding and routing.
//!
//! No sockets here; the live server is covered in `tests/status_server.rs`.

#![allow(clippy::unwrap_used)]

use crate::server::{
    Head, MAX_HEAD_BYTES, RequestLine, Response, StatusCode, bad_request, read_head, route,
};
use crate::state::{Snapshot, StateStore};

fn request(line: &str) -> RequestLine {
    RequestLine::parse(format!("{line}\r\nHost: x\r\n\r\n").as_bytes()).unwrap()
}

fn body_json(response: &Response) -> serde_json::Value {
    serde_json::from_slice(response.body()).unwrap()
}

#[test]
fn parses_request_line() {
    let line = request("GET /state?pretty=1 HTTP/1.1");

    assert_eq!(line.method, "GET");
    assert_eq!(line.target, "/state?pretty=1");
    assert_eq!(line.version, "HTTP/1.1");
    assert_eq!(line.path(), "/state");
}

#[test]
fn rejects_short_request_line() {
    assert_eq!(RequestLine::parse(b"GET /\r\n\r\n"), None);
    assert_eq!(RequestLine::parse(b"\r\n\r\n"), None);
    assert_eq!(RequestLine::parse(b"garbage\r\n\r\n"), None);
}

#[test]
fn non_utf8_bytes_do_not_break_parsing() {
    let line = RequestLine::parse(b"GET /\xff\xfe HTTP/1.1\r\n\r\n").unwrap();
    assert_eq!(line.method, "GET");
}

#[test]
fn response_headers_and_length() {
    let response = Response::json(StatusCode::Ok, &serde_json::json!({ "status": "ok" }));
    let text = String::from_utf8(response.to_bytes()).unwrap();

    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("Content-Type: application/json; charset=utf-8\r\n"));
    assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
    assert!(text.contains("Access-Control-Allow-Methods: GET, OPTIONS\r\n"));
    assert!(text.contains("Access-Control-Allow-Headers: Content-Type\r\n"));
    assert!(text.contains(&format!("Content-Length: {}\r\n", response.body().len())));
    assert!(text.contains("Connection: close\r\n"));
    assert!(text.ends_with("\r\n\r\n{\"status\":\"ok\"}"));
}

#[test]
fn routes_state_and_root() {
    let store = StateStore::default();

    for target in ["/", "/state", "/state?x=1"] {
        let response = route(&request(&format!("GET {target} HTTP/1.1")), &store);
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(body_json(&response)["status"], "init");
    }
}

#[test]
fn routes_health() {
    let store = StateStore::default();
    store.publish(Snapshot::error("bus gone"));

    let response = route(&request("GET /health HTTP/1.1"), &store);

    assert_eq!(response.status(), StatusCode::Ok);
    assert_eq!(body_json(&response), serde_json::json!({ "status": "ok" }));
}

#[test]
fn routes_errors() {
    let store = StateStore::default();

    let not_found = route(&request("GET /unknown-path HTTP/1.1"), &store);
    assert_eq!(not_found.status(), StatusCode::NotFound);
    assert!(body_json(&not_found)["error"].is_string());

    let not_allowed = route(&request("DELETE /state HTTP/1.1"), &store);
    assert_eq!(not_allowed.status(), StatusCode::MethodNotAllowed);
    assert!(body_json(&not_allowed)["error"].is_string());

    assert_eq!(bad_request().status(), StatusCode::BadRequest);
}

#[test]
fn options_is_empty_no_content() {
    let response = route(&request("OPTIONS /state HTTP/1.1"), &StateStore::default());

    assert_eq!(response.status(), StatusCode::NoContent);
    assert!(response.body().is_empty());
    assert!(
        String::from_utf8(response.to_bytes())
            .unwrap()
            .contains("Content-Length: 0\r\n")
    );
}

#[tokio::test]
async fn read_head_stops_at_blank_line() {
    let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost: a\r\n\r\nleftover";

    let head = read_head(&mut input).await.unwrap();

    assert_eq!(
        head,
        Head::Complete(b"GET / HTTP/1.1\r\nHost: a\r\n\r\n".to_vec())
    );
}

#[tokio::test]
async fn read_head_reports_missing_terminator() {
    let mut input: &[u8] = b"GET / HTTP/1.1\r\nHost: a\r\n";

    assert_eq!(read_head(&mut input).await.unwrap(), Head::Incomplete);
}

#[tokio::test]
async fn read_head_caps_size() {
    let mut bytes = b"GET / HTTP/1.1\r\n".to_vec();
    bytes.extend(std::iter::repeat_n(b'a', MAX_HEAD_BYTES + 10));
    let mut input: &[u8] = &bytes;

    assert_eq!(read_head(&mut input).await.unwrap(), Head::TooLarge);
}
