//! Shared utilities for integration tests.

use std::collections::VecDeque;

use http_semantics::http::Protocol;
use http_semantics::{Body, Error, FormIn, Headers, Request, Response, Result};

/// A typical origin-form GET with a couple of headers and an empty body.
pub fn sample_request() -> Request {
    Request::new(FormIn::Relative, "GET", "http", "example.com", 80, "/index.html", (1, 1))
        .with_headers(Headers::from(vec![
            ("Host", "example.com"),
            ("Accept-Encoding", "gzip, deflate"),
        ]))
        .with_body(Body::empty())
        .with_timestamps(Some(1_700_000_000.0), Some(1_700_000_000.25))
}

/// A 200 response with a small text body.
pub fn sample_response() -> Response {
    Response::new((1, 1), 200)
        .with_msg("OK")
        .with_headers(Headers::from(vec![
            ("Content-Type", "text/plain"),
            ("Content-Length", "5"),
        ]))
        .with_body("hello")
        .with_timestamps(Some(1_700_000_000.5), Some(1_700_000_001.0))
}

/// In-memory transport: hands out queued messages and writes HTTP/1 text.
#[allow(dead_code)]
#[derive(Default)]
pub struct MemoryTransport {
    pub requests: VecDeque<Request>,
    pub responses: VecDeque<Response>,
}

impl MemoryTransport {
    #[allow(dead_code)]
    pub fn with_requests(requests: impl IntoIterator<Item = Request>) -> Self {
        Self {
            requests: requests.into_iter().collect(),
            ..Self::default()
        }
    }
}

fn write_head_and_body(mut out: String, headers: &Headers, body: &Body) -> Result<Vec<u8>> {
    out.push_str(&headers.to_string());
    out.push_str("\r\n");
    let mut bytes = out.into_bytes();
    bytes.extend_from_slice(body.as_bytes().ok_or(Error::ContentMissing)?);
    Ok(bytes)
}

impl Protocol for MemoryTransport {
    fn read_request(&mut self) -> Result<Request> {
        self.requests.pop_front().ok_or(Error::ConnectionClosed)
    }

    fn read_response(&mut self) -> Result<Response> {
        self.responses.pop_front().ok_or(Error::ConnectionClosed)
    }

    fn assemble_request(&self, request: &Request) -> Result<Vec<u8>> {
        let line = format!("{} {} {}\r\n", request.method, request.path, request.httpversion);
        write_head_and_body(line, &request.headers, &request.body)
    }

    fn assemble_response(&self, response: &Response) -> Result<Vec<u8>> {
        let line = format!(
            "{} {} {}\r\n",
            response.httpversion,
            response.status_code,
            response.msg.as_deref().unwrap_or_default()
        );
        write_head_and_body(line, &response.headers, &response.body)
    }
}
