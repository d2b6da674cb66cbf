//! HTTP response model.
//!
//! # Responsibilities
//! - Hold the status line, headers, body and TLS details of one response
//! - Compare responses structurally, ignoring capture timestamps
//! - Keep the legacy `content`/`code` accessors working
//!
//! # Design Decisions
//! - The legacy accessors are methods over the canonical fields, so there is
//!   only ever one copy of the body and the status code

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::http::headers::Headers;
use crate::http::message::{Body, HttpVersion};
use crate::http::Request;

/// TLS details captured for the connection a response arrived on.
///
/// Opaque to this crate; transports fill in whatever they know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SslInfo {
    pub protocol: Option<String>,
    pub cipher: Option<String>,
    /// DER-encoded peer certificate chain, leaf first.
    pub peer_certificates: Vec<Vec<u8>>,
}

/// A single HTTP response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub httpversion: HttpVersion,
    pub status_code: u16,
    pub msg: Option<String>,
    pub headers: Headers,
    pub body: Body,
    pub sslinfo: Option<SslInfo>,
    pub timestamp_start: Option<f64>,
    pub timestamp_end: Option<f64>,
}

impl Response {
    /// Create a response with no reason phrase, empty headers and a body that
    /// has not been read.
    pub fn new(httpversion: impl Into<HttpVersion>, status_code: u16) -> Self {
        Self {
            httpversion: httpversion.into(),
            status_code,
            msg: None,
            headers: Headers::new(),
            body: Body::Missing,
            sslinfo: None,
            timestamp_start: None,
            timestamp_end: None,
        }
    }

    pub fn with_msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = Some(msg.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_sslinfo(mut self, sslinfo: SslInfo) -> Self {
        self.sslinfo = Some(sslinfo);
        self
    }

    pub fn with_timestamps(mut self, start: Option<f64>, end: Option<f64>) -> Self {
        self.timestamp_start = start;
        self.timestamp_end = end;
        self
    }

    #[deprecated(note = "use the `body` field")]
    pub fn content(&self) -> &Body {
        &self.body
    }

    #[deprecated(note = "assign to the `body` field")]
    pub fn set_content(&mut self, content: impl Into<Body>) {
        self.body = content.into();
    }

    #[deprecated(note = "use the `status_code` field")]
    pub fn code(&self) -> u16 {
        self.status_code
    }

    #[deprecated(note = "assign to the `status_code` field")]
    pub fn set_code(&mut self, code: u16) {
        self.status_code = code;
    }

    /// Compare against a value of unknown type. Anything that is not a
    /// `Response` compares unequal.
    pub fn eq_dyn(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Response>()
            .is_some_and(|other| self == other)
    }
}

impl PartialEq for Response {
    fn eq(&self, other: &Self) -> bool {
        self.httpversion == other.httpversion
            && self.status_code == other.status_code
            && self.msg == other.msg
            && self.headers == other.headers
            && self.body == other.body
            && self.sslinfo == other.sslinfo
    }
}

impl PartialEq<Request> for Response {
    fn eq(&self, _other: &Request) -> bool {
        false
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Response({} - {})",
            self.status_code,
            self.msg.as_deref().unwrap_or_default()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> Response {
        Response::new((1, 1), 200)
            .with_msg("OK")
            .with_headers(Headers::from(vec![("Content-Length", "2")]))
            .with_body("hi")
    }

    #[test]
    fn test_timestamps_ignored_by_equality() {
        let a = ok().with_timestamps(Some(1.0), Some(1.5));
        let b = ok().with_timestamps(None, Some(99.0));
        assert_eq!(a, b);
    }

    #[test]
    fn test_sslinfo_participates_in_equality() {
        let tls = SslInfo {
            protocol: Some("TLSv1.3".into()),
            ..SslInfo::default()
        };
        assert_ne!(ok(), ok().with_sslinfo(tls));
    }

    #[test]
    fn test_display() {
        assert_eq!(ok().to_string(), "Response(200 - OK)");
        assert_eq!(Response::new((1, 1), 204).to_string(), "Response(204 - )");
    }

    #[test]
    #[allow(deprecated)]
    fn test_code_alias() {
        let mut resp = ok();
        resp.set_code(404);
        assert_eq!(resp.status_code, 404);
        resp.status_code = 500;
        assert_eq!(resp.code(), 500);
    }

    #[test]
    #[allow(deprecated)]
    fn test_content_alias() {
        let mut resp = ok();
        resp.set_content(Body::empty());
        assert_eq!(resp.body, Body::empty());
        resp.body = Body::from("changed");
        assert_eq!(resp.content(), &Body::from("changed"));
    }

    #[test]
    fn test_eq_dyn() {
        let resp = ok();
        assert!(resp.eq_dyn(&ok()));
        assert!(!resp.eq_dyn(&200u16));
        assert!(!resp.eq_dyn(&Request::empty()));
    }
}
