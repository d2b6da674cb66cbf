//! HTTP request model.
//!
//! # Responsibilities
//! - Hold the parsed request line, headers and body of one request
//! - Compare requests structurally, ignoring capture timestamps
//! - Provide the empty-request sentinel used before anything was read
//! - Rewrite the request target from an absolute URL
//!
//! # Design Decisions
//! - Fields are public; intercepting code mutates them in place
//! - Headers are typed as [`Headers`], so a request can never hold a foreign
//!   header container
//! - Timestamps are set by the transport and never take part in equality

use std::any::Any;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::http::headers::Headers;
use crate::http::message::{Body, HttpVersion};
use crate::http::Response;
use crate::validation::{self, UrlError};

/// How the request target was written on the request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormIn {
    /// `GET /index.html HTTP/1.1`
    Relative,
    /// `GET http://example.com/index.html HTTP/1.1`
    Absolute,
    /// `CONNECT example.com:443 HTTP/1.1`
    Authority,
    /// No request line was read.
    #[default]
    #[serde(rename = "")]
    Empty,
}

impl FormIn {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormIn::Relative => "relative",
            FormIn::Absolute => "absolute",
            FormIn::Authority => "authority",
            FormIn::Empty => "",
        }
    }
}

impl fmt::Display for FormIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a request form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFormInError(pub String);

impl fmt::Display for ParseFormInError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown request form {:?}", self.0)
    }
}

impl std::error::Error for ParseFormInError {}

impl FromStr for FormIn {
    type Err = ParseFormInError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "relative" => Ok(FormIn::Relative),
            "absolute" => Ok(FormIn::Absolute),
            "authority" => Ok(FormIn::Authority),
            "" => Ok(FormIn::Empty),
            other => Err(ParseFormInError(other.to_string())),
        }
    }
}

/// A single HTTP request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub form_in: FormIn,
    pub method: String,
    pub scheme: String,
    pub host: String,
    pub port: u16,
    pub path: String,
    pub httpversion: HttpVersion,
    pub headers: Headers,
    pub body: Body,
    pub timestamp_start: Option<f64>,
    pub timestamp_end: Option<f64>,
}

impl Request {
    /// Create a request with empty headers and a body that has not been read.
    pub fn new(
        form_in: FormIn,
        method: impl Into<String>,
        scheme: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        path: impl Into<String>,
        httpversion: impl Into<HttpVersion>,
    ) -> Self {
        Self {
            form_in,
            method: method.into(),
            scheme: scheme.into(),
            host: host.into(),
            port,
            path: path.into(),
            httpversion: httpversion.into(),
            headers: Headers::new(),
            body: Body::Missing,
            timestamp_start: None,
            timestamp_end: None,
        }
    }

    /// The "no request parsed yet" sentinel.
    pub fn empty() -> Self {
        Self {
            body: Body::empty(),
            ..Self::new(FormIn::Empty, "", "", "", 0, "", (0, 0))
        }
    }

    /// Whether this request is indistinguishable from [`Request::empty`].
    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
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

    /// Full URL of the request, omitting the scheme's default port.
    pub fn url(&self) -> String {
        let default_port = match self.scheme.as_str() {
            "https" => Some(443),
            "http" => Some(80),
            _ => None,
        };
        if default_port == Some(self.port) {
            format!("{}://{}{}", self.scheme, self.host, self.path)
        } else {
            format!("{}://{}:{}{}", self.scheme, self.host, self.port, self.path)
        }
    }

    /// Full URL of the request as a [`url::Url`].
    pub fn to_url(&self) -> Result<url::Url> {
        let url = self.url();
        url::Url::parse(&url).map_err(|e| UrlError::Syntax(e.to_string()).into())
    }

    /// Point the request at `url`.
    ///
    /// Scheme, host, port and path are only touched when the whole URL
    /// validates.
    pub fn set_url(&mut self, url: &str) -> std::result::Result<(), UrlError> {
        let parsed = validation::try_parse_url(url)?;
        self.scheme = parsed.scheme;
        self.host = parsed.host;
        self.port = parsed.port;
        self.path = parsed.path;
        Ok(())
    }

    /// Compare against a value of unknown type. Anything that is not a
    /// `Request` compares unequal.
    pub fn eq_dyn(&self, other: &dyn Any) -> bool {
        other
            .downcast_ref::<Request>()
            .is_some_and(|other| self == other)
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.form_in == other.form_in
            && self.method == other.method
            && self.scheme == other.scheme
            && self.host == other.host
            && self.port == other.port
            && self.path == other.path
            && self.httpversion == other.httpversion
            && self.headers == other.headers
            && self.body == other.body
    }
}

impl PartialEq<Response> for Request {
    fn eq(&self, _other: &Response) -> bool {
        false
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Request({} - {}, {})", self.method, self.host, self.path)
    }
}
