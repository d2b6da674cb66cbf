//! Conversions between the message models and `hyper` types.
//!
//! # Responsibilities
//! - Hand captured messages to hyper-based clients and servers
//! - Capture hyper messages into the models for inspection
//!
//! # Design Decisions
//! - The request target follows `form_in`: origin-form path, absolute URL or
//!   `host:port` authority
//! - A body that was never read cannot be converted
//! - hyper lowercases header names and groups repeated names together, so a
//!   model built from a hyper message may order headers differently from the
//!   wire

use hyper::ext::ReasonPhrase;
use hyper::header::{HeaderName, HeaderValue};
use hyper::{HeaderMap, Method, StatusCode, Uri, Version};

use crate::error::{Error, Result};
use crate::http::headers::Headers;
use crate::http::message::{Body, HttpVersion};
use crate::http::request::{FormIn, Request};
use crate::http::response::Response;

fn to_hyper_version(version: HttpVersion) -> Result<Version> {
    match (version.major, version.minor) {
        (0, 9) => Ok(Version::HTTP_09),
        (1, 0) => Ok(Version::HTTP_10),
        (1, 1) => Ok(Version::HTTP_11),
        (2, 0) => Ok(Version::HTTP_2),
        (3, 0) => Ok(Version::HTTP_3),
        (major, minor) => Err(Error::UnsupportedVersion { major, minor }),
    }
}

fn from_hyper_version(version: Version) -> HttpVersion {
    if version == Version::HTTP_09 {
        HttpVersion::new(0, 9)
    } else if version == Version::HTTP_10 {
        HttpVersion::HTTP_1_0
    } else if version == Version::HTTP_2 {
        HttpVersion::new(2, 0)
    } else if version == Version::HTTP_3 {
        HttpVersion::new(3, 0)
    } else {
        HttpVersion::HTTP_1_1
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers.iter() {
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| Error::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        let header_value = HeaderValue::from_str(value).map_err(|e| Error::InvalidHeader {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

fn from_header_map(map: &HeaderMap) -> Headers {
    map.iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn default_port(scheme: &str) -> u16 {
    if scheme == "https" {
        443
    } else {
        80
    }
}

impl Request {
    /// Build a `hyper::Request` carrying a copy of this request.
    pub fn to_hyper(&self) -> Result<hyper::Request<Vec<u8>>> {
        let method = Method::from_bytes(self.method.as_bytes())
            .map_err(|_| Error::InvalidMethod(self.method.clone()))?;
        let target = match self.form_in {
            FormIn::Absolute => self.url(),
            FormIn::Authority => format!("{}:{}", self.host, self.port),
            FormIn::Relative | FormIn::Empty => self.path.clone(),
        };
        let uri: Uri = target
            .parse()
            .map_err(|e| Error::InvalidTarget(format!("{target:?}: {e}")))?;
        let body = self.body.as_bytes().ok_or(Error::ContentMissing)?;

        let mut req = hyper::Request::new(body.to_vec());
        *req.method_mut() = method;
        *req.uri_mut() = uri;
        *req.version_mut() = to_hyper_version(self.httpversion)?;
        *req.headers_mut() = to_header_map(&self.headers)?;
        Ok(req)
    }

    /// Capture a `hyper::Request`.
    ///
    /// The host comes from the URI authority when there is one, otherwise from
    /// the `Host` header. Timestamps are left unset.
    pub fn from_hyper(req: hyper::Request<Vec<u8>>) -> Result<Self> {
        let (parts, body) = req.into_parts();
        let uri = &parts.uri;
        let headers = from_header_map(&parts.headers);

        let is_connect = parts.method == Method::CONNECT;
        let form_in = if is_connect && uri.scheme().is_none() && uri.authority().is_some() {
            FormIn::Authority
        } else if uri.scheme().is_some() {
            FormIn::Absolute
        } else {
            FormIn::Relative
        };

        let scheme = uri.scheme_str().unwrap_or("http").to_ascii_lowercase();
        let authority = match uri.authority() {
            Some(authority) => Some(authority.clone()),
            None => match headers.get_first("host") {
                Some(host) => {
                    let host_uri: Uri = host
                        .parse()
                        .map_err(|e| Error::InvalidTarget(format!("Host {host:?}: {e}")))?;
                    host_uri.authority().cloned()
                }
                None => None,
            },
        };
        let (host, port) = match &authority {
            Some(authority) => (
                authority.host().to_string(),
                authority.port_u16().unwrap_or_else(|| default_port(&scheme)),
            ),
            None => (String::new(), default_port(&scheme)),
        };

        let path = match form_in {
            FormIn::Authority => String::new(),
            _ => uri
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_else(|| "/".to_string()),
        };

        Ok(Request {
            form_in,
            method: parts.method.as_str().to_string(),
            scheme,
            host,
            port,
            path,
            httpversion: from_hyper_version(parts.version),
            headers,
            body: Body::Bytes(body),
            timestamp_start: None,
            timestamp_end: None,
        })
    }
}

impl Response {
    /// Build a `hyper::Response` carrying a copy of this response.
    ///
    /// A reason phrase that differs from the canonical one for the status is
    /// attached as a [`ReasonPhrase`] extension.
    pub fn to_hyper(&self) -> Result<hyper::Response<Vec<u8>>> {
        let status = StatusCode::from_u16(self.status_code)
            .map_err(|_| Error::InvalidStatus(self.status_code))?;
        let body = self.body.as_bytes().ok_or(Error::ContentMissing)?;

        let mut resp = hyper::Response::new(body.to_vec());
        *resp.status_mut() = status;
        *resp.version_mut() = to_hyper_version(self.httpversion)?;
        *resp.headers_mut() = to_header_map(&self.headers)?;

        if let Some(msg) = &self.msg {
            if status.canonical_reason() != Some(msg.as_str()) {
                let reason = ReasonPhrase::try_from(msg.as_bytes())
                    .map_err(|_| Error::InvalidReason(msg.clone()))?;
                resp.extensions_mut().insert(reason);
            }
        }
        Ok(resp)
    }

    /// Capture a `hyper::Response`.
    ///
    /// The reason phrase is taken from a [`ReasonPhrase`] extension when
    /// present, else from the canonical reason for the status.
    pub fn from_hyper(resp: hyper::Response<Vec<u8>>) -> Self {
        let (parts, body) = resp.into_parts();
        let msg = match parts.extensions.get::<ReasonPhrase>() {
            Some(reason) => Some(String::from_utf8_lossy(reason.as_bytes()).into_owned()),
            None => parts.status.canonical_reason().map(str::to_string),
        };

        Response {
            httpversion: from_hyper_version(parts.version),
            status_code: parts.status.as_u16(),
            msg,
            headers: from_header_map(&parts.headers),
            body: Body::Bytes(body),
            sslinfo: None,
            timestamp_start: None,
            timestamp_end: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relative() -> Request {
        Request::new(FormIn::Relative, "POST", "http", "example.com", 80, "/submit?x=1", (1, 1))
            .with_headers(Headers::from(vec![
                ("Host", "example.com"),
                ("Accept", "text/html"),
                ("Accept", "application/json"),
            ]))
            .with_body("payload")
    }

    #[test]
    fn test_relative_request_to_hyper() {
        let req = relative().to_hyper().unwrap();
        assert_eq!(req.method(), &Method::POST);
        assert_eq!(req.uri().to_string(), "/submit?x=1");
        assert_eq!(req.version(), Version::HTTP_11);
        let accepts: Vec<_> = req.headers().get_all("accept").iter().collect();
        assert_eq!(accepts, vec!["text/html", "application/json"]);
        assert_eq!(req.body(), b"payload");
    }

    #[test]
    fn test_absolute_and_authority_targets() {
        let mut req = relative();
        req.form_in = FormIn::Absolute;
        req.port = 8080;
        assert_eq!(
            req.to_hyper().unwrap().uri().to_string(),
            "http://example.com:8080/submit?x=1"
        );

        let mut connect =
            Request::new(FormIn::Authority, "CONNECT", "https", "example.com", 443, "", (1, 1))
                .with_body(Body::empty());
        assert_eq!(connect.to_hyper().unwrap().uri().to_string(), "example.com:443");
        connect.method = "BAD METHOD".into();
        assert!(matches!(connect.to_hyper(), Err(Error::InvalidMethod(_))));
    }

    #[test]
    fn test_missing_body_cannot_convert() {
        let req = Request::new(FormIn::Relative, "GET", "http", "example.com", 80, "/", (1, 1));
        assert!(matches!(req.to_hyper(), Err(Error::ContentMissing)));
    }

    #[test]
    fn test_unknown_version_cannot_convert() {
        let mut req = relative();
        req.httpversion = HttpVersion::new(1, 7);
        assert!(matches!(
            req.to_hyper(),
            Err(Error::UnsupportedVersion { major: 1, minor: 7 })
        ));
    }

    #[test]
    fn test_request_from_hyper_uses_host_header() {
        let req = hyper::Request::builder()
            .method("GET")
            .uri("/index.html")
            .header("Host", "example.com:8080")
            .body(Vec::new())
            .unwrap();
        let req = Request::from_hyper(req).unwrap();
        assert_eq!(req.form_in, FormIn::Relative);
        assert_eq!(req.host, "example.com");
        assert_eq!(req.port, 8080);
        assert_eq!(req.path, "/index.html");
        assert_eq!(req.headers.get_first("host"), Some("example.com:8080"));
        assert_eq!(req.body, Body::empty());
    }

    #[test]
    fn test_request_from_hyper_forms() {
        let absolute = hyper::Request::builder()
            .uri("https://example.com/a")
            .body(Vec::new())
            .unwrap();
        let absolute = Request::from_hyper(absolute).unwrap();
        assert_eq!(absolute.form_in, FormIn::Absolute);
        assert_eq!((absolute.scheme.as_str(), absolute.port), ("https", 443));

        let connect = hyper::Request::builder()
            .method("CONNECT")
            .uri("example.com:443")
            .body(Vec::new())
            .unwrap();
        let connect = Request::from_hyper(connect).unwrap();
        assert_eq!(connect.form_in, FormIn::Authority);
        assert_eq!(connect.host, "example.com");
        assert_eq!(connect.port, 443);
        assert_eq!(connect.path, "");
    }

    #[test]
    fn test_response_reason_phrase() {
        let custom = Response::new((1, 1), 200).with_msg("Fine").with_body("ok");
        let hyper_resp = custom.to_hyper().unwrap();
        assert_eq!(hyper_resp.status(), StatusCode::OK);
        assert_eq!(Response::from_hyper(hyper_resp), custom);

        let canonical = Response::new((1, 1), 404).with_body(Body::empty());
        let back = Response::from_hyper(canonical.to_hyper().unwrap());
        assert_eq!(back.msg.as_deref(), Some("Not Found"));
    }

    #[test]
    fn test_invalid_status() {
        let resp = Response::new((1, 1), 1000).with_body(Body::empty());
        assert!(matches!(resp.to_hyper(), Err(Error::InvalidStatus(1000))));
    }
}
