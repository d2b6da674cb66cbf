//! Absolute URL parsing for request targets.

use serde::Serialize;
use thiserror::Error;

use crate::validation::host::{check_host, is_valid_port, HostError};
use crate::validation::url_parts::UrlParts;

/// Why a URL was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("malformed URL: {0}")]
    Syntax(String),

    #[error("URL has no scheme")]
    MissingScheme,

    #[error("port is not a number: {0:?}")]
    InvalidPort(String),

    #[error("port {0} is out of range")]
    PortOutOfRange(i64),

    #[error(transparent)]
    InvalidHost(#[from] HostError),

    #[error("path is not ASCII")]
    NonAsciiPath,
}

/// A validated absolute URL, broken into the pieces a request needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    pub scheme: String,
    pub host: String,
    pub port: u16,
    /// Origin-form target: path plus any params, query and fragment.
    pub path: String,
    /// `user[:password]` stripped from the authority, if there was one.
    pub userinfo: Option<String>,
}

impl ParsedUrl {
    /// `(scheme, host, port, path)`, dropping any userinfo.
    pub fn into_tuple(self) -> (String, String, u16, String) {
        (self.scheme, self.host, self.port, self.path)
    }
}

/// Parse and validate an absolute URL.
///
/// Checks that:
/// - a scheme is present
/// - the port is an integer in 0-65535
/// - the host is a valid IDNA-encoded hostname with no null bytes
/// - the path is ASCII
pub fn try_parse_url(url: &str) -> Result<ParsedUrl, UrlError> {
    let parts = UrlParts::split(url)?;
    if parts.scheme.is_empty() {
        return Err(UrlError::MissingScheme);
    }

    let (userinfo, netloc) = match parts.netloc.rsplit_once('@') {
        Some((userinfo, netloc)) => (Some(userinfo.to_string()), netloc),
        None => (None, parts.netloc),
    };

    // Any colon introduces a port, so "[::1]" without one is rejected.
    let (host, port) = match netloc.rsplit_once(':') {
        Some((host, port)) => {
            let port: i64 = port
                .trim_matches(|c: char| c.is_ascii_whitespace())
                .parse()
                .map_err(|_| UrlError::InvalidPort(port.to_string()))?;
            (host, port)
        }
        None => {
            let port = if parts.scheme == "https" { 443 } else { 80 };
            (netloc, port)
        }
    };

    let mut path = parts.target();
    if !path.starts_with('/') {
        path.insert(0, '/');
    }

    check_host(host)?;
    if !path.is_ascii() {
        return Err(UrlError::NonAsciiPath);
    }
    if !is_valid_port(port) {
        return Err(UrlError::PortOutOfRange(port));
    }

    Ok(ParsedUrl {
        scheme: parts.scheme,
        host: host.to_string(),
        port: port as u16,
        path,
        userinfo,
    })
}

/// Parse and validate an absolute URL, returning `None` if any check fails.
///
/// See [`try_parse_url`] for the checks and for the reason a URL was
/// rejected.
pub fn parse_url(url: &str) -> Option<ParsedUrl> {
    match try_parse_url(url) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            tracing::debug!(url = %url.escape_debug(), reason = %e, "Rejected URL");
            None
        }
    }
}
