//! Generic URL decomposition.
//!
//! Splits `scheme://netloc/path;params?query#fragment` without interpreting
//! or normalizing any component. Only the scheme is lowercased.

use crate::validation::UrlError;

/// Schemes whose last path segment may carry `;params`.
const USES_PARAMS: &[&str] = &[
    "", "ftp", "hdl", "prospero", "http", "imap", "https", "shttp", "rtsp", "rtspu", "sip",
    "sips", "mms", "sftp", "tel",
];

fn is_scheme_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')
}

/// The six components of a URL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlParts<'a> {
    pub scheme: String,
    pub netloc: &'a str,
    pub path: &'a str,
    pub params: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

impl<'a> UrlParts<'a> {
    /// Split `url` into its components.
    ///
    /// A string without a recognisable scheme is still split; the scheme is
    /// then empty. Only unbalanced IPv6 brackets in the netloc are an error.
    pub fn split(url: &'a str) -> Result<Self, UrlError> {
        let mut parts = UrlParts::default();
        let mut rest = url;

        if let Some(i) = url.find(':') {
            let (candidate, after) = (&url[..i], &url[i + 1..]);
            // "host:8080" is a path with a port, not a scheme.
            let port_like = !after.is_empty() && after.bytes().all(|b| b.is_ascii_digit());
            if i > 0 && candidate.chars().all(is_scheme_char) && !port_like {
                parts.scheme = candidate.to_ascii_lowercase();
                rest = after;
            }
        }

        if let Some(after_slashes) = rest.strip_prefix("//") {
            let end = after_slashes
                .find(['/', '?', '#'])
                .unwrap_or(after_slashes.len());
            parts.netloc = &after_slashes[..end];
            rest = &after_slashes[end..];

            if parts.netloc.contains('[') != parts.netloc.contains(']') {
                return Err(UrlError::Syntax("invalid IPv6 URL".to_string()));
            }
        }

        if let Some((before, fragment)) = rest.split_once('#') {
            parts.fragment = fragment;
            rest = before;
        }
        if let Some((before, query)) = rest.split_once('?') {
            parts.query = query;
            rest = before;
        }

        parts.path = rest;
        if USES_PARAMS.contains(&parts.scheme.as_str()) {
            let segment_start = rest.rfind('/').unwrap_or(0);
            if let Some(offset) = rest[segment_start..].find(';') {
                let split_at = segment_start + offset;
                parts.path = &rest[..split_at];
                parts.params = &rest[split_at + 1..];
            }
        }

        Ok(parts)
    }

    /// Rebuild the origin-form target: path, then `;params`, `?query` and
    /// `#fragment` for each component that is non-empty.
    pub fn target(&self) -> String {
        let mut target = String::from(self.path);
        if !self.params.is_empty() {
            target.push(';');
            target.push_str(self.params);
        }
        if !self.query.is_empty() {
            target.push('?');
            target.push_str(self.query);
        }
        if !self.fragment.is_empty() {
            target.push('#');
            target.push_str(self.fragment);
        }
        target
    }
}
