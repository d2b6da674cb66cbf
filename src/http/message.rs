//! Types shared by requests and responses.

use std::any::Any;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::http::{Request, Response};

/// HTTP protocol version as a major/minor pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct HttpVersion {
    pub major: u8,
    pub minor: u8,
}

impl HttpVersion {
    pub const HTTP_1_0: HttpVersion = HttpVersion::new(1, 0);
    pub const HTTP_1_1: HttpVersion = HttpVersion::new(1, 1);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl From<(u8, u8)> for HttpVersion {
    fn from((major, minor): (u8, u8)) -> Self {
        Self::new(major, minor)
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

/// Message body.
///
/// `Missing` means the body has not been read (streamed, skipped, or not
/// captured). It is distinct from `Bytes(vec![])`, a body that is present and
/// empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Body {
    #[default]
    Missing,
    Bytes(Vec<u8>),
}

/// Marks a body that has not been read yet.
pub const CONTENT_MISSING: Body = Body::Missing;

impl Body {
    /// An empty, present body.
    pub fn empty() -> Self {
        Body::Bytes(Vec::new())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Body::Missing)
    }

    /// The body bytes, or `None` when the body was not read.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Missing => None,
            Body::Bytes(bytes) => Some(bytes),
        }
    }

    /// Length of the body; a missing body counts as zero.
    pub fn len(&self) -> usize {
        self.as_bytes().map_or(0, <[u8]>::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Bytes(bytes.to_vec())
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Bytes(text.as_bytes().to_vec())
    }
}

/// Borrowed view of either kind of HTTP message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageRef<'a> {
    Request(&'a Request),
    Response(&'a Response),
}

impl MessageRef<'_> {
    pub fn kind(&self) -> &'static str {
        match self {
            MessageRef::Request(_) => "request",
            MessageRef::Response(_) => "response",
        }
    }
}

impl<'a> From<&'a Request> for MessageRef<'a> {
    fn from(req: &'a Request) -> Self {
        MessageRef::Request(req)
    }
}

impl<'a> From<&'a Response> for MessageRef<'a> {
    fn from(resp: &'a Response) -> Self {
        MessageRef::Response(resp)
    }
}

impl<'a> TryFrom<&'a dyn Any> for MessageRef<'a> {
    type Error = Error;

    fn try_from(value: &'a dyn Any) -> Result<Self, Self::Error> {
        if let Some(req) = value.downcast_ref::<Request>() {
            Ok(MessageRef::Request(req))
        } else if let Some(resp) = value.downcast_ref::<Response>() {
            Ok(MessageRef::Response(resp))
        } else {
            Err(Error::UnsupportedMessage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_is_not_empty_body() {
        assert_ne!(CONTENT_MISSING, Body::empty());
        assert!(CONTENT_MISSING.is_missing());
        assert!(!Body::empty().is_missing());
        assert_eq!(CONTENT_MISSING.as_bytes(), None);
        assert_eq!(Body::empty().as_bytes(), Some(&b""[..]));
        assert_eq!(Body::default(), CONTENT_MISSING);
    }

    #[test]
    fn test_version_display() {
        assert_eq!(HttpVersion::HTTP_1_1.to_string(), "HTTP/1.1");
        assert_eq!(HttpVersion::from((2, 0)).to_string(), "HTTP/2.0");
    }

    #[test]
    fn test_message_ref_from_any() {
        let resp = Response::new((1, 1), 204);
        let any: &dyn Any = &resp;
        assert!(matches!(MessageRef::try_from(any), Ok(MessageRef::Response(_))));

        let other: &dyn Any = &"GET / HTTP/1.1";
        assert!(matches!(
            MessageRef::try_from(other),
            Err(Error::UnsupportedMessage)
        ));
    }
}
