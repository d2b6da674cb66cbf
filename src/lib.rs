//! HTTP message semantics for intercepting proxies.

pub mod config;
pub mod error;
pub mod http;
pub mod observability;
pub mod validation;

pub use error::{Error, Result};
pub use http::{
    get_header_tokens, Body, FormIn, Headers, HttpVersion, Protocol, Request, Response,
    CONTENT_MISSING,
};
pub use validation::{is_valid_host, is_valid_port, parse_url};
