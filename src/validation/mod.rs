//! URL and address validation.
//!
//! # Data Flow
//! ```text
//! absolute URL string
//!     → url_parts.rs (split into scheme/netloc/path/params/query/fragment)
//!     → parse.rs (strip userinfo, split host/port, rebuild the path)
//!     → host.rs (IDNA hostname, null bytes, port range)
//!     → ParsedUrl (scheme, host, port, path)
//! ```
//!
//! # Design Decisions
//! - Malformed input is expected, not exceptional: `parse_url` returns
//!   `None`, and `try_parse_url` says which check failed
//! - Decomposition keeps the raw path, query and fragment text; nothing is
//!   normalized or percent-encoded on the way through
//! - Default ports are 443 for `https` and 80 for every other scheme

pub mod host;
pub mod parse;
pub mod url_parts;

pub use host::{check_host, is_valid_host, is_valid_port, HostError};
pub use parse::{parse_url, try_parse_url, ParsedUrl, UrlError};
pub use url_parts::UrlParts;
