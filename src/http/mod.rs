//! HTTP message models.
//!
//! # Data Flow
//! ```text
//! transport reads bytes
//!     → protocol.rs (read_request / read_response, provided by the transport)
//!     → request.rs / response.rs (parsed message, timestamps set by transport)
//!     → [proxy logic inspects and rewrites fields, headers.rs tokens]
//!     → protocol.rs (assemble → assemble_request / assemble_response)
//!     → transport writes bytes
//! ```
//!
//! # Design Decisions
//! - Messages are plain mutable values with no internal locking
//! - Equality is structural and skips capture timestamps
//! - "Not read yet" is an explicit body value, never an empty byte string

pub mod convert;
pub mod headers;
pub mod message;
pub mod protocol;
pub mod request;
pub mod response;

pub use headers::{get_header_tokens, Headers};
pub use message::{Body, HttpVersion, MessageRef, CONTENT_MISSING};
pub use protocol::Protocol;
pub use request::{FormIn, Request};
pub use response::{Response, SslInfo};
