//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! validation (rejected URLs), protocol (dispatch, unsupported messages)
//!     → tracing events with key/value fields
//!     → logging.rs (subscriber set up by the binary)
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the caller's
//!   choice

pub mod logging;

pub use logging::init_logging;
