//! Transport capability contract.
//!
//! # Responsibilities
//! - Name the operations a transport offers: read a request, read a response,
//!   assemble either back into bytes
//! - Route `assemble` to the right hook by message kind
//!
//! # Design Decisions
//! - Every hook has a provided body that fails with
//!   [`Error::NotImplemented`]; transports override what they support
//! - Dispatch is an exhaustive match over [`MessageRef`], so a new message
//!   kind cannot be silently ignored

use std::any::Any;

use crate::error::{Error, Result};
use crate::http::message::MessageRef;
use crate::http::{Request, Response};

/// Operations a concrete HTTP transport provides.
pub trait Protocol {
    /// Read the next request from the transport.
    fn read_request(&mut self) -> Result<Request> {
        Err(Error::NotImplemented("read_request"))
    }

    /// Read the next response from the transport.
    fn read_response(&mut self) -> Result<Response> {
        Err(Error::NotImplemented("read_response"))
    }

    /// Serialize a request into wire bytes.
    fn assemble_request(&self, _request: &Request) -> Result<Vec<u8>> {
        Err(Error::NotImplemented("assemble_request"))
    }

    /// Serialize a response into wire bytes.
    fn assemble_response(&self, _response: &Response) -> Result<Vec<u8>> {
        Err(Error::NotImplemented("assemble_response"))
    }

    /// Serialize either kind of message.
    fn assemble_message(&self, message: MessageRef<'_>) -> Result<Vec<u8>> {
        tracing::debug!(kind = message.kind(), "Assembling HTTP message");
        match message {
            MessageRef::Request(req) => self.assemble_request(req),
            MessageRef::Response(resp) => self.assemble_response(resp),
        }
    }

    /// Serialize a value of unknown type.
    ///
    /// Fails with [`Error::UnsupportedMessage`] unless `message` is a
    /// [`Request`] or a [`Response`].
    fn assemble(&self, message: &dyn Any) -> Result<Vec<u8>> {
        let message = MessageRef::try_from(message).inspect_err(|_| {
            tracing::warn!("Refusing to assemble a value that is not an HTTP message");
        })?;
        self.assemble_message(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A transport that provides nothing.
    struct Bare;

    impl Protocol for Bare {}

    #[test]
    fn test_hooks_default_to_not_implemented() {
        let mut bare = Bare;
        assert!(matches!(bare.read_request(), Err(Error::NotImplemented("read_request"))));
        assert!(matches!(bare.read_response(), Err(Error::NotImplemented("read_response"))));
        assert!(matches!(
            bare.assemble(&Request::empty()),
            Err(Error::NotImplemented("assemble_request"))
        ));
        assert!(matches!(
            bare.assemble(&Response::new((1, 1), 200)),
            Err(Error::NotImplemented("assemble_response"))
        ));
    }

    #[test]
    fn test_assemble_rejects_other_values() {
        assert!(matches!(
            Bare.assemble(&String::from("HTTP/1.1 200 OK")),
            Err(Error::UnsupportedMessage)
        ));
    }
}
