//! The body type shared by requests and responses.
//!
//! Bodies are streamed, never collected: the router moves a body from the
//! downstream response to the outgoing one without polling it. Boxing lets
//! hyper's `Incoming`, static file bytes and synthesized empty bodies share
//! one concrete type.

use std::convert::Infallible;

use bytes::Bytes;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full};

/// Boxed error carried by a [`Body`] stream.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A type-erased, streaming HTTP body.
pub type Body = UnsyncBoxBody<Bytes, BoxError>;

/// A body with no data frames.
pub fn empty() -> Body {
    Empty::<Bytes>::new()
        .map_err(|never: Infallible| -> BoxError { match never {} })
        .boxed_unsync()
}

/// A body with a single data frame.
pub fn full(data: impl Into<Bytes>) -> Body {
    Full::new(data.into())
        .map_err(|never: Infallible| -> BoxError { match never {} })
        .boxed_unsync()
}

/// Adapts hyper's connection body.
pub(crate) fn incoming(body: hyper::body::Incoming) -> Body {
    body.map_err(BoxError::from).boxed_unsync()
}
