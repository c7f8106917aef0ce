//! Unified error type.

/// The error type returned by cardroute's fallible operations.
///
/// Routing outcomes (404, 405, redirects) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure and startup failures: binding a port, accepting a
/// connection, or a malformed domain table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    InvalidAddr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("unknown kind `{0}` (expected agents, skills or teams)")]
    UnknownKind(String),

    #[error("invalid domain mapping `{0}` (expected host=kind)")]
    InvalidMapping(String),
}
