//! Unified error type for the Local Games client.

use localgames_protocol::ProtocolError;
use localgames_transport::TransportError;

/// Every way an API call (or a store-backed flow built on one) can fail.
///
/// Sub-crate errors convert in through `#[from]`, so `?` works across
/// layers. Nothing is translated on the way up: a transport failure
/// arrives as [`Transport`](Self::Transport) exactly as the transport
/// produced it.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status. The body was not parsed.
    #[error("API error: {status} {status_text}")]
    Http { status: u16, status_text: String },

    /// A request body could not be encoded, or a 2xx response body could
    /// not be decoded.
    #[error(transparent)]
    Codec(#[from] ProtocolError),

    /// No response was obtained (DNS, refused connection, broken stream).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A flow that needs a logged-in player ran with an empty player store.
    #[error("no player is logged in")]
    NoCurrentPlayer,
}

impl ClientError {
    /// Returns the HTTP status, for [`Http`](Self::Http) errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// `404`: the resource does not exist on the server.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// `401`: there is no active session.
    pub fn is_unauthenticated(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns `true` if a successful response carried an unreadable body.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Codec(e) if e.is_decode())
    }
}
