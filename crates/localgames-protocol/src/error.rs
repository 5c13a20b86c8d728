//! Error types for the protocol layer.
//!
//! A `ProtocolError` always means the problem is in turning values into
//! bytes or bytes into values — never in networking.

/// Errors that can occur while encoding request bodies or decoding
/// response bodies.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, missing required fields, wrong data
    /// types, or an empty body where a payload was expected.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

impl ProtocolError {
    /// Returns `true` if this error came from decoding a response.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}
