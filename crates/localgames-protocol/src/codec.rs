//! Codec trait and the JSON implementation used for every API body.
//!
//! The request wrapper never calls `serde_json` directly; it goes through a
//! [`Codec`], so the body format lives in exactly one place.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes Rust values to bytes and decodes bytes back.
///
/// `decode` is bounded on `DeserializeOwned` because response buffers are
/// dropped right after decoding; the result must own all of its data.
pub trait Codec: Send + Sync + 'static {
    /// MIME type written into the `content-type` header.
    fn content_type(&self) -> &'static str;

    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if the value can't be represented.
    fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] backed by `serde_json`.
///
/// ```rust
/// use localgames_protocol::{Codec, CreateGame, JsonCodec};
///
/// let codec = JsonCodec;
/// let bytes = codec.encode(&CreateGame::new("impostor")).unwrap();
/// assert_eq!(bytes, br#"{"gameType":"impostor"}"#);
///
/// let decoded: CreateGame = codec.decode(&bytes).unwrap();
/// assert_eq!(decoded.game_type, "impostor");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn content_type(&self) -> &'static str {
        "application/json"
    }

    fn encode<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
