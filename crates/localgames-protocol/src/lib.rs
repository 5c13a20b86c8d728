//! Wire types for the Local Games API.
//!
//! This crate defines what the client and the remote service exchange:
//!
//! - **Types** ([`Game`], [`Player`], [`CreateGame`], [`PlayerPatch`], …) —
//!   the JSON bodies of every request and response.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those bodies are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong during
//!   encoding/decoding.
//!
//! It knows nothing about HTTP, URLs, or state stores.
//!
//! ```text
//! Transport (bytes) → Protocol (typed bodies) → Client facets
//! ```

mod codec;
mod error;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use types::{
    CreateGame, CreatePlayer, Game, GameConfig, GameId, GameStatus,
    GameUpdate, HealthStatus, MembershipRequest, Player, PlayerId,
    PlayerPatch, SessionRequest,
};
