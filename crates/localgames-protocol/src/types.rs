//! Resource types and request payloads for the Local Games HTTP API.
//!
//! Everything in this module travels "on the wire" as JSON. The remote
//! service speaks camelCase (`maxPlayers`, `createdAt`, `sessionId`), so
//! every struct carries `#[serde(rename_all = "camelCase")]`.
//!
//! Three kinds of types live here:
//!
//! - **Resources** ([`Game`], [`Player`], [`HealthStatus`]) — what the
//!   server returns. Identifiers and timestamps are always server-assigned.
//! - **Create payloads** ([`CreateGame`], [`CreatePlayer`],
//!   [`SessionRequest`], [`MembershipRequest`]) — what the client sends to
//!   bring something into existence.
//! - **Patches** ([`GameUpdate`], [`PlayerPatch`]) — partial updates where
//!   every field is optional and `None` fields are left off the wire.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Opaque identifier for a game, assigned by the server.
///
/// The client never generates these. It only echoes back what it received
/// from a previous response. `#[serde(transparent)]` keeps the JSON shape a
/// plain string: `"g-123"`, not `{"0": "g-123"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// Wraps a server-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for GameId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for GameId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque identifier for a player, assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    /// Wraps a server-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// Game
// ---------------------------------------------------------------------------

/// Lifecycle status of a game as reported by the server.
///
/// ```text
/// Waiting → Active → Ended
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    /// Lobby is open and accepting players.
    Waiting,
    /// The game is being played.
    Active,
    /// The game is over.
    Ended,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Active => write!(f, "active"),
            Self::Ended => write!(f, "ended"),
        }
    }
}

/// Game-specific configuration.
///
/// The well-known settings (word categories, rounds, timers, voting) are
/// typed fields. Anything else a particular game type needs lands in
/// [`extra`](Self::extra). `#[serde(flatten)]` collects every unknown key
/// there on decode and writes them back inline on encode, so nothing the
/// server sends is lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    /// Word categories the game draws from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Number of rounds to play.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rounds: Option<u32>,

    /// Seconds allotted to each round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_per_round: Option<u32>,

    /// Whether players vote at the end of a round.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voting_enabled: Option<bool>,

    /// Whether the game starts automatically once the lobby fills up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_start: Option<bool>,

    /// Game-type specific settings not covered above.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A game lobby as returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Server-assigned identifier.
    pub id: GameId,

    /// Which game this is (e.g. `"impostor"`).
    ///
    /// Older endpoints call this field `name`; both spellings decode.
    #[serde(alias = "name")]
    pub game_type: String,

    /// How many players are currently in the lobby.
    #[serde(default)]
    pub players: u32,

    /// Lobby capacity.
    pub max_players: u32,

    /// Server-assigned creation timestamp (RFC 3339 string, passed through).
    pub created_at: String,

    /// Lifecycle status, when the server reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,

    /// Short join code for sharing the lobby, when the server issues one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_code: Option<String>,

    /// Game-specific configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_config: Option<GameConfig>,
}

impl Game {
    /// Returns `true` if no more players can join.
    pub fn is_full(&self) -> bool {
        self.players >= self.max_players
    }
}

/// Payload for `POST /games`.
///
/// The client never sets `id` or `createdAt` — the server fills them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGame {
    /// Which game to create.
    pub game_type: String,

    /// Lobby capacity; the server picks a default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,

    /// Initial configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_config: Option<GameConfig>,
}

impl CreateGame {
    /// Starts a create payload for the given game type.
    pub fn new(game_type: impl Into<String>) -> Self {
        Self {
            game_type: game_type.into(),
            max_players: None,
            game_config: None,
        }
    }

    /// Sets the lobby capacity.
    pub fn max_players(mut self, max_players: u32) -> Self {
        self.max_players = Some(max_players);
        self
    }

    /// Sets the initial configuration.
    pub fn game_config(mut self, config: GameConfig) -> Self {
        self.game_config = Some(config);
        self
    }
}

/// Partial update for `PUT /games/{id}`. Only `Some` fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_players: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<GameStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_config: Option<GameConfig>,
}

/// Payload for the `join` and `leave` sub-resources of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipRequest {
    pub player_id: PlayerId,
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// A player record as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Server-assigned identifier.
    pub id: PlayerId,

    /// Display name. The `/players` collection calls it `name`; both decode.
    #[serde(alias = "name")]
    pub username: String,

    /// Session the player is bound to, once a session exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

/// A partial [`Player`]: every field optional.
///
/// Used both as the body of `PUT /players/{id}` and as the argument to the
/// player store's merge. [`apply`](Self::apply) overwrites exactly the
/// fields that are `Some` and leaves the rest alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<String>,
}

impl PlayerPatch {
    /// Shorthand for a patch that only renames the player.
    pub fn username(username: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.username.is_none()
            && self.session_id.is_none()
            && self.created_at.is_none()
            && self.last_seen.is_none()
    }

    /// Merges this patch into `player`, overwriting only `Some` fields.
    pub fn apply(&self, player: &mut Player) {
        if let Some(id) = &self.id {
            player.id = id.clone();
        }
        if let Some(username) = &self.username {
            player.username = username.clone();
        }
        if let Some(session_id) = &self.session_id {
            player.session_id = Some(session_id.clone());
        }
        if let Some(created_at) = &self.created_at {
            player.created_at = Some(created_at.clone());
        }
        if let Some(last_seen) = &self.last_seen {
            player.last_seen = Some(last_seen.clone());
        }
    }
}

impl From<Player> for PlayerPatch {
    /// A patch that sets every field the record carries. Fields the record
    /// lacks stay `None`, so applying it never erases local knowledge.
    fn from(player: Player) -> Self {
        Self {
            id: Some(player.id),
            username: Some(player.username),
            session_id: player.session_id,
            created_at: player.created_at,
            last_seen: player.last_seen,
        }
    }
}

/// Payload for `POST /players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePlayer {
    pub name: String,
}

/// Payload for `POST /auth/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    pub session_id: String,
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub message: String,
}

// =========================================================================
// Tests
// =========================================================================
