//! # Local Games
//!
//! Client library for the Local Games multiplayer service.
//!
//! The crate bundles three things a game front-end needs:
//!
//! - [`ApiClient`]: a typed HTTP client. Every endpoint goes through one
//!   request wrapper, grouped into facets: [`games()`](ApiClient::games),
//!   [`players()`](ApiClient::players), [`sessions()`](ApiClient::sessions).
//! - [`PlayerStore`] and [`SocketStore`]: observable state for the
//!   logged-in player and the realtime connection status.
//! - [`AppContext`]: the client and both stores in one handle, with the
//!   login/logout flows that keep them in sync.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use localgames::prelude::*;
//!
//! # async fn run() -> Result<(), ClientError> {
//! let ctx = AppContext::from_env()?;
//!
//! ctx.player().subscribe(|p| match p {
//!     Some(p) => println!("playing as {}", p.username),
//!     None => println!("logged out"),
//! });
//!
//! ctx.login("session-123").await?;
//! for game in ctx.api().games().list().await? {
//!     println!("{} ({}/{})", game.game_type, game.players, game.max_players);
//! }
//! ctx.logout().await
//! # }
//! ```

mod client;
mod config;
mod context;
mod error;
mod games;
mod players;

pub use client::{ApiClient, ApiClientBuilder, RequestOptions};
pub use config::{
    API_PREFIX_ENV, BASE_URL_ENV, ClientConfig, DEFAULT_API_PREFIX,
    DEFAULT_BASE_URL,
};
pub use context::AppContext;
pub use error::ClientError;
pub use games::Games;
pub use players::{Players, Sessions};

pub use localgames_protocol::{
    CreateGame, Game, GameConfig, GameId, GameStatus, GameUpdate,
    HealthStatus, Player, PlayerId, PlayerPatch, ProtocolError,
};
pub use localgames_store::{
    ConnectionPhase, PlayerStore, SocketState, SocketStatePatch, SocketStore,
    Store, SubscriptionId,
};
pub use localgames_transport::{
    Headers, HttpRequest, HttpResponse, HttpTransport, Method,
    ReqwestTransport, TransportError,
};

pub mod prelude {
    pub use crate::{
        ApiClient, AppContext, ClientError, ConnectionPhase, CreateGame, Game,
        GameId, Player, PlayerId, PlayerPatch, PlayerStore, SocketStore,
    };
}
