//! `AppContext`: the API client plus the state a UI watches.
//!
//! The context ties the session endpoints to the [`PlayerStore`], so the
//! store always reflects what the server last said about the logged-in
//! player. The [`SocketStore`] rides along so that whatever owns the
//! realtime connection can reach it through the same handle.
//!
//! There is no global instance. Build one at startup and pass it (or a
//! clone) to whatever needs it.

use localgames_protocol::{Player, PlayerPatch};
use localgames_store::{PlayerStore, SocketStore};
use localgames_transport::{HttpTransport, ReqwestTransport};

use crate::{ApiClient, ClientError};

/// API client + player store + socket store.
///
/// Cloning shares everything: both stores and the transport are
/// reference-counted.
pub struct AppContext<T = ReqwestTransport> {
    api: ApiClient<T>,
    player: PlayerStore,
    socket: SocketStore,
}

impl<T> Clone for AppContext<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            player: self.player.clone(),
            socket: self.socket.clone(),
        }
    }
}

impl<T> std::fmt::Debug for AppContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("api", &self.api)
            .field("player", &self.player)
            .field("socket", &self.socket)
            .finish()
    }
}

impl AppContext<ReqwestTransport> {
    /// Builds a context from [`ApiClient::from_env`] with empty stores.
    pub fn from_env() -> Result<Self, ClientError> {
        Ok(Self::new(ApiClient::from_env()?))
    }
}

impl<T: HttpTransport> AppContext<T> {
    /// Wraps `api` with fresh, empty stores.
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            player: PlayerStore::new(),
            socket: SocketStore::new(),
        }
    }

    pub fn api(&self) -> &ApiClient<T> {
        &self.api
    }

    pub fn player(&self) -> &PlayerStore {
        &self.player
    }

    pub fn socket(&self) -> &SocketStore {
        &self.socket
    }

    /// Opens a session and records its player as current.
    pub async fn login(&self, session_id: &str) -> Result<Player, ClientError> {
        let player = self.api.sessions().create(session_id).await?;
        tracing::info!(player_id = %player.id, "logged in");
        self.player.set_player(player.clone());
        Ok(player)
    }

    /// Asks the server who we are and records the answer.
    ///
    /// On failure (typically a 401 with no session) the store is left as
    /// it was.
    pub async fn restore_session(&self) -> Result<Player, ClientError> {
        let player = self.api.sessions().current_player().await?;
        tracing::debug!(player_id = %player.id, "session restored");
        self.player.set_player(player.clone());
        Ok(player)
    }

    /// Updates the current player on the server, then stores the record
    /// the server returned.
    ///
    /// # Errors
    /// [`ClientError::NoCurrentPlayer`] if nobody is logged in; otherwise
    /// whatever the update call returns.
    pub async fn update_profile(
        &self,
        patch: &PlayerPatch,
    ) -> Result<Player, ClientError> {
        let current = self.player.current().ok_or(ClientError::NoCurrentPlayer)?;
        let updated = self.api.players().update(&current.id, patch).await?;
        self.player.update_player(&PlayerPatch::from(updated.clone()));
        Ok(updated)
    }

    /// Ends the session. The player store is cleared even if the server
    /// call fails; the call's result is still returned.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let result = self.api.sessions().delete().await;
        self.player.clear_player();
        tracing::info!(ok = result.is_ok(), "logged out");
        result
    }
}
