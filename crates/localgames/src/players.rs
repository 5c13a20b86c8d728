//! The player and session facets.
//!
//! Players are plain records under `{prefix}/players`. Sessions bind the
//! client to one of those records:
//!
//! ```text
//!   sessions().create(id) ──→ server remembers session ──→ auth/me = player
//!   sessions().delete()   ──→ session gone             ──→ auth/me = 401
//! ```

use localgames_protocol::{
    CreatePlayer, Player, PlayerId, PlayerPatch, SessionRequest,
};
use localgames_transport::HttpTransport;

use crate::client::{ApiClient, RequestOptions};
use crate::ClientError;

// ---------------------------------------------------------------------------
// Players
// ---------------------------------------------------------------------------

/// Typed operations on `{prefix}/players`.
pub struct Players<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> Players<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    fn collection(&self) -> String {
        self.client.api_path("/players")
    }

    fn item(&self, id: &PlayerId) -> String {
        self.client.api_path(&format!("/players/{id}"))
    }

    pub async fn list(&self) -> Result<Vec<Player>, ClientError> {
        self.client
            .request(&self.collection(), RequestOptions::get())
            .await
    }

    /// Registers a new player under `name`.
    pub async fn create(&self, name: &str) -> Result<Player, ClientError> {
        let body = self.client.encode(&CreatePlayer {
            name: name.to_string(),
        })?;
        self.client
            .request(&self.collection(), RequestOptions::post().body(body))
            .await
    }

    pub async fn get(&self, id: &PlayerId) -> Result<Player, ClientError> {
        self.client.request(&self.item(id), RequestOptions::get()).await
    }

    /// Sends the `Some` fields of `patch` and returns the server's record.
    pub async fn update(
        &self,
        id: &PlayerId,
        patch: &PlayerPatch,
    ) -> Result<Player, ClientError> {
        let body = self.client.encode(patch)?;
        self.client
            .request(&self.item(id), RequestOptions::put().body(body))
            .await
    }
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

/// Login session lifecycle under `{prefix}/auth`.
pub struct Sessions<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> Sessions<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    fn session_path(&self) -> String {
        self.client.api_path("/auth/session")
    }

    /// Opens a session and returns the player it belongs to.
    pub async fn create(&self, session_id: &str) -> Result<Player, ClientError> {
        let body = self.client.encode(&SessionRequest {
            session_id: session_id.to_string(),
        })?;
        self.client
            .request(&self.session_path(), RequestOptions::post().body(body))
            .await
    }

    /// Ends the current session.
    pub async fn delete(&self) -> Result<(), ClientError> {
        self.client
            .request_empty(&self.session_path(), RequestOptions::delete())
            .await
    }

    /// The player behind the active session.
    ///
    /// # Errors
    /// A 401 [`ClientError::Http`] when there is no session; check with
    /// [`ClientError::is_unauthenticated`].
    pub async fn current_player(&self) -> Result<Player, ClientError> {
        self.client
            .request(&self.client.api_path("/auth/me"), RequestOptions::get())
            .await
    }
}
