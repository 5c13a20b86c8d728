//! The game facet: lobby CRUD and membership.

use localgames_protocol::{
    CreateGame, Game, GameId, GameUpdate, MembershipRequest, PlayerId,
};
use localgames_transport::HttpTransport;

use crate::client::{ApiClient, RequestOptions};
use crate::ClientError;

/// Typed operations on `{prefix}/games`.
///
/// Borrowed from an [`ApiClient`] via [`ApiClient::games`]; holds no state
/// of its own.
pub struct Games<'a, T> {
    client: &'a ApiClient<T>,
}

impl<'a, T: HttpTransport> Games<'a, T> {
    pub(crate) fn new(client: &'a ApiClient<T>) -> Self {
        Self { client }
    }

    fn collection(&self) -> String {
        self.client.api_path("/games")
    }

    fn item(&self, id: &GameId) -> String {
        self.client.api_path(&format!("/games/{id}"))
    }

    /// Lists every game, in the order the server returns them.
    pub async fn list(&self) -> Result<Vec<Game>, ClientError> {
        self.client
            .request(&self.collection(), RequestOptions::get())
            .await
    }

    /// Creates a game. The server assigns `id` and `createdAt`.
    pub async fn create(&self, game: &CreateGame) -> Result<Game, ClientError> {
        let body = self.client.encode(game)?;
        self.client
            .request(&self.collection(), RequestOptions::post().body(body))
            .await
    }

    /// Fetches one game. A missing id surfaces as a 404 [`ClientError::Http`].
    pub async fn get(&self, id: &GameId) -> Result<Game, ClientError> {
        self.client.request(&self.item(id), RequestOptions::get()).await
    }

    /// Applies a partial update and returns the server's new record.
    pub async fn update(
        &self,
        id: &GameId,
        update: &GameUpdate,
    ) -> Result<Game, ClientError> {
        let body = self.client.encode(update)?;
        self.client
            .request(&self.item(id), RequestOptions::put().body(body))
            .await
    }

    pub async fn delete(&self, id: &GameId) -> Result<(), ClientError> {
        self.client
            .request_empty(&self.item(id), RequestOptions::delete())
            .await
    }

    /// Adds a player to the lobby and returns the updated game.
    pub async fn join(
        &self,
        id: &GameId,
        player_id: &PlayerId,
    ) -> Result<Game, ClientError> {
        let body = self.membership(player_id)?;
        self.client
            .request(
                &format!("{}/join", self.item(id)),
                RequestOptions::post().body(body),
            )
            .await
    }

    /// Removes a player from the lobby.
    pub async fn leave(
        &self,
        id: &GameId,
        player_id: &PlayerId,
    ) -> Result<(), ClientError> {
        let body = self.membership(player_id)?;
        self.client
            .request_empty(
                &format!("{}/leave", self.item(id)),
                RequestOptions::post().body(body),
            )
            .await
    }

    fn membership(&self, player_id: &PlayerId) -> Result<Vec<u8>, ClientError> {
        self.client.encode(&MembershipRequest {
            player_id: player_id.clone(),
        })
    }
}
