//! The current-player store.
//!
//! Holds zero or one [`Player`]: the one this client is logged in as.
//!
//! ```text
//!          set_player(p)             update_player(patch)
//!   Empty ──────────────→ Present(p) ──────────────────→ Present(p + patch)
//!     ↑                       │
//!     └────clear_player()─────┘
//! ```
//!
//! `update_player` on an empty store does nothing. A patch can refine the
//! current player but can never create one.

use std::sync::Arc;

use localgames_protocol::{Player, PlayerPatch};

use crate::{Store, SubscriptionId};

/// Observable holder for the logged-in player.
///
/// Cloning is cheap and every clone shares the same underlying store, so
/// the UI and the API glue can each keep a handle.
#[derive(Debug, Clone, Default)]
pub struct PlayerStore {
    inner: Arc<Store<Option<Player>>>,
}

impl PlayerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current player, if any.
    pub fn current(&self) -> Option<Player> {
        (*self.inner.get()).clone()
    }

    /// Returns `true` if a player is set.
    pub fn is_present(&self) -> bool {
        self.inner.get().is_some()
    }

    /// Sets the current player, replacing any previous one.
    pub fn set_player(&self, player: Player) {
        tracing::trace!(player_id = %player.id, "player store set");
        self.inner.set(Some(player));
    }

    /// Forgets the current player.
    pub fn clear_player(&self) {
        tracing::trace!("player store cleared");
        self.inner.set(None);
    }

    /// Merges `patch` into the current player.
    ///
    /// Returns `false` (and notifies no one) when the store is empty.
    pub fn update_player(&self, patch: &PlayerPatch) -> bool {
        self.inner.update_if(|current| {
            let mut player = current.clone()?;
            patch.apply(&mut player);
            Some(Some(player))
        })
    }

    /// Watches the current player. Called immediately with the current
    /// state, then after every change.
    pub fn subscribe(
        &self,
        f: impl Fn(Option<&Player>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.inner.subscribe(move |player| f(player.as_ref()))
    }

    /// Stops a subscription created with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}
