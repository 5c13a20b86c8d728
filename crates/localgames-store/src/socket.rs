//! Socket connection status.
//!
//! The realtime transport itself lives elsewhere. This store only mirrors
//! what that transport reports: whether it is connected, whether it is
//! trying to connect, and the last error it saw.
//!
//! The three fields are independent and the store does not validate them.
//! Setting `is_connected` and `is_connecting` to `true` at the same time is
//! allowed. Callers that want a single answer can ask for the
//! [`ConnectionPhase`], which collapses the flags with a fixed precedence.

use std::fmt;
use std::sync::Arc;

use crate::{Store, SubscriptionId};

// ---------------------------------------------------------------------------
// SocketState
// ---------------------------------------------------------------------------

/// Snapshot of the realtime connection flags.
///
/// `Default` is the process-start state: disconnected, idle, no error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketState {
    pub is_connected: bool,
    pub is_connecting: bool,
    pub error: Option<String>,
}

impl SocketState {
    /// Collapses the flags into a single phase.
    ///
    /// Precedence: an error wins, then connected, then connecting.
    pub fn phase(&self) -> ConnectionPhase {
        if let Some(reason) = &self.error {
            ConnectionPhase::Errored(reason.clone())
        } else if self.is_connected {
            ConnectionPhase::Connected
        } else if self.is_connecting {
            ConnectionPhase::Connecting
        } else {
            ConnectionPhase::Disconnected
        }
    }
}

/// A partial [`SocketState`]: `None` fields are left unchanged.
///
/// `error` is doubly optional: `None` means "don't touch", `Some(None)`
/// means "clear the error".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SocketStatePatch {
    pub is_connected: Option<bool>,
    pub is_connecting: Option<bool>,
    pub error: Option<Option<String>>,
}

impl SocketStatePatch {
    pub fn connected(mut self, connected: bool) -> Self {
        self.is_connected = Some(connected);
        self
    }

    pub fn connecting(mut self, connecting: bool) -> Self {
        self.is_connecting = Some(connecting);
        self
    }

    pub fn error(mut self, error: Option<String>) -> Self {
        self.error = Some(error);
        self
    }

    /// Merges this patch into `state`.
    pub fn apply(&self, state: &mut SocketState) {
        if let Some(connected) = self.is_connected {
            state.is_connected = connected;
        }
        if let Some(connecting) = self.is_connecting {
            state.is_connecting = connecting;
        }
        if let Some(error) = &self.error {
            state.error = error.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// ConnectionPhase
// ---------------------------------------------------------------------------

/// A single-valued view of the connection, derived from [`SocketState`].
///
/// The enum makes contradictory combinations unrepresentable for code
/// that only needs one answer (e.g. which status badge to draw).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionPhase {
    Disconnected,
    Connecting,
    Connected,
    Errored(String),
}

impl fmt::Display for ConnectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
            Self::Errored(reason) => write!(f, "error: {reason}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SocketStore
// ---------------------------------------------------------------------------

/// Observable holder for [`SocketState`].
///
/// Every setter merges into the current state and notifies subscribers,
/// even when nothing actually changed.
#[derive(Debug, Clone, Default)]
pub struct SocketStore {
    inner: Arc<Store<SocketState>>,
}

impl SocketStore {
    /// Creates a store in the disconnected, error-free state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> SocketState {
        (*self.inner.get()).clone()
    }

    /// Returns the current [`ConnectionPhase`].
    pub fn phase(&self) -> ConnectionPhase {
        self.inner.get().phase()
    }

    /// Merges several fields at once and returns the state this call
    /// produced.
    ///
    /// The returned state may already be stale when another update lands
    /// right after (for instance from a subscriber); read
    /// [`snapshot`](Self::snapshot) for the latest one.
    pub fn set_socket_state(&self, patch: SocketStatePatch) -> SocketState {
        let mut applied = SocketState::default();
        self.inner.update(|current| {
            let mut next = current.clone();
            patch.apply(&mut next);
            applied = next.clone();
            next
        });
        tracing::trace!(phase = %applied.phase(), "socket state updated");
        applied
    }

    pub fn set_connected(&self, connected: bool) {
        self.set_socket_state(SocketStatePatch::default().connected(connected));
    }

    pub fn set_connecting(&self, connecting: bool) {
        self.set_socket_state(
            SocketStatePatch::default().connecting(connecting),
        );
    }

    /// Records (or with `None`, clears) the last transport error.
    pub fn set_error(&self, error: Option<String>) {
        self.set_socket_state(SocketStatePatch::default().error(error));
    }

    /// Watches the state. Called immediately, then after every update.
    pub fn subscribe(
        &self,
        f: impl Fn(&SocketState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.inner.subscribe(f)
    }

    /// Stops a subscription created with [`subscribe`](Self::subscribe).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.unsubscribe(id)
    }
}
