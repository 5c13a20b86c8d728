//! Observable client-side state for Local Games.
//!
//! This crate holds the state the UI layer reacts to:
//!
//! 1. **Generic store** — [`Store`], a value plus a list of subscribers that
//!    are told about every update
//! 2. **Current player** — [`PlayerStore`], zero or one [`Player`]
//! 3. **Socket status** — [`SocketStore`], the connection flags published by
//!    the realtime transport
//!
//! # How it fits in the stack
//!
//! ```text
//! UI layer (above)  ← subscribes to stores, renders snapshots
//!     ↕
//! Store layer (this crate)  ← holds snapshots, notifies subscribers
//!     ↕
//! API client / transport observers  ← push fresh data in
//! ```
//!
//! Nothing here is a global. Create the stores once and hand them to
//! whoever needs them (see `localgames::AppContext`).
//!
//! [`Player`]: localgames_protocol::Player

mod player;
mod socket;
mod store;

pub use player::PlayerStore;
pub use socket::{ConnectionPhase, SocketState, SocketStatePatch, SocketStore};
pub use store::{Store, SubscriptionId};
