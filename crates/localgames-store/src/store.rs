//! The generic observable store.
//!
//! A [`Store`] holds one value behind an `Arc` and a list of subscriber
//! callbacks. Every update builds a brand-new snapshot and swaps it in
//! under a lock, so readers see either the old value or the new one and
//! never a half-applied mix.
//!
//! # Notification order
//!
//! Every update queues one notification round (the new snapshot plus the
//! subscribers registered at that moment) under the same lock that swaps
//! the value, so rounds are queued in commit order. Rounds are delivered
//! one at a time, in that order, AFTER the lock is released:
//!
//! ```text
//!   set(a) ──→ queue [a]     ──→ this thread drains: deliver a
//!   set(b) ──→ queue [.., b] ──→ another thread is draining: it delivers b
//! ```
//!
//! Whichever thread finds the queue idle drains it. An update made while
//! another thread is draining returns right away and its round is
//! delivered by the draining thread. An update made from inside a
//! subscriber is delivered after the current round finishes. Either way
//! each subscriber sees snapshots in commit order, and the last one it
//! sees is the value [`Store::get`] returns once the queue is empty.
//!
//! A subscriber may read or update the store without deadlocking.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle returned by [`Store::subscribe`], used to unsubscribe later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// One queued notification: a snapshot and who to tell about it.
type Round<T> = (Arc<T>, Vec<Subscriber<T>>);

struct Inner<T> {
    value: Arc<T>,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
    pending: VecDeque<Round<T>>,
    draining: bool,
}

/// A value that can be watched for changes.
///
/// Modelled on a Svelte `writable`: [`subscribe`](Self::subscribe) calls the
/// new subscriber once right away with the current value, then again after
/// every [`set`](Self::set) or [`update`](Self::update).
pub struct Store<T> {
    inner: Mutex<Inner<T>>,
}

impl<T> Store<T> {
    /// Creates a store holding `initial`, with no subscribers.
    pub fn new(initial: T) -> Self {
        Self {
            inner: Mutex::new(Inner {
                value: Arc::new(initial),
                subscribers: Vec::new(),
                next_id: 1,
                pending: VecDeque::new(),
                draining: false,
            }),
        }
    }

    /// Returns the current snapshot.
    ///
    /// The snapshot is immutable; later updates replace it rather than
    /// modify it, so holding on to it is always safe.
    pub fn get(&self) -> Arc<T> {
        Arc::clone(&self.lock().value)
    }

    /// Replaces the value and notifies every subscriber.
    pub fn set(&self, value: T) {
        self.update_if(|_| Some(value));
    }

    /// Derives a new value from the current one and notifies subscribers.
    ///
    /// `f` runs while the lock is held, so it must not touch this store.
    pub fn update(&self, f: impl FnOnce(&T) -> T) {
        self.update_if(|current| Some(f(current)));
    }

    /// Like [`update`](Self::update), but `f` may return `None` to leave
    /// the value untouched. Subscribers are only notified when a new value
    /// was produced. Returns whether the value was replaced.
    pub fn update_if(&self, f: impl FnOnce(&T) -> Option<T>) -> bool {
        let should_drain = {
            let mut inner = self.lock();
            let Some(next) = f(&inner.value) else {
                return false;
            };
            let next = Arc::new(next);
            inner.value = Arc::clone(&next);
            let subscribers = snapshot_subscribers(&inner);
            inner.enqueue((next, subscribers))
        };
        if should_drain {
            self.drain();
        }
        true
    }

    /// Registers a callback and immediately calls it with the current value.
    ///
    /// The initial call goes through the notification queue, so it never
    /// overtakes a round queued before it.
    pub fn subscribe(
        &self,
        f: impl Fn(&T) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let subscriber: Subscriber<T> = Arc::new(f);
        let (id, should_drain) = {
            let mut inner = self.lock();
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            inner.subscribers.push((id, Arc::clone(&subscriber)));
            let current = Arc::clone(&inner.value);
            (id, inner.enqueue((current, vec![subscriber])))
        };
        if should_drain {
            self.drain();
        }
        id
    }

    /// Removes a subscriber. Returns `false` if the id was unknown
    /// (never issued, or already unsubscribed).
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        inner.subscribers.len() != before
    }

    /// Returns how many subscribers are registered.
    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    /// Delivers queued rounds until the queue is empty.
    ///
    /// Only one thread drains at a time; see [`Inner::enqueue`].
    fn drain(&self) {
        let _reset = ResetOnPanic(self);
        loop {
            let (value, subscribers) = {
                let mut inner = self.lock();
                match inner.pending.pop_front() {
                    Some(round) => round,
                    None => {
                        inner.draining = false;
                        return;
                    }
                }
            };
            for subscriber in &subscribers {
                subscriber(&value);
            }
        }
    }

    /// A subscriber that panicked poisons the mutex; the data itself is
    /// still a complete snapshot, so keep going with it.
    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Inner<T> {
    /// Queues a round. Returns `true` if the caller must drain, i.e. no
    /// other thread is already doing so.
    fn enqueue(&mut self, round: Round<T>) -> bool {
        self.pending.push_back(round);
        if self.draining {
            false
        } else {
            self.draining = true;
            true
        }
    }
}

/// Releases the drain role if a subscriber panics mid-round, so the store
/// keeps notifying afterwards. Rounds still queued at that point are
/// dropped.
struct ResetOnPanic<'a, T>(&'a Store<T>);

impl<T> Drop for ResetOnPanic<'_, T> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let mut inner = self.0.lock();
            inner.pending.clear();
            inner.draining = false;
        }
    }
}

impl<T: Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Store")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

fn snapshot_subscribers<T>(inner: &Inner<T>) -> Vec<Subscriber<T>> {
    inner
        .subscribers
        .iter()
        .map(|(_, s)| Arc::clone(s))
        .collect()
}

// =========================================================================
// Tests
// =========================================================================
