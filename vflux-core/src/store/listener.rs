//! Listener registry entries and unsubscribe handles.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

/// Unique identifier for one subscription.
///
/// Every call to `subscribe` gets a fresh ID, even when the same callback is
/// registered twice, so each registration is removed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Generate a new unique listener ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A registered no-argument callback.
#[derive(Clone)]
pub(crate) struct Listener {
    id: ListenerId,
    callback: Arc<dyn Fn() + Send + Sync>,
}

impl Listener {
    pub(crate) fn new<F>(callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            id: ListenerId::new(),
            callback: Arc::new(callback),
        }
    }

    pub(crate) fn id(&self) -> ListenerId {
        self.id
    }

    pub(crate) fn call(&self) {
        (self.callback)();
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

pub(crate) type ListenerList = Arc<Mutex<Vec<Listener>>>;

/// Capability returned by `subscribe` that removes exactly one listener.
///
/// Unsubscribing is idempotent: calling it again, from a clone, or after the
/// store is gone does nothing. Dropping a `Subscription` does *not*
/// unsubscribe; use [`Subscription::into_guard`] for that.
#[derive(Debug, Clone)]
pub struct Subscription {
    id: ListenerId,
    listeners: Weak<Mutex<Vec<Listener>>>,
}

impl Subscription {
    pub(crate) fn new(id: ListenerId, listeners: &ListenerList) -> Self {
        Self {
            id,
            listeners: Arc::downgrade(listeners),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Returns `true` if this call removed it.
    pub fn unsubscribe(&self) -> bool {
        let Some(listeners) = self.listeners.upgrade() else {
            return false;
        };
        let mut listeners = listeners.lock();
        match listeners.iter().position(|listener| listener.id() == self.id) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.listeners
            .upgrade()
            .map(|listeners| listeners.lock().iter().any(|listener| listener.id() == self.id))
            .unwrap_or(false)
    }

    /// Turn this subscription into a guard that unsubscribes when dropped.
    pub fn into_guard(self) -> SubscriptionGuard {
        SubscriptionGuard { subscription: self }
    }
}

/// Unsubscribes its listener when dropped.
#[derive(Debug)]
pub struct SubscriptionGuard {
    subscription: Subscription,
}

impl SubscriptionGuard {
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}
