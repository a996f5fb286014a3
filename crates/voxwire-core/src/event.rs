//! Synchronous publish/subscribe with per-listener fault isolation.
//!
//! A [`Publisher`] keeps an ordered registry of listeners. [`Publisher::publish`]
//! hands a value to every listener registered when the call starts, in
//! registration order, on the caller's thread.
//!
//! # Delivery contract
//!
//! - A listener that panics is caught, logged and skipped. The remaining
//!   listeners still receive the value and `publish` returns normally.
//! - Listeners may unsubscribe themselves or others mid-publish. A listener
//!   removed before its turn is not called; every other listener is called
//!   exactly once.
//! - Listeners subscribed mid-publish are first called by the next publish.
//! - There is no backpressure: `publish` returns once every listener has.

use std::cell::RefCell;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::{Rc, Weak};

use slotmap::SlotMap;
use tracing::warn;

use crate::id::SubscriptionId;

/// A listener receives published values read-only.
pub type Listener<T> = Box<dyn FnMut(&T)>;

/// Outcome of one [`Publisher::publish`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishReport {
    /// Listeners that returned normally.
    pub delivered: usize,
    /// Listeners that panicked.
    pub failed: usize,
}

struct Registry<T> {
    /// `None` while the listener is being called.
    listeners: SlotMap<SubscriptionId, Option<Listener<T>>>,
    /// Registration order.
    order: Vec<SubscriptionId>,
}

impl<T> Registry<T> {
    fn remove(&mut self, id: SubscriptionId) -> bool {
        if self.listeners.remove(id).is_none() {
            return false;
        }
        self.order.retain(|&other| other != id);
        true
    }
}

// ---------------------------------------------------------------------------
// Publisher
// ---------------------------------------------------------------------------

/// Ordered listener registry. Cloning yields another handle to the same
/// registry.
pub struct Publisher<T> {
    registry: Rc<RefCell<Registry<T>>>,
}

impl<T> Clone for Publisher<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<T> std::fmt::Debug for Publisher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Publisher")
            .field("listeners", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Publisher<T> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                listeners: SlotMap::with_key(),
                order: Vec::new(),
            })),
        }
    }

    /// Register a listener at the end of the delivery order.
    pub fn subscribe(&self, listener: impl FnMut(&T) + 'static) -> Subscription<T> {
        let mut registry = self.registry.borrow_mut();
        let id = registry.listeners.insert(Some(Box::new(listener)));
        registry.order.push(id);
        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Remove a listener by identity. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.registry.borrow_mut().remove(id)
    }

    /// Whether `id` is currently registered.
    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.registry.borrow().listeners.contains_key(id)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.registry.borrow().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove every listener.
    pub fn clear(&self) {
        let mut registry = self.registry.borrow_mut();
        registry.listeners.clear();
        registry.order.clear();
    }

    /// Deliver `value` to every listener registered at the start of the call.
    pub fn publish(&self, value: &T) -> PublishReport {
        let snapshot: Vec<SubscriptionId> = self.registry.borrow().order.clone();
        let mut report = PublishReport::default();

        for id in snapshot {
            // Take the listener out so the registry is not borrowed while it
            // runs; it may subscribe or unsubscribe.
            let taken = self
                .registry
                .borrow_mut()
                .listeners
                .get_mut(id)
                .and_then(Option::take);
            let Some(mut listener) = taken else {
                continue;
            };

            let outcome = catch_unwind(AssertUnwindSafe(|| listener(value)));

            if let Some(slot) = self.registry.borrow_mut().listeners.get_mut(id) {
                *slot = Some(listener);
            }

            match outcome {
                Ok(()) => report.delivered += 1,
                Err(payload) => {
                    report.failed += 1;
                    warn!(
                        subscription = ?id,
                        panic = panic_message(payload.as_ref()),
                        "listener panicked; continuing delivery"
                    );
                }
            }
        }

        report
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Handle returned by [`Publisher::subscribe`].
///
/// Dropping the handle leaves the listener registered; call
/// [`unsubscribe`](Self::unsubscribe) to remove it. The handle does not keep
/// the publisher alive.
pub struct Subscription<T> {
    id: SubscriptionId,
    registry: Weak<RefCell<Registry<T>>>,
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl<T> Subscription<T> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Remove the listener. Returns false if it was already removed or the
    /// publisher is gone.
    pub fn unsubscribe(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow_mut().remove(self.id))
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().listeners.contains_key(self.id))
    }
}

// ===========================================================================
// Tests
// ===========================================================================
