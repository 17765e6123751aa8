//! Synchronous in-process event bus.
//!
//! This is the hub every component communicates through: render targets
//! emit intent events, the store emits change events, and the orchestrator
//! subscribes handlers to both. It is a same-thread fan-out primitive, not
//! a durable broker — no queuing, no backpressure, no delivery guarantees
//! beyond "every currently subscribed handler runs before `publish`
//! returns".
//!
//! # Delivery
//!
//! `publish` invokes every handler subscribed to the event's exact name, in
//! subscription order, then every all-events handler. Matching is by exact
//! [`EventName`] only; there are no wildcard or pattern subscriptions.
//!
//! Each handler runs isolated: a panicking handler is caught, reported via
//! `tracing::error!`, and never blocks delivery to sibling subscribers.
//!
//! # Re-entrancy
//!
//! The handler list is snapshotted before invocation, so handlers may
//! publish further events (the nested publish completes first,
//! run-to-completion) and may subscribe or unsubscribe; registry mutations
//! take effect from the next publish.

use crate::event::{AppEvent, EventName};
use smallvec::SmallVec;
use std::collections::HashMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A subscribed event handler.
type Handler = Arc<dyn Fn(&AppEvent) + Send + Sync>;

/// Opaque identifier of a single subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SubscriptionId(u64);

/// Token returned by [`EventBus::subscribe`] and
/// [`EventBus::subscribe_all`]; pass it to [`EventBus::unsubscribe`] to
/// remove the handler.
///
/// Dropping the token does NOT unsubscribe — handlers live for the session
/// unless explicitly removed.
#[derive(Debug)]
pub struct Subscription {
    target: Option<EventName>,
    id: SubscriptionId,
}

struct Registered {
    id: SubscriptionId,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    by_name: HashMap<EventName, Vec<Registered>>,
    all: Vec<Registered>,
}

impl Registry {
    fn issue_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }
}

/// Publish/subscribe dispatcher for [`AppEvent`]s.
///
/// Constructed once at startup and shared (via `Arc`) with the store and
/// the orchestrator; torn down never during a session.
#[derive(Default)]
pub struct EventBus {
    registry: Mutex<Registry>,
}

impl EventBus {
    /// Creates an empty bus
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // Handlers run outside the lock, so the only way to poison it would be
    // a panic inside the registry bookkeeping itself; recover rather than
    // propagate.
    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Subscribes `handler` to events published under `name`.
    ///
    /// Handlers for the same name run in subscription order.
    pub fn subscribe<F>(&self, name: EventName, handler: F) -> Subscription
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = registry.issue_id();
        registry.by_name.entry(name).or_default().push(Registered {
            id,
            handler: Arc::new(handler),
        });
        Subscription {
            target: Some(name),
            id,
        }
    }

    /// Subscribes `handler` to every event, regardless of name.
    ///
    /// All-events handlers run after the exact-name handlers of each
    /// publish; intended for diagnostics (event tracing, recorders).
    pub fn subscribe_all<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = registry.issue_id();
        registry.all.push(Registered {
            id,
            handler: Arc::new(handler),
        });
        Subscription { target: None, id }
    }

    /// Removes the handler identified by `subscription`.
    ///
    /// Unknown or already-removed tokens are a no-op.
    pub fn unsubscribe(&self, subscription: Subscription) {
        let mut registry = self.registry();
        match subscription.target {
            Some(name) => {
                if let Some(handlers) = registry.by_name.get_mut(&name) {
                    handlers.retain(|r| r.id != subscription.id);
                }
            }
            None => registry.all.retain(|r| r.id != subscription.id),
        }
    }

    /// Publishes `event` to every matching handler before returning.
    ///
    /// A handler that panics is caught and reported through
    /// `tracing::error!`; delivery continues with the next handler.
    pub fn publish(&self, event: &AppEvent) {
        let snapshot: SmallVec<[Handler; 8]> = {
            let registry = self.registry();
            registry
                .by_name
                .get(&event.name())
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .chain(registry.all.iter())
                .map(|r| Arc::clone(&r.handler))
                .collect()
        };

        tracing::trace!(event = %event.name(), handlers = snapshot.len(), "publish");

        for handler in snapshot {
            if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
                tracing::error!(
                    event = %event.name(),
                    "event handler panicked; continuing delivery to remaining subscribers"
                );
            }
        }
    }

    /// Number of handlers currently subscribed to `name` (exact-name only)
    #[must_use]
    pub fn subscriber_count(&self, name: EventName) -> usize {
        self.registry().by_name.get(&name).map_or(0, Vec::len)
    }
}
