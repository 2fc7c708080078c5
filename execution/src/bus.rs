//! In-process publish/subscribe over a closed set of topics.

use arcade_types::casino::{Event, Topic};
use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
};
use tracing::warn;

type Handler = Arc<dyn Fn(&Event) -> anyhow::Result<()> + Send + Sync>;

struct Entry {
    id: u64,
    topic: Topic,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<Entry>,
}

/// Shared handle to the bus. Clones publish into the same registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

/// Returned by [`EventBus::subscribe`]; dropping it keeps the handler registered.
#[must_use = "keep the subscription to be able to cancel it"]
pub struct Subscription {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Unregisters the handler. Returns `false` if it was already gone.
    pub fn cancel(self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
        let before = registry.entries.len();
        registry.entries.retain(|entry| entry.id != self.id);
        registry.entries.len() != before
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn subscribe<F>(&self, topic: Topic, handler: F) -> Subscription
    where
        F: Fn(&Event) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        let mut registry = self.registry();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Entry {
            id,
            topic,
            handler: Arc::new(handler),
        });
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Delivers `event` to every subscriber of its topic, in subscription
    /// order. Handler errors and panics are logged and never reach the
    /// publisher.
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        let handlers: Vec<(u64, Handler)> = self
            .registry()
            .entries
            .iter()
            .filter(|entry| entry.topic == topic)
            .map(|entry| (entry.id, entry.handler.clone()))
            .collect();

        for (id, handler) in handlers {
            match catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(?topic, subscriber = id, error = %err, "event handler failed");
                }
                Err(_) => {
                    warn!(?topic, subscriber = id, "event handler panicked");
                }
            }
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.registry()
            .entries
            .iter()
            .filter(|entry| entry.topic == topic)
            .count()
    }
}
