//! In-memory publish/subscribe bus keyed by event type and subscriber id.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{Event, EventType, Payload};

/// Callback invoked for every published event of a subscribed type.
pub type EventHandler = Arc<dyn Fn(&Event) + Send + Sync>;

type Registry = HashMap<EventType, HashMap<String, EventHandler>>;

/// Minimal publish/subscribe bus.
///
/// Handlers run synchronously on the publishing thread against a snapshot of
/// the registry taken when `publish` starts, so subscribing or unsubscribing
/// from inside a handler is safe and only affects later publishes.
///
/// The bus does not catch handler panics; a handler that can fail is
/// expected to contain its own failures.
#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<Registry>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event_type` under `subscriber_id`.
    ///
    /// Subscribing again with the same pair replaces the earlier handler.
    pub fn subscribe<F>(
        &self,
        event_type: impl Into<EventType>,
        subscriber_id: impl Into<String>,
        handler: F,
    ) where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.subscribe_handler(event_type, subscriber_id, Some(Arc::new(handler)));
    }

    /// Register an optional shared handler; `None` is ignored.
    pub fn subscribe_handler(
        &self,
        event_type: impl Into<EventType>,
        subscriber_id: impl Into<String>,
        handler: Option<EventHandler>,
    ) {
        let Some(handler) = handler else {
            return;
        };

        self.subscribers
            .write()
            .entry(event_type.into())
            .or_default()
            .insert(subscriber_id.into(), handler);
    }

    /// Remove the handler registered under `subscriber_id`, if any.
    pub fn unsubscribe(&self, event_type: &EventType, subscriber_id: &str) {
        let mut subscribers = self.subscribers.write();
        if let Some(handlers) = subscribers.get_mut(event_type) {
            handlers.remove(subscriber_id);
            if handlers.is_empty() {
                subscribers.remove(event_type);
            }
        }
    }

    /// Broadcast `event` to every handler subscribed to its type.
    ///
    /// Events without a timestamp are stamped with the current time. Returns
    /// once every handler in the snapshot has run.
    pub fn publish(&self, mut event: Event) {
        if event.timestamp.is_none() {
            event.timestamp = Some(Utc::now());
        }

        let handlers: Vec<EventHandler> = self
            .subscribers
            .read()
            .get(&event.event_type)
            .map(|handlers| handlers.values().cloned().collect())
            .unwrap_or_default();

        for handler in &handlers {
            handler(&event);
        }
    }

    /// Publish `data` as a new event of `event_type` stamped now.
    pub fn publish_data(&self, event_type: impl Into<EventType>, data: impl Into<Payload>) {
        self.publish(Event::new(event_type, data).at(Utc::now()));
    }

    /// Number of handlers registered for `event_type`.
    #[must_use]
    pub fn subscriber_count(&self, event_type: &EventType) -> usize {
        self.subscribers
            .read()
            .get(event_type)
            .map_or(0, HashMap::len)
    }

    /// Whether any handler is registered for `event_type`.
    #[must_use]
    pub fn has_subscribers(&self, event_type: &EventType) -> bool {
        self.subscribers.read().contains_key(event_type)
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribers = self.subscribers.read();
        let mut map = f.debug_map();
        for (event_type, handlers) in subscribers.iter() {
            map.entry(&event_type.as_str(), &handlers.len());
        }
        map.finish()
    }
}
