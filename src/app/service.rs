//! Notification service: bus subscriptions to chat messages.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::adapter::messenger::build_messengers;
use crate::config::{Config, NotificationConfig};
use crate::domain::EventType;
use crate::error::{Error, Result};
use crate::port::SharedMessenger;

use super::bus::EventBus;
use super::dispatch::Dispatcher;
use super::format::{format_event_message, STARTUP_MESSAGE};

/// Subscriber identity used for every bus subscription the service makes.
pub const SUBSCRIBER_ID: &str = "notification_service";

/// Subscribes to trading events and forwards formatted messages to every
/// configured messenger.
///
/// Handlers run inline on the publishing thread; they format the message
/// synchronously and hand delivery to detached tasks, so `publish` never
/// waits on the network.
///
/// Subscriptions stay registered on the bus until [`stop`](Self::stop) is
/// called, even if the service handle itself is dropped.
pub struct NotificationService {
    config: Arc<NotificationConfig>,
    bus: Arc<EventBus>,
    dispatcher: Arc<Dispatcher>,
    subscriber_id: String,
    subscriptions: Mutex<Vec<EventType>>,
}

impl NotificationService {
    /// Build a service whose messengers come from configuration.
    ///
    /// A missing config means defaults, which enable no messenger and
    /// therefore fail. A missing bus means a fresh private bus.
    ///
    /// # Errors
    ///
    /// Returns an error if no messenger is enabled, an enabled messenger is
    /// misconfigured, or no tokio runtime is running.
    #[allow(clippy::result_large_err)]
    pub fn from_config(config: Option<Config>, bus: Option<Arc<EventBus>>) -> Result<Self> {
        let config = config.unwrap_or_default();
        let messengers = build_messengers(&config)?;
        Self::build(config.events, bus, messengers)
    }

    /// Build a service around caller-supplied messengers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMessengers`] for an empty list and
    /// [`Error::NoRuntime`] outside a tokio runtime.
    #[allow(clippy::result_large_err)]
    pub fn with_messengers(
        config: Option<NotificationConfig>,
        bus: Option<Arc<EventBus>>,
        messengers: Vec<SharedMessenger>,
    ) -> Result<Self> {
        if messengers.is_empty() {
            return Err(Error::NoMessengers);
        }
        Self::build(config.unwrap_or_default(), bus, messengers)
    }

    #[allow(clippy::result_large_err)]
    fn build(
        config: NotificationConfig,
        bus: Option<Arc<EventBus>>,
        messengers: Vec<SharedMessenger>,
    ) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;

        Ok(Self {
            config: Arc::new(config),
            bus: bus.unwrap_or_default(),
            dispatcher: Arc::new(Dispatcher::new(messengers, runtime)),
            subscriber_id: SUBSCRIBER_ID.to_string(),
            subscriptions: Mutex::new(Vec::new()),
        })
    }

    /// Use a different subscriber identity, so that several services can
    /// share one bus without replacing each other's handlers.
    #[must_use]
    pub fn with_subscriber_id(mut self, subscriber_id: impl Into<String>) -> Self {
        self.subscriber_id = subscriber_id.into();
        self
    }

    /// Send the startup message and subscribe every enabled category.
    ///
    /// Calling `start` again re-registers the same handlers.
    ///
    /// # Errors
    ///
    /// Dispatch is fire-and-forget, so this currently always succeeds.
    #[allow(clippy::result_large_err)]
    pub fn start(&self) -> Result<()> {
        self.send_notification(STARTUP_MESSAGE);
        self.register_event_handlers();

        info!(
            messengers = ?self.dispatcher.messenger_names(),
            subscriptions = self.subscriptions.lock().len(),
            "Notification service started"
        );
        Ok(())
    }

    /// Remove every bus subscription made by [`start`](Self::start).
    ///
    /// Deliveries already in flight continue. Idempotent.
    pub fn stop(&self) {
        let subscriptions = std::mem::take(&mut *self.subscriptions.lock());
        if subscriptions.is_empty() {
            return;
        }

        for event_type in &subscriptions {
            self.bus.unsubscribe(event_type, &self.subscriber_id);
        }
        info!(
            unsubscribed = subscriptions.len(),
            "Notification service stopped"
        );
    }

    /// Wait up to `timeout` for in-flight deliveries to finish.
    ///
    /// Returns `true` if nothing is left in flight.
    pub async fn drain(&self, timeout: Duration) -> bool {
        self.dispatcher.drain(timeout).await
    }

    /// Timestamp `message` and deliver it to every messenger.
    pub fn send_notification(&self, message: &str) {
        self.dispatcher.dispatch(message);
    }

    /// The bus this service listens on.
    #[must_use]
    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    #[must_use]
    pub fn config(&self) -> &NotificationConfig {
        &self.config
    }

    /// Event types currently subscribed.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<EventType> {
        self.subscriptions.lock().clone()
    }

    /// Diagnostic names of the configured messengers.
    #[must_use]
    pub fn messenger_names(&self) -> Vec<String> {
        self.dispatcher.messenger_names()
    }

    fn register_event_handlers(&self) {
        let mut subscriptions = self.subscriptions.lock();
        subscriptions.clear();

        for (event_type, enabled) in categories(&self.config) {
            if !enabled {
                continue;
            }

            let config = Arc::clone(&self.config);
            let dispatcher = Arc::clone(&self.dispatcher);
            self.bus
                .subscribe(event_type.clone(), self.subscriber_id.clone(), move |event| {
                    if let Some(message) = format_event_message(event, &config) {
                        dispatcher.dispatch(&message);
                    }
                });

            debug!(event_type = %event_type, subscriber = %self.subscriber_id, "Subscribed");
            subscriptions.push(event_type);
        }
    }
}

/// Each built-in event type paired with the toggle that enables it.
fn categories(config: &NotificationConfig) -> [(EventType, bool); 7] {
    [
        (EventType::TradeExecuted, config.trade_execution),
        (EventType::OrderFilled, config.order_filled),
        (EventType::PositionOpened, config.position_change),
        (EventType::PositionClosed, config.position_change),
        (EventType::PnlUpdate, config.pnl_update),
        (EventType::SystemError, config.system_errors),
        (EventType::StrategyError, config.strategy_errors),
    ]
}
