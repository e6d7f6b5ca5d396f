//! Messenger port for outbound chat delivery.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::MessengerError;

/// Capability to deliver a text message to one chat destination.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the notification service shares
/// each messenger across detached delivery tasks.
///
/// # Timeouts
///
/// The service never cancels a send. Implementations that talk to the
/// network should bound each request themselves.
#[async_trait]
pub trait Messenger: Send + Sync {
    /// Stable identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Deliver `text` to the destination.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform rejects the message or the request
    /// fails.
    async fn send_message(&self, text: &str) -> Result<(), MessengerError>;
}

/// Messenger handle shared between the service and its delivery tasks.
pub type SharedMessenger = Arc<dyn Messenger>;
