//! Messenger that writes notifications to the log instead of a chat.
//!
//! Used for dry runs.

use async_trait::async_trait;
use tracing::info;

use crate::error::MessengerError;
use crate::port::Messenger;

#[derive(Debug, Clone, Copy, Default)]
pub struct LogMessenger;

impl LogMessenger {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Messenger for LogMessenger {
    fn name(&self) -> &str {
        "log"
    }

    async fn send_message(&self, text: &str) -> Result<(), MessengerError> {
        info!(target: "tradebell::notification", "{text}");
        Ok(())
    }
}
