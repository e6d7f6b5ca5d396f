//! Mock [`Messenger`] implementations for testing.
//!
//! - [`RecordingMessenger`] - Records every message and lets tests await
//!   the next one (or assert that none arrives) with a bounded wait.
//! - [`FailingMessenger`] - Rejects every message.
//! - [`StalledMessenger`] - Never completes a send.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::MessengerError;
use crate::port::Messenger;

/// How long [`RecordingMessenger::expect_message`] waits before failing.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(2);

/// How long [`RecordingMessenger::expect_silence`] listens by default.
pub const SILENCE_WINDOW: Duration = Duration::from_millis(300);

// ---------------------------------------------------------------------------
// RecordingMessenger
// ---------------------------------------------------------------------------

/// Channel-backed messenger that records every message it is asked to send.
///
/// Clones share the same log and channel, so a test can hand one clone to the
/// service and keep another for assertions.
#[derive(Clone)]
pub struct RecordingMessenger {
    name: String,
    log: Arc<Mutex<Vec<String>>>,
    sender: mpsc::UnboundedSender<String>,
    receiver: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<String>>>,
}

impl RecordingMessenger {
    pub fn new(name: impl Into<String>) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            name: name.into(),
            log: Arc::new(Mutex::new(Vec::new())),
            sender,
            receiver: Arc::new(tokio::sync::Mutex::new(receiver)),
        }
    }

    /// Every message sent so far, in arrival order.
    pub fn received(&self) -> Vec<String> {
        self.log.lock().clone()
    }

    /// Wait for the next message and assert that it contains `needle`.
    ///
    /// # Panics
    ///
    /// Panics if no message arrives within [`MESSAGE_TIMEOUT`] or the message
    /// does not contain `needle`.
    pub async fn expect_message(&self, needle: &str) -> String {
        let mut receiver = self.receiver.lock().await;
        match tokio::time::timeout(MESSAGE_TIMEOUT, receiver.recv()).await {
            Ok(Some(message)) => {
                assert!(
                    message.contains(needle),
                    "message {message:?} does not contain {needle:?}"
                );
                message
            }
            Ok(None) => panic!("messenger channel closed while waiting for {needle:?}"),
            Err(_) => panic!("timed out waiting for message containing {needle:?}"),
        }
    }

    /// Assert that no message arrives within [`SILENCE_WINDOW`].
    pub async fn expect_silence(&self) {
        self.expect_silence_for(SILENCE_WINDOW).await;
    }

    /// Assert that no message arrives within `window`.
    ///
    /// # Panics
    ///
    /// Panics if a message arrives.
    pub async fn expect_silence_for(&self, window: Duration) {
        let mut receiver = self.receiver.lock().await;
        if let Ok(Some(message)) = tokio::time::timeout(window, receiver.recv()).await {
            panic!("unexpected message received: {message:?}");
        }
    }
}

#[async_trait]
impl Messenger for RecordingMessenger {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_message(&self, text: &str) -> Result<(), MessengerError> {
        self.log.lock().push(text.to_string());
        // The receiver lives as long as any clone, so this cannot fail while
        // a test still holds the messenger.
        let _ = self.sender.send(text.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FailingMessenger
// ---------------------------------------------------------------------------

/// Messenger that rejects every message.
pub struct FailingMessenger {
    name: String,
}

impl FailingMessenger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Messenger for FailingMessenger {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_message(&self, _text: &str) -> Result<(), MessengerError> {
        Err(MessengerError::Rejected("simulated outage".into()))
    }
}

// ---------------------------------------------------------------------------
// StalledMessenger
// ---------------------------------------------------------------------------

/// Messenger whose sends never complete.
pub struct StalledMessenger {
    name: String,
}

impl StalledMessenger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Messenger for StalledMessenger {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send_message(&self, _text: &str) -> Result<(), MessengerError> {
        std::future::pending::<()>().await;
        Ok(())
    }
}
