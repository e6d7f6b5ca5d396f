//! Fire-and-forget fan-out of notification text to every messenger.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::port::SharedMessenger;

/// Counts delivery tasks that have been spawned but not yet finished.
#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    idle: Notify,
}

/// Decrements the in-flight count when a delivery task ends or is dropped.
struct InFlightGuard(Arc<InFlight>);

impl InFlightGuard {
    fn enter(in_flight: &Arc<InFlight>) -> Self {
        in_flight.count.fetch_add(1, Ordering::AcqRel);
        Self(Arc::clone(in_flight))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

/// Sends timestamped text to a fixed set of messengers.
///
/// Each send runs as its own detached task on the runtime captured at
/// construction, so a slow or failing messenger never delays the others and
/// `dispatch` can be called from any thread.
pub struct Dispatcher {
    messengers: Arc<[SharedMessenger]>,
    runtime: Handle,
    in_flight: Arc<InFlight>,
}

impl Dispatcher {
    /// Create a dispatcher that spawns onto `runtime`.
    #[must_use]
    pub fn new(messengers: Vec<SharedMessenger>, runtime: Handle) -> Self {
        Self {
            messengers: messengers.into(),
            runtime,
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Prefix `message` with the local time and send it to every messenger.
    ///
    /// Returns immediately; failures are logged and never retried.
    pub fn dispatch(&self, message: &str) {
        let text = stamp(message, Local::now());
        debug!(messengers = self.messengers.len(), text = %text, "Dispatching notification");

        for messenger in self.messengers.iter() {
            let messenger = Arc::clone(messenger);
            let text = text.clone();
            let guard = InFlightGuard::enter(&self.in_flight);

            self.runtime.spawn(async move {
                let _guard = guard;
                if let Err(e) = messenger.send_message(&text).await {
                    warn!(
                        messenger = messenger.name(),
                        error = %e,
                        "Failed to send notification"
                    );
                }
            });
        }
    }

    /// Number of delivery tasks still running.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.count.load(Ordering::Acquire)
    }

    /// Wait until no delivery task is running, or `timeout` elapses.
    ///
    /// Returns `true` if the dispatcher became idle in time.
    pub async fn drain(&self, timeout: Duration) -> bool {
        let idle = async {
            loop {
                let notified = self.in_flight.idle.notified();
                if self.in_flight() == 0 {
                    return;
                }
                notified.await;
            }
        };

        tokio::time::timeout(timeout, idle).await.is_ok()
    }

    /// Number of messengers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messengers.len()
    }

    /// Whether there are no messengers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messengers.is_empty()
    }

    /// Diagnostic names of the messengers, in registration order.
    #[must_use]
    pub fn messenger_names(&self) -> Vec<String> {
        self.messengers.iter().map(|m| m.name().to_string()).collect()
    }
}

/// Prefix `message` with `[YYYY-MM-DD HH:MM:SS]`.
#[must_use]
pub fn stamp(message: &str, now: DateTime<Local>) -> String {
    format!("[{}] {message}", now.format("%Y-%m-%d %H:%M:%S"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::{FailingMessenger, RecordingMessenger, StalledMessenger};
    use chrono::TimeZone;

    #[test]
    fn test_stamp_format() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(stamp("hello", now), "[2024-03-09 07:05:01] hello");
    }

    #[tokio::test]
    async fn test_dispatch_reaches_every_messenger() {
        let a = RecordingMessenger::new("a");
        let b = RecordingMessenger::new("b");
        let dispatcher = Dispatcher::new(
            vec![Arc::new(a.clone()), Arc::new(b.clone())],
            Handle::current(),
        );

        dispatcher.dispatch("ping");

        let from_a = a.expect_message("ping").await;
        let from_b = b.expect_message("ping").await;
        assert_eq!(from_a, from_b);
        assert!(from_a.starts_with('['));
    }

    #[tokio::test]
    async fn test_failing_messenger_does_not_block_others() {
        let healthy = RecordingMessenger::new("healthy");
        let dispatcher = Dispatcher::new(
            vec![
                Arc::new(FailingMessenger::new("broken")),
                Arc::new(StalledMessenger::new("stalled")),
                Arc::new(healthy.clone()),
            ],
            Handle::current(),
        );

        dispatcher.dispatch("still delivered");
        healthy.expect_message("still delivered").await;
    }

    #[tokio::test]
    async fn test_drain_waits_for_in_flight_sends() {
        let recorder = RecordingMessenger::new("rec");
        let dispatcher = Dispatcher::new(vec![Arc::new(recorder.clone())], Handle::current());

        dispatcher.dispatch("one");
        dispatcher.dispatch("two");

        assert!(dispatcher.drain(Duration::from_secs(2)).await);
        assert_eq!(dispatcher.in_flight(), 0);
        assert_eq!(recorder.received().len(), 2);
    }

    #[tokio::test]
    async fn test_drain_times_out_on_stalled_send() {
        let dispatcher = Dispatcher::new(
            vec![Arc::new(StalledMessenger::new("stalled"))],
            Handle::current(),
        );

        dispatcher.dispatch("never finishes");

        assert!(!dispatcher.drain(Duration::from_millis(50)).await);
        assert_eq!(dispatcher.in_flight(), 1);
    }

    #[tokio::test]
    async fn test_drain_on_idle_dispatcher_returns_immediately() {
        let dispatcher = Dispatcher::new(vec![], Handle::current());
        assert!(dispatcher.is_empty());
        assert!(dispatcher.drain(Duration::from_millis(10)).await);
    }
}
