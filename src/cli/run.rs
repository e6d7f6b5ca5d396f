//! Long-running notification loop fed by JSON lines on stdin.

use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::adapter::messenger::LogMessenger;
use crate::app::{EventBus, NotificationService};
use crate::cli::{load_config, RunArgs};
use crate::domain::Event;
use crate::error::Result;

/// Start the service, publish each stdin line as an event, and shut down on
/// EOF or Ctrl-C.
///
/// Each line is `{"type": "...", "data": ..., "timestamp": "..."}`; the
/// timestamp is optional. Lines that do not parse are skipped with a warning.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let config = load_config(&args.config.path(), args.dry_run)?;
    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), dry_run = args.dry_run, "tradebell starting");

    let bus = Arc::new(EventBus::new());
    let service = if args.dry_run {
        NotificationService::with_messengers(
            Some(config.events),
            Some(Arc::clone(&bus)),
            vec![Arc::new(LogMessenger::new())],
        )?
    } else {
        NotificationService::from_config(Some(config), Some(Arc::clone(&bus)))?
    };
    service.start()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(line) => publish_line(&bus, &line),
                None => {
                    info!("Input closed");
                    break;
                }
            },
            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    service.stop();
    let timeout = Duration::from_secs(args.drain_secs);
    if !service.drain(timeout).await {
        warn!(timeout_secs = args.drain_secs, "Notifications still in flight at shutdown");
    }

    info!("tradebell stopped");
    Ok(())
}

fn publish_line(bus: &EventBus, line: &str) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    match serde_json::from_str::<Event>(line) {
        Ok(event) => bus.publish(event),
        Err(e) => warn!(error = %e, "Skipping invalid event line"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EventType;
    use parking_lot::Mutex;

    fn recording_bus(event_type: EventType) -> (EventBus, Arc<Mutex<Vec<Event>>>) {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bus.subscribe(event_type, "test", move |event| sink.lock().push(event.clone()));
        (bus, seen)
    }

    #[test]
    fn test_publishes_parsed_line() {
        let (bus, seen) = recording_bus(EventType::SystemError);
        publish_line(&bus, r#"{"type": "system_error", "data": "disk full"}"#);

        let seen = seen.lock();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].data.as_text(), Some("disk full"));
        assert!(seen[0].timestamp.is_some());
    }

    #[test]
    fn test_skips_blank_and_invalid_lines() {
        let (bus, seen) = recording_bus(EventType::SystemError);
        publish_line(&bus, "   ");
        publish_line(&bus, "not json");
        publish_line(&bus, r#"{"data": "missing type"}"#);
        assert!(seen.lock().is_empty());
    }
}
