//! Application layer: event bus, message formatting and the notification
//! service.

mod bus;
mod dispatch;
mod format;
mod service;

pub use bus::{EventBus, EventHandler};
pub use dispatch::{stamp, Dispatcher};
pub use format::{format_event_message, STARTUP_MESSAGE};
pub use service::{NotificationService, SUBSCRIBER_ID};
