//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!            ┌─────────────────────────┐
//!  publish   │      Application        │   send_message
//! ──────────►│  EventBus + Service     ├──────────────┐
//!            └─────────────────────────┘              │
//!                                                     ▼
//!                              ┌───────────┬───────────┬─────────┐
//!                              │ Telegram  │  Element  │   Log   │
//!                              │ Messenger │ Messenger │Messenger│
//!                              └───────────┴───────────┴─────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`Messenger`] - Delivers text to a chat destination

mod messenger;

pub use messenger::{Messenger, SharedMessenger};
