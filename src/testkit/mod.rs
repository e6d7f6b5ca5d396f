//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`messenger`] - Mock [`Messenger`](crate::port::Messenger)
//!   implementations: `RecordingMessenger`, `FailingMessenger`,
//!   `StalledMessenger`.

pub mod messenger;

pub use messenger::{FailingMessenger, RecordingMessenger, StalledMessenger};
