//! Tradebell - chat notifications for trading events.
//!
//! Components publish [`Event`](domain::Event)s on an in-process
//! [`EventBus`](app::EventBus). The [`NotificationService`](app::NotificationService)
//! subscribes to the categories enabled in configuration, formats each event
//! into a short human-readable message and fans it out to every configured
//! [`Messenger`](port::Messenger).
//!
//! # Modules
//!
//! - [`domain`] - Events, payloads and the trading records they carry
//! - [`port`] - The messenger trait
//! - [`app`] - Event bus, message formatting, dispatch and the service
//! - [`adapter`] - Element, Telegram and log messengers
//! - [`config`] - TOML configuration with environment overrides
//! - [`cli`] - Command-line front end
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram messenger via teloxide
//! - `testkit` - Mock messengers for integration tests
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use tradebell::adapter::messenger::LogMessenger;
//! use tradebell::app::{EventBus, NotificationService};
//! use tradebell::domain::{EventType, Trade};
//!
//! # async fn demo() -> tradebell::error::Result<()> {
//! let bus = Arc::new(EventBus::new());
//! let service = NotificationService::with_messengers(
//!     None,
//!     Some(Arc::clone(&bus)),
//!     vec![Arc::new(LogMessenger::new())],
//! )?;
//! service.start()?;
//!
//! bus.publish_data(
//!     EventType::TradeExecuted,
//!     Trade {
//!         symbol: "BTCUSDT".into(),
//!         side: "buy".into(),
//!         price: 68_000.0,
//!         quantity: 0.5,
//!         base_asset: "BTC".into(),
//!         quote_asset: "USDT".into(),
//!         ..Default::default()
//!     },
//! );
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
