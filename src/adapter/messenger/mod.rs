//! Messenger adapters and construction from configuration.

mod element;
mod log;
#[cfg(feature = "telegram")]
mod telegram;

use std::sync::Arc;

use tracing::info;

pub use element::ElementMessenger;
pub use log::LogMessenger;
#[cfg(feature = "telegram")]
pub use telegram::TelegramMessenger;

use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::port::SharedMessenger;

/// Build one messenger per enabled configuration section.
///
/// # Errors
///
/// Returns an error if an enabled section is incomplete, Telegram is enabled
/// in a build without the `telegram` feature, or no section is enabled.
#[allow(clippy::result_large_err)]
pub fn build_messengers(config: &Config) -> Result<Vec<SharedMessenger>> {
    let mut messengers: Vec<SharedMessenger> = Vec::new();

    if config.element.enabled {
        messengers.push(Arc::new(ElementMessenger::new(&config.element)?));
        info!(room = %config.element.room_id, "Element messenger enabled");
    }

    if config.telegram.enabled {
        #[cfg(feature = "telegram")]
        {
            messengers.push(Arc::new(TelegramMessenger::new(&config.telegram)?));
            info!(chat = %config.telegram.chat_id, "Telegram messenger enabled");
        }

        #[cfg(not(feature = "telegram"))]
        return Err(ConfigError::InvalidValue {
            field: "telegram.enabled",
            reason: "this build does not include the telegram feature".into(),
        }
        .into());
    }

    if messengers.is_empty() {
        return Err(ConfigError::NoMessengerEnabled.into());
    }
    Ok(messengers)
}
