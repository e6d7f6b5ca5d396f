//! Telegram messenger.
//!
//! Requires the `telegram` feature to be enabled.

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;

use crate::config::TelegramConfig;
use crate::error::{MessengerError, Result};
use crate::port::Messenger;

/// Sends plain-text messages to one Telegram chat.
#[derive(Debug, Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    recipient: Recipient,
}

impl TelegramMessenger {
    /// Create a messenger from a validated configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the bot token or chat id is missing.
    #[allow(clippy::result_large_err)]
    pub fn new(config: &TelegramConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            bot: Bot::new(&config.bot_token),
            recipient: parse_recipient(&config.chat_id),
        })
    }
}

/// Numeric ids address chats directly; anything else is a channel username.
fn parse_recipient(chat_id: &str) -> Recipient {
    let chat_id = chat_id.trim();
    match chat_id.parse::<i64>() {
        Ok(id) => Recipient::Id(ChatId(id)),
        Err(_) => Recipient::ChannelUsername(chat_id.to_string()),
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn send_message(&self, text: &str) -> std::result::Result<(), MessengerError> {
        self.bot
            .send_message(self.recipient.clone(), text)
            .await?;
        Ok(())
    }
}
