//! Configuration loading, validation and persistence.
//!
//! Configuration is loaded from a TOML file. Every section has defaults, so
//! an empty file is valid. Messenger secrets may be supplied through
//! environment variables instead of the file:
//!
//! - `ELEMENT_ACCESS_TOKEN` - enables Element when the homeserver and room
//!   are configured
//! - `TELEGRAM_BOT_TOKEN` + `TELEGRAM_CHAT_ID` - enable Telegram

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};
use url::Url;

use crate::error::{ConfigError, Result};

/// Placeholder written into generated files; never a valid token.
pub const ELEMENT_TOKEN_PLACEHOLDER: &str = "YOUR_ELEMENT_ACCESS_TOKEN";

/// Placeholder written into generated files; never a valid token.
pub const TELEGRAM_TOKEN_PLACEHOLDER: &str = "YOUR_TELEGRAM_BOT_TOKEN";

const DEFAULT_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging: LoggingConfig,
    /// Which events produce notifications.
    pub events: NotificationConfig,
    pub element: ElementConfig,
    pub telegram: TelegramConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

/// Notification toggles per event category.
///
/// Treated as immutable once a service has been built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub trade_execution: bool,
    pub order_filled: bool,
    /// Covers both position opened and position closed.
    pub position_change: bool,
    pub pnl_update: bool,
    /// Notify stop-loss fills (requires `order_filled`).
    pub stop_loss: bool,
    /// Notify take-profit fills (requires `order_filled`).
    pub take_profit: bool,
    pub system_errors: bool,
    pub strategy_errors: bool,
    /// Minimum absolute PnL percentage for PnL update notifications.
    pub profit_threshold: f64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            trade_execution: true,
            order_filled: true,
            position_change: true,
            pnl_update: true,
            stop_loss: true,
            take_profit: true,
            system_errors: true,
            strategy_errors: true,
            profit_threshold: 1.0,
        }
    }
}

impl NotificationConfig {
    /// Every category switched off; useful as a starting point.
    #[must_use]
    pub fn none() -> Self {
        Self {
            trade_execution: false,
            order_filled: false,
            position_change: false,
            pnl_update: false,
            stop_loss: false,
            take_profit: false,
            system_errors: false,
            strategy_errors: false,
            ..Self::default()
        }
    }
}

/// Element (Matrix) room configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementConfig {
    pub enabled: bool,
    pub homeserver_url: String,
    pub access_token: String,
    pub room_id: String,
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            homeserver_url: "https://matrix.org".into(),
            access_token: String::new(),
            room_id: String::new(),
        }
    }
}

impl ElementConfig {
    /// Check that the section is complete enough to send messages.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing or placeholder token, a missing room,
    /// or an unparseable homeserver URL.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.homeserver_url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "element.homeserver_url",
            }
            .into());
        }
        Url::parse(&self.homeserver_url).map_err(|e| ConfigError::InvalidValue {
            field: "element.homeserver_url",
            reason: e.to_string(),
        })?;
        if self.access_token.is_empty() || self.access_token == ELEMENT_TOKEN_PLACEHOLDER {
            return Err(ConfigError::MissingField {
                field: "element.access_token",
            }
            .into());
        }
        if self.room_id.is_empty() {
            return Err(ConfigError::MissingField {
                field: "element.room_id",
            }
            .into());
        }
        Ok(())
    }
}

/// Telegram chat configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub enabled: bool,
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Numeric chat id or `@channel` username.
    pub chat_id: String,
}

impl TelegramConfig {
    /// Check that the section is complete enough to send messages.
    ///
    /// # Errors
    ///
    /// Returns an error for a missing or placeholder token or a missing chat.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.is_empty() || self.bot_token == TELEGRAM_TOKEN_PLACEHOLDER {
            return Err(ConfigError::MissingField {
                field: "telegram.bot_token",
            }
            .into());
        }
        if self.chat_id.is_empty() {
            return Err(ConfigError::MissingField {
                field: "telegram.chat_id",
            }
            .into());
        }
        Ok(())
    }
}

impl Config {
    /// Load, apply environment overrides, and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;

        let mut config = Self::parse(&content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse TOML without environment overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid configuration TOML.
    #[allow(clippy::result_large_err)]
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content).map_err(ConfigError::Parse)?)
    }

    /// Overlay messenger secrets looked up through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("ELEMENT_ACCESS_TOKEN").filter(|t| !t.is_empty()) {
            self.element.access_token = token;
            if !self.element.homeserver_url.is_empty() && !self.element.room_id.is_empty() {
                self.element.enabled = true;
            }
        }

        if let Some(token) = lookup("TELEGRAM_BOT_TOKEN").filter(|t| !t.is_empty()) {
            self.telegram.bot_token = token;
            if let Some(chat_id) = lookup("TELEGRAM_CHAT_ID").filter(|c| !c.is_empty()) {
                self.telegram.chat_id = chat_id;
                self.telegram.enabled = true;
            }
        }
    }

    /// Validate values that do not depend on messenger credentials.
    ///
    /// # Errors
    ///
    /// Returns an error for a negative or non-finite profit threshold or an
    /// unknown log format.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        let threshold = self.events.profit_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "profit_threshold",
                reason: format!("must be a non-negative number, got {threshold}"),
            }
            .into());
        }

        match self.logging.format.as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("expected \"pretty\" or \"json\", got {other:?}"),
            }
            .into()),
        }
    }

    /// Write this configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    #[allow(clippy::result_large_err)]
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content).map_err(ConfigError::WriteFile)?;
        Ok(())
    }

    /// Write a default configuration with placeholder credentials,
    /// creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    #[allow(clippy::result_large_err)]
    pub fn write_default<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(ConfigError::WriteFile)?;
        }
        Self::template().save(path)
    }

    /// Defaults with placeholder tokens, as written by `write_default`.
    #[must_use]
    pub fn template() -> Self {
        let mut config = Self::default();
        config.element.access_token = ELEMENT_TOKEN_PLACEHOLDER.into();
        config.telegram.bot_token = TELEGRAM_TOKEN_PLACEHOLDER.into();
        config
    }

    /// Default location: `./config.toml` if present, otherwise the user
    /// config directory.
    #[must_use]
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from(DEFAULT_FILE_NAME);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|dir| dir.join("tradebell").join(DEFAULT_FILE_NAME))
            .unwrap_or(local)
    }

    /// Names of the messenger sections that are switched on.
    #[must_use]
    pub fn enabled_messengers(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.element.enabled {
            names.push("element");
        }
        if self.telegram.enabled {
            names.push("telegram");
        }
        names
    }

    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.logging.level));

        match self.logging.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.events, NotificationConfig::default());
        assert!(config.events.trade_execution);
        assert_eq!(config.events.profit_threshold, 1.0);
        assert!(config.enabled_messengers().is_empty());
    }

    #[test]
    fn test_partial_events_section_keeps_other_defaults() {
        let config = Config::parse(
            r#"
[events]
stop_loss = false
profit_threshold = 2.5
"#,
        )
        .unwrap();

        assert!(!config.events.stop_loss);
        assert!(config.events.take_profit);
        assert_eq!(config.events.profit_threshold, 2.5);
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let config = Config::parse("[events]\nprofit_threshold = -1.0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "profit_threshold",
                ..
            }))
        ));
    }

    #[test]
    fn test_rejects_unknown_log_format() {
        let config = Config::parse("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "logging.format",
                ..
            }))
        ));
    }

    #[test]
    fn test_parse_error_is_reported() {
        assert!(matches!(
            Config::parse("[events\n"),
            Err(Error::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_telegram_env_override_enables_section() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-10042"),
        ]));

        assert!(config.telegram.enabled);
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.telegram.chat_id, "-10042");
        assert_eq!(config.enabled_messengers(), vec!["telegram"]);
    }

    #[test]
    fn test_telegram_token_without_chat_does_not_enable() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("TELEGRAM_BOT_TOKEN", "123:abc")]));

        assert!(!config.telegram.enabled);
        assert_eq!(config.telegram.bot_token, "123:abc");
    }

    #[test]
    fn test_element_env_override_requires_room() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("ELEMENT_ACCESS_TOKEN", "syt_token")]));
        assert!(!config.element.enabled);

        config.element.room_id = "!room:matrix.org".into();
        config.apply_env_overrides(env(&[("ELEMENT_ACCESS_TOKEN", "syt_token")]));
        assert!(config.element.enabled);
        assert!(config.element.validate().is_ok());
    }

    #[test]
    fn test_element_validation() {
        let mut element = ElementConfig {
            enabled: true,
            access_token: ELEMENT_TOKEN_PLACEHOLDER.into(),
            room_id: "!room:matrix.org".into(),
            ..Default::default()
        };
        assert!(matches!(
            element.validate(),
            Err(Error::Config(ConfigError::MissingField {
                field: "element.access_token"
            }))
        ));

        element.access_token = "syt_token".into();
        element.homeserver_url = "not a url".into();
        assert!(matches!(
            element.validate(),
            Err(Error::Config(ConfigError::InvalidValue {
                field: "element.homeserver_url",
                ..
            }))
        ));
    }

    #[test]
    fn test_telegram_validation() {
        let telegram = TelegramConfig {
            enabled: true,
            bot_token: "123:abc".into(),
            chat_id: String::new(),
        };
        assert!(matches!(
            telegram.validate(),
            Err(Error::Config(ConfigError::MissingField {
                field: "telegram.chat_id"
            }))
        ));
    }

    #[test]
    fn test_template_round_trips_through_toml() {
        let template = Config::template();
        let text = toml::to_string_pretty(&template).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), template);
    }
}
