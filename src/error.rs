use thiserror::Error;

use crate::domain::error::PayloadError;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to write config file: {0}")]
    WriteFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("at least one messenger must be enabled in configuration")]
    NoMessengerEnabled,
}

/// Delivery errors reported by a messenger.
#[derive(Error, Debug)]
pub enum MessengerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("message rejected: {0}")]
    Rejected(String),

    #[cfg(feature = "telegram")]
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Messenger(#[from] MessengerError),

    #[error(transparent)]
    Payload(#[from] PayloadError),

    #[error("at least one messenger is required")]
    NoMessengers,

    #[error("notification service requires a running tokio runtime")]
    NoRuntime,

    #[error("{failed} of {total} messengers failed to deliver")]
    DeliveryFailed { failed: usize, total: usize },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
