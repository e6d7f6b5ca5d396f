//! Events broadcast on the bus.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::payload::Payload;

/// Category of domain occurrence.
///
/// The built-in variants cover the categories the notification service
/// understands. Any other identifier is carried as [`EventType::Custom`] and
/// round-trips through its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    TradeExecuted,
    OrderFilled,
    PositionOpened,
    PositionClosed,
    PnlUpdate,
    SystemError,
    StrategyError,
    Custom(String),
}

impl EventType {
    /// All built-in event types.
    pub const BUILTIN: [Self; 7] = [
        Self::TradeExecuted,
        Self::OrderFilled,
        Self::PositionOpened,
        Self::PositionClosed,
        Self::PnlUpdate,
        Self::SystemError,
        Self::StrategyError,
    ];

    /// Stable wire name of this event type.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::TradeExecuted => "trade_executed",
            Self::OrderFilled => "order_filled",
            Self::PositionOpened => "position_opened",
            Self::PositionClosed => "position_closed",
            Self::PnlUpdate => "pnl_update",
            Self::SystemError => "system_error",
            Self::StrategyError => "strategy_error",
            Self::Custom(name) => name,
        }
    }

    /// Whether this is one of the built-in categories.
    #[must_use]
    pub const fn is_builtin(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl From<&str> for EventType {
    fn from(name: &str) -> Self {
        match name {
            "trade_executed" => Self::TradeExecuted,
            "order_filled" => Self::OrderFilled,
            "position_opened" => Self::PositionOpened,
            "position_closed" => Self::PositionClosed,
            "pnl_update" => Self::PnlUpdate,
            "system_error" => Self::SystemError,
            "strategy_error" => Self::StrategyError,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for EventType {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            Self::Custom(_) => Self::Custom(name),
            builtin => builtin,
        }
    }
}

impl From<EventType> for String {
    fn from(event_type: EventType) -> Self {
        match event_type {
            EventType::Custom(name) => name,
            builtin => builtin.as_str().to_string(),
        }
    }
}

impl FromStr for EventType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed occurrence with a payload and an optional timestamp.
///
/// The bus stamps events that arrive without a timestamp at publish time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub data: Payload,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl Event {
    /// Create an unstamped event.
    #[must_use]
    pub fn new(event_type: impl Into<EventType>, data: impl Into<Payload>) -> Self {
        Self {
            event_type: event_type.into(),
            data: data.into(),
            timestamp: None,
        }
    }

    /// Set an explicit timestamp.
    #[must_use]
    pub const fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}
