//! Event payloads and best-effort decoding into typed records.
//!
//! Producers publish either a loosely-typed field map (usually straight from
//! JSON) or an already-typed record. Handlers call [`Payload::extract`] to get
//! the record they need:
//!
//! - a field map always decodes; absent or mistyped fields keep their zero
//!   value,
//! - a typed record of the requested kind is copied as-is,
//! - anything else is a [`PayloadError::Malformed`].

use serde::Deserialize;
use serde_json::{Map, Value};

use super::alert::StrategyError;
use super::error::PayloadError;
use super::position::{PnlUpdate, Position};
use super::trade::{Order, Trade};

/// String-keyed map of loosely-typed values.
pub type Fields = Map<String, Value>;

/// Data carried by an [`Event`](super::Event).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Payload {
    Fields(Fields),
    Text(String),
    Trade(Trade),
    Order(Order),
    Position(Position),
    PnlUpdate(PnlUpdate),
    StrategyError(StrategyError),
    Other(Value),
}

impl Payload {
    /// Decode the payload into the record type `T`.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadError::Malformed`] when the payload is neither a field
    /// map nor a `T` record.
    pub fn extract<T: FromPayload>(&self) -> Result<T, PayloadError> {
        match self {
            Self::Fields(fields) => Ok(T::from_fields(fields)),
            other => T::from_record(other)
                .cloned()
                .ok_or(PayloadError::Malformed { expected: T::KIND }),
        }
    }

    /// The payload as plain text, if it is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Self::Other(Value::Null)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::Fields(fields),
            Value::String(text) => Self::Text(text),
            other => Self::Other(other),
        }
    }
}

impl From<Fields> for Payload {
    fn from(fields: Fields) -> Self {
        Self::Fields(fields)
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Trade> for Payload {
    fn from(trade: Trade) -> Self {
        Self::Trade(trade)
    }
}

impl From<Order> for Payload {
    fn from(order: Order) -> Self {
        Self::Order(order)
    }
}

impl From<Position> for Payload {
    fn from(position: Position) -> Self {
        Self::Position(position)
    }
}

impl From<PnlUpdate> for Payload {
    fn from(update: PnlUpdate) -> Self {
        Self::PnlUpdate(update)
    }
}

impl From<StrategyError> for Payload {
    fn from(error: StrategyError) -> Self {
        Self::StrategyError(error)
    }
}

/// A record that can be decoded from a [`Payload`].
pub trait FromPayload: Clone {
    /// Human-readable record name used in malformed-payload errors.
    const KIND: &'static str;

    /// Copy known fields out of a field map, defaulting the rest.
    fn from_fields(fields: &Fields) -> Self;

    /// Borrow the record if the payload already carries one.
    fn from_record(payload: &Payload) -> Option<&Self>;
}

pub(crate) fn text(fields: &Fields, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

pub(crate) fn number(fields: &Fields, key: &str) -> f64 {
    fields.get(key).and_then(Value::as_f64).unwrap_or_default()
}

pub(crate) fn integer(fields: &Fields, key: &str) -> i64 {
    fields.get(key).and_then(Value::as_i64).unwrap_or_default()
}
