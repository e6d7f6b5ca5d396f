//! Error reports raised by trading strategies.

use serde::{Deserialize, Serialize};

use super::payload::{text, Fields, FromPayload, Payload};

/// A failure reported by a named strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyError {
    pub strategy: String,
    pub error: String,
}

impl FromPayload for StrategyError {
    const KIND: &'static str = "strategy error";

    fn from_fields(fields: &Fields) -> Self {
        Self {
            strategy: text(fields, "strategy"),
            error: text(fields, "error"),
        }
    }

    fn from_record(payload: &Payload) -> Option<&Self> {
        match payload {
            Payload::StrategyError(error) => Some(error),
            _ => None,
        }
    }
}
