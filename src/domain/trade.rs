//! Trade and order records.

use serde::{Deserialize, Serialize};

use super::payload::{integer, number, text, Fields, FromPayload, Payload};

/// A trade executed on an exchange.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub id: String,
    pub symbol: String,
    /// "buy" or "sell".
    pub side: String,
    pub price: f64,
    pub quantity: f64,
    pub base_asset: String,
    pub quote_asset: String,
    pub fee: f64,
    pub fee_coin: String,
    pub timestamp: i64,
}

impl FromPayload for Trade {
    const KIND: &'static str = "trade";

    fn from_fields(fields: &Fields) -> Self {
        Self {
            id: text(fields, "id"),
            symbol: text(fields, "symbol"),
            side: text(fields, "side"),
            price: number(fields, "price"),
            quantity: number(fields, "quantity"),
            base_asset: text(fields, "base_asset"),
            quote_asset: text(fields, "quote_asset"),
            fee: number(fields, "fee"),
            fee_coin: text(fields, "fee_coin"),
            timestamp: integer(fields, "timestamp"),
        }
    }

    fn from_record(payload: &Payload) -> Option<&Self> {
        match payload {
            Payload::Trade(trade) => Some(trade),
            _ => None,
        }
    }
}

/// How an order fill should be classified for notification filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    StopLoss,
    TakeProfit,
    Regular,
}

/// A trading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub symbol: String,
    /// "buy" or "sell".
    pub side: String,
    /// "market", "limit", "stop", "take_profit", etc.
    #[serde(rename = "type")]
    pub order_type: String,
    pub quantity: f64,
    pub price: f64,
    pub executed_price: f64,
    pub status: String,
    pub timestamp: i64,
}

impl Order {
    /// Classify the order by its type string.
    #[must_use]
    pub fn kind(&self) -> OrderKind {
        match self.order_type.as_str() {
            "stop" | "stop_market" => OrderKind::StopLoss,
            "take_profit" | "take_profit_market" => OrderKind::TakeProfit,
            _ => OrderKind::Regular,
        }
    }
}

impl FromPayload for Order {
    const KIND: &'static str = "order";

    fn from_fields(fields: &Fields) -> Self {
        Self {
            id: text(fields, "id"),
            symbol: text(fields, "symbol"),
            side: text(fields, "side"),
            order_type: text(fields, "type"),
            quantity: number(fields, "quantity"),
            price: number(fields, "price"),
            executed_price: number(fields, "executed_price"),
            status: text(fields, "status"),
            timestamp: integer(fields, "timestamp"),
        }
    }

    fn from_record(payload: &Payload) -> Option<&Self> {
        match payload {
            Payload::Order(order) => Some(order),
            _ => None,
        }
    }
}
