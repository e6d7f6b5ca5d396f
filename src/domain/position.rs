//! Position and profit/loss records.

use serde::{Deserialize, Serialize};

use super::payload::{integer, number, text, Fields, FromPayload, Payload};

/// A trading position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub symbol: String,
    /// "buy" or "sell".
    pub side: String,
    pub quantity: f64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub open_time: i64,
    pub close_time: i64,
}

impl Position {
    /// Price move from entry to exit as a percentage, signed from the
    /// position holder's point of view.
    ///
    /// Short (`sell`) positions profit when the price falls, so the sign is
    /// flipped for them. A zero entry price yields 0.
    #[must_use]
    pub fn pnl_percentage(&self) -> f64 {
        if self.entry_price == 0.0 {
            return 0.0;
        }
        let pct = (self.exit_price - self.entry_price) / self.entry_price * 100.0;
        if self.side == "sell" {
            -pct
        } else {
            pct
        }
    }
}

impl FromPayload for Position {
    const KIND: &'static str = "position";

    fn from_fields(fields: &Fields) -> Self {
        Self {
            id: text(fields, "id"),
            symbol: text(fields, "symbol"),
            side: text(fields, "side"),
            quantity: number(fields, "quantity"),
            entry_price: number(fields, "entry_price"),
            exit_price: number(fields, "exit_price"),
            realized_pnl: number(fields, "realized_pnl"),
            unrealized_pnl: number(fields, "unrealized_pnl"),
            open_time: integer(fields, "open_time"),
            close_time: integer(fields, "close_time"),
        }
    }

    fn from_record(payload: &Payload) -> Option<&Self> {
        match payload {
            Payload::Position(position) => Some(position),
            _ => None,
        }
    }
}

/// Periodic profit/loss snapshot for a symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PnlUpdate {
    pub symbol: String,
    pub pnl: f64,
    pub pnl_percentage: f64,
}

impl FromPayload for PnlUpdate {
    const KIND: &'static str = "PnL update";

    fn from_fields(fields: &Fields) -> Self {
        Self {
            symbol: text(fields, "symbol"),
            pnl: number(fields, "pnl"),
            pnl_percentage: number(fields, "pnl_percentage"),
        }
    }

    fn from_record(payload: &Payload) -> Option<&Self> {
        match payload {
            Payload::PnlUpdate(update) => Some(update),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn closed(side: &str, entry: f64, exit: f64) -> Position {
        Position {
            side: side.into(),
            entry_price: entry,
            exit_price: exit,
            ..Default::default()
        }
    }

    #[test]
    fn long_position_percentage() {
        let pct = closed("buy", 150.0, 165.0).pnl_percentage();
        assert!((pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn short_position_percentage_is_negated() {
        let pct = closed("sell", 150.0, 165.0).pnl_percentage();
        assert!((pct + 10.0).abs() < 1e-9);
    }

    #[test]
    fn zero_entry_price_yields_zero() {
        assert_eq!(closed("buy", 0.0, 10.0).pnl_percentage(), 0.0);
    }

    #[test]
    fn pnl_update_decodes_from_fields() {
        let payload = Payload::from(serde_json::json!({
            "symbol": "ADAUSD",
            "pnl": 30.0,
            "pnl_percentage": -6.0,
        }));

        let update: PnlUpdate = payload.extract().unwrap();
        assert_eq!(update.symbol, "ADAUSD");
        assert_eq!(update.pnl_percentage, -6.0);
    }
}
