//! Translation of bus events into notification text.

use tracing::{debug, warn};

use crate::config::NotificationConfig;
use crate::domain::{
    Event, EventType, Order, OrderKind, PayloadError, PnlUpdate, Position, StrategyError, Trade,
};

/// Text dispatched once when the service starts.
pub const STARTUP_MESSAGE: &str = "🤖 Notification service started";

/// Format an event into a notification, or `None` if it should be skipped.
///
/// Category toggles are applied at subscription time; this function only
/// applies the filters that depend on the payload (stop-loss, take-profit,
/// PnL threshold). Malformed payloads produce a warning message instead of
/// the regular one. Custom event types are never formatted.
#[must_use]
pub fn format_event_message(event: &Event, config: &NotificationConfig) -> Option<String> {
    match &event.event_type {
        EventType::TradeExecuted => Some(match event.data.extract::<Trade>() {
            Ok(trade) => format_trade(&trade),
            Err(e) => malformed("trade execution", &e),
        }),
        EventType::OrderFilled => match event.data.extract::<Order>() {
            Ok(order) => format_order(&order, config),
            Err(e) => Some(malformed("order filled", &e)),
        },
        EventType::PositionOpened => Some(match event.data.extract::<Position>() {
            Ok(position) => format_position_opened(&position),
            Err(e) => malformed("position opened", &e),
        }),
        EventType::PositionClosed => Some(match event.data.extract::<Position>() {
            Ok(position) => format_position_closed(&position),
            Err(e) => malformed("position closed", &e),
        }),
        EventType::PnlUpdate => match event.data.extract::<PnlUpdate>() {
            Ok(update) => format_pnl_update(&update, config.profit_threshold),
            Err(e) => Some(malformed("PnL update", &e)),
        },
        EventType::SystemError => Some(match event.data.as_text() {
            Some(text) => format!("🚨 System Error: {text}"),
            None => {
                warn!(category = "system error", "Malformed event payload");
                "⚠️ Received malformed system error event".to_string()
            }
        }),
        EventType::StrategyError => Some(match event.data.extract::<StrategyError>() {
            Ok(report) => format!(
                "🚨 Strategy Error in {}: {}",
                report.strategy, report.error
            ),
            Err(e) => malformed("strategy error", &e),
        }),
        EventType::Custom(_) => None,
    }
}

fn format_trade(trade: &Trade) -> String {
    format!(
        "💰 Trade Executed: {} {} {:.6} {} at price {:.2} {}",
        trade.side, trade.symbol, trade.quantity, trade.base_asset, trade.price, trade.quote_asset
    )
}

fn format_order(order: &Order, config: &NotificationConfig) -> Option<String> {
    let emoji = match order.kind() {
        OrderKind::StopLoss if !config.stop_loss => {
            debug!(order_id = %order.id, "Stop-loss fill suppressed");
            return None;
        }
        OrderKind::TakeProfit if !config.take_profit => {
            debug!(order_id = %order.id, "Take-profit fill suppressed");
            return None;
        }
        OrderKind::StopLoss => "🛑",
        OrderKind::TakeProfit => "🎯",
        OrderKind::Regular => "📝",
    };

    Some(format!(
        "{emoji} Order Filled: {} {} {:.6} at price {:.2}",
        order.side, order.symbol, order.quantity, order.executed_price
    ))
}

fn format_position_opened(position: &Position) -> String {
    format!(
        "🔓 Position Opened: {} {} {:.6} at entry price {:.2}",
        position.side, position.symbol, position.quantity, position.entry_price
    )
}

fn format_position_closed(position: &Position) -> String {
    let emoji = if position.realized_pnl > 0.0 {
        "🔒💰"
    } else {
        "🔒📉"
    };

    format!(
        "{emoji} Position Closed: {} {} {:.6} at exit price {:.2} (P&L: {:.2} / {:.2}%)",
        position.side,
        position.symbol,
        position.quantity,
        position.exit_price,
        position.realized_pnl,
        position.pnl_percentage()
    )
}

fn format_pnl_update(update: &PnlUpdate, threshold: f64) -> Option<String> {
    if update.pnl_percentage < threshold && update.pnl_percentage > -threshold {
        debug!(
            symbol = %update.symbol,
            pnl_percentage = update.pnl_percentage,
            threshold,
            "PnL update below threshold"
        );
        return None;
    }

    let emoji = if update.pnl > 0.0 { "📈" } else { "📉" };
    Some(format!(
        "{emoji} P&L Update for {}: {:.2} ({:.2}%)",
        update.symbol, update.pnl, update.pnl_percentage
    ))
}

fn malformed(category: &'static str, error: &PayloadError) -> String {
    warn!(category, error = %error, "Malformed event payload");
    format!("⚠️ Received malformed {category} event: {error}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Payload;
    use serde_json::json;

    fn render(event_type: EventType, data: impl Into<Payload>) -> Option<String> {
        format_event_message(&Event::new(event_type, data), &NotificationConfig::default())
    }

    #[test]
    fn test_trade_message() {
        let msg = render(
            EventType::TradeExecuted,
            json!({
                "symbol": "BTCUSDT",
                "side": "buy",
                "quantity": 0.5,
                "price": 68000.0,
                "base_asset": "BTC",
                "quote_asset": "USDT",
            }),
        )
        .unwrap();

        assert_eq!(
            msg,
            "💰 Trade Executed: buy BTCUSDT 0.500000 BTC at price 68000.00 USDT"
        );
    }

    #[test]
    fn test_trade_with_missing_fields_uses_zero_values() {
        let msg = render(EventType::TradeExecuted, json!({"symbol": "ETHUSDT"})).unwrap();
        assert_eq!(msg, "💰 Trade Executed:  ETHUSDT 0.000000  at price 0.00 ");
    }

    #[test]
    fn test_order_emojis() {
        let order = |kind: &str| {
            json!({
                "symbol": "BTCUSD",
                "side": "sell",
                "type": kind,
                "quantity": 0.25,
                "executed_price": 30000.0,
            })
        };

        let stop = render(EventType::OrderFilled, order("stop_market")).unwrap();
        assert_eq!(stop, "🛑 Order Filled: sell BTCUSD 0.250000 at price 30000.00");

        let take = render(EventType::OrderFilled, order("take_profit")).unwrap();
        assert!(take.starts_with("🎯 Order Filled"));

        let limit = render(EventType::OrderFilled, order("limit")).unwrap();
        assert!(limit.starts_with("📝 Order Filled"));
    }

    #[test]
    fn test_order_filters_respect_config() {
        let config = NotificationConfig {
            stop_loss: false,
            take_profit: false,
            ..Default::default()
        };
        let event = |kind: &str| Event::new(EventType::OrderFilled, json!({"type": kind}));

        assert!(format_event_message(&event("stop"), &config).is_none());
        assert!(format_event_message(&event("take_profit_market"), &config).is_none());
        assert!(format_event_message(&event("market"), &config).is_some());
    }

    #[test]
    fn test_position_opened_message() {
        let msg = render(
            EventType::PositionOpened,
            Position {
                symbol: "SOLUSD".into(),
                side: "buy".into(),
                quantity: 5.0,
                entry_price: 150.0,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(
            msg,
            "🔓 Position Opened: buy SOLUSD 5.000000 at entry price 150.00"
        );
    }

    #[test]
    fn test_position_closed_profit_and_loss() {
        let profit = render(
            EventType::PositionClosed,
            json!({
                "symbol": "SOLUSD",
                "side": "buy",
                "quantity": 5.0,
                "entry_price": 150.0,
                "exit_price": 165.0,
                "realized_pnl": 75.0,
            }),
        )
        .unwrap();
        assert_eq!(
            profit,
            "🔒💰 Position Closed: buy SOLUSD 5.000000 at exit price 165.00 (P&L: 75.00 / 10.00%)"
        );

        let loss = render(
            EventType::PositionClosed,
            json!({
                "side": "sell",
                "entry_price": 100.0,
                "exit_price": 110.0,
                "realized_pnl": -10.0,
            }),
        )
        .unwrap();
        assert!(loss.starts_with("🔒📉"));
        assert!(loss.contains("(P&L: -10.00 / -10.00%)"));
    }

    #[test]
    fn test_pnl_threshold_boundaries() {
        let config = NotificationConfig {
            profit_threshold: 5.0,
            ..Default::default()
        };
        let update = |pct: f64| {
            let event = Event::new(
                EventType::PnlUpdate,
                PnlUpdate {
                    symbol: "ADAUSD".into(),
                    pnl: pct * 5.0,
                    pnl_percentage: pct,
                },
            );
            format_event_message(&event, &config)
        };

        assert!(update(2.0).is_none());
        assert!(update(-4.99).is_none());
        assert_eq!(
            update(5.0).as_deref(),
            Some("📈 P&L Update for ADAUSD: 25.00 (5.00%)")
        );
        assert_eq!(
            update(-6.0).as_deref(),
            Some("📉 P&L Update for ADAUSD: -30.00 (-6.00%)")
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            render(EventType::SystemError, "connection lost").as_deref(),
            Some("🚨 System Error: connection lost")
        );
        assert_eq!(
            render(
                EventType::StrategyError,
                json!({"strategy": "mean-revert", "error": "division by zero"})
            )
            .as_deref(),
            Some("🚨 Strategy Error in mean-revert: division by zero")
        );
    }

    #[test]
    fn test_malformed_payloads() {
        assert_eq!(
            render(EventType::TradeExecuted, json!(42)).as_deref(),
            Some("⚠️ Received malformed trade execution event: cannot extract trade from data")
        );
        assert_eq!(
            render(EventType::PnlUpdate, "oops").as_deref(),
            Some("⚠️ Received malformed PnL update event: cannot extract PnL update from data")
        );
        assert_eq!(
            render(EventType::SystemError, json!({"error": "x"})).as_deref(),
            Some("⚠️ Received malformed system error event")
        );
        assert!(render(EventType::OrderFilled, Trade::default())
            .unwrap()
            .contains("malformed order filled event"));
    }

    #[test]
    fn test_custom_events_are_ignored() {
        assert!(render(EventType::Custom("heartbeat".into()), "x").is_none());
    }
}
