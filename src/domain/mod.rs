//! Exchange-agnostic event and record types.

mod alert;
mod event;
mod payload;
mod position;
mod trade;

pub mod error;

pub use alert::StrategyError;
pub use error::PayloadError;
pub use event::{Event, EventType};
pub use payload::{Fields, FromPayload, Payload};
pub use position::{PnlUpdate, Position};
pub use trade::{Order, OrderKind, Trade};
