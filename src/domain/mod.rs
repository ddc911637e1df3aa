//! Canonical, venue-independent trading entities.
//!
//! Every type here is created fresh by a venue adapter and owned by the
//! caller. None of them keeps a reference to the raw payload it came from.
//!
//! - `ticker.rs` — 24h market snapshot for one pair
//! - `orderbook.rs` — limit orders and sorted books
//! - `trade.rs` — executed trades and cursor-carrying trade lists
//! - `account.rs` — balances keyed by canonical currency
//! - `order.rs` — a user's open orders

pub mod account;
pub mod order;
pub mod orderbook;
pub mod ticker;
pub mod trade;

pub use account::AccountInfo;
pub use order::{OpenOrder, OpenOrders};
pub use orderbook::{LimitOrder, OrderBook};
pub use ticker::Ticker;
pub use trade::{Trade, Trades};
