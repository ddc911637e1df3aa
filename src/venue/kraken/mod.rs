//! Kraken — prefixed asset codes, positional rows, fractional-second timestamps.
//!
//! Decode the raw JSON into the types in [`wire`], then hand them to the
//! `adapt_*` functions together with the pair context or registry.

mod convert;
mod registry;
pub mod wire;

pub use convert::{
    adapt_balance, adapt_currency_pairs, adapt_open_orders, adapt_order_book, adapt_public_trades,
    adapt_ticker, adapt_trades, adapt_trades_history,
};
pub use registry::{global, KrakenRegistry, KrakenRegistryBuilder, DARK_POOL_SUFFIX};
