//! Vircurex — lower-case `base_alt` pair codes and explicit currency fields.
//!
//! There is no trades adapter: Vircurex trade feeds carry no side marker.

mod convert;
mod registry;
pub mod wire;

pub use convert::{
    adapt_balance, adapt_currency_pairs, adapt_open_orders, adapt_order_book, adapt_ticker,
};
pub use registry::{global, VircurexRegistry, VircurexRegistryBuilder};
