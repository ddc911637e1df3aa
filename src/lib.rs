//! # venue-norm
//!
//! Normalizes raw exchange payloads into one canonical trading model.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Shared** — `Currency`, `CurrencyPair`, `Money`, exact decimal and timestamp parsing
//! 2. **Domain** — canonical `Ticker`, `OrderBook`, `Trades`, `AccountInfo`, `OpenOrders`
//! 3. **Registry** — `PairRegistry`: native pair code ⇄ canonical pair, per venue
//! 4. **Venues** — wire types plus `adapt_*` functions, one module per venue (cargo features)
//!
//! Adapters are pure and synchronous. Fetching and decoding the JSON is the
//! caller's job; any serde decoder can produce the wire types.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use venue_norm::prelude::*;
//! use venue_norm::venue::kraken::{self, wire::{KrakenResponse, KrakenTickers}};
//!
//! let resp: KrakenResponse<KrakenTickers> = serde_json::from_str(&body)?;
//! let tickers = resp.into_result()?;
//! let code = kraken::global().encode(&CurrencyPair::BTC_EUR)?;
//! let ticker = kraken::adapt_ticker(&tickers[&code], &CurrencyPair::BTC_EUR)?;
//! ```

// ── Layer 1: Shared ──────────────────────────────────────────────────────────

/// Currency newtypes, money, decimal and timestamp utilities.
pub mod shared;

/// Unified normalization error types.
pub mod error;

// ── Layer 2: Domain ──────────────────────────────────────────────────────────

/// Canonical entities every venue adapter produces.
pub mod domain;

// ── Layer 3: Registry ────────────────────────────────────────────────────────

/// Currency-pair registries.
pub mod registry;

// ── Layer 4: Venues ──────────────────────────────────────────────────────────

/// Venue adapters, gated by cargo feature.
pub mod venue;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + utilities
    pub use crate::shared::{
        normalize_timestamp, parse_amount, parse_money, parse_utc_datetime, Currency,
        CurrencyPair, Money, RawTimestamp, Side, TimestampUnit, Venue,
    };

    // Canonical entities
    pub use crate::domain::{
        AccountInfo, LimitOrder, OpenOrder, OpenOrders, OrderBook, Ticker, Trade, Trades,
    };

    // Registries
    pub use crate::registry::{round_trip_violations, verify_round_trip, AssetTable, PairRegistry};

    // Errors
    pub use crate::error::NormalizeError;

    // Venues
    #[cfg(feature = "kraken")]
    pub use crate::venue::kraken::KrakenRegistry;
    #[cfg(feature = "vircurex")]
    pub use crate::venue::vircurex::VircurexRegistry;
}
