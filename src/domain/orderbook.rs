//! Order book — limit orders sorted by price on each side.

use crate::shared::{CurrencyPair, Money, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A resting limit order: price in the counter currency, amount in base units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrder {
    pub side: Side,
    pub limit_price: Money,
    pub tradable_amount: Decimal,
    pub timestamp: Option<DateTime<Utc>>,
    pub id: Option<String>,
}

/// Book snapshot for one pair.
///
/// Asks are ascending and bids descending by price. Sorting is stable, so
/// levels with equal prices keep the order the venue sent them in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    currency_pair: CurrencyPair,
    asks: Vec<LimitOrder>,
    bids: Vec<LimitOrder>,
    timestamp: Option<DateTime<Utc>>,
}

impl OrderBook {
    /// Sort both sides and stamp the book with its most recent row timestamp.
    pub fn new(
        currency_pair: CurrencyPair,
        mut asks: Vec<LimitOrder>,
        mut bids: Vec<LimitOrder>,
    ) -> Self {
        asks.sort_by(|a, b| a.limit_price.amount().cmp(&b.limit_price.amount()));
        bids.sort_by(|a, b| b.limit_price.amount().cmp(&a.limit_price.amount()));

        let timestamp = asks
            .iter()
            .chain(bids.iter())
            .filter_map(|order| order.timestamp)
            .max();

        Self {
            currency_pair,
            asks,
            bids,
            timestamp,
        }
    }

    /// Replace the derived timestamp with one the venue reports for the whole book.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn currency_pair(&self) -> &CurrencyPair {
        &self.currency_pair
    }

    /// Asks sorted by price ascending.
    pub fn asks(&self) -> &[LimitOrder] {
        &self.asks
    }

    /// Bids sorted by price descending.
    pub fn bids(&self) -> &[LimitOrder] {
        &self.bids
    }

    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
    }

    /// Highest bid price.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|o| o.limit_price.amount())
    }

    /// Lowest ask price.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|o| o.limit_price.amount())
    }

    /// Mid price (average of best bid and best ask).
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::from(2)),
            _ => None,
        }
    }

    /// Spread between best ask and best bid.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}
