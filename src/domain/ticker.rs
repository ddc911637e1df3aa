//! Ticker — last/bid/ask/high/low snapshot for one pair.

use crate::shared::{Currency, CurrencyPair, Money};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Market snapshot for one pair.
///
/// Prices are `Money` in the pair's counter currency; `volume` is in base
/// units. Venues that do not publish a field leave it `None`.
///
/// Bid ≤ ask is not enforced: a crossed venue ticker is kept as reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    pub currency_pair: CurrencyPair,
    pub last: Option<Money>,
    pub bid: Option<Money>,
    pub ask: Option<Money>,
    pub high: Option<Money>,
    pub low: Option<Money>,
    pub volume: Option<Decimal>,
    pub timestamp: Option<DateTime<Utc>>,
}

impl Ticker {
    /// The traded (base) currency.
    pub fn tradable_identifier(&self) -> &Currency {
        self.currency_pair.base()
    }

    /// True when both sides are present and the bid is above the ask.
    pub fn is_crossed(&self) -> bool {
        matches!((&self.bid, &self.ask), (Some(bid), Some(ask)) if bid.amount() > ask.amount())
    }

    /// Ask minus bid; negative for a crossed ticker.
    pub fn spread(&self) -> Option<Decimal> {
        match (&self.bid, &self.ask) {
            (Some(bid), Some(ask)) => Some(ask.amount() - bid.amount()),
            _ => None,
        }
    }

    /// Average of bid and ask.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (&self.bid, &self.ask) {
            (Some(bid), Some(ask)) => Some((bid.amount() + ask.amount()) / Decimal::from(2)),
            _ => None,
        }
    }
}
