//! Trade domain — executed trades and cursor-carrying trade lists.

use crate::shared::{Currency, Money, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An executed trade.
///
/// `tradable_identifier` and `transaction_currency` are set independently by
/// each venue adapter; they are not derived from a single pair value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub side: Side,
    pub tradable_amount: Decimal,
    pub tradable_identifier: Currency,
    pub transaction_currency: Currency,
    pub price: Money,
    pub timestamp: DateTime<Utc>,
    pub id: Option<String>,
}

/// Ordered trades plus the venue's opaque pagination cursor.
///
/// Passing `last` back to the venue requests only newer trades.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trades {
    trades: Vec<Trade>,
    last: Option<String>,
}

impl Trades {
    pub fn new(trades: Vec<Trade>, last: Option<String>) -> Self {
        Self { trades, last }
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    /// Cursor for the next incremental fetch, if the venue supplied one.
    pub fn last_cursor(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Most recent trade by timestamp.
    pub fn latest(&self) -> Option<&Trade> {
        self.trades.iter().max_by_key(|t| t.timestamp)
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn into_vec(self) -> Vec<Trade> {
        self.trades
    }
}

impl IntoIterator for Trades {
    type Item = Trade;
    type IntoIter = std::vec::IntoIter<Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.trades.into_iter()
    }
}
