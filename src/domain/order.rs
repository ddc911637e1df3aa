//! Order domain — a user's open orders.

use crate::shared::{Currency, Money, Side};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A resting order owned by the account.
///
/// `tradable_identifier` (base) and `transaction_currency` (the currency the
/// price is paid in) are decoded separately by each venue. The transaction
/// currency is whatever the venue reports, even when it differs from the
/// nominal counter of the listed pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    pub id: String,
    pub side: Side,
    pub limit_price: Money,
    /// Remaining (unfilled) amount in base units.
    pub tradable_amount: Decimal,
    pub tradable_identifier: Currency,
    pub transaction_currency: Currency,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Open orders in venue order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OpenOrders {
    orders: Vec<OpenOrder>,
}

impl OpenOrders {
    pub fn new(orders: Vec<OpenOrder>) -> Self {
        Self { orders }
    }

    pub fn orders(&self) -> &[OpenOrder] {
        &self.orders
    }

    pub fn get(&self, id: &str) -> Option<&OpenOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Orders trading `tradable` against `transaction`.
    pub fn for_currencies<'a>(
        &'a self,
        tradable: &'a Currency,
        transaction: &'a Currency,
    ) -> impl Iterator<Item = &'a OpenOrder> {
        self.orders.iter().filter(move |o| {
            &o.tradable_identifier == tradable && &o.transaction_currency == transaction
        })
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
