//! Account domain — balances keyed by canonical currency.

use crate::error::{NormalizeError, Result};
use crate::shared::{Currency, Money};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Balances for one account, at most one entry per currency.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AccountInfo {
    pub username: Option<String>,
    balances: BTreeMap<Currency, Money>,
}

impl AccountInfo {
    /// Build from individual balances; a repeated currency is `DuplicateBalance`.
    pub fn from_balances(
        username: Option<String>,
        balances: impl IntoIterator<Item = Money>,
    ) -> Result<Self> {
        let mut map = BTreeMap::new();
        for money in balances {
            let currency = money.currency().clone();
            if map.insert(currency.clone(), money).is_some() {
                return Err(NormalizeError::DuplicateBalance(currency));
            }
        }
        Ok(Self {
            username,
            balances: map,
        })
    }

    pub fn balance(&self, currency: &Currency) -> Option<&Money> {
        self.balances.get(currency)
    }

    pub fn balances(&self) -> &BTreeMap<Currency, Money> {
        &self.balances
    }

    /// Balances with a non-zero amount.
    pub fn non_zero(&self) -> impl Iterator<Item = &Money> {
        self.balances.values().filter(|m| !m.is_zero())
    }
}
