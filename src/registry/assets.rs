//! Bidirectional canonical currency ⇄ venue asset code table.

use crate::error::{NormalizeError, Result};
use crate::shared::{Currency, Venue};
use std::collections::BTreeMap;

/// Asset code table for one venue.
///
/// A currency may have several native codes (e.g. Kraken's `XXBT` and `XBT`);
/// the first one inserted is used for encoding, all of them decode.
#[derive(Debug, Clone)]
pub struct AssetTable {
    venue: Venue,
    to_native: BTreeMap<Currency, String>,
    to_canonical: BTreeMap<String, Currency>,
}

impl AssetTable {
    pub fn new(venue: Venue) -> Self {
        Self {
            venue,
            to_native: BTreeMap::new(),
            to_canonical: BTreeMap::new(),
        }
    }

    /// Build from `(canonical, native)` pairs.
    pub fn from_entries(venue: Venue, entries: &[(Currency, &str)]) -> Self {
        let mut table = Self::new(venue);
        for (currency, native) in entries {
            table.insert(currency.clone(), native);
        }
        table
    }

    pub fn insert(&mut self, currency: Currency, native: &str) {
        self.to_native
            .entry(currency.clone())
            .or_insert_with(|| native.to_string());
        self.to_canonical.insert(native.to_string(), currency);
    }

    pub fn native_code(&self, currency: &Currency) -> Option<&str> {
        self.to_native.get(currency).map(String::as_str)
    }

    /// Canonical currency for a native code; `UnknownCode` if absent.
    pub fn decode(&self, native: &str) -> Result<Currency> {
        self.to_canonical
            .get(native)
            .cloned()
            .ok_or_else(|| NormalizeError::unknown_code(self.venue, native))
    }

    pub fn contains_native(&self, native: &str) -> bool {
        self.to_canonical.contains_key(native)
    }

    pub fn contains(&self, currency: &Currency) -> bool {
        self.to_native.contains_key(currency)
    }

    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.to_native.keys()
    }
}
