//! Shared newtypes and utilities used across all domain and venue modules.
//!
//! `Currency` and `CurrencyPair` serialize transparently as strings, so they can
//! be embedded in canonical types without a wrapper object.

pub mod decimal;
pub mod money;
pub mod timestamp;

pub use decimal::{parse_amount, parse_money};
pub use money::Money;
pub use timestamp::{normalize_timestamp, parse_utc_datetime, RawTimestamp, TimestampUnit};

use crate::error::{NormalizeError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::str::FromStr;

// ─── Currency ────────────────────────────────────────────────────────────────

/// An asset code such as `BTC` or `EUR`.
///
/// Codes are upper-cased on construction, so equality is by canonical code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency(Cow<'static, str>);

impl Currency {
    pub const BTC: Currency = Currency(Cow::Borrowed("BTC"));
    pub const LTC: Currency = Currency(Cow::Borrowed("LTC"));
    pub const NMC: Currency = Currency(Cow::Borrowed("NMC"));
    pub const DOGE: Currency = Currency(Cow::Borrowed("DOGE"));
    pub const XRP: Currency = Currency(Cow::Borrowed("XRP"));
    pub const XVN: Currency = Currency(Cow::Borrowed("XVN"));
    pub const PPC: Currency = Currency(Cow::Borrowed("PPC"));
    pub const EUR: Currency = Currency(Cow::Borrowed("EUR"));
    pub const USD: Currency = Currency(Cow::Borrowed("USD"));
    pub const GBP: Currency = Currency(Cow::Borrowed("GBP"));
    pub const JPY: Currency = Currency(Cow::Borrowed("JPY"));
    pub const KRW: Currency = Currency(Cow::Borrowed("KRW"));
    pub const CAD: Currency = Currency(Cow::Borrowed("CAD"));

    /// Validate and upper-case a currency code.
    pub fn new(code: &str) -> Result<Self> {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(NormalizeError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(Cow::Owned(code.to_ascii_uppercase())))
    }

    /// Compiled-in code for venue tables; must already be upper-case alphanumeric.
    pub(crate) const fn from_static(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Currency {
    type Err = NormalizeError;

    fn from_str(s: &str) -> Result<Self> {
        Currency::new(s)
    }
}

impl Serialize for Currency {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Currency::new(&s).map_err(serde::de::Error::custom)
    }
}

// ─── CurrencyPair ────────────────────────────────────────────────────────────

/// An ordered (base, counter) pair. `BTC/EUR` and `EUR/BTC` are distinct.
///
/// Prices are quoted in the counter currency; amounts are in base units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurrencyPair {
    base: Currency,
    counter: Currency,
}

impl CurrencyPair {
    pub const BTC_EUR: CurrencyPair = CurrencyPair::from_static(Currency::BTC, Currency::EUR);
    pub const BTC_USD: CurrencyPair = CurrencyPair::from_static(Currency::BTC, Currency::USD);
    pub const BTC_LTC: CurrencyPair = CurrencyPair::from_static(Currency::BTC, Currency::LTC);
    pub const LTC_BTC: CurrencyPair = CurrencyPair::from_static(Currency::LTC, Currency::BTC);
    pub const LTC_EUR: CurrencyPair = CurrencyPair::from_static(Currency::LTC, Currency::EUR);
    pub const LTC_USD: CurrencyPair = CurrencyPair::from_static(Currency::LTC, Currency::USD);
    pub const NMC_BTC: CurrencyPair = CurrencyPair::from_static(Currency::NMC, Currency::BTC);

    pub fn new(base: Currency, counter: Currency) -> Result<Self> {
        if base == counter {
            return Err(NormalizeError::IdenticalCurrencies(base));
        }
        Ok(Self { base, counter })
    }

    /// Builds compiled-in pairs; callers guarantee distinct codes.
    pub(crate) const fn from_static(base: Currency, counter: Currency) -> Self {
        Self { base, counter }
    }

    /// The traded asset ("tradable identifier").
    pub fn base(&self) -> &Currency {
        &self.base
    }

    /// The currency prices are denominated in ("transaction currency").
    pub fn counter(&self) -> &Currency {
        &self.counter
    }
}

impl std::fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.counter)
    }
}

impl FromStr for CurrencyPair {
    type Err = NormalizeError;

    /// Parses the canonical `BASE/COUNTER` form.
    fn from_str(s: &str) -> Result<Self> {
        let (base, counter) = s
            .split_once('/')
            .ok_or_else(|| NormalizeError::InvalidCurrency(s.to_string()))?;
        CurrencyPair::new(Currency::new(base)?, Currency::new(counter)?)
    }
}

impl Serialize for CurrencyPair {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for CurrencyPair {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CurrencyPair::from_str(&s).map_err(serde::de::Error::custom)
    }
}

// ─── Side ────────────────────────────────────────────────────────────────────

/// Order side: Bid (buy) or Ask (sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Bid,
    Ask,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Side::Bid => write!(f, "Buy"),
            Side::Ask => write!(f, "Sell"),
        }
    }
}

// ─── Venue ───────────────────────────────────────────────────────────────────

/// Trading venues with a registry and adapter set in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Venue {
    Kraken,
    Vircurex,
}

impl Venue {
    pub fn as_str(&self) -> &'static str {
        match self {
            Venue::Kraken => "Kraken",
            Venue::Vircurex => "Vircurex",
        }
    }
}

impl std::fmt::Display for Venue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
