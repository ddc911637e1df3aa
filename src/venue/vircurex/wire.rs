//! Wire types for Vircurex API responses.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// A numeric field that Vircurex sends either as a JSON string or a bare integer.
///
/// Bare fractional numbers are refused while decoding: by the time a JSON
/// parser hands one over it is already an `f64`, so digits past the 17th and
/// trailing zeros are gone. Quoted decimals are kept verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VircurexNumber {
    Text(String),
    Integer(i64),
}

impl VircurexNumber {
    /// Decimal text of the value, exactly as sent.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            VircurexNumber::Text(s) => Cow::Borrowed(s),
            VircurexNumber::Integer(n) => Cow::Owned(n.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for VircurexNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NumberVisitor;

        impl<'de> Visitor<'de> for NumberVisitor {
            type Value = VircurexNumber;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a quoted decimal or an integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(VircurexNumber::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(VircurexNumber::Text(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(VircurexNumber::Integer(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(i64::try_from(v)
                    .map(VircurexNumber::Integer)
                    .unwrap_or_else(|_| VircurexNumber::Text(v.to_string())))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Err(E::custom(format!(
                    "malformed decimal {v}: fractional amounts must be quoted to stay exact"
                )))
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

impl From<&str> for VircurexNumber {
    fn from(s: &str) -> Self {
        VircurexNumber::Text(s.to_string())
    }
}

// ─── Market data ─────────────────────────────────────────────────────────────

/// `get_info_for_1_currency` result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VircurexTicker {
    pub base: String,
    pub alt: String,
    pub lowest_ask: VircurexNumber,
    pub highest_bid: VircurexNumber,
    pub last_trade: VircurexNumber,
    pub volume: VircurexNumber,
}

/// Depth row `[price, amount]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VircurexDepthLevel(pub VircurexNumber, pub VircurexNumber);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VircurexDepth {
    pub asks: Vec<VircurexDepthLevel>,
    pub bids: Vec<VircurexDepthLevel>,
}

// ─── Account / trading ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VircurexBalance {
    /// Total, including funds held by open orders.
    pub balance: VircurexNumber,
    pub availablebalance: VircurexNumber,
}

/// `get_balances` result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VircurexBalances {
    pub account: String,
    pub balances: BTreeMap<String, VircurexBalance>,
}

/// One open order. `currency1` is traded, `currency2` is the price currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VircurexOrder {
    pub orderid: VircurexNumber,
    /// `BUY` or `SELL`.
    pub ordertype: String,
    pub quantity: VircurexNumber,
    pub openquantity: VircurexNumber,
    pub currency1: String,
    pub unitprice: VircurexNumber,
    pub currency2: String,
    /// `YYYY-MM-DDTHH:MM:SS`, UTC.
    #[serde(default)]
    pub lastchangedat: Option<String>,
    #[serde(default)]
    pub releasedat: Option<String>,
}

/// `read_orders` result: orders arrive as sibling keys `order-1`, `order-2`, ...
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VircurexOpenOrders {
    pub numberorders: u32,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub function: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(flatten)]
    pub orders: BTreeMap<String, VircurexOrder>,
}
