//! Wire types for Kraken REST responses.
//!
//! Kraken encodes decimals as JSON strings and packs most rows as positional
//! arrays; those rows map to tuple structs here.

use crate::error::{NormalizeError, Result};
use crate::shared::{RawTimestamp, Venue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ─── Envelope ────────────────────────────────────────────────────────────────

/// `{"error": [...], "result": {...}}` wrapper around every Kraken response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenResponse<T> {
    #[serde(default)]
    pub error: Vec<String>,
    pub result: Option<T>,
}

impl<T> KrakenResponse<T> {
    /// The `result` payload; any reported error or a missing payload is `VenueRejected`.
    pub fn into_result(self) -> Result<T> {
        if !self.error.is_empty() {
            return Err(NormalizeError::VenueRejected {
                venue: Venue::Kraken,
                messages: self.error,
            });
        }
        self.result.ok_or_else(|| NormalizeError::VenueRejected {
            venue: Venue::Kraken,
            messages: vec!["response carried no result".to_string()],
        })
    }
}

// ─── Market data ─────────────────────────────────────────────────────────────

/// Ticker for one pair. Two-element fields are `[today, last 24 hours]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenTicker {
    /// Ask `[price, whole lot volume, lot volume]`.
    pub a: (String, String, String),
    /// Bid `[price, whole lot volume, lot volume]`.
    pub b: (String, String, String),
    /// Last trade closed `[price, lot volume]`.
    pub c: (String, String),
    /// Volume.
    pub v: (String, String),
    /// Volume-weighted average price.
    #[serde(default)]
    pub p: Option<(String, String)>,
    /// Number of trades.
    #[serde(default)]
    pub t: Option<(u64, u64)>,
    pub l: (String, String),
    pub h: (String, String),
    /// Today's opening price.
    #[serde(default)]
    pub o: Option<String>,
}

/// Ticker result, keyed by pair code.
pub type KrakenTickers = BTreeMap<String, KrakenTicker>;

/// Depth row `[price, volume, timestamp (seconds)]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenDepthLevel(pub String, pub String, pub RawTimestamp);

impl KrakenDepthLevel {
    pub fn price(&self) -> &str {
        &self.0
    }

    pub fn volume(&self) -> &str {
        &self.1
    }

    pub fn timestamp(&self) -> &RawTimestamp {
        &self.2
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenDepth {
    pub asks: Vec<KrakenDepthLevel>,
    pub bids: Vec<KrakenDepthLevel>,
}

/// Depth result, keyed by pair code.
pub type KrakenDepths = BTreeMap<String, KrakenDepth>;

/// Public trade row `[price, volume, time, buy/sell, market/limit, misc]`.
///
/// `time` is fractional seconds; the side marker is `b` or `s`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenPublicTrade(
    pub String,
    pub String,
    pub RawTimestamp,
    pub String,
    pub String,
    pub String,
);

impl KrakenPublicTrade {
    pub fn price(&self) -> &str {
        &self.0
    }

    pub fn volume(&self) -> &str {
        &self.1
    }

    pub fn time(&self) -> &RawTimestamp {
        &self.2
    }

    pub fn side_marker(&self) -> &str {
        &self.3
    }

    pub fn order_type(&self) -> &str {
        &self.4
    }
}

/// Public trades result: one pair-keyed row list plus the `last` cursor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenPublicTrades {
    pub last: String,
    #[serde(flatten)]
    pub trades: BTreeMap<String, Vec<KrakenPublicTrade>>,
}

impl KrakenPublicTrades {
    pub fn for_pair(&self, code: &str) -> Option<&[KrakenPublicTrade]> {
        self.trades.get(code).map(Vec::as_slice)
    }
}

/// One entry of the tradable asset pairs listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenAssetPair {
    pub altname: String,
    #[serde(default)]
    pub aclass_base: Option<String>,
    pub base: String,
    #[serde(default)]
    pub aclass_quote: Option<String>,
    pub quote: String,
    #[serde(default)]
    pub lot: Option<String>,
    #[serde(default)]
    pub pair_decimals: Option<u32>,
    #[serde(default)]
    pub lot_decimals: Option<u32>,
    #[serde(default)]
    pub lot_multiplier: Option<u32>,
}

/// Asset pairs listing, keyed by pair code.
pub type KrakenAssetPairs = BTreeMap<String, KrakenAssetPair>;

// ─── Account / trading ───────────────────────────────────────────────────────

/// Balance result: asset code → amount.
pub type KrakenBalance = BTreeMap<String, String>;

/// Order description. `pair` uses the short unprefixed form (`LTCEUR`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenOrderDescription {
    pub pair: String,
    /// `buy` or `sell`.
    #[serde(rename = "type")]
    pub side: String,
    pub ordertype: String,
    pub price: String,
    #[serde(default)]
    pub price2: Option<String>,
    #[serde(default)]
    pub leverage: Option<String>,
    /// Human-readable summary, e.g. `buy 0.01000000 LTCEUR @ limit 13.00000`.
    #[serde(default)]
    pub order: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenOrder {
    #[serde(default)]
    pub refid: Option<String>,
    #[serde(default)]
    pub userref: Option<i64>,
    pub status: String,
    /// Fractional seconds.
    pub opentm: RawTimestamp,
    #[serde(default)]
    pub starttm: Option<RawTimestamp>,
    #[serde(default)]
    pub expiretm: Option<RawTimestamp>,
    pub descr: KrakenOrderDescription,
    pub vol: String,
    pub vol_exec: String,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub misc: Option<String>,
    #[serde(default)]
    pub oflags: Option<String>,
}

/// Open orders result, keyed by order txid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenOpenOrders {
    pub open: BTreeMap<String, KrakenOrder>,
}

/// A private trade from the trade history.
///
/// `pair` is the prefixed form (`XXBTXLTC`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenTrade {
    pub ordertxid: String,
    pub pair: String,
    /// Fractional seconds.
    pub time: RawTimestamp,
    /// `buy` or `sell`.
    #[serde(rename = "type")]
    pub side: String,
    pub ordertype: String,
    pub price: String,
    #[serde(default)]
    pub cost: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
    pub vol: String,
    #[serde(default)]
    pub margin: Option<String>,
    #[serde(default)]
    pub misc: Option<String>,
}

/// Trade history result, keyed by trade txid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KrakenTradeHistory {
    pub trades: BTreeMap<String, KrakenTrade>,
    #[serde(default)]
    pub count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_result() {
        let resp: KrakenResponse<KrakenBalance> =
            serde_json::from_str(r#"{"error":[],"result":{"ZEUR":"1.0539"}}"#).unwrap();
        let balance = resp.into_result().unwrap();
        assert_eq!(balance.get("ZEUR").map(String::as_str), Some("1.0539"));
    }

    #[test]
    fn test_envelope_errors_are_rejected() {
        let resp: KrakenResponse<KrakenBalance> =
            serde_json::from_str(r#"{"error":["EAPI:Invalid key"]}"#).unwrap();
        assert_eq!(
            resp.into_result(),
            Err(NormalizeError::VenueRejected {
                venue: Venue::Kraken,
                messages: vec!["EAPI:Invalid key".into()],
            })
        );
    }

    #[test]
    fn test_envelope_without_result() {
        let resp: KrakenResponse<KrakenBalance> = serde_json::from_str(r#"{"error":[]}"#).unwrap();
        assert!(matches!(
            resp.into_result(),
            Err(NormalizeError::VenueRejected { .. })
        ));
    }

    #[test]
    fn test_public_trades_split_cursor_from_rows() {
        let json = r#"{
            "XXBTZUSD": [["1023.82219","0.03386576",1385579841.7775,"s","m",""]],
            "last": "1385579841881785998"
        }"#;
        let result: KrakenPublicTrades = serde_json::from_str(json).unwrap();
        assert_eq!(result.last, "1385579841881785998");
        assert_eq!(result.trades.len(), 1);
        let rows = result.for_pair("XXBTZUSD").unwrap();
        assert_eq!(rows[0].price(), "1023.82219");
        assert_eq!(rows[0].side_marker(), "s");
        assert_eq!(rows[0].time(), &RawTimestamp::Float(1385579841.7775));
    }

    #[test]
    fn test_depth_row_shape() {
        let level: KrakenDepthLevel =
            serde_json::from_str(r#"["530.75513","0.248",1391825343]"#).unwrap();
        assert_eq!(level.price(), "530.75513");
        assert_eq!(level.volume(), "0.248");
        assert_eq!(level.timestamp(), &RawTimestamp::Integer(1391825343));
    }
}
