//! Conversions from Kraken wire types to canonical domain types.

use super::registry::KrakenRegistry;
use super::wire::{
    KrakenAssetPairs, KrakenBalance, KrakenDepth, KrakenDepthLevel, KrakenOrder,
    KrakenPublicTrade, KrakenPublicTrades, KrakenTicker, KrakenTrade,
};
use crate::domain::{
    AccountInfo, LimitOrder, OpenOrder, OpenOrders, OrderBook, Ticker, Trade, Trades,
};
use crate::error::{NormalizeError, Result};
use crate::registry::PairRegistry;
use crate::shared::{
    normalize_timestamp, parse_amount, parse_money, CurrencyPair, Money, Side, TimestampUnit, Venue,
};
use std::collections::{BTreeMap, BTreeSet};

// ─── Side markers ────────────────────────────────────────────────────────────

/// Public trade rows mark the taker side as `b` / `s`.
fn public_trade_side(marker: &str) -> Result<Side> {
    match marker {
        "b" => Ok(Side::Bid),
        "s" => Ok(Side::Ask),
        other => Err(NormalizeError::side_marker(Venue::Kraken, other)),
    }
}

/// Orders and private trades spell the side out as `buy` / `sell`.
fn order_side(marker: &str) -> Result<Side> {
    match marker {
        "buy" => Ok(Side::Bid),
        "sell" => Ok(Side::Ask),
        other => Err(NormalizeError::side_marker(Venue::Kraken, other)),
    }
}

// ─── Market data ─────────────────────────────────────────────────────────────

/// Ticker for `pair`: 24-hour low, high and volume; best ask/bid; last close.
pub fn adapt_ticker(ticker: &KrakenTicker, pair: &CurrencyPair) -> Result<Ticker> {
    let counter = pair.counter();
    let adapted = Ticker {
        currency_pair: pair.clone(),
        last: Some(parse_money(&ticker.c.0, counter)?),
        bid: Some(parse_money(&ticker.b.0, counter)?),
        ask: Some(parse_money(&ticker.a.0, counter)?),
        high: Some(parse_money(&ticker.h.1, counter)?),
        low: Some(parse_money(&ticker.l.1, counter)?),
        volume: Some(parse_amount(&ticker.v.1)?),
        timestamp: None,
    };
    if adapted.is_crossed() {
        tracing::warn!("Kraken: crossed ticker for {} (bid above ask)", pair);
    }
    Ok(adapted)
}

/// Pairs from the asset pairs listing.
///
/// Every key must decode, and the decoded pair must agree with the entry's own
/// `base`/`quote` fields. Dark-pool entries collapse onto their regular pair.
pub fn adapt_currency_pairs(
    pairs: &KrakenAssetPairs,
    registry: &KrakenRegistry,
) -> Result<BTreeSet<CurrencyPair>> {
    let mut adapted = BTreeSet::new();
    for (code, entry) in pairs {
        let decoded = registry.decode(code)?;
        let declared = CurrencyPair::new(
            registry.decode_asset(&entry.base)?,
            registry.decode_asset(&entry.quote)?,
        )?;
        if decoded != declared {
            return Err(NormalizeError::PairMismatch {
                expected: decoded,
                found: declared,
            });
        }
        adapted.insert(decoded);
    }
    tracing::debug!("Kraken: {} listing entries -> {} pairs", pairs.len(), adapted.len());
    Ok(adapted)
}

fn adapt_depth_levels(
    levels: &[KrakenDepthLevel],
    side: Side,
    pair: &CurrencyPair,
) -> Result<Vec<LimitOrder>> {
    levels
        .iter()
        .map(|level| {
            Ok(LimitOrder {
                side,
                limit_price: parse_money(level.price(), pair.counter())?,
                tradable_amount: parse_amount(level.volume())?,
                timestamp: Some(normalize_timestamp(level.timestamp(), TimestampUnit::Seconds)?),
                id: None,
            })
        })
        .collect()
}

/// Order book for `pair`; row timestamps are whole seconds.
pub fn adapt_order_book(depth: &KrakenDepth, pair: &CurrencyPair) -> Result<OrderBook> {
    let asks = adapt_depth_levels(&depth.asks, Side::Ask, pair)?;
    let bids = adapt_depth_levels(&depth.bids, Side::Bid, pair)?;
    tracing::debug!("Kraken: {} book with {} asks, {} bids", pair, asks.len(), bids.len());
    Ok(OrderBook::new(pair.clone(), asks, bids))
}

/// Public trades for `pair`, in venue order, carrying the `last` cursor.
pub fn adapt_trades(
    trades: &[KrakenPublicTrade],
    pair: &CurrencyPair,
    last: Option<&str>,
) -> Result<Trades> {
    let adapted = trades
        .iter()
        .map(|row| {
            Ok(Trade {
                side: public_trade_side(row.side_marker())?,
                tradable_amount: parse_amount(row.volume())?,
                tradable_identifier: pair.base().clone(),
                transaction_currency: pair.counter().clone(),
                price: parse_money(row.price(), pair.counter())?,
                timestamp: normalize_timestamp(row.time(), TimestampUnit::FractionalSeconds)?,
                id: None,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!("Kraken: adapted {} public trades for {}", adapted.len(), pair);
    Ok(Trades::new(adapted, last.map(str::to_string)))
}

/// Public trades result for `pair`, looked up by its native code.
///
/// An empty result yields an empty list with the cursor. Rows filed under any
/// other key are an error, never "no new trades".
pub fn adapt_public_trades(
    result: &KrakenPublicTrades,
    pair: &CurrencyPair,
    registry: &KrakenRegistry,
) -> Result<Trades> {
    let code = registry.encode(pair)?;
    if let Some(rows) = result.for_pair(&code) {
        return adapt_trades(rows, pair, Some(&result.last));
    }
    match result.trades.keys().next() {
        None => adapt_trades(&[], pair, Some(&result.last)),
        Some(other) => match registry.decode(other) {
            Ok(found) if &found != pair => Err(NormalizeError::PairMismatch {
                expected: pair.clone(),
                found,
            }),
            _ => Err(NormalizeError::unknown_code(Venue::Kraken, other.as_str())),
        },
    }
}

// ─── Account / trading ───────────────────────────────────────────────────────

/// Private trade history, ordered by time then trade id.
///
/// Each trade carries its own pair, so one history can span several pairs.
pub fn adapt_trades_history(
    trades: &BTreeMap<String, KrakenTrade>,
    registry: &KrakenRegistry,
) -> Result<Trades> {
    let mut adapted = trades
        .iter()
        .map(|(id, trade)| {
            let pair = registry.decode(&trade.pair)?;
            Ok(Trade {
                side: order_side(&trade.side)?,
                tradable_amount: parse_amount(&trade.vol)?,
                price: parse_money(&trade.price, pair.counter())?,
                timestamp: normalize_timestamp(&trade.time, TimestampUnit::FractionalSeconds)?,
                id: Some(id.clone()),
                tradable_identifier: pair.base().clone(),
                transaction_currency: pair.counter().clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    adapted.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then_with(|| a.id.cmp(&b.id)));
    tracing::debug!("Kraken: adapted {} history trades", adapted.len());
    Ok(Trades::new(adapted, None))
}

/// Account balances. Zero balances are kept; unknown asset codes are errors.
pub fn adapt_balance(
    balance: &KrakenBalance,
    username: Option<&str>,
    registry: &KrakenRegistry,
) -> Result<AccountInfo> {
    let balances = balance
        .iter()
        .map(|(code, amount)| Ok(Money::new(registry.decode_asset(code)?, parse_amount(amount)?)))
        .collect::<Result<Vec<_>>>()?;
    AccountInfo::from_balances(username.map(str::to_string), balances)
}

fn adapt_open_order(id: &str, order: &KrakenOrder, registry: &KrakenRegistry) -> Result<OpenOrder> {
    let pair = registry.decode_short_pair(&order.descr.pair)?;
    let remaining = parse_amount(&order.vol)?
        .checked_sub(parse_amount(&order.vol_exec)?)
        .filter(|left| left.is_sign_positive() || left.is_zero())
        .ok_or_else(|| {
            NormalizeError::malformed_decimal(
                &order.vol_exec,
                format!("executed volume does not fit within order volume {}", order.vol),
            )
        })?;
    Ok(OpenOrder {
        id: id.to_string(),
        side: order_side(&order.descr.side)?,
        limit_price: parse_money(&order.descr.price, pair.counter())?,
        tradable_amount: remaining,
        timestamp: Some(normalize_timestamp(&order.opentm, TimestampUnit::FractionalSeconds)?),
        tradable_identifier: pair.base().clone(),
        transaction_currency: pair.counter().clone(),
    })
}

/// Open orders keyed by txid. The amount is what remains unfilled.
pub fn adapt_open_orders(
    orders: &BTreeMap<String, KrakenOrder>,
    registry: &KrakenRegistry,
) -> Result<OpenOrders> {
    let adapted = orders
        .iter()
        .map(|(id, order)| adapt_open_order(id, order, registry))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!("Kraken: adapted {} open orders", adapted.len());
    Ok(OpenOrders::new(adapted))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Currency, RawTimestamp};
    use crate::venue::kraken::global;
    use crate::venue::kraken::wire::{KrakenOrderDescription, KrakenAssetPair};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn row(side: &str) -> KrakenPublicTrade {
        KrakenPublicTrade(
            "1023.82219".into(),
            "0.03386576".into(),
            RawTimestamp::Float(1385579841.7775),
            side.into(),
            "m".into(),
            String::new(),
        )
    }

    fn order(pair: &str, side: &str, vol: &str, vol_exec: &str) -> KrakenOrder {
        KrakenOrder {
            refid: None,
            userref: None,
            status: "open".into(),
            opentm: RawTimestamp::Float(1386513052.8337),
            starttm: None,
            expiretm: None,
            descr: KrakenOrderDescription {
                pair: pair.into(),
                side: side.into(),
                ordertype: "limit".into(),
                price: "13.00000".into(),
                price2: None,
                leverage: None,
                order: None,
            },
            vol: vol.into(),
            vol_exec: vol_exec.into(),
            cost: None,
            fee: None,
            price: None,
            misc: None,
            oflags: None,
        }
    }

    #[test]
    fn test_public_trade_side_markers() {
        let trades = adapt_trades(&[row("b"), row("s")], &CurrencyPair::BTC_USD, None).unwrap();
        let sides: Vec<Side> = trades.trades().iter().map(|t| t.side).collect();
        assert_eq!(sides, [Side::Bid, Side::Ask]);
        assert_eq!(trades.trades()[0].timestamp.timestamp_millis(), 1385579841777);
    }

    #[test]
    fn test_unknown_public_side_marker_fails_whole_batch() {
        let err = adapt_trades(&[row("s"), row("x")], &CurrencyPair::BTC_USD, None).unwrap_err();
        assert_eq!(
            err,
            NormalizeError::InconsistentSideMarker {
                venue: Venue::Kraken,
                marker: "x".into()
            }
        );
    }

    #[test]
    fn test_order_markers_are_not_public_markers() {
        assert!(order_side("b").is_err());
        assert!(public_trade_side("buy").is_err());
    }

    #[test]
    fn test_open_order_remaining_amount() {
        let mut orders = BTreeMap::new();
        orders.insert("O1".to_string(), order("LTCEUR", "sell", "1.00000000", "0.25000000"));
        let adapted = adapt_open_orders(&orders, global()).unwrap();
        let o = adapted.get("O1").unwrap();
        assert_eq!(o.tradable_amount, dec("0.75"));
        assert_eq!(o.side, Side::Ask);
        assert_eq!(o.tradable_identifier, Currency::LTC);
        assert_eq!(o.transaction_currency, Currency::EUR);
        assert_eq!(o.timestamp.unwrap().timestamp_millis(), 1386513052833);
    }

    #[test]
    fn test_open_order_unknown_pair() {
        let mut orders = BTreeMap::new();
        orders.insert("O1".to_string(), order("FOOBAR", "buy", "1", "0"));
        assert!(matches!(
            adapt_open_orders(&orders, global()),
            Err(NormalizeError::UnknownCode { .. })
        ));
    }

    #[test]
    fn test_balance_rejects_unknown_asset() {
        let mut balance = KrakenBalance::new();
        balance.insert("ZEUR".into(), "1.0539".into());
        balance.insert("XFOO".into(), "3".into());
        assert_eq!(
            adapt_balance(&balance, None, global()),
            Err(NormalizeError::UnknownCode {
                venue: Venue::Kraken,
                code: "XFOO".into()
            })
        );
    }

    #[test]
    fn test_balance_alias_collision_is_duplicate() {
        let mut balance = KrakenBalance::new();
        balance.insert("XXBT".into(), "1".into());
        balance.insert("XBT".into(), "2".into());
        assert_eq!(
            adapt_balance(&balance, None, global()),
            Err(NormalizeError::DuplicateBalance(Currency::BTC))
        );
    }

    #[test]
    fn test_balance_rejects_malformed_amount() {
        let mut balance = KrakenBalance::new();
        balance.insert("ZEUR".into(), "1,05".into());
        assert!(matches!(
            adapt_balance(&balance, None, global()),
            Err(NormalizeError::MalformedDecimal { .. })
        ));
    }

    #[test]
    fn test_asset_pair_listing_cross_check() {
        let entry = |base: &str, quote: &str| KrakenAssetPair {
            altname: "XBTEUR".into(),
            aclass_base: None,
            base: base.into(),
            aclass_quote: None,
            quote: quote.into(),
            lot: None,
            pair_decimals: None,
            lot_decimals: None,
            lot_multiplier: None,
        };

        let mut listing = KrakenAssetPairs::new();
        listing.insert("XXBTZEUR".into(), entry("XXBT", "ZEUR"));
        listing.insert("XXBTZEUR.d".into(), entry("XXBT", "ZEUR"));
        let pairs = adapt_currency_pairs(&listing, global()).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&CurrencyPair::BTC_EUR));

        listing.insert("XXBTZUSD".into(), entry("XXBT", "ZEUR"));
        assert_eq!(
            adapt_currency_pairs(&listing, global()),
            Err(NormalizeError::PairMismatch {
                expected: CurrencyPair::BTC_USD,
                found: CurrencyPair::BTC_EUR,
            })
        );
    }

    fn public_trades(rows: &[(&str, KrakenPublicTrade)]) -> KrakenPublicTrades {
        KrakenPublicTrades {
            last: "42".into(),
            trades: rows.iter().map(|(k, v)| (k.to_string(), vec![v.clone()])).collect(),
        }
    }

    #[test]
    fn test_public_trades_empty_result_keeps_cursor() {
        let trades =
            adapt_public_trades(&public_trades(&[]), &CurrencyPair::BTC_EUR, global()).unwrap();
        assert!(trades.is_empty());
        assert_eq!(trades.last_cursor(), Some("42"));
    }

    #[test]
    fn test_public_trades_rows_under_altname_are_not_dropped() {
        let result = public_trades(&[("XBTUSD", row("b"))]);
        assert_eq!(
            adapt_public_trades(&result, &CurrencyPair::BTC_USD, global()),
            Err(NormalizeError::UnknownCode {
                venue: Venue::Kraken,
                code: "XBTUSD".into()
            })
        );
    }

    #[test]
    fn test_public_trades_rows_for_another_pair() {
        let result = public_trades(&[("XXBTZEUR", row("s"))]);
        assert_eq!(
            adapt_public_trades(&result, &CurrencyPair::BTC_USD, global()),
            Err(NormalizeError::PairMismatch {
                expected: CurrencyPair::BTC_USD,
                found: CurrencyPair::BTC_EUR,
            })
        );
    }

    #[test]
    fn test_open_order_overfilled_volume_is_malformed() {
        let mut orders = BTreeMap::new();
        orders.insert("O1".to_string(), order("LTCEUR", "sell", "1.0", "1.5"));
        assert!(matches!(
            adapt_open_orders(&orders, global()),
            Err(NormalizeError::MalformedDecimal { input, .. }) if input == "1.5"
        ));

        let mut orders = BTreeMap::new();
        orders.insert(
            "O2".to_string(),
            order("LTCEUR", "sell", "79228162514264337593543950335", "-1"),
        );
        assert!(matches!(
            adapt_open_orders(&orders, global()),
            Err(NormalizeError::MalformedDecimal { .. })
        ));
    }
}
