//! Conversions from Vircurex wire types to canonical domain types.

use super::registry::VircurexRegistry;
use super::wire::{
    VircurexBalances, VircurexDepth, VircurexDepthLevel, VircurexNumber, VircurexOpenOrders,
    VircurexOrder, VircurexTicker,
};
use crate::domain::{AccountInfo, LimitOrder, OpenOrder, OpenOrders, OrderBook, Ticker};
use crate::error::{NormalizeError, Result};
use crate::registry::PairRegistry;
use crate::shared::{parse_amount, parse_utc_datetime, Currency, CurrencyPair, Money, Side, Venue};
use rust_decimal::Decimal;
use std::collections::BTreeSet;

fn amount(value: &VircurexNumber) -> Result<Decimal> {
    parse_amount(&value.as_text())
}

fn money(value: &VircurexNumber, currency: &Currency) -> Result<Money> {
    Ok(Money::new(currency.clone(), amount(value)?))
}

fn order_side(marker: &str) -> Result<Side> {
    match marker {
        "BUY" => Ok(Side::Bid),
        "SELL" => Ok(Side::Ask),
        other => Err(NormalizeError::side_marker(Venue::Vircurex, other)),
    }
}

// ─── Market data ─────────────────────────────────────────────────────────────

/// Ticker for `pair`. Vircurex publishes no high/low, so both stay empty.
pub fn adapt_ticker(ticker: &VircurexTicker, pair: &CurrencyPair) -> Result<Ticker> {
    let found = CurrencyPair::new(Currency::new(&ticker.base)?, Currency::new(&ticker.alt)?)?;
    if &found != pair {
        return Err(NormalizeError::PairMismatch {
            expected: pair.clone(),
            found,
        });
    }

    let counter = pair.counter();
    let adapted = Ticker {
        currency_pair: pair.clone(),
        last: Some(money(&ticker.last_trade, counter)?),
        bid: Some(money(&ticker.highest_bid, counter)?),
        ask: Some(money(&ticker.lowest_ask, counter)?),
        high: None,
        low: None,
        volume: Some(amount(&ticker.volume)?),
        timestamp: None,
    };
    if adapted.is_crossed() {
        tracing::warn!("Vircurex: crossed ticker for {} (bid above ask)", pair);
    }
    Ok(adapted)
}

/// Pairs from a list of native pair codes.
pub fn adapt_currency_pairs(
    codes: &[String],
    registry: &VircurexRegistry,
) -> Result<BTreeSet<CurrencyPair>> {
    codes.iter().map(|code| registry.decode(code)).collect()
}

fn adapt_depth_levels(
    levels: &[VircurexDepthLevel],
    side: Side,
    pair: &CurrencyPair,
) -> Result<Vec<LimitOrder>> {
    levels
        .iter()
        .map(|level| {
            Ok(LimitOrder {
                side,
                limit_price: money(&level.0, pair.counter())?,
                tradable_amount: amount(&level.1)?,
                timestamp: None,
                id: None,
            })
        })
        .collect()
}

/// Order book for `pair`. Rows carry no timestamps.
pub fn adapt_order_book(depth: &VircurexDepth, pair: &CurrencyPair) -> Result<OrderBook> {
    let asks = adapt_depth_levels(&depth.asks, Side::Ask, pair)?;
    let bids = adapt_depth_levels(&depth.bids, Side::Bid, pair)?;
    tracing::debug!("Vircurex: {} book with {} asks, {} bids", pair, asks.len(), bids.len());
    Ok(OrderBook::new(pair.clone(), asks, bids))
}

// ─── Account / trading ───────────────────────────────────────────────────────

/// Account balances using the total (not the available) amount.
///
/// Vircurex reports every currency it knows, listed pairs or not. Codes are
/// plain, so each key becomes a currency as is; only malformed codes fail.
pub fn adapt_balance(balances: &VircurexBalances) -> Result<AccountInfo> {
    let adapted = balances
        .balances
        .iter()
        .map(|(code, entry)| money(&entry.balance, &Currency::new(code)?))
        .collect::<Result<Vec<_>>>()?;
    AccountInfo::from_balances(Some(balances.account.clone()), adapted)
}

fn adapt_open_order(order: &VircurexOrder, registry: &VircurexRegistry) -> Result<OpenOrder> {
    let tradable = registry.decode_asset(&order.currency1)?;
    let transaction = registry.decode_asset(&order.currency2)?;
    let timestamp = [&order.releasedat, &order.lastchangedat]
        .into_iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| parse_utc_datetime(s))
        .transpose()?;

    Ok(OpenOrder {
        id: order.orderid.as_text().into_owned(),
        side: order_side(&order.ordertype)?,
        limit_price: money(&order.unitprice, &transaction)?,
        tradable_amount: amount(&order.openquantity)?,
        tradable_identifier: tradable,
        transaction_currency: transaction,
        timestamp,
    })
}

// `order-10` sorts after `order-9`.
fn order_key_rank(key: &str) -> Option<u64> {
    key.strip_prefix("order-").and_then(|n| n.parse().ok())
}

/// Open orders in the venue's `order-N` sequence.
pub fn adapt_open_orders(
    orders: &VircurexOpenOrders,
    registry: &VircurexRegistry,
) -> Result<OpenOrders> {
    if orders.orders.len() != orders.numberorders as usize {
        tracing::warn!(
            "Vircurex: numberorders says {} but {} orders present",
            orders.numberorders,
            orders.orders.len()
        );
    }

    let mut keyed: Vec<_> = orders.orders.iter().collect();
    keyed.sort_by_key(|(key, _)| (order_key_rank(key), *key));

    let adapted = keyed
        .into_iter()
        .map(|(_, order)| adapt_open_order(order, registry))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!("Vircurex: adapted {} open orders", adapted.len());
    Ok(OpenOrders::new(adapted))
}
