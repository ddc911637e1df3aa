//! Kraken asset and pair codes.
//!
//! Asset codes carry a class prefix (`X` crypto, `Z` fiat) and are four
//! characters long, so a pair code such as `XXBTZEUR` splits structurally at
//! the middle. Order descriptions use the short unprefixed codes (`XBTEUR`).

use crate::error::{NormalizeError, Result};
use crate::registry::{pair_set, AssetTable, PairRegistry};
use crate::shared::{Currency, CurrencyPair, Venue};
use std::collections::BTreeSet;

/// Suffix Kraken appends to dark-pool books of an otherwise normal pair.
pub const DARK_POOL_SUFFIX: &str = ".d";

const PREFIXED_LEN: usize = 4;

/// `(canonical, prefixed, short)` for every asset Kraken lists.
const ASSETS: &[(Currency, &str, &str)] = &[
    (Currency::BTC, "XXBT", "XBT"),
    (Currency::LTC, "XLTC", "LTC"),
    (Currency::NMC, "XNMC", "NMC"),
    (Currency::DOGE, "XXDG", "XDG"),
    (Currency::XRP, "XXRP", "XRP"),
    (Currency::XVN, "XXVN", "XVN"),
    (Currency::EUR, "ZEUR", "EUR"),
    (Currency::USD, "ZUSD", "USD"),
    (Currency::GBP, "ZGBP", "GBP"),
    (Currency::JPY, "ZJPY", "JPY"),
    (Currency::KRW, "ZKRW", "KRW"),
    (Currency::CAD, "ZCAD", "CAD"),
];

const PAIRS: &[CurrencyPair] = &[
    CurrencyPair::BTC_EUR,
    CurrencyPair::BTC_USD,
    CurrencyPair::BTC_LTC,
    CurrencyPair::from_static(Currency::BTC, Currency::NMC),
    CurrencyPair::from_static(Currency::BTC, Currency::DOGE),
    CurrencyPair::from_static(Currency::BTC, Currency::XRP),
    CurrencyPair::from_static(Currency::BTC, Currency::XVN),
    CurrencyPair::from_static(Currency::BTC, Currency::KRW),
    CurrencyPair::from_static(Currency::BTC, Currency::GBP),
    CurrencyPair::from_static(Currency::BTC, Currency::JPY),
    CurrencyPair::from_static(Currency::BTC, Currency::CAD),
    CurrencyPair::LTC_EUR,
    CurrencyPair::LTC_USD,
    CurrencyPair::from_static(Currency::LTC, Currency::KRW),
    CurrencyPair::from_static(Currency::NMC, Currency::EUR),
    CurrencyPair::from_static(Currency::NMC, Currency::USD),
    CurrencyPair::from_static(Currency::NMC, Currency::KRW),
    CurrencyPair::from_static(Currency::EUR, Currency::XVN),
    CurrencyPair::from_static(Currency::USD, Currency::XVN),
    CurrencyPair::from_static(Currency::EUR, Currency::XRP),
    CurrencyPair::from_static(Currency::USD, Currency::XRP),
    CurrencyPair::from_static(Currency::KRW, Currency::XRP),
    CurrencyPair::from_static(Currency::XVN, Currency::XRP),
];

lazy_static::lazy_static! {
    static ref GLOBAL: KrakenRegistry = KrakenRegistry::builder().build();
}

/// Process-wide registry built from the compiled-in tables.
pub fn global() -> &'static KrakenRegistry {
    &GLOBAL
}

/// Kraken pair registry. Immutable once built.
#[derive(Debug, Clone)]
pub struct KrakenRegistry {
    prefixed: AssetTable,
    short: AssetTable,
    pairs: BTreeSet<CurrencyPair>,
}

impl KrakenRegistry {
    /// Builder pre-loaded with the compiled-in assets and pairs.
    pub fn builder() -> KrakenRegistryBuilder {
        let mut builder = KrakenRegistryBuilder {
            prefixed: AssetTable::new(Venue::Kraken),
            short: AssetTable::new(Venue::Kraken),
            pairs: Vec::with_capacity(PAIRS.len()),
        };
        for (currency, prefixed, short) in ASSETS {
            builder = builder.with_asset(currency.clone(), prefixed, short);
        }
        for pair in PAIRS {
            builder = builder.with_pair(pair.clone());
        }
        builder
    }

    /// Canonical currency for a prefixed (`XXBT`) or short (`XBT`) asset code.
    pub fn decode_asset(&self, code: &str) -> Result<Currency> {
        self.prefixed
            .decode(code)
            .or_else(|_| self.short.decode(code))
    }

    /// Prefixed asset code for a canonical currency.
    pub fn encode_asset(&self, currency: &Currency) -> Option<&str> {
        self.prefixed.native_code(currency)
    }

    /// Decode the short form used in order descriptions (`LTCEUR`, `XBTEUR`).
    ///
    /// Short codes vary in length, so every split point is tried. A prefixed
    /// pair code is accepted as well.
    pub fn decode_short_pair(&self, code: &str) -> Result<CurrencyPair> {
        if let Ok(pair) = self.decode(code) {
            return Ok(pair);
        }
        let stripped = strip_dark_pool(code);
        let candidate = (1..stripped.len())
            .filter(|&i| stripped.is_char_boundary(i))
            .find_map(|i| {
                let (base, counter) = stripped.split_at(i);
                match (self.short.decode(base), self.short.decode(counter)) {
                    (Ok(base), Ok(counter)) => Some((base, counter)),
                    _ => None,
                }
            });
        candidate
            .and_then(|(base, counter)| CurrencyPair::new(base, counter).ok())
            .ok_or_else(|| NormalizeError::unknown_code(Venue::Kraken, code))
    }
}

fn strip_dark_pool(code: &str) -> &str {
    code.strip_suffix(DARK_POOL_SUFFIX).unwrap_or(code)
}

impl PairRegistry for KrakenRegistry {
    fn venue(&self) -> Venue {
        Venue::Kraken
    }

    fn encode(&self, pair: &CurrencyPair) -> Result<String> {
        let unsupported = || NormalizeError::UnsupportedPair {
            venue: Venue::Kraken,
            pair: pair.clone(),
        };
        if !self.supports(pair) {
            return Err(unsupported());
        }
        match (
            self.prefixed.native_code(pair.base()),
            self.prefixed.native_code(pair.counter()),
        ) {
            (Some(base), Some(counter)) => Ok(format!("{base}{counter}")),
            _ => Err(unsupported()),
        }
    }

    fn decode(&self, code: &str) -> Result<CurrencyPair> {
        let unknown = || NormalizeError::unknown_code(Venue::Kraken, code);
        let stripped = strip_dark_pool(code);
        if stripped.len() != 2 * PREFIXED_LEN || !stripped.is_ascii() {
            return Err(unknown());
        }
        let (base, counter) = stripped.split_at(PREFIXED_LEN);
        let base = self.prefixed.decode(base).map_err(|_| unknown())?;
        let counter = self.prefixed.decode(counter).map_err(|_| unknown())?;
        CurrencyPair::new(base, counter).map_err(|_| unknown())
    }

    fn supported_pairs(&self) -> &BTreeSet<CurrencyPair> {
        &self.pairs
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Construction-time extension of the Kraken tables.
#[derive(Debug, Clone)]
pub struct KrakenRegistryBuilder {
    prefixed: AssetTable,
    short: AssetTable,
    pairs: Vec<CurrencyPair>,
}

impl KrakenRegistryBuilder {
    /// Register an asset. `prefixed` must be four characters (`XXBT`, `ZEUR`).
    pub fn with_asset(mut self, currency: Currency, prefixed: &str, short: &str) -> Self {
        self.prefixed.insert(currency.clone(), prefixed);
        self.short.insert(currency, short);
        self
    }

    pub fn with_pair(mut self, pair: CurrencyPair) -> Self {
        self.pairs.push(pair);
        self
    }

    /// Finish the registry. Pairs whose assets have no prefixed code are dropped.
    pub fn build(self) -> KrakenRegistry {
        let prefixed = self.prefixed;
        let encodable: Vec<CurrencyPair> = self
            .pairs
            .into_iter()
            .filter(|pair| {
                let ok = [pair.base(), pair.counter()]
                    .iter()
                    .all(|c| {
                        prefixed
                            .native_code(c)
                            .is_some_and(|n| n.len() == PREFIXED_LEN)
                    });
                if !ok {
                    tracing::warn!(
                        "Kraken: dropping pair {} without four-character asset codes",
                        pair
                    );
                }
                ok
            })
            .collect();

        KrakenRegistry {
            pairs: pair_set(Venue::Kraken, &encodable),
            prefixed,
            short: self.short,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::round_trip_violations;

    #[test]
    fn test_encode_uses_prefixed_codes() {
        let registry = global();
        assert_eq!(registry.encode(&CurrencyPair::BTC_EUR).unwrap(), "XXBTZEUR");
        assert_eq!(registry.encode(&CurrencyPair::BTC_LTC).unwrap(), "XXBTXLTC");
    }

    #[test]
    fn test_decode_is_structural() {
        let registry = global();
        assert_eq!(registry.decode("XXBTZUSD").unwrap(), CurrencyPair::BTC_USD);
        assert_eq!(
            registry.decode("XXDGXXBT").unwrap(),
            CurrencyPair::new(Currency::DOGE, Currency::BTC).unwrap()
        );
    }

    #[test]
    fn test_dark_pool_suffix_decodes_to_same_pair() {
        assert_eq!(global().decode("XXBTZEUR.d").unwrap(), CurrencyPair::BTC_EUR);
    }

    #[test]
    fn test_unknown_codes() {
        let registry = global();
        for code in ["XFOOZBAR", "XXBTZEU", "", "XXBTZEURX", "ZEURZEUR"] {
            assert!(registry.decode(code).is_err(), "{code:?} should not decode");
        }
        assert_eq!(
            registry.decode("XFOOZBAR"),
            Err(NormalizeError::UnknownCode {
                venue: Venue::Kraken,
                code: "XFOOZBAR".into()
            })
        );
    }

    #[test]
    fn test_unsupported_pair_is_not_encoded() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
        assert!(matches!(
            global().encode(&pair),
            Err(NormalizeError::UnsupportedPair { .. })
        ));
    }

    #[test]
    fn test_short_pair_forms() {
        let registry = global();
        assert_eq!(registry.decode_short_pair("LTCEUR").unwrap(), CurrencyPair::LTC_EUR);
        assert_eq!(registry.decode_short_pair("XBTEUR").unwrap(), CurrencyPair::BTC_EUR);
        assert_eq!(registry.decode_short_pair("XXBTZEUR").unwrap(), CurrencyPair::BTC_EUR);
        assert!(registry.decode_short_pair("FOOBAR").is_err());
        assert_eq!(
            registry.decode_short_pair("FOOBAR.d"),
            Err(NormalizeError::UnknownCode {
                venue: Venue::Kraken,
                code: "FOOBAR.d".into()
            })
        );
    }

    #[test]
    fn test_asset_aliases() {
        let registry = global();
        assert_eq!(registry.decode_asset("XXBT").unwrap(), Currency::BTC);
        assert_eq!(registry.decode_asset("XBT").unwrap(), Currency::BTC);
        assert_eq!(registry.encode_asset(&Currency::DOGE), Some("XXDG"));
    }

    #[test]
    fn test_every_supported_pair_round_trips() {
        assert!(round_trip_violations(global()).is_empty());
    }

    #[test]
    fn test_builder_extends_tables() {
        let chf = Currency::new("CHF").unwrap();
        let btc_chf = CurrencyPair::new(Currency::BTC, chf.clone()).unwrap();
        let registry = KrakenRegistry::builder()
            .with_asset(chf, "ZCHF", "CHF")
            .with_pair(btc_chf.clone())
            .build();
        assert_eq!(registry.encode(&btc_chf).unwrap(), "XXBTZCHF");
        assert_eq!(registry.decode_short_pair("XBTCHF").unwrap(), btc_chf);
        assert!(!global().supports(&btc_chf));
    }

    #[test]
    fn test_builder_drops_pairs_without_assets() {
        let orphan = CurrencyPair::new(Currency::BTC, Currency::new("CHF").unwrap()).unwrap();
        let registry = KrakenRegistry::builder().with_pair(orphan.clone()).build();
        assert!(!registry.supports(&orphan));
    }
}
