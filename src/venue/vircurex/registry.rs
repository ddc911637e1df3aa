//! Vircurex currency and pair codes.
//!
//! Currencies use their plain codes; a pair is `base_alt` in lower case
//! (`ltc_btc`). Only listed pairs decode.

use crate::error::{NormalizeError, Result};
use crate::registry::{pair_set, AssetTable, PairRegistry};
use crate::shared::{Currency, CurrencyPair, Venue};
use std::collections::{BTreeMap, BTreeSet};

const TRC: Currency = Currency::from_static("TRC");
const DGC: Currency = Currency::from_static("DGC");
const NVC: Currency = Currency::from_static("NVC");
const DVC: Currency = Currency::from_static("DVC");
const IXC: Currency = Currency::from_static("IXC");
const FRC: Currency = Currency::from_static("FRC");
const FTC: Currency = Currency::from_static("FTC");
const ANC: Currency = Currency::from_static("ANC");

/// Listed pairs as the venue publishes them; repeated entries are collapsed on build.
const PAIRS: &[CurrencyPair] = &[
    CurrencyPair::LTC_BTC,
    CurrencyPair::from_static(TRC, Currency::BTC),
    CurrencyPair::from_static(Currency::PPC, Currency::BTC),
    CurrencyPair::from_static(Currency::PPC, Currency::BTC),
    CurrencyPair::from_static(DGC, Currency::BTC),
    CurrencyPair::from_static(Currency::NMC, Currency::BTC),
    CurrencyPair::from_static(NVC, Currency::BTC),
    CurrencyPair::from_static(TRC, Currency::BTC),
    CurrencyPair::from_static(DVC, Currency::BTC),
    CurrencyPair::from_static(IXC, Currency::BTC),
    CurrencyPair::from_static(FRC, Currency::BTC),
    CurrencyPair::from_static(FTC, Currency::LTC),
    CurrencyPair::NMC_BTC,
    CurrencyPair::BTC_USD,
    CurrencyPair::from_static(DVC, Currency::BTC),
    CurrencyPair::from_static(ANC, Currency::BTC),
    CurrencyPair::LTC_BTC,
];

/// Currencies that appear in balances without a listed pair.
const EXTRA_ASSETS: &[Currency] = &[Currency::EUR];

lazy_static::lazy_static! {
    static ref GLOBAL: VircurexRegistry = VircurexRegistry::builder().build();
}

/// Process-wide registry built from the compiled-in tables.
pub fn global() -> &'static VircurexRegistry {
    &GLOBAL
}

/// Vircurex pair registry. Immutable once built.
#[derive(Debug, Clone)]
pub struct VircurexRegistry {
    assets: AssetTable,
    pairs: BTreeSet<CurrencyPair>,
    by_code: BTreeMap<String, CurrencyPair>,
}

impl VircurexRegistry {
    /// Builder pre-loaded with the compiled-in pairs.
    pub fn builder() -> VircurexRegistryBuilder {
        let builder = VircurexRegistryBuilder {
            assets: AssetTable::new(Venue::Vircurex),
            pairs: Vec::with_capacity(PAIRS.len()),
        };
        let builder = EXTRA_ASSETS
            .iter()
            .fold(builder, |b, currency| b.with_asset(currency.clone(), currency.code()));
        PAIRS
            .iter()
            .fold(builder, |b, pair| b.with_pair(pair.clone()))
    }

    /// Canonical currency for a Vircurex currency code (`BTC`, `ltc`).
    pub fn decode_asset(&self, code: &str) -> Result<Currency> {
        self.assets
            .decode(&code.to_ascii_uppercase())
            .map_err(|_| NormalizeError::unknown_code(Venue::Vircurex, code))
    }
}

fn pair_code(pair: &CurrencyPair) -> String {
    format!(
        "{}_{}",
        pair.base().code().to_ascii_lowercase(),
        pair.counter().code().to_ascii_lowercase()
    )
}

impl PairRegistry for VircurexRegistry {
    fn venue(&self) -> Venue {
        Venue::Vircurex
    }

    fn encode(&self, pair: &CurrencyPair) -> Result<String> {
        if !self.supports(pair) {
            return Err(NormalizeError::UnsupportedPair {
                venue: Venue::Vircurex,
                pair: pair.clone(),
            });
        }
        Ok(pair_code(pair))
    }

    fn decode(&self, code: &str) -> Result<CurrencyPair> {
        self.by_code
            .get(&code.to_ascii_lowercase())
            .cloned()
            .ok_or_else(|| NormalizeError::unknown_code(Venue::Vircurex, code))
    }

    fn supported_pairs(&self) -> &BTreeSet<CurrencyPair> {
        &self.pairs
    }
}

// ─── Builder ─────────────────────────────────────────────────────────────────

/// Construction-time extension of the Vircurex tables.
#[derive(Debug, Clone)]
pub struct VircurexRegistryBuilder {
    assets: AssetTable,
    pairs: Vec<CurrencyPair>,
}

impl VircurexRegistryBuilder {
    pub fn with_asset(mut self, currency: Currency, native: &str) -> Self {
        self.assets.insert(currency, native);
        self
    }

    /// List a pair; both currencies are registered under their own codes.
    pub fn with_pair(mut self, pair: CurrencyPair) -> Self {
        for currency in [pair.base(), pair.counter()] {
            if !self.assets.contains(currency) {
                self.assets.insert(currency.clone(), currency.code());
            }
        }
        self.pairs.push(pair);
        self
    }

    pub fn build(self) -> VircurexRegistry {
        let pairs = pair_set(Venue::Vircurex, &self.pairs);
        let by_code = pairs
            .iter()
            .map(|pair| (pair_code(pair), pair.clone()))
            .collect();
        VircurexRegistry {
            assets: self.assets,
            pairs,
            by_code,
        }
    }
}
