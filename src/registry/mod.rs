//! Currency-pair registries: native pair code ⇄ canonical `CurrencyPair`.
//!
//! Each venue owns one registry type built from compiled-in tables. A registry
//! is immutable once built; extra assets or pairs can only be supplied through
//! the venue's builder before `build()`.

mod assets;

pub use assets::AssetTable;

use crate::error::Result;
use crate::shared::{CurrencyPair, Venue};
use std::collections::BTreeSet;

/// Common interface for every venue registry.
pub trait PairRegistry: Send + Sync {
    fn venue(&self) -> Venue;

    /// Native code for `pair`. Fails with `UnsupportedPair` outside the supported set.
    fn encode(&self, pair: &CurrencyPair) -> Result<String>;

    /// Canonical pair for a native code. Fails with `UnknownCode`.
    ///
    /// For every supported pair `p`, `decode(&encode(&p)?)? == p`.
    fn decode(&self, code: &str) -> Result<CurrencyPair>;

    /// Authoritative set of pairs the venue lists.
    fn supported_pairs(&self) -> &BTreeSet<CurrencyPair>;

    fn supports(&self, pair: &CurrencyPair) -> bool {
        self.supported_pairs().contains(pair)
    }
}

/// Collapse a static pair list (which may repeat entries) into a set.
pub fn pair_set<'a>(
    venue: Venue,
    pairs: impl IntoIterator<Item = &'a CurrencyPair>,
) -> BTreeSet<CurrencyPair> {
    let mut listed = 0usize;
    let set: BTreeSet<CurrencyPair> = pairs
        .into_iter()
        .inspect(|_| listed += 1)
        .cloned()
        .collect();
    if listed != set.len() {
        tracing::debug!(
            "{}: collapsed {} duplicate pair entries",
            venue,
            listed - set.len()
        );
    }
    set
}

/// Supported pairs for which `decode(encode(pair)) != pair`.
///
/// Empty for a correct registry.
pub fn round_trip_violations<R: PairRegistry + ?Sized>(registry: &R) -> Vec<CurrencyPair> {
    registry
        .supported_pairs()
        .iter()
        .filter(|pair| {
            registry
                .encode(pair)
                .and_then(|code| registry.decode(&code))
                .map(|decoded| &decoded != *pair)
                .unwrap_or(true)
        })
        .cloned()
        .collect()
}

/// First supported pair that fails to round-trip, if any.
pub fn verify_round_trip<R: PairRegistry + ?Sized>(registry: &R) -> Option<CurrencyPair> {
    round_trip_violations(registry).into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;
    use crate::shared::Currency;

    /// Registry that writes pairs counter-first (`EUR-BTC` for BTC/EUR).
    struct CounterFirst {
        pairs: BTreeSet<CurrencyPair>,
    }

    impl PairRegistry for CounterFirst {
        fn venue(&self) -> Venue {
            Venue::Vircurex
        }

        fn encode(&self, pair: &CurrencyPair) -> Result<String> {
            if !self.supports(pair) {
                return Err(NormalizeError::UnsupportedPair {
                    venue: self.venue(),
                    pair: pair.clone(),
                });
            }
            Ok(format!("{}-{}", pair.counter(), pair.base()))
        }

        fn decode(&self, code: &str) -> Result<CurrencyPair> {
            let (counter, base) = code
                .split_once('-')
                .ok_or_else(|| NormalizeError::unknown_code(self.venue(), code))?;
            CurrencyPair::new(Currency::new(base)?, Currency::new(counter)?)
        }

        fn supported_pairs(&self) -> &BTreeSet<CurrencyPair> {
            &self.pairs
        }
    }

    #[test]
    fn test_pair_set_collapses_duplicates() {
        let list = [
            CurrencyPair::LTC_BTC,
            CurrencyPair::NMC_BTC,
            CurrencyPair::LTC_BTC,
        ];
        let set = pair_set(Venue::Vircurex, &list);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_reversed_native_order_still_round_trips() {
        let registry = CounterFirst {
            pairs: pair_set(Venue::Vircurex, &[CurrencyPair::BTC_EUR, CurrencyPair::LTC_BTC]),
        };
        assert_eq!(registry.encode(&CurrencyPair::BTC_EUR).unwrap(), "EUR-BTC");
        assert!(round_trip_violations(&registry).is_empty());
        assert_eq!(verify_round_trip(&registry), None);
    }

    #[test]
    fn test_round_trip_violations_reports_broken_pairs() {
        struct Lossy(BTreeSet<CurrencyPair>);
        impl PairRegistry for Lossy {
            fn venue(&self) -> Venue {
                Venue::Kraken
            }
            fn encode(&self, pair: &CurrencyPair) -> Result<String> {
                Ok(pair.base().to_string())
            }
            fn decode(&self, _code: &str) -> Result<CurrencyPair> {
                Ok(CurrencyPair::BTC_EUR)
            }
            fn supported_pairs(&self) -> &BTreeSet<CurrencyPair> {
                &self.0
            }
        }

        let registry = Lossy(pair_set(
            Venue::Kraken,
            &[CurrencyPair::BTC_EUR, CurrencyPair::BTC_USD],
        ));
        assert_eq!(round_trip_violations(&registry), vec![CurrencyPair::BTC_USD]);
    }
}
