//! Unified normalization error types.

use crate::shared::{Currency, CurrencyPair, Venue};
use thiserror::Error;

/// Result alias used by every adapter, registry and parser in the crate.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Top-level normalization error.
///
/// Every variant is surfaced to the caller unchanged: adapters never recover
/// locally and never substitute a default for unparsable data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    /// Canonical pair not listed by the venue (encode direction).
    #[error("{venue} does not support pair {pair}")]
    UnsupportedPair { venue: Venue, pair: CurrencyPair },

    /// Native code the venue's tables cannot decode.
    #[error("{venue} code not recognized: {code:?}")]
    UnknownCode { venue: Venue, code: String },

    #[error("Malformed decimal {input:?}: {reason}")]
    MalformedDecimal { input: String, reason: String },

    #[error("Invalid timestamp {input:?}: {reason}")]
    InvalidTimestamp { input: String, reason: String },

    #[error("{venue} side marker {marker:?} is neither buy nor sell")]
    InconsistentSideMarker { venue: Venue, marker: String },

    #[error("Invalid currency code {0:?}")]
    InvalidCurrency(String),

    #[error("Pair base and counter are both {0}")]
    IdenticalCurrencies(Currency),

    #[error("Duplicate balance entry for {0}")]
    DuplicateBalance(Currency),

    #[error("Pair mismatch: expected {expected}, record says {found}")]
    PairMismatch {
        expected: CurrencyPair,
        found: CurrencyPair,
    },

    #[error("{venue} rejected request: {}", messages.join("; "))]
    VenueRejected { venue: Venue, messages: Vec<String> },
}

impl NormalizeError {
    pub(crate) fn unknown_code(venue: Venue, code: impl Into<String>) -> Self {
        NormalizeError::UnknownCode {
            venue,
            code: code.into(),
        }
    }

    pub(crate) fn malformed_decimal(input: &str, reason: impl Into<String>) -> Self {
        NormalizeError::MalformedDecimal {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_timestamp(input: impl Into<String>, reason: impl Into<String>) -> Self {
        NormalizeError::InvalidTimestamp {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn side_marker(venue: Venue, marker: &str) -> Self {
        NormalizeError::InconsistentSideMarker {
            venue,
            marker: marker.to_string(),
        }
    }
}
