//! Per-venue registries, wire types and adapters, one module per venue.

#[cfg(feature = "kraken")]
pub mod kraken;
#[cfg(feature = "vircurex")]
pub mod vircurex;
