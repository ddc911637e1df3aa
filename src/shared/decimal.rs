//! Exact decimal parsing for venue price, amount and balance strings.
//!
//! Values go straight from text to `rust_decimal::Decimal`. The scale of the
//! input is kept, so `"0.4888583300"` renders back with its trailing zeros.
//! Inputs needing more precision than `Decimal` holds are rejected, never
//! rounded.

use super::{Currency, Money};
use crate::error::{NormalizeError, Result};
use rust_decimal::Decimal;

/// Parse a plain decimal string (`-?digits(.digits)?`) without attaching a currency.
pub fn parse_amount(input: &str) -> Result<Decimal> {
    validate_syntax(input)?;
    Decimal::from_str_exact(input)
        .map_err(|e| NormalizeError::malformed_decimal(input, e.to_string()))
}

/// Parse a decimal string and tag it with `currency`.
pub fn parse_money(input: &str, currency: &Currency) -> Result<Money> {
    Ok(Money::new(currency.clone(), parse_amount(input)?))
}

// `Decimal::from_str` alone also accepts `_` separators and a leading `+`,
// neither of which a venue sends for a real value.
fn validate_syntax(input: &str) -> Result<()> {
    let unsigned = input.strip_prefix('-').unwrap_or(input);
    if unsigned.is_empty() {
        return Err(NormalizeError::malformed_decimal(input, "empty value"));
    }

    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    if int_part.is_empty() {
        return Err(NormalizeError::malformed_decimal(input, "missing integer digits"));
    }
    if let Some(bad) = int_part.chars().find(|c| !c.is_ascii_digit()) {
        return Err(NormalizeError::malformed_decimal(
            input,
            format!("unexpected character {bad:?}"),
        ));
    }

    if let Some(frac) = frac_part {
        if frac.is_empty() {
            return Err(NormalizeError::malformed_decimal(input, "missing fraction digits"));
        }
        if let Some(bad) = frac.chars().find(|c| !c.is_ascii_digit()) {
            return Err(NormalizeError::malformed_decimal(
                input,
                format!("unexpected character {bad:?}"),
            ));
        }
    }

    Ok(())
}
