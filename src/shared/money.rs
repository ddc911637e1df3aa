//! Money — an exact decimal amount in a specific currency.

use super::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A (currency, exact amount) value.
///
/// Equality compares the numeric value, so `1.50 EUR == 1.5 EUR`; use
/// [`Money::amount`]`.to_string()` when the venue's textual precision matters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    currency: Currency,
    amount: Decimal,
}

impl Money {
    pub fn new(currency: Currency, amount: Decimal) -> Self {
        Self { currency, amount }
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_keeps_scale() {
        let money = Money::new(Currency::BTC, Decimal::from_str("0.4888583300").unwrap());
        assert_eq!(money.to_string(), "BTC 0.4888583300");
    }

    #[test]
    fn test_equality_is_numeric() {
        let a = Money::new(Currency::EUR, Decimal::from_str("1.50").unwrap());
        let b = Money::new(Currency::EUR, Decimal::from_str("1.5").unwrap());
        assert_eq!(a, b);
        assert_ne!(a, Money::new(Currency::USD, Decimal::from_str("1.5").unwrap()));
    }

    #[test]
    fn test_serializes_amount_as_string() {
        let money = Money::new(Currency::EUR, Decimal::from_str("13.00000").unwrap());
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, r#"{"currency":"EUR","amount":"13.00000"}"#);
    }
}
