//! Percentage discounts and sale-price derivation.

use crate::money::Money;
use crate::CommerceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discount percentage in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(try_from = "i64", into = "u8")]
pub struct Discount(u8);

impl Discount {
    /// No discount.
    pub const NONE: Discount = Discount(0);

    /// Create a discount, rejecting percentages outside `0..=100`.
    pub fn new(percent: i64) -> Result<Self, CommerceError> {
        if (0..=100).contains(&percent) {
            Ok(Self(percent as u8))
        } else {
            Err(CommerceError::InvalidDiscount(percent))
        }
    }

    /// The percentage off.
    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Whether any discount applies.
    pub fn is_active(&self) -> bool {
        self.0 > 0
    }

    /// `original * (1 - percent/100)`, rounded to the minor unit.
    ///
    /// A zero discount returns `original` unchanged.
    pub fn sale_price(&self, original: Money) -> Money {
        if self.0 == 0 {
            return original;
        }
        original.scale_percent(100 - i64::from(self.0))
    }

    /// Unrounded sale price as a decimal, for display-independent checks.
    pub fn sale_price_decimal(&self, original: Money) -> f64 {
        original.to_decimal() * (1.0 - f64::from(self.0) / 100.0)
    }

    /// Amount saved: `original - sale_price`.
    pub fn savings(&self, original: Money) -> Money {
        let sale = self.sale_price(original);
        Money::new(original.amount_cents - sale.amount_cents, original.currency)
    }
}

impl TryFrom<i64> for Discount {
    type Error = CommerceError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Discount::new(value)
    }
}

impl From<Discount> for u8 {
    fn from(d: Discount) -> Self {
        d.0
    }
}

impl fmt::Display for Discount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_sale_price_rounds_to_display_precision() {
        let original = Money::from_decimal(2999.50, Currency::PHP);
        let discount = Discount::new(33).unwrap();

        assert!((discount.sale_price_decimal(original) - 2009.665).abs() < 1e-9);
        assert_eq!(discount.sale_price(original).display_amount(), "2009.67");
    }

    #[test]
    fn test_zero_discount_is_exact() {
        let original = Money::from_decimal(2999.50, Currency::PHP);
        assert_eq!(Discount::NONE.sale_price(original), original);
        assert!(Discount::NONE.savings(original).is_zero());
    }

    #[test]
    fn test_full_discount_is_free() {
        let original = Money::from_decimal(249.5, Currency::PHP);
        assert!(Discount::new(100).unwrap().sale_price(original).is_zero());
    }

    #[test]
    fn test_savings() {
        let original = Money::from_decimal(749.5, Currency::PHP);
        let discount = Discount::new(50).unwrap();
        assert_eq!(discount.sale_price(original).amount_cents, 37475);
        assert_eq!(discount.savings(original).amount_cents, 37475);
    }

    #[test]
    fn test_out_of_range_rejected() {
        assert_eq!(Discount::new(101), Err(CommerceError::InvalidDiscount(101)));
        assert_eq!(Discount::new(-1), Err(CommerceError::InvalidDiscount(-1)));
    }

    #[test]
    fn test_serde_validates() {
        let d: Discount = serde_json::from_str("40").unwrap();
        assert_eq!(d.percent(), 40);
        assert!(serde_json::from_str::<Discount>("150").is_err());
        assert_eq!(serde_json::to_string(&d).unwrap(), "40");
    }
}
