//! Coupon Fixtures

use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::Money;
use serde::Deserialize;

use crate::{
    coupons::{Coupon, CouponDiscount},
    fixtures::{FixtureError, menus::parse_price},
};

/// Wrapper for coupons in YAML
#[derive(Debug, Deserialize)]
pub struct CouponsFixture {
    /// Coupon book
    pub coupons: Vec<CouponFixture>,
}

/// Coupon Fixture
#[derive(Debug, Deserialize)]
pub struct CouponFixture {
    /// Case-sensitive code
    pub code: String,

    /// Either a percentage ("10%") or a fixed amount ("10.00 BRL")
    pub discount: String,

    /// Minimum order amount (e.g., "20.00 BRL")
    pub min_order: String,

    /// Expiry time
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
}

impl TryFrom<CouponFixture> for Coupon<'_> {
    type Error = FixtureError;

    fn try_from(fixture: CouponFixture) -> Result<Self, Self::Error> {
        let (min_minor, currency) = parse_price(&fixture.min_order)?;

        let discount = if fixture.discount.trim().ends_with('%') {
            CouponDiscount::percentage(parse_percent_points(&fixture.discount)?)?
        } else {
            let (minor_units, discount_currency) = parse_price(&fixture.discount)?;

            if discount_currency != currency {
                return Err(FixtureError::CurrencyMismatch(
                    currency.iso_alpha_code.to_string(),
                    discount_currency.iso_alpha_code.to_string(),
                ));
            }

            CouponDiscount::fixed(Money::from_minor(minor_units, currency))?
        };

        let coupon = Coupon::new(fixture.code, discount, Money::from_minor(min_minor, currency))?;

        Ok(match fixture.expires_at {
            Some(expires_at) => coupon.with_expiry(expires_at),
            None => coupon,
        })
    }
}

/// Parse a percentage string (e.g., "15%") into percentage points (15)
///
/// # Errors
///
/// Returns an error if the string has no `%` suffix or the number cannot be parsed.
pub fn parse_percent_points(s: &str) -> Result<Decimal, FixtureError> {
    s.trim()
        .strip_suffix('%')
        .ok_or_else(|| FixtureError::InvalidPercentage(s.to_string()))?
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPercentage(s.to_string()))
}
