//! Coupons
//!
//! A coupon is a discount rule keyed by a case-sensitive code and restricted by a minimum
//! order amount. Coupons are resolved by an external lookup, validated against the current
//! subtotal when applied, and never stack: a cart holds at most one.

use decimal_percentage::Percentage;
use jiff::Timestamp;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors specific to coupon resolution and discount calculations.
#[derive(Debug, Error)]
pub enum CouponError {
    /// The code is unknown, does not match exactly or has expired.
    #[error("coupon {0:?} is invalid or expired")]
    Invalid(String),

    /// The subtotal is below the coupon's minimum order amount.
    #[error("coupon requires a minimum order of {minimum}, subtotal is {subtotal}")]
    Ineligible {
        /// Minimum order amount
        minimum: Decimal,
        /// Subtotal the coupon was applied to
        subtotal: Decimal,
    },

    /// The discount value is zero, negative, or a percentage above 100.
    #[error("coupon discount value {0} is out of range")]
    InvalidDiscount(Decimal),

    /// The minimum order amount is negative.
    #[error("coupon minimum order {0} is negative")]
    NegativeMinimum(Decimal),

    /// Percentage calculation could not be safely converted.
    #[error("percentage conversion overflowed or was not finite")]
    PercentConversion,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// How a coupon reduces the subtotal.
#[derive(Debug, Copy, Clone)]
pub enum CouponDiscount<'a> {
    /// Take a percentage off the subtotal (e.g., "10% off")
    Percentage(Percentage),

    /// Take a fixed amount off the subtotal (e.g., "R$ 10 off")
    Fixed(Money<'a, Currency>),
}

impl<'a> CouponDiscount<'a> {
    /// Percentage discount from percentage points, e.g. `10` for 10% off.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidDiscount`] unless `0 < points <= 100`.
    pub fn percentage(points: Decimal) -> Result<Self, CouponError> {
        if points <= Decimal::ZERO || points > Decimal::ONE_HUNDRED {
            return Err(CouponError::InvalidDiscount(points));
        }

        Ok(Self::Percentage(Percentage::from(points / Decimal::ONE_HUNDRED)))
    }

    /// Fixed amount discount.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::InvalidDiscount`] unless the amount is positive.
    pub fn fixed(amount: Money<'a, Currency>) -> Result<Self, CouponError> {
        if !amount.is_positive() {
            return Err(CouponError::InvalidDiscount(*amount.amount()));
        }

        Ok(Self::Fixed(amount))
    }
}

/// Coupon
#[derive(Debug, Clone)]
pub struct Coupon<'a> {
    code: String,
    discount: CouponDiscount<'a>,
    min_order: Money<'a, Currency>,
    expires_at: Option<Timestamp>,
}

impl<'a> Coupon<'a> {
    /// Create a new coupon.
    ///
    /// # Errors
    ///
    /// - [`CouponError::Invalid`]: the code is blank.
    /// - [`CouponError::NegativeMinimum`]: the minimum order amount is negative.
    pub fn new(
        code: impl Into<String>,
        discount: CouponDiscount<'a>,
        min_order: Money<'a, Currency>,
    ) -> Result<Self, CouponError> {
        let code = code.into();

        if code.trim().is_empty() {
            return Err(CouponError::Invalid(code));
        }

        if min_order.is_negative() {
            return Err(CouponError::NegativeMinimum(*min_order.amount()));
        }

        Ok(Self {
            code,
            discount,
            min_order,
            expires_at: None,
        })
    }

    /// Set the instant after which the coupon can no longer be applied.
    #[must_use]
    pub fn with_expiry(mut self, expires_at: Timestamp) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Resolve the result of a coupon lookup for `code`.
    ///
    /// Codes match case-sensitively, so a lookup that answers `SAVE10` for `save10` does not
    /// resolve.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Invalid`] if nothing was found, the code differs, or the coupon
    /// has expired at `now`.
    pub fn resolve(code: &str, found: Option<Self>, now: Timestamp) -> Result<Self, CouponError> {
        match found {
            Some(coupon) if coupon.code == code && !coupon.is_expired(now) => Ok(coupon),
            Some(_) | None => Err(CouponError::Invalid(code.to_string())),
        }
    }

    /// Coupon code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Discount rule
    pub fn discount(&self) -> &CouponDiscount<'a> {
        &self.discount
    }

    /// Minimum subtotal required to apply the coupon
    pub fn min_order(&self) -> &Money<'a, Currency> {
        &self.min_order
    }

    /// Expiry, if any
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.expires_at
    }

    /// Whether the coupon has expired at `now`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// Calculates the discount a coupon grants on `subtotal`.
///
/// The discount never exceeds the subtotal.
///
/// # Errors
///
/// - [`CouponError::Ineligible`]: the subtotal is below the coupon's minimum order amount.
/// - [`CouponError::PercentConversion`]: a percentage discount cannot be represented.
/// - [`CouponError::Money`]: the coupon is in a different currency.
pub fn apply_coupon<'a>(
    subtotal: Money<'a, Currency>,
    coupon: &Coupon<'a>,
) -> Result<Money<'a, Currency>, CouponError> {
    if subtotal.sub(coupon.min_order)?.is_negative() {
        return Err(CouponError::Ineligible {
            minimum: *coupon.min_order.amount(),
            subtotal: *subtotal.amount(),
        });
    }

    let discount = match coupon.discount {
        CouponDiscount::Percentage(percent) => Money::from_minor(
            percent_of_minor(&percent, subtotal.to_minor_units())?,
            subtotal.currency(),
        ),
        CouponDiscount::Fixed(amount) => amount,
    };

    if subtotal.sub(discount)?.is_negative() {
        return Ok(subtotal);
    }

    Ok(discount)
}

/// Calculate the discount amount in minor units based on a percentage and a minor unit amount.
fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, CouponError> {
    let minor = Decimal::from_i64(minor).ok_or(CouponError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // decimal_percentage doesn't expose the underlying Decimal
        .checked_mul(minor)
        .ok_or(CouponError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(CouponError::PercentConversion)
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use rusty_money::iso::{BRL, USD};
    use testresult::TestResult;

    use super::*;

    fn fixed(code: &str, value: i64, min_order: i64) -> Result<Coupon<'static>, CouponError> {
        Coupon::new(
            code,
            CouponDiscount::fixed(Money::from_minor(value, BRL))?,
            Money::from_minor(min_order, BRL),
        )
    }

    fn percentage(code: &str, points: i64, min_order: i64) -> Result<Coupon<'static>, CouponError> {
        Coupon::new(
            code,
            CouponDiscount::percentage(Decimal::from(points))?,
            Money::from_minor(min_order, BRL),
        )
    }

    #[test]
    fn fixed_discount_is_the_coupon_value() -> TestResult {
        let coupon = fixed("SAVE10", 10_00, 20_00)?;

        let discount = apply_coupon(Money::from_minor(64_30, BRL), &coupon)?;

        assert_eq!(discount, Money::from_minor(10_00, BRL));

        Ok(())
    }

    #[test]
    fn percentage_discount_is_a_share_of_the_subtotal() -> TestResult {
        let coupon = percentage("TENOFF", 10, 0)?;

        let discount = apply_coupon(Money::from_minor(64_30, BRL), &coupon)?;

        assert_eq!(discount, Money::from_minor(6_43, BRL));

        Ok(())
    }

    #[test]
    fn percentage_discount_rounds_half_away_from_zero() -> TestResult {
        let coupon = percentage("HALF", 50, 0)?;

        let discount = apply_coupon(Money::from_minor(1_01, BRL), &coupon)?;

        assert_eq!(discount, Money::from_minor(51, BRL));

        Ok(())
    }

    #[test]
    fn subtotal_below_minimum_is_ineligible() -> TestResult {
        let coupon = fixed("SAVE10", 10_00, 20_00)?;

        let result = apply_coupon(Money::from_minor(15_00, BRL), &coupon);

        assert!(
            matches!(result, Err(CouponError::Ineligible { .. })),
            "expected Ineligible, got {result:?}"
        );

        Ok(())
    }

    #[test]
    fn subtotal_equal_to_minimum_is_eligible() -> TestResult {
        let coupon = fixed("SAVE10", 10_00, 20_00)?;

        assert_eq!(
            apply_coupon(Money::from_minor(20_00, BRL), &coupon)?,
            Money::from_minor(10_00, BRL)
        );

        Ok(())
    }

    #[test]
    fn large_fixed_discount_is_clamped_to_subtotal() -> TestResult {
        let coupon = fixed("BIG", 100_00, 0)?;

        let discount = apply_coupon(Money::from_minor(30_00, BRL), &coupon)?;

        assert_eq!(discount, Money::from_minor(30_00, BRL));

        Ok(())
    }

    #[test]
    fn discount_never_exceeds_subtotal() -> TestResult {
        let coupons = [
            fixed("A", 1, 0)?,
            fixed("B", 5_00, 0)?,
            fixed("C", 999_99, 0)?,
            percentage("D", 1, 0)?,
            percentage("E", 100, 0)?,
        ];

        for subtotal in [0, 1, 99, 4_99, 64_30, 1_000_00] {
            let subtotal = Money::from_minor(subtotal, BRL);

            for coupon in &coupons {
                let discount = apply_coupon(subtotal, coupon)?;

                assert!(
                    discount.to_minor_units() <= subtotal.to_minor_units(),
                    "{} on {subtotal:?} gave {discount:?}",
                    coupon.code()
                );
            }
        }

        Ok(())
    }

    #[test]
    fn currency_mismatch_errors() -> TestResult {
        let coupon = fixed("SAVE10", 10_00, 0)?;

        let result = apply_coupon(Money::from_minor(50_00, USD), &coupon);

        assert!(matches!(result, Err(CouponError::Money(_))));

        Ok(())
    }

    #[test]
    fn discount_values_are_validated() {
        assert!(CouponDiscount::percentage(Decimal::ZERO).is_err());
        assert!(CouponDiscount::percentage(Decimal::from(101)).is_err());
        assert!(CouponDiscount::percentage(Decimal::from(-5)).is_err());
        assert!(CouponDiscount::fixed(Money::from_minor(0, BRL)).is_err());
        assert!(CouponDiscount::fixed(Money::from_minor(-1_00, BRL)).is_err());
    }

    #[test]
    fn negative_minimum_is_rejected() -> TestResult {
        let result = Coupon::new(
            "SAVE10",
            CouponDiscount::fixed(Money::from_minor(10_00, BRL))?,
            Money::from_minor(-1, BRL),
        );

        assert!(matches!(result, Err(CouponError::NegativeMinimum(_))));

        Ok(())
    }

    #[test]
    fn resolve_requires_exact_code() -> TestResult {
        let now = Timestamp::now();

        let resolved = Coupon::resolve("SAVE10", Some(fixed("SAVE10", 10_00, 0)?), now)?;
        assert_eq!(resolved.code(), "SAVE10");

        let result = Coupon::resolve("save10", Some(fixed("SAVE10", 10_00, 0)?), now);
        assert!(matches!(result, Err(CouponError::Invalid(code)) if code == "save10"));

        let result = Coupon::resolve("SAVE10", None, now);
        assert!(matches!(result, Err(CouponError::Invalid(_))));

        Ok(())
    }

    #[test]
    fn resolve_rejects_expired_coupons() -> TestResult {
        let now = Timestamp::now();
        let yesterday = now.checked_sub(SignedDuration::from_hours(24))?;
        let tomorrow = now.checked_add(SignedDuration::from_hours(24))?;

        let expired = fixed("OLD", 5_00, 0)?.with_expiry(yesterday);
        let valid = fixed("NEW", 5_00, 0)?.with_expiry(tomorrow);

        assert!(Coupon::resolve("OLD", Some(expired), now).is_err());
        assert!(Coupon::resolve("NEW", Some(valid), now).is_ok());

        Ok(())
    }

    #[test]
    fn percent_of_minor_overflow_returns_error() {
        let percent = Percentage::from(2.0);
        let result = percent_of_minor(&percent, i64::MAX);

        assert!(matches!(result, Err(CouponError::PercentConversion)));
    }
}
