//! Prices

use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

use crate::items::LineItem;

/// Errors that can occur while calculating prices.
#[derive(Debug, Error, PartialEq)]
pub enum TotalPriceError {
    /// A line or running total no longer fits in minor units.
    #[error("price overflowed the representable range")]
    Overflow,

    /// The delivery fee is below zero.
    #[error("delivery fee {0} is negative")]
    NegativeDeliveryFee(Decimal),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculates `unit_price × quantity` in minor units.
///
/// # Errors
///
/// Returns [`TotalPriceError::Overflow`] if the product does not fit in an `i64` of minor units.
pub fn line_total<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(TotalPriceError::Overflow)?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Calculates the total price of a list of line items
///
/// An empty list totals zero in the given currency.
///
/// # Errors
///
/// - [`TotalPriceError::Overflow`]: a line total or the running sum overflowed.
/// - [`TotalPriceError::Money`]: an item is priced in a different currency.
pub fn total_price<'a>(
    items: &[LineItem<'a>],
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    items
        .iter()
        .try_fold(
            Money::from_minor(0, currency),
            |acc, item| -> Result<_, TotalPriceError> { Ok(acc.add(item.total()?)?) },
        )
}

/// Calculates `subtotal + delivery_fee - discount`, floored at zero.
///
/// # Errors
///
/// - [`TotalPriceError::NegativeDeliveryFee`]: the delivery fee is below zero.
/// - [`TotalPriceError::Money`]: the amounts are in different currencies.
pub fn compute_total<'a>(
    subtotal: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    discount: Money<'a, Currency>,
) -> Result<Money<'a, Currency>, TotalPriceError> {
    if delivery_fee.is_negative() {
        return Err(TotalPriceError::NegativeDeliveryFee(*delivery_fee.amount()));
    }

    let total = subtotal.add(delivery_fee)?.sub(discount)?;

    if total.is_negative() {
        return Ok(Money::from_minor(0, subtotal.currency()));
    }

    Ok(total)
}

/// Rounds `amount` to whole cents, halves away from zero.
pub fn round_to_cents(amount: Decimal, currency: &Currency) -> Money<'_, Currency> {
    Money::from_decimal(
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        currency,
    )
}

/// Formats an amount with its currency symbol and exactly two fraction digits, e.g. `R$ 64.30`.
pub fn format_amount(money: &Money<'_, Currency>) -> String {
    let amount = round_to_cents(*money.amount(), money.currency());

    format!("{} {:.2}", money.currency().symbol, amount.amount())
}

/// Priced view of a cart: subtotal, delivery fee, discount and total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote<'a> {
    subtotal: Money<'a, Currency>,
    delivery_fee: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> Quote<'a> {
    /// Create a quote, deriving the total.
    ///
    /// # Errors
    ///
    /// - [`TotalPriceError::NegativeDeliveryFee`]: the delivery fee is below zero.
    /// - [`TotalPriceError::Money`]: the amounts are in different currencies.
    pub fn new(
        subtotal: Money<'a, Currency>,
        delivery_fee: Money<'a, Currency>,
        discount: Money<'a, Currency>,
    ) -> Result<Self, TotalPriceError> {
        Ok(Self {
            subtotal,
            delivery_fee,
            discount,
            total: compute_total(subtotal, delivery_fee, discount)?,
        })
    }

    /// Sum of all line totals
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Delivery fee charged by the restaurant
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.delivery_fee
    }

    /// Coupon discount, never more than the subtotal
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Amount to pay
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }
}
