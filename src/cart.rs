//! Cart
//!
//! Carts are immutable values: every operation borrows the cart and returns the next one, so a
//! failed operation leaves the original untouched.

use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    coupons::{Coupon, CouponError, apply_coupon},
    ids::{ProductId, RestaurantId},
    items::{LineItem, LineItemError},
    pricing::{Quote, TotalPriceError, total_price},
    products::Product,
};

/// Errors related to cart construction, coupons or totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),

    /// The product could not become a line item.
    #[error(transparent)]
    LineItem(#[from] LineItemError),

    /// The coupon could not be applied.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// Errors bubbled up from total price calculation.
    #[error(transparent)]
    TotalPrice(#[from] TotalPriceError),
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart<'a> {
    restaurant: Option<RestaurantId>,
    items: SmallVec<[LineItem<'a>; 8]>,
    coupon: Option<Coupon<'a>>,
    currency: &'a Currency,
}

impl<'a> Cart<'a> {
    /// Create an empty cart.
    pub fn new(currency: &'a Currency) -> Self {
        Cart {
            restaurant: None,
            items: SmallVec::new(),
            coupon: None,
            currency,
        }
    }

    /// Create an empty cart for the selected restaurant.
    pub fn for_restaurant(restaurant: RestaurantId, currency: &'a Currency) -> Self {
        Cart {
            restaurant: Some(restaurant),
            ..Self::new(currency)
        }
    }

    /// Create a cart with the given lines. Lines for the same product are merged.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if a line is priced in another currency.
    pub fn with_items(
        items: impl IntoIterator<Item = LineItem<'a>>,
        currency: &'a Currency,
    ) -> Result<Self, CartError> {
        items
            .into_iter()
            .try_fold(Self::new(currency), |cart, item| cart.add_line(item))
    }

    /// Add one unit of a product.
    ///
    /// Adding a product already in the cart increments that line instead of adding a second one.
    ///
    /// # Errors
    ///
    /// - [`CartError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CartError::LineItem`]: the product has a negative price.
    pub fn add_item(&self, product: &Product<'a>) -> Result<Self, CartError> {
        self.add_line(LineItem::from_product(product)?)
    }

    /// Add a line, merging its quantity into an existing line for the same product.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the line is priced in another currency.
    pub fn add_line(&self, item: LineItem<'a>) -> Result<Self, CartError> {
        let item_currency = item.unit_price().currency();

        if item_currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                item.product_id().clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let mut next = self.clone();

        match next.position(item.product_id()) {
            Some(idx) => {
                let delta = i64::from(item.quantity());

                next.items = self
                    .items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, line)| if i == idx { line.shifted(delta) } else { Some(line.clone()) })
                    .collect();
            }
            None => next.items.push(item),
        }

        Ok(next)
    }

    /// Shift a product's quantity by `delta`.
    ///
    /// A line whose quantity drops to zero or below is removed; an unknown product is a no-op.
    #[must_use]
    pub fn update_quantity(&self, product: &ProductId, delta: i64) -> Self {
        Cart {
            items: self
                .items
                .iter()
                .filter_map(|line| {
                    if line.product_id() == product {
                        line.shifted(delta)
                    } else {
                        Some(line.clone())
                    }
                })
                .collect(),
            ..self.clone()
        }
    }

    /// Remove a product's line entirely.
    #[must_use]
    pub fn remove_item(&self, product: &ProductId) -> Self {
        Cart {
            items: self
                .items
                .iter()
                .filter(|line| line.product_id() != product)
                .cloned()
                .collect(),
            ..self.clone()
        }
    }

    /// Validate a coupon against the current subtotal and attach it, replacing any other.
    ///
    /// # Errors
    ///
    /// - [`CartError::Coupon`]: the subtotal is below the coupon minimum or currencies differ.
    /// - [`CartError::TotalPrice`]: the subtotal could not be calculated.
    pub fn apply_coupon(&self, coupon: Coupon<'a>) -> Result<Self, CartError> {
        apply_coupon(self.subtotal()?, &coupon)?;

        Ok(Cart {
            coupon: Some(coupon),
            ..self.clone()
        })
    }

    /// Detach the applied coupon.
    #[must_use]
    pub fn remove_coupon(&self) -> Self {
        Cart {
            coupon: None,
            ..self.clone()
        }
    }

    /// An empty cart for the same restaurant and currency.
    #[must_use]
    pub fn clear(&self) -> Self {
        Cart {
            restaurant: self.restaurant.clone(),
            ..Self::new(self.currency)
        }
    }

    /// Calculate the subtotal of the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`TotalPriceError`] if a line total overflows.
    pub fn subtotal(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        total_price(&self.items, self.currency)
    }

    /// Discount granted by the applied coupon against the current subtotal, zero without one.
    ///
    /// # Errors
    ///
    /// - [`CartError::Coupon`]: edits dropped the subtotal below the coupon minimum.
    /// - [`CartError::TotalPrice`]: the subtotal could not be calculated.
    pub fn discount(&self) -> Result<Money<'a, Currency>, CartError> {
        let subtotal = self.subtotal()?;

        match &self.coupon {
            Some(coupon) => Ok(apply_coupon(subtotal, coupon)?),
            None => Ok(Money::from_minor(0, self.currency)),
        }
    }

    /// Price the cart with the given delivery fee.
    ///
    /// # Errors
    ///
    /// - [`CartError::Coupon`]: the applied coupon is no longer eligible.
    /// - [`CartError::TotalPrice`]: the totals could not be calculated.
    pub fn quote(&self, delivery_fee: Money<'a, Currency>) -> Result<Quote<'a>, CartError> {
        Ok(Quote::new(self.subtotal()?, delivery_fee, self.discount()?)?)
    }

    /// Iterate over the lines in the cart.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem<'a>> {
        self.items.iter()
    }

    /// Lines in the cart.
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// The line for a product, if present.
    pub fn line(&self, product: &ProductId) -> Option<&LineItem<'a>> {
        self.items.iter().find(|line| line.product_id() == product)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The applied coupon.
    pub fn coupon(&self) -> Option<&Coupon<'a>> {
        self.coupon.as_ref()
    }

    /// The restaurant this cart orders from.
    pub fn restaurant(&self) -> Option<&RestaurantId> {
        self.restaurant.as_ref()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    fn position(&self, product: &ProductId) -> Option<usize> {
        self.items.iter().position(|line| line.product_id() == product)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::{BRL, USD};
    use testresult::TestResult;

    use crate::coupons::CouponDiscount;

    use super::*;

    fn whopper() -> Product<'static> {
        Product::new("whopper", "Whopper", Money::from_minor(25_90, BRL))
    }

    fn fries() -> Product<'static> {
        Product::new("fries", "Fries", Money::from_minor(12_50, BRL))
    }

    fn save10() -> Result<Coupon<'static>, CouponError> {
        Coupon::new(
            "SAVE10",
            CouponDiscount::fixed(Money::from_minor(10_00, BRL))?,
            Money::from_minor(20_00, BRL),
        )
    }

    #[test]
    fn new_cart_is_empty() -> TestResult {
        let cart = Cart::new(BRL);

        assert!(cart.is_empty());
        assert_eq!(cart.currency(), BRL);
        assert_eq!(cart.subtotal()?, Money::from_minor(0, BRL));

        Ok(())
    }

    #[test]
    fn adding_same_product_twice_increments_quantity() -> TestResult {
        let cart = Cart::new(BRL).add_item(&whopper())?.add_item(&whopper())?;

        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.line(&ProductId::from("whopper")).map(LineItem::quantity),
            Some(2)
        );

        Ok(())
    }

    #[test]
    fn add_item_leaves_original_untouched() -> TestResult {
        let empty = Cart::new(BRL);
        let cart = empty.add_item(&whopper())?;

        assert!(empty.is_empty());
        assert_eq!(cart.len(), 1);

        Ok(())
    }

    #[test]
    fn add_item_currency_mismatch_errors() {
        let product = Product::new("burger", "Burger", Money::from_minor(5_00, USD));

        let result = Cart::new(BRL).add_item(&product);

        match result {
            Err(CartError::CurrencyMismatch(product, item_currency, cart_currency)) => {
                assert_eq!(product, ProductId::from("burger"));
                assert_eq!(item_currency, USD.iso_alpha_code);
                assert_eq!(cart_currency, BRL.iso_alpha_code);
            }
            other => panic!("expected CurrencyMismatch error, got {other:?}"),
        }
    }

    #[test]
    fn with_items_merges_duplicate_products() -> TestResult {
        let cart = Cart::with_items(
            [
                LineItem::new("whopper", "Whopper", Money::from_minor(25_90, BRL), 1)?,
                LineItem::new("fries", "Fries", Money::from_minor(12_50, BRL), 1)?,
                LineItem::new("whopper", "Whopper", Money::from_minor(25_90, BRL), 2)?,
            ],
            BRL,
        )?;

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 4);

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_only_that_line() -> TestResult {
        let cart = Cart::new(BRL)
            .add_item(&whopper())?
            .add_item(&whopper())?
            .add_item(&fries())?;

        let updated = cart.update_quantity(&ProductId::from("whopper"), -2);

        assert!(updated.line(&ProductId::from("whopper")).is_none());
        assert_eq!(Some(updated.items()), cart.items().get(1..));

        Ok(())
    }

    #[test]
    fn update_quantity_increments_and_decrements() -> TestResult {
        let id = ProductId::from("whopper");
        let cart = Cart::new(BRL).add_item(&whopper())?;

        let cart = cart.update_quantity(&id, 3);
        assert_eq!(cart.line(&id).map(LineItem::quantity), Some(4));

        let cart = cart.update_quantity(&id, -1);
        assert_eq!(cart.line(&id).map(LineItem::quantity), Some(3));

        let cart = cart.update_quantity(&id, -10);
        assert!(cart.is_empty());

        Ok(())
    }

    #[test]
    fn update_quantity_for_unknown_product_is_noop() -> TestResult {
        let cart = Cart::new(BRL).add_item(&whopper())?;

        let updated = cart.update_quantity(&ProductId::from("missing"), -1);

        assert_eq!(updated.items(), cart.items());

        Ok(())
    }

    #[test]
    fn remove_item_drops_the_line() -> TestResult {
        let cart = Cart::new(BRL).add_item(&whopper())?.add_item(&fries())?;

        let cart = cart.remove_item(&ProductId::from("fries"));

        assert_eq!(cart.len(), 1);
        assert!(cart.line(&ProductId::from("fries")).is_none());

        Ok(())
    }

    #[test]
    fn subtotal_sums_price_times_quantity() -> TestResult {
        let cart = Cart::new(BRL)
            .add_item(&whopper())?
            .add_item(&whopper())?
            .add_item(&fries())?;

        assert_eq!(cart.subtotal()?, Money::from_minor(64_30, BRL));
        assert_eq!(cart.item_count(), 3);

        Ok(())
    }

    #[test]
    fn apply_coupon_replaces_previous_coupon() -> TestResult {
        let cart = Cart::new(BRL).add_item(&whopper())?.add_item(&fries())?;

        let percent = Coupon::new(
            "TENOFF",
            CouponDiscount::percentage(Decimal::TEN)?,
            Money::from_minor(0, BRL),
        )?;

        let cart = cart.apply_coupon(save10()?)?.apply_coupon(percent)?;

        assert_eq!(cart.coupon().map(Coupon::code), Some("TENOFF"));
        assert_eq!(cart.discount()?, Money::from_minor(3_84, BRL));

        Ok(())
    }

    #[test]
    fn ineligible_coupon_is_not_attached() -> TestResult {
        let cart = Cart::new(BRL).add_item(&fries())?;

        let result = cart.apply_coupon(save10()?);

        assert!(matches!(
            result,
            Err(CartError::Coupon(CouponError::Ineligible { .. }))
        ));
        assert!(cart.coupon().is_none());

        Ok(())
    }

    #[test]
    fn quote_rechecks_coupon_after_edits() -> TestResult {
        let cart = Cart::new(BRL)
            .add_item(&whopper())?
            .apply_coupon(save10()?)?
            .update_quantity(&ProductId::from("whopper"), -1)
            .add_item(&fries())?;

        let result = cart.quote(Money::from_minor(5_99, BRL));

        assert!(matches!(
            result,
            Err(CartError::Coupon(CouponError::Ineligible { .. }))
        ));

        let quote = cart.remove_coupon().quote(Money::from_minor(5_99, BRL))?;
        assert_eq!(quote.total(), Money::from_minor(18_49, BRL));

        Ok(())
    }

    #[test]
    fn clear_keeps_restaurant_and_currency() -> TestResult {
        let cart = Cart::for_restaurant(RestaurantId::from("bk"), BRL)
            .add_item(&whopper())?
            .apply_coupon(save10()?)?;

        let cleared = cart.clear();

        assert!(cleared.is_empty());
        assert!(cleared.coupon().is_none());
        assert_eq!(cleared.restaurant(), Some(&RestaurantId::from("bk")));
        assert_eq!(cleared.currency(), BRL);

        Ok(())
    }
}
