//! Line Items

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    ids::ProductId,
    pricing::{TotalPriceError, line_total},
    products::Product,
};

/// Errors raised when a line item is constructed from invalid input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LineItemError {
    /// The unit price was below zero.
    #[error("unit price {0} is negative")]
    NegativePrice(Decimal),

    /// Line items always carry at least one unit.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// A product and its quantity within a cart.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem<'a> {
    product_id: ProductId,
    name: String,
    unit_price: Money<'a, Currency>,
    quantity: u32,
}

impl<'a> LineItem<'a> {
    /// Creates a new line item.
    ///
    /// # Errors
    ///
    /// - [`LineItemError::NegativePrice`]: the unit price is below zero.
    /// - [`LineItemError::ZeroQuantity`]: the quantity is zero.
    pub fn new(
        product_id: impl Into<ProductId>,
        name: impl Into<String>,
        unit_price: Money<'a, Currency>,
        quantity: u32,
    ) -> Result<Self, LineItemError> {
        if unit_price.is_negative() {
            return Err(LineItemError::NegativePrice(*unit_price.amount()));
        }

        if quantity == 0 {
            return Err(LineItemError::ZeroQuantity);
        }

        Ok(Self {
            product_id: product_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        })
    }

    /// Creates a single unit line for a catalog product.
    ///
    /// # Errors
    ///
    /// Returns [`LineItemError::NegativePrice`] if the product is priced below zero.
    pub fn from_product(product: &Product<'a>) -> Result<Self, LineItemError> {
        Self::new(product.id.clone(), product.name.clone(), product.price, 1)
    }

    /// Catalog id of the product on this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Product name, as it was when the line was created.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price of a single unit.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Number of units, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity.
    ///
    /// # Errors
    ///
    /// Returns [`TotalPriceError::Overflow`] if the total does not fit in minor units.
    pub fn total(&self) -> Result<Money<'a, Currency>, TotalPriceError> {
        line_total(&self.unit_price, self.quantity)
    }

    /// Returns the line with its quantity shifted by `delta`, or `None` when nothing is left.
    ///
    /// Quantities saturate at `u32::MAX`.
    #[must_use]
    pub(crate) fn shifted(&self, delta: i64) -> Option<Self> {
        let quantity = i64::from(self.quantity).saturating_add(delta);

        if quantity <= 0 {
            return None;
        }

        Some(Self {
            quantity: u32::try_from(quantity).unwrap_or(u32::MAX),
            ..self.clone()
        })
    }
}
