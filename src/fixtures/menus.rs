//! Menu Fixtures

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{BRL, Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    ids::RestaurantId,
    products::Product,
    restaurants::{DeliveryWindow, Restaurant},
};

/// A restaurant and its products
#[derive(Debug, Deserialize)]
pub struct MenuFixture {
    /// Restaurant details
    pub restaurant: RestaurantFixture,

    /// Products in menu order
    pub products: Vec<ProductFixture>,
}

/// Restaurant Fixture
#[derive(Debug, Deserialize)]
pub struct RestaurantFixture {
    /// Restaurant id
    pub id: String,

    /// Restaurant name
    pub name: String,

    /// Cuisine category
    #[serde(default)]
    pub category: String,

    /// Delivery fee (e.g., "5.99 BRL")
    pub delivery_fee: String,

    /// Advertised delivery time (e.g., "30-40 min")
    #[serde(default)]
    pub delivery_time: Option<String>,

    /// Average rating
    #[serde(default)]
    pub rating: Option<Decimal>,

    /// Whether the restaurant is taking orders
    #[serde(default = "default_open")]
    pub is_open: bool,
}

fn default_open() -> bool {
    true
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product key, also used as the product id
    pub id: String,

    /// Product name
    pub name: String,

    /// Product price (e.g., "25.90 BRL")
    pub price: String,

    /// Menu category
    #[serde(default)]
    pub category: Option<String>,
}

impl TryFrom<RestaurantFixture> for Restaurant<'_> {
    type Error = FixtureError;

    fn try_from(fixture: RestaurantFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.delivery_fee)?;

        let delivery_window = fixture
            .delivery_time
            .as_deref()
            .map(str::parse::<DeliveryWindow>)
            .transpose()?;

        Ok(Restaurant {
            id: RestaurantId::new(fixture.id),
            name: fixture.name,
            category: fixture.category,
            delivery_window,
            delivery_fee: Money::from_minor(minor_units, currency),
            rating: fixture.rating,
            is_open: fixture.is_open,
            image: None,
        })
    }
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let product = Product::new(fixture.id, fixture.name, Money::from_minor(minor_units, currency));

        Ok(match fixture.category {
            Some(category) => product.with_category(category),
            None => product,
        })
    }
}

/// Parse price string (e.g., "25.90 BRL") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is not a
/// decimal with at most two fraction digits, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(currency_code), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(FixtureError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    if amount.scale() > 2 {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|value| value.to_i64())
        .ok_or_else(|| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match currency_code {
        "BRL" => BRL,
        "USD" => USD,
        "EUR" => EUR,
        "GBP" => GBP,
        other => return Err(FixtureError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}
