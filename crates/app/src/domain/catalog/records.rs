//! Catalog Records

use bistro::{
    ids::{ProductId, RestaurantId},
    pricing::round_to_cents,
    products::Product,
    restaurants::{DeliveryWindow, Restaurant},
};
use rust_decimal::Decimal;
use rusty_money::{Money, iso};
use serde::Deserialize;
use tracing::warn;

use crate::http::ClientError;

/// Restaurant as returned by `GET /restaurants`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantRecord {
    /// Server id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Cuisine, empty when unset
    #[serde(default)]
    pub category: String,

    /// Free-text window such as "30-45 min"
    #[serde(default)]
    pub delivery_time: Option<String>,

    /// Fee in reais
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub delivery_fee: Option<Decimal>,

    /// Average rating
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub rating: Option<Decimal>,

    /// Whether orders are accepted
    #[serde(default = "open")]
    pub is_open: bool,

    /// Image url
    #[serde(default)]
    pub image: Option<String>,
}

/// Product as returned by `GET /restaurants/{id}/products`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Server id
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price in reais
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Menu section
    #[serde(default)]
    pub category: Option<String>,

    /// Image url
    #[serde(default)]
    pub image: Option<String>,
}

fn open() -> bool {
    true
}

/// Convert an API amount into reais, rejecting negatives and rounding half-centavos up.
pub(crate) fn brl(amount: Decimal) -> Result<Money<'static, iso::Currency>, ClientError> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(ClientError::Decode(format!("negative amount: {amount}")));
    }

    Ok(round_to_cents(amount, iso::BRL))
}

impl TryFrom<RestaurantRecord> for Restaurant<'static> {
    type Error = ClientError;

    fn try_from(record: RestaurantRecord) -> Result<Self, Self::Error> {
        // The reference API sends free-form text here, so a bad window is not fatal.
        let delivery_window = record.delivery_time.as_deref().and_then(|text| {
            text.parse::<DeliveryWindow>()
                .inspect_err(|error| warn!(restaurant = %record.id, %error, "ignoring delivery time"))
                .ok()
        });

        Ok(Restaurant {
            delivery_fee: brl(record.delivery_fee.unwrap_or_default())?,
            id: RestaurantId::new(record.id),
            name: record.name,
            category: record.category,
            delivery_window,
            rating: record.rating,
            is_open: record.is_open,
            image: record.image,
        })
    }
}

impl TryFrom<ProductRecord> for Product<'static> {
    type Error = ClientError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId::new(record.id),
            name: record.name,
            price: brl(record.price)?,
            category: record.category,
            image: record.image,
        })
    }
}
