//! Order wire models.

use std::fmt;

use bistro::{
    items::LineItem,
    orders::{Address, Order, OrderStatus, PaymentMethod},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SHORT_REFERENCE_LEN: usize = 6;

/// Server-assigned order id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderReference(String);

impl OrderReference {
    /// Wrap a server id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Full id
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last six characters, as shown to customers (`#a1b2c3`).
    pub fn short(&self) -> String {
        let len = self.0.chars().count();

        self.0
            .chars()
            .skip(len.saturating_sub(SHORT_REFERENCE_LEN))
            .collect()
    }
}

impl fmt::Display for OrderReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Line of an [`OrderPayload`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemPayload {
    /// Catalog product id
    pub product_id: String,

    /// Product name at checkout
    pub name: String,

    /// Unit price in reais
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Units ordered
    pub quantity: u32,
}

impl From<&LineItem<'_>> for OrderItemPayload {
    fn from(item: &LineItem<'_>) -> Self {
        Self {
            product_id: item.product_id().to_string(),
            name: item.name().to_string(),
            price: *item.unit_price().amount(),
            quantity: item.quantity(),
        }
    }
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    /// Restaurant the items come from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<String>,

    /// Ordered lines
    pub items: Vec<OrderItemPayload>,

    /// Delivery address
    pub address: Address,

    /// How the customer pays
    pub payment_method: PaymentMethod,

    /// Coupon that granted a discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,

    /// Sum of line totals
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,

    /// Restaurant delivery fee
    #[serde(with = "rust_decimal::serde::float")]
    pub delivery_fee: Decimal,

    /// Coupon discount
    #[serde(with = "rust_decimal::serde::float")]
    pub discount: Decimal,

    /// Amount charged
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl From<&Order<'_>> for OrderPayload {
    fn from(order: &Order<'_>) -> Self {
        let discount = order.discount();

        Self {
            restaurant_id: order.restaurant_id().map(ToString::to_string),
            items: order.items().iter().map(OrderItemPayload::from).collect(),
            address: order.address().clone(),
            payment_method: order.payment_method(),
            // A coupon that ended up granting nothing is not reported.
            coupon_code: order
                .coupon_code()
                .filter(|_| !discount.is_zero())
                .map(ToString::to_string),
            subtotal: *order.subtotal().amount(),
            delivery_fee: *order.delivery_fee().amount(),
            discount: *discount.amount(),
            total: *order.total().amount(),
        }
    }
}

/// Order as returned by `POST /orders` and `GET /orders/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub estimated_delivery_time: Option<Timestamp>,
}

/// Latest known state of a submitted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTracking {
    /// Server id
    pub reference: OrderReference,

    /// Lifecycle status
    pub status: OrderStatus,

    /// Delivery estimate, if the server has one
    pub estimated_delivery_time: Option<Timestamp>,
}

impl From<OrderRecord> for OrderTracking {
    fn from(record: OrderRecord) -> Self {
        Self {
            reference: OrderReference::new(record.id),
            status: record.status,
            estimated_delivery_time: record.estimated_delivery_time,
        }
    }
}
