//! Orders
//!
//! An order is the frozen result of checking out a cart: it owns copies of the cart's lines and
//! the quote computed at placement. Only its status changes afterwards, and only along the
//! lifecycle in [`OrderStatus`].

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cart::{Cart, CartError},
    ids::{OrderId, RestaurantId},
    items::LineItem,
    pricing::Quote,
    restaurants::DeliveryWindow,
};

mod status;
mod tracking;

pub use status::{LifecycleError, OrderStatus};
pub use tracking::{TrackingStep, eta_display, minutes_until, partition_orders};

/// Errors raised while building a delivery address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    /// The street was blank.
    #[error("street is required")]
    MissingStreet,

    /// The house number was blank.
    #[error("number is required")]
    MissingNumber,
}

/// Delivery address chosen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    street: String,
    number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    state: Option<String>,
}

impl Address {
    /// Create an address from its required parts.
    ///
    /// # Errors
    ///
    /// Returns an [`AddressError`] if the street or number is blank.
    pub fn new(street: impl Into<String>, number: impl Into<String>) -> Result<Self, AddressError> {
        let street = street.into().trim().to_string();
        let number = number.into().trim().to_string();

        if street.is_empty() {
            return Err(AddressError::MissingStreet);
        }

        if number.is_empty() {
            return Err(AddressError::MissingNumber);
        }

        Ok(Self {
            label: None,
            street,
            number,
            district: None,
            city: None,
            state: None,
        })
    }

    /// Name the address, e.g. "Home".
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the district.
    #[must_use]
    pub fn with_district(mut self, district: impl Into<String>) -> Self {
        self.district = Some(district.into());
        self
    }

    /// Set the city and state.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>, state: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self.state = Some(state.into());
        self
    }

    /// Label, if any
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Street name
    pub fn street(&self) -> &str {
        &self.street
    }

    /// House number
    pub fn number(&self) -> &str {
        &self.number
    }

    /// District, if any
    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    /// City, if any
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    /// State, if any
    pub fn state(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.street, self.number)?;

        if let Some(district) = &self.district {
            write!(f, " - {district}")?;
        }

        match (&self.city, &self.state) {
            (Some(city), Some(state)) => write!(f, ", {city} - {state}"),
            (Some(city), None) => write!(f, ", {city}"),
            _ => Ok(()),
        }
    }
}

/// Errors parsing a payment method.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method {0:?}")]
pub struct UnknownPaymentMethod(pub String);

/// How the customer pays on delivery or online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Credit card
    #[default]
    CreditCard,

    /// Debit card
    DebitCard,

    /// Cash on delivery
    Cash,

    /// PIX instant transfer
    Pix,
}

impl PaymentMethod {
    /// All payment methods in display order.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CreditCard,
        PaymentMethod::DebitCard,
        PaymentMethod::Cash,
        PaymentMethod::Pix,
    ];

    /// Wire name, e.g. `credit_card`.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::DebitCard => "debit_card",
            PaymentMethod::Cash => "cash",
            PaymentMethod::Pix => "pix",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| UnknownPaymentMethod(s.to_string()))
    }
}

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum PlaceOrderError {
    /// The cart has no lines.
    #[error("cannot place an order for an empty cart")]
    EmptyCart,

    /// No delivery address was selected.
    #[error("a delivery address is required")]
    MissingAddress,

    /// The cart could not be priced (coupon no longer eligible, money errors).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The estimated delivery time is out of range.
    #[error(transparent)]
    Timestamp(#[from] jiff::Error),
}

/// Checkout choices that are not part of the cart.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    /// Selected delivery address
    pub address: Option<Address>,

    /// Selected payment method
    pub payment_method: PaymentMethod,

    /// Placement time
    pub placed_at: Timestamp,

    /// Restaurant's advertised delivery window, used for the delivery estimate
    pub delivery_window: Option<DeliveryWindow>,
}

impl OrderRequest {
    /// Request placed at `placed_at`, with no address and the default payment method.
    pub fn new(placed_at: Timestamp) -> Self {
        Self {
            address: None,
            payment_method: PaymentMethod::default(),
            placed_at,
            delivery_window: None,
        }
    }

    /// Select the delivery address.
    #[must_use]
    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    /// Select the payment method.
    #[must_use]
    pub fn with_payment_method(mut self, payment_method: PaymentMethod) -> Self {
        self.payment_method = payment_method;
        self
    }

    /// Estimate delivery from the restaurant's window.
    #[must_use]
    pub fn with_delivery_window(mut self, window: DeliveryWindow) -> Self {
        self.delivery_window = Some(window);
        self
    }
}

/// Order
#[derive(Debug, Clone)]
pub struct Order<'a> {
    id: OrderId,
    restaurant_id: Option<RestaurantId>,
    items: Vec<LineItem<'a>>,
    address: Address,
    payment_method: PaymentMethod,
    coupon_code: Option<String>,
    quote: Quote<'a>,
    status: OrderStatus,
    created_at: Timestamp,
    estimated_delivery_time: Option<Timestamp>,
}

impl<'a> Order<'a> {
    /// Order id, generated at placement
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Restaurant the order was placed with
    pub fn restaurant_id(&self) -> Option<&RestaurantId> {
        self.restaurant_id.as_ref()
    }

    /// Line snapshots taken at placement
    pub fn items(&self) -> &[LineItem<'a>] {
        &self.items
    }

    /// Delivery address
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Payment method
    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// Code of the coupon that granted the discount, if any
    pub fn coupon_code(&self) -> Option<&str> {
        self.coupon_code.as_deref()
    }

    /// Totals computed at placement
    pub fn quote(&self) -> &Quote<'a> {
        &self.quote
    }

    /// Sum of all line totals
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.quote.subtotal()
    }

    /// Delivery fee
    pub fn delivery_fee(&self) -> Money<'a, Currency> {
        self.quote.delivery_fee()
    }

    /// Coupon discount
    pub fn discount(&self) -> Money<'a, Currency> {
        self.quote.discount()
    }

    /// Amount charged
    pub fn total(&self) -> Money<'a, Currency> {
        self.quote.total()
    }

    /// Current status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Placement time
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Estimated delivery time, if the restaurant advertised one
    pub fn estimated_delivery_time(&self) -> Option<Timestamp> {
        self.estimated_delivery_time
    }

    /// Total number of units ordered.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity())).sum()
    }

    /// Minutes left until the estimated delivery time, never negative.
    pub fn eta_minutes(&self, now: Timestamp) -> Option<u64> {
        self.estimated_delivery_time
            .map(|eta| minutes_until(eta, now))
    }

    /// Tracking progress reached by the current status.
    pub fn tracking_step(&self) -> Option<TrackingStep> {
        self.status.tracking_step()
    }

    /// Apply a status change reported by the restaurant or courier.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::InvalidTransition`] if the change is not a legal lifecycle
    /// step; the order keeps its current status.
    pub fn transition_status(&mut self, next: OrderStatus) -> Result<(), LifecycleError> {
        self.status = self.status.transition(next)?;

        Ok(())
    }
}

/// Freeze a cart into a pending order.
///
/// The cart is only borrowed; callers clear it once the order has been submitted.
///
/// # Errors
///
/// - [`PlaceOrderError::EmptyCart`]: the cart has no lines, checked before anything else.
/// - [`PlaceOrderError::MissingAddress`]: no address was selected.
/// - [`PlaceOrderError::Cart`]: the applied coupon is no longer eligible, or the amounts are in
///   different currencies.
/// - [`PlaceOrderError::Timestamp`]: the delivery estimate is out of range.
pub fn place_order<'a>(
    cart: &Cart<'a>,
    delivery_fee: Money<'a, Currency>,
    request: OrderRequest,
) -> Result<Order<'a>, PlaceOrderError> {
    if cart.is_empty() {
        return Err(PlaceOrderError::EmptyCart);
    }

    let address = request.address.ok_or(PlaceOrderError::MissingAddress)?;

    let quote = cart.quote(delivery_fee)?;

    let estimated_delivery_time = request
        .delivery_window
        .map(|window| request.placed_at.checked_add(window.upper_bound()))
        .transpose()?;

    Ok(Order {
        id: OrderId::generate(),
        restaurant_id: cart.restaurant().cloned(),
        items: cart.items().to_vec(),
        address,
        payment_method: request.payment_method,
        coupon_code: cart.coupon().map(|coupon| coupon.code().to_string()),
        quote,
        status: OrderStatus::Pending,
        created_at: request.placed_at,
        estimated_delivery_time,
    })
}
