//! Checkout service.

use std::sync::Arc;

use bistro::{
    cart::Cart,
    coupons::{Coupon, CouponError},
    orders::{Order, OrderRequest, place_order},
    pricing::format_amount,
};
use jiff::Timestamp;
use rusty_money::{Money, iso::Currency};
use tracing::{info, warn};

use crate::{
    checkout::errors::CheckoutError,
    domain::{
        accounts::Session,
        coupons::CouponsService,
        orders::{OrderReference, OrdersService},
    },
};

/// An order the API has accepted.
#[derive(Debug)]
pub struct PlacedOrder {
    /// Order snapshot as priced at checkout
    pub order: Order<'static>,

    /// Server reference for tracking
    pub reference: OrderReference,

    /// The emptied cart to continue shopping with
    pub cart: Cart<'static>,
}

/// Applies coupons and submits orders through the API collaborators.
#[derive(Clone)]
pub struct CheckoutService {
    coupons: Arc<dyn CouponsService>,
    orders: Arc<dyn OrdersService>,
}

impl CheckoutService {
    /// Build a checkout over the given services.
    #[must_use]
    pub fn new(coupons: Arc<dyn CouponsService>, orders: Arc<dyn OrdersService>) -> Self {
        Self { coupons, orders }
    }

    /// Look up `code` and attach the coupon to a copy of `cart`.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::Coupon`]: the code is blank, unknown, a case variant, or expired.
    /// - [`CheckoutError::Cart`]: the cart does not reach the coupon minimum.
    /// - [`CheckoutError::NetworkFailure`]: the lookup failed.
    #[tracing::instrument(name = "checkout.apply_coupon_code", skip(self, cart), fields(items = cart.len()), err)]
    pub async fn apply_coupon_code(
        &self,
        cart: &Cart<'static>,
        code: &str,
        now: Timestamp,
    ) -> Result<Cart<'static>, CheckoutError> {
        let code = code.trim();

        if code.is_empty() {
            return Err(CouponError::Invalid(code.to_string()).into());
        }

        let found = self
            .coupons
            .lookup_coupon(code)
            .await
            .map_err(CheckoutError::NetworkFailure)?;

        let coupon = Coupon::resolve(code, found, now)?;

        let cart = cart.apply_coupon(coupon)?;

        info!(discount = %format_amount(&cart.discount()?), "coupon applied");

        Ok(cart)
    }

    /// Place an order for `cart` and submit it for `session`.
    ///
    /// The returned cart is empty; on any error the caller's cart is untouched.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::PlaceOrder`]: the cart is empty, no address was given, or the
    ///   applied coupon stopped being eligible.
    /// - [`CheckoutError::NetworkFailure`]: the submission failed.
    #[tracing::instrument(
        name = "checkout.place_order",
        skip(self, cart, delivery_fee, request, session),
        fields(items = cart.len(), user_id = %session.user.id),
        err
    )]
    pub async fn place_order(
        &self,
        cart: &Cart<'static>,
        delivery_fee: Money<'static, Currency>,
        request: OrderRequest,
        session: &Session,
    ) -> Result<PlacedOrder, CheckoutError> {
        let order = place_order(cart, delivery_fee, request)?;

        let reference = self
            .orders
            .submit_order(&order, session)
            .await
            .inspect_err(|error| warn!(order_id = %order.id(), %error, "order submission failed"))
            .map_err(CheckoutError::NetworkFailure)?;

        info!(
            order_id = %order.id(),
            reference = %reference.short(),
            total = %format_amount(&order.total()),
            "order placed"
        );

        Ok(PlacedOrder {
            order,
            reference,
            cart: cart.clear(),
        })
    }
}
