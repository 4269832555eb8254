//! Checkout errors.

use bistro::{cart::CartError, coupons::CouponError, orders::PlaceOrderError};
use thiserror::Error;

use crate::http::ClientError;

/// Checkout failures, split into input problems and API problems.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The coupon code was refused.
    #[error(transparent)]
    Coupon(#[from] CouponError),

    /// The cart could not take the coupon or be priced.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The order request was incomplete.
    #[error(transparent)]
    PlaceOrder(#[from] PlaceOrderError),

    /// The API failed or could not be reached.
    #[error("could not reach the delivery API")]
    NetworkFailure(#[source] ClientError),
}
