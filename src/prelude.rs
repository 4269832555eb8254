//! Bistro prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError},
    coupons::{Coupon, CouponDiscount, CouponError, apply_coupon},
    fixtures::{Fixture, FixtureError},
    ids::{OrderId, ProductId, RestaurantId},
    items::{LineItem, LineItemError},
    orders::{
        Address, AddressError, LifecycleError, Order, OrderRequest, OrderStatus, PaymentMethod,
        PlaceOrderError, TrackingStep, UnknownPaymentMethod, eta_display, minutes_until,
        partition_orders, place_order,
    },
    pricing::{Quote, TotalPriceError, compute_total, format_amount, total_price},
    products::{Product, categories, in_category},
    receipt::{Receipt, ReceiptError, ReceiptLine},
    restaurants::{DeliveryWindow, DeliveryWindowError, Restaurant},
};
