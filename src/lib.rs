//! Bistro
//!
//! Bistro is the order pricing and lifecycle engine behind a food delivery client: cart
//! aggregation, coupon discounts, order totals and the order status state machine.

pub mod cart;
pub mod coupons;
pub mod fixtures;
pub mod ids;
pub mod items;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod restaurants;
