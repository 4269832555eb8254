//! Checkout
//!
//! Orchestrates coupon lookup and order submission around the pricing engine: the engine
//! decides what a cart costs and whether an order can be placed, the collaborators only
//! answer questions and accept the result.

pub mod errors;
pub mod service;

pub use errors::CheckoutError;
pub use service::*;
