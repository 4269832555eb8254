//! Orders

pub mod models;
pub mod service;

pub use models::{OrderPayload, OrderReference, OrderTracking};
pub use service::*;
