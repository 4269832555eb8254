//! Bistro Domain Collaborators

pub mod accounts;
pub mod catalog;
pub mod coupons;
pub mod orders;
