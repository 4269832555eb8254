//! Bistro client application: API collaborators, checkout orchestration and configuration.

pub mod checkout;
pub mod config;
pub mod context;
pub mod domain;
pub mod http;
pub mod observability;
