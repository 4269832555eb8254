//! Accounts

pub mod errors;
pub mod models;
pub mod service;

pub use errors::AccountsError;
pub use models::{BearerToken, Credentials, Password, Registration, Session, User};
pub use service::*;
