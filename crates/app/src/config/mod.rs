//! Client configuration

use clap::Args;

use crate::config::{api::ApiConfig, auth::AuthConfig, observability::LoggingConfig};

pub mod api;
pub mod auth;
pub mod observability;

/// Settings shared by every `bistro` command.
#[derive(Debug, Args)]
pub struct ClientConfig {
    /// Delivery API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Account settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
