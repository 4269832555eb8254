//! API Config

use clap::Args;

/// Delivery API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Base URL of the delivery API
    #[arg(
        long,
        global = true,
        env = "BISTRO_API_URL",
        default_value = "http://localhost:3000/api"
    )]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "BISTRO_API_TIMEOUT", default_value_t = 10)]
    pub api_timeout: u64,
}
