//! Auth Config

use clap::Args;

/// Account used for authenticated requests.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Account email
    #[arg(long, global = true, env = "BISTRO_EMAIL")]
    pub email: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "BISTRO_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
