//! App Context

use std::{sync::Arc, time::Duration};

use thiserror::Error;

use crate::{
    checkout::CheckoutService,
    config::api::ApiConfig,
    domain::{
        accounts::{AccountsService, HttpAccountsService},
        catalog::{CatalogService, HttpCatalogService},
        coupons::{CouponsService, HttpCouponsService},
        orders::{HttpOrdersService, OrdersService},
    },
    http::{ApiClient, ClientError},
};

/// Failures while wiring up the application.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The configured API url is malformed or cannot carry a path.
    #[error("invalid API url {url:?}: {reason}")]
    InvalidApiUrl {
        /// Url as configured
        url: String,

        /// Why it was refused
        reason: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client")]
    HttpClient(#[source] ClientError),
}

/// Services the CLI commands run against.
#[derive(Clone)]
pub struct AppContext {
    /// Restaurants and menus
    pub catalog: Arc<dyn CatalogService>,

    /// Order submission and tracking
    pub orders: Arc<dyn OrdersService>,

    /// Login and sign-up
    pub accounts: Arc<dyn AccountsService>,

    /// Coupon application and order placement
    pub checkout: CheckoutService,
}

impl AppContext {
    /// Build application context for the configured API.
    ///
    /// # Errors
    ///
    /// Returns an error when the API url is malformed or the HTTP client cannot be built.
    pub fn from_config(config: &ApiConfig) -> Result<Self, AppInitError> {
        let url = reqwest::Url::parse(&config.api_url).map_err(|error| AppInitError::InvalidApiUrl {
            url: config.api_url.clone(),
            reason: error.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(AppInitError::InvalidApiUrl {
                url: config.api_url.clone(),
                reason: "url cannot carry a path".to_string(),
            });
        }

        let client = ApiClient::with_timeout(&config.api_url, Duration::from_secs(config.api_timeout))
            .map_err(AppInitError::HttpClient)?;

        Ok(Self::from_services(
            Arc::new(HttpCatalogService::new(client.clone())),
            Arc::new(HttpCouponsService::new(client.clone())),
            Arc::new(HttpOrdersService::new(client.clone())),
            Arc::new(HttpAccountsService::new(client)),
        ))
    }

    /// Build application context from explicit collaborators.
    #[must_use]
    pub fn from_services(
        catalog: Arc<dyn CatalogService>,
        coupons: Arc<dyn CouponsService>,
        orders: Arc<dyn OrdersService>,
        accounts: Arc<dyn AccountsService>,
    ) -> Self {
        Self {
            checkout: CheckoutService::new(coupons, Arc::clone(&orders)),
            catalog,
            orders,
            accounts,
        }
    }
}
