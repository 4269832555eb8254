//! Catalog service.

use async_trait::async_trait;
use bistro::{ids::RestaurantId, products::Product, restaurants::Restaurant};
use mockall::automock;
use tracing::debug;

use crate::{
    domain::catalog::records::{ProductRecord, RestaurantRecord},
    http::{ApiClient, ClientError},
};

/// [`CatalogService`] backed by the delivery API.
#[derive(Debug, Clone)]
pub struct HttpCatalogService {
    client: ApiClient,
}

impl HttpCatalogService {
    /// Use `client` for every request.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogService for HttpCatalogService {
    #[tracing::instrument(name = "catalog.list_restaurants", skip(self), err)]
    async fn list_restaurants(&self) -> Result<Vec<Restaurant<'static>>, ClientError> {
        let records: Vec<RestaurantRecord> = self.client.get(&["restaurants"]).await?;

        debug!(count = records.len(), "fetched restaurants");

        records.into_iter().map(Restaurant::try_from).collect()
    }

    #[tracing::instrument(name = "catalog.list_products", skip(self), fields(restaurant = %restaurant), err)]
    async fn list_products(
        &self,
        restaurant: &RestaurantId,
    ) -> Result<Vec<Product<'static>>, ClientError> {
        let records: Vec<ProductRecord> = self
            .client
            .get(&["restaurants", restaurant.as_str(), "products"])
            .await?;

        debug!(count = records.len(), "fetched products");

        records.into_iter().map(Product::try_from).collect()
    }
}

/// Read access to restaurants and their menus.
#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List every restaurant in the catalog.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant<'static>>, ClientError>;

    /// List a restaurant's menu.
    async fn list_products(
        &self,
        restaurant: &RestaurantId,
    ) -> Result<Vec<Product<'static>>, ClientError>;
}
