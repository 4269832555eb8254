//! Orders service.

use async_trait::async_trait;
use bistro::orders::Order;
use mockall::automock;
use tracing::info;

use crate::{
    domain::{
        accounts::Session,
        orders::models::{OrderPayload, OrderRecord, OrderReference, OrderTracking},
    },
    http::{ApiClient, ClientError},
};

/// [`OrdersService`] backed by the delivery API.
#[derive(Debug, Clone)]
pub struct HttpOrdersService {
    client: ApiClient,
}

impl HttpOrdersService {
    /// Use `client` for every request.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrdersService for HttpOrdersService {
    #[tracing::instrument(
        name = "orders.submit_order",
        skip(self, order, session),
        fields(order_id = %order.id(), user_id = %session.user.id),
        err
    )]
    async fn submit_order(
        &self,
        order: &Order<'static>,
        session: &Session,
    ) -> Result<OrderReference, ClientError> {
        let payload = OrderPayload::from(order);

        let record: OrderRecord = self
            .client
            .post(&["orders"], &payload, Some(&session.token))
            .await?;

        let reference = OrderReference::new(record.id);

        info!(reference = %reference, total = %payload.total, "order submitted");

        Ok(reference)
    }

    #[tracing::instrument(name = "orders.order_status", skip(self), fields(reference = %reference), err)]
    async fn order_status(&self, reference: &OrderReference) -> Result<OrderTracking, ClientError> {
        let record: OrderRecord = self.client.get(&["orders", reference.as_str()]).await?;

        Ok(OrderTracking::from(record))
    }
}

/// Order submission and tracking.
#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submit a placed order on behalf of the signed-in customer.
    async fn submit_order(
        &self,
        order: &Order<'static>,
        session: &Session,
    ) -> Result<OrderReference, ClientError>;

    /// Fetch the latest status of a submitted order.
    async fn order_status(&self, reference: &OrderReference) -> Result<OrderTracking, ClientError>;
}
