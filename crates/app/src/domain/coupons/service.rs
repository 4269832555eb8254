//! Coupons service.

use async_trait::async_trait;
use bistro::coupons::Coupon;
use mockall::automock;
use tracing::debug;

use crate::{
    domain::coupons::records::CouponRecord,
    http::{ApiClient, ClientError},
};

/// [`CouponsService`] backed by the delivery API.
#[derive(Debug, Clone)]
pub struct HttpCouponsService {
    client: ApiClient,
}

impl HttpCouponsService {
    /// Use `client` for every request.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CouponsService for HttpCouponsService {
    #[tracing::instrument(name = "coupons.lookup_coupon", skip(self), err)]
    async fn lookup_coupon(&self, code: &str) -> Result<Option<Coupon<'static>>, ClientError> {
        let record = match self
            .client
            .get_optional::<CouponRecord>(&["coupons", "validate", code])
            .await
        {
            // The reference API answers unknown or expired codes with a 4xx of its choosing.
            Err(ClientError::UnexpectedResponse { status, .. }) if status.is_client_error() => None,
            result => result?,
        };

        debug!(found = record.is_some(), "coupon lookup");

        record.map(|record| record.into_coupon(code)).transpose()
    }
}

/// Coupon code validation.
#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Look up a coupon by code; `None` when the API does not know it.
    async fn lookup_coupon(&self, code: &str) -> Result<Option<Coupon<'static>>, ClientError>;
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use testresult::TestResult;

    use crate::http::test_helpers::serve_once;

    use super::*;

    async fn lookup(status: u16, body: &'static str) -> TestResult<Result<Option<Coupon<'static>>, ClientError>> {
        let service = HttpCouponsService::new(ApiClient::new(serve_once(status, body).await?));

        Ok(service.lookup_coupon("SAVE10").await)
    }

    #[tokio::test]
    async fn known_code_becomes_a_coupon() -> TestResult {
        let coupon = lookup(200, r#"{"code":"SAVE10","discountType":"fixed","discountValue":10,"minOrder":20}"#)
            .await??;

        assert_eq!(coupon.map(|coupon| coupon.code().to_string()), Some("SAVE10".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn not_found_means_no_coupon() -> TestResult {
        assert!(lookup(404, r#"{"error":"Cupom não encontrado"}"#).await??.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn bad_request_means_no_coupon() -> TestResult {
        assert!(lookup(400, r#"{"error":"Cupom expirado"}"#).await??.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn server_error_is_propagated() -> TestResult {
        let result = lookup(503, r#"{"error":"indisponível"}"#).await?;

        assert!(matches!(
            result,
            Err(ClientError::UnexpectedResponse { status, .. }) if status == StatusCode::SERVICE_UNAVAILABLE
        ));

        Ok(())
    }
}
