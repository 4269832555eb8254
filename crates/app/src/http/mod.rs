//! JSON API client shared by the HTTP collaborators.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::debug;

use crate::domain::accounts::BearerToken;

/// Errors that can occur when talking to the API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-2xx response.
    #[error("unexpected response from API ({status}): {message}")]
    UnexpectedResponse {
        /// Response status
        status: StatusCode,
        /// Error message from the body, or the raw body
        message: String,
    },

    /// The response body could not be turned into a domain value.
    #[error("invalid data from API: {0}")]
    Decode(String),

    /// The base url cannot carry path segments.
    #[error("invalid API url: {0}")]
    InvalidUrl(String),
}

/// HTTP client for the delivery API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    error: String,
}

impl ApiClient {
    /// Create a new client for the API rooted at `base_url`, e.g. `"http://localhost:3000/api"`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("bistro/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    /// API root
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `segments` below the base url. Each segment is percent-encoded, so `/`, `?`
    /// and `#` in caller input stay inside the segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|error| ClientError::InvalidUrl(format!("{}: {error}", self.base_url)))?;

        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// `GET` a JSON resource; a 404 yields `None`.
    pub(crate) async fn get_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<Option<T>, ClientError> {
        let url = self.url(segments)?;

        debug!(%url, "GET");

        let response = self.http.get(url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(decode(response).await?))
    }

    /// `GET` a JSON resource that must exist.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
    ) -> Result<T, ClientError> {
        let url = self.url(segments)?;

        debug!(%url, "GET");

        decode(self.http.get(url).send().await?).await
    }

    /// `POST` a JSON body, optionally authenticated with a bearer token.
    pub(crate) async fn post<B, T>(
        &self,
        segments: &[&str],
        body: &B,
        token: Option<&BearerToken>,
    ) -> Result<T, ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments)?;

        debug!(%url, authenticated = token.is_some(), "POST");

        let request = authorize(self.http.post(url).json(body), token);

        decode(request.send().await?).await
    }
}

fn authorize(request: RequestBuilder, token: Option<&BearerToken>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.expose()),
        None => request,
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();

    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&text).map_or(text, |body| body.error);

        return Err(ClientError::UnexpectedResponse { status, message });
    }

    Ok(response.json().await?)
}

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::{test_helpers::serve_once, *};

    #[test]
    fn url_joins_segments_without_double_slashes() -> TestResult {
        let client = ApiClient::new("http://localhost:3000/api/");

        assert_eq!(client.base_url(), "http://localhost:3000/api");
        assert_eq!(
            client.url(&["restaurants"])?.as_str(),
            "http://localhost:3000/api/restaurants"
        );
        assert_eq!(
            client.url(&["coupons", "validate", "SAVE10"])?.as_str(),
            "http://localhost:3000/api/coupons/validate/SAVE10"
        );

        Ok(())
    }

    #[test]
    fn url_keeps_reserved_characters_inside_the_segment() -> TestResult {
        let client = ApiClient::new("http://localhost:3000/api");

        let fragment = client.url(&["coupons", "validate", "SAVE#10"])?;
        assert_eq!(fragment.path(), "/api/coupons/validate/SAVE%2310");
        assert_eq!(fragment.fragment(), None);

        let query = client.url(&["coupons", "validate", "A?x=1"])?;
        assert_eq!(query.path(), "/api/coupons/validate/A%3Fx=1");
        assert_eq!(query.query(), None);

        let traversal = client.url(&["coupons", "validate", "SAVE10/../../../api/restaurants"])?;
        assert_eq!(
            traversal.path(),
            "/api/coupons/validate/SAVE10%2F..%2F..%2F..%2Fapi%2Frestaurants"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_is_an_http_error() {
        let client = ApiClient::new("http://127.0.0.1:9");

        let result = client.get::<serde_json::Value>(&["restaurants"]).await;

        assert!(matches!(result, Err(ClientError::Http(_))));
    }

    #[tokio::test]
    async fn get_optional_maps_not_found_to_none() -> TestResult {
        let client = ApiClient::new(serve_once(404, r#"{"error":"not found"}"#).await?);

        let result = client.get_optional::<serde_json::Value>(&["coupons", "validate", "X"]).await?;

        assert!(result.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn error_body_message_is_surfaced() -> TestResult {
        let client = ApiClient::new(serve_once(401, r#"{"error":"Credenciais inválidas"}"#).await?);

        let result = client.get::<serde_json::Value>(&["orders", "1"]).await;

        assert!(matches!(
            result,
            Err(ClientError::UnexpectedResponse { status, message })
                if status == StatusCode::UNAUTHORIZED && message == "Credenciais inválidas"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn server_errors_are_unexpected_responses() -> TestResult {
        let client = ApiClient::new(serve_once(503, "unavailable").await?);

        let result = client.get_optional::<serde_json::Value>(&["restaurants"]).await;

        assert!(matches!(
            result,
            Err(ClientError::UnexpectedResponse { status, message })
                if status == StatusCode::SERVICE_UNAVAILABLE && message == "unavailable"
        ));

        Ok(())
    }
}
