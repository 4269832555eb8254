//! Accounts service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    domain::accounts::{
        errors::AccountsError,
        models::{Credentials, Registration, Session},
    },
    http::ApiClient,
};

/// [`AccountsService`] backed by the delivery API.
#[derive(Debug, Clone)]
pub struct HttpAccountsService {
    client: ApiClient,
}

impl HttpAccountsService {
    /// Use `client` for every request.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AccountsService for HttpAccountsService {
    #[tracing::instrument(name = "accounts.login", skip(self, credentials), fields(email = %credentials.email()), err)]
    async fn login(&self, credentials: Credentials) -> Result<Session, AccountsError> {
        let session: Session = self.client.post(&["login"], &credentials, None).await?;

        info!(user_id = %session.user.id, "signed in");

        Ok(session)
    }

    #[tracing::instrument(name = "accounts.register", skip(self, registration), fields(email = %registration.email()), err)]
    async fn register(&self, registration: Registration) -> Result<Session, AccountsError> {
        let session: Session = self.client.post(&["register"], &registration, None).await?;

        info!(user_id = %session.user.id, "registered");

        Ok(session)
    }
}

/// Customer login and sign-up.
#[automock]
#[async_trait]
pub trait AccountsService: Send + Sync {
    /// Sign in with validated credentials.
    async fn login(&self, credentials: Credentials) -> Result<Session, AccountsError>;

    /// Create an account and sign in.
    async fn register(&self, registration: Registration) -> Result<Session, AccountsError>;
}
