//! Accounts service errors.

use reqwest::StatusCode;
use thiserror::Error;

use crate::http::ClientError;

/// Login and sign-up failures.
#[derive(Debug, Error)]
pub enum AccountsError {
    /// Sign-up without a name.
    #[error("name is required")]
    MissingName,

    /// The email address is malformed.
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),

    /// The password is shorter than the minimum.
    #[error("password must have at least {minimum} characters")]
    PasswordTooShort {
        /// Required length in characters
        minimum: usize,
    },

    /// The API refused the email and password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The API refused the request with a message, e.g. a taken email.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The request failed for any other reason.
    #[error("accounts request failed")]
    Client(#[source] ClientError),
}

impl From<ClientError> for AccountsError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::UnexpectedResponse { status, .. } if status == StatusCode::UNAUTHORIZED => {
                Self::InvalidCredentials
            }
            ClientError::UnexpectedResponse { status, message }
                if status == StatusCode::BAD_REQUEST || status == StatusCode::CONFLICT =>
            {
                Self::Rejected(message)
            }
            error => Self::Client(error),
        }
    }
}
