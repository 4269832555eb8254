//! Account models.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use zeroize::Zeroize;

use crate::domain::accounts::AccountsError;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Bearer token issued by the API.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token for the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(**redacted**)")
    }
}

impl Drop for BearerToken {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Plain-text password, only held until it is sent.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Wrap a password.
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    fn len(&self) -> usize {
        self.0.chars().count()
    }
}

impl Serialize for Password {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

impl Drop for Password {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Login request.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    email: String,
    password: Password,
}

impl Credentials {
    /// Validate login input.
    ///
    /// # Errors
    ///
    /// Returns an [`AccountsError`] if the email is malformed or the password is too short.
    pub fn new(email: impl Into<String>, password: Password) -> Result<Self, AccountsError> {
        let email = validate_email(email.into())?;

        validate_password(&password)?;

        Ok(Self { email, password })
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Sign-up request.
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    name: String,
    email: String,
    password: Password,
}

impl Registration {
    /// Validate sign-up input.
    ///
    /// # Errors
    ///
    /// Returns an [`AccountsError`] if the name is blank, the email is malformed or the
    /// password is too short.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: Password,
    ) -> Result<Self, AccountsError> {
        let name = name.into().trim().to_string();

        if name.is_empty() {
            return Err(AccountsError::MissingName);
        }

        let email = validate_email(email.into())?;

        validate_password(&password)?;

        Ok(Self {
            name,
            email,
            password,
        })
    }

    /// Email address
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Signed-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    /// Account id
    #[serde(alias = "_id")]
    pub id: String,

    /// Display name
    pub name: String,

    /// Email address
    pub email: String,
}

/// Token and user returned by login or registration.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Token sent with authenticated requests
    pub token: BearerToken,

    /// Signed-in customer
    pub user: User,
}

fn validate_email(email: String) -> Result<String, AccountsError> {
    let email = email.trim().to_lowercase();

    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !email.contains(char::is_whitespace)
        });

    if well_formed {
        Ok(email)
    } else {
        Err(AccountsError::InvalidEmail(email))
    }
}

fn validate_password(password: &Password) -> Result<(), AccountsError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(AccountsError::PasswordTooShort {
            minimum: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}
