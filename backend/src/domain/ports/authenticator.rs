//! Driving port for the signup/signin use-cases.
//!
//! Inbound adapters call this port without knowing which directory or hasher
//! backs it, so HTTP tests can wire an in-memory directory instead of a
//! database.

use async_trait::async_trait;

use crate::domain::{AuthCredentials, AuthError, EmailAddress, User, UserId};

/// Domain use-case port for account creation and authentication.
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create an account, failing with [`AuthError::DuplicateEmail`] if the
    /// email is taken.
    async fn signup(&self, credentials: &AuthCredentials) -> Result<User, AuthError>;

    /// Authenticate an existing account.
    async fn signin(&self, credentials: &AuthCredentials) -> Result<User, AuthError>;

    /// Load a user by id, failing with [`AuthError::NotFound`] if absent.
    async fn find_user(&self, id: UserId) -> Result<User, AuthError>;

    /// List users registered under `email`.
    async fn users_by_email(&self, email: &EmailAddress) -> Result<Vec<User>, AuthError>;
}
