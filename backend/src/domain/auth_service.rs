//! Signup and signin orchestration.
//!
//! The service implements the [`Authenticator`] driving port over a
//! [`UserDirectory`] and a [`CredentialHasher`]. Email uniqueness is checked
//! here with a read followed by a write; the pair is not atomic, so two
//! concurrent signups for the same email can both be admitted.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use super::ports::{Authenticator, CredentialHasher, UserDirectory};
use super::{AuthCredentials, AuthError, Credential, EmailAddress, User, UserId};

/// Authentication service wired over explicit directory and hasher ports.
#[derive(Clone)]
pub struct AuthService<D, H> {
    directory: Arc<D>,
    hasher: Arc<H>,
}

impl<D, H> AuthService<D, H> {
    /// Create a new service with the given adapters.
    pub fn new(directory: Arc<D>, hasher: Arc<H>) -> Self {
        Self { directory, hasher }
    }
}

#[async_trait]
impl<D, H> Authenticator for AuthService<D, H>
where
    D: UserDirectory,
    H: CredentialHasher,
{
    async fn signup(&self, credentials: &AuthCredentials) -> Result<User, AuthError> {
        let email = credentials.email();
        let existing = self.directory.find_by_email(email).await?;
        if !existing.is_empty() {
            debug!("signup rejected: email already registered");
            return Err(AuthError::DuplicateEmail);
        }

        let salt = self.hasher.generate_salt();
        let digest = self.hasher.hash(credentials.password(), &salt).await?;
        let credential = Credential::compose(salt, digest);

        let user = self.directory.create(email, &credential).await?;
        info!(user_id = %user.id(), "signup completed");
        Ok(user)
    }

    async fn signin(&self, credentials: &AuthCredentials) -> Result<User, AuthError> {
        let Some(user) = self
            .directory
            .find_by_email(credentials.email())
            .await?
            .into_iter()
            .next()
        else {
            return Err(AuthError::UnknownEmail);
        };

        if !self
            .hasher
            .verify(credentials.password(), user.credential())
            .await?
        {
            return Err(AuthError::InvalidPassword);
        }

        debug!(user_id = %user.id(), "signin succeeded");
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<User, AuthError> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or(AuthError::NotFound { id })
    }

    async fn users_by_email(&self, email: &EmailAddress) -> Result<Vec<User>, AuthError> {
        Ok(self.directory.find_by_email(email).await?)
    }
}
