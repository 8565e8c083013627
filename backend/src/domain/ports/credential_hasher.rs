//! Driven port for salted password hashing.

use async_trait::async_trait;

use crate::domain::{Credential, Password, PasswordDigest, Salt};

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential hasher adapters.
    pub enum HashingError {
        /// The key-derivation function rejected its inputs or parameters.
        Derivation { message: String } => "key derivation failed: {message}",
        /// The blocking worker running the derivation did not complete.
        Worker { message: String } => "hashing worker failed: {message}",
    }
}

/// Salted, one-way, deliberately slow password transform.
///
/// Implementations must not run the derivation on the async executor thread
/// that called them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce a fresh random salt.
    fn generate_salt(&self) -> Salt;

    /// Derive the fixed-length digest of `password` salted by `salt`.
    async fn hash(&self, password: &Password, salt: &Salt) -> Result<PasswordDigest, HashingError>;

    /// Recompute the digest with the credential's salt and compare it to the
    /// stored digest.
    ///
    /// The comparison is ordinary string equality, not constant time.
    async fn verify(
        &self,
        password: &Password,
        credential: &Credential,
    ) -> Result<bool, HashingError> {
        let digest = self.hash(password, credential.salt()).await?;
        Ok(&digest == credential.digest())
    }
}
