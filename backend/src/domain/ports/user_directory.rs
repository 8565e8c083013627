//! Driven port for user record storage.
//!
//! The directory only stores and finds users. It does not enforce email
//! uniqueness; the authentication service checks for an existing account
//! before calling [`UserDirectory::create`].

use async_trait::async_trait;

use crate::domain::{Credential, EmailAddress, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// The backing store could not be reached.
        Connection { message: String } => "user directory connection failed: {message}",
        /// A query or insert failed, or a stored row could not be decoded.
        Query { message: String } => "user directory query failed: {message}",
    }
}

/// Lookup/insert interface over the users table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return every user whose email equals `email`, in id order.
    ///
    /// Emails are expected to be unique, but the result is a collection so
    /// callers can observe duplicates admitted by concurrent signups.
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Vec<User>, UserDirectoryError>;

    /// Persist a new non-admin user and return it with its assigned id.
    async fn create(
        &self,
        email: &EmailAddress,
        credential: &Credential,
    ) -> Result<User, UserDirectoryError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError>;
}
