//! In-memory `UserDirectory` used in development mode and tests.
//!
//! Mirrors the Diesel adapter: ids are sequential from 1, new users are not
//! admins, and no uniqueness is enforced.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{Credential, EmailAddress, User, UserId};

#[derive(Debug)]
struct DirectoryState {
    users: Vec<User>,
    next_id: i64,
}

impl Default for DirectoryState {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }
}

/// Process-local user directory backed by a mutex-guarded vector.
#[derive(Debug, Default)]
pub struct InMemoryUserDirectory {
    state: Mutex<DirectoryState>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, DirectoryState>, UserDirectoryError> {
        self.state
            .lock()
            .map_err(|_| UserDirectoryError::query("user directory lock poisoned"))
    }

    /// Number of stored users.
    pub fn len(&self) -> Result<usize, UserDirectoryError> {
        Ok(self.lock()?.users.len())
    }

    /// Whether no user has been stored.
    pub fn is_empty(&self) -> Result<bool, UserDirectoryError> {
        Ok(self.lock()?.users.is_empty())
    }

    /// Set the admin flag on a stored user, returning whether it existed.
    ///
    /// Signup never grants admin; operators seed admins out of band.
    pub fn grant_admin(&self, id: UserId) -> Result<bool, UserDirectoryError> {
        let mut state = self.lock()?;
        let Some(slot) = state.users.iter_mut().find(|user| user.id() == id) else {
            return Ok(false);
        };
        *slot = slot.clone().with_admin(true);
        Ok(true)
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Vec<User>, UserDirectoryError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .filter(|user| user.email() == email)
            .cloned()
            .collect())
    }

    async fn create(
        &self,
        email: &EmailAddress,
        credential: &Credential,
    ) -> Result<User, UserDirectoryError> {
        let mut state = self.lock()?;
        let id = UserId::new(state.next_id)
            .map_err(|err| UserDirectoryError::query(format!("id allocation: {err}")))?;
        state.next_id += 1;

        let user = User::new(id, email.clone(), credential.clone());
        state.users.push(user.clone());
        info!(user_id = %id, "inserted user");
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self
            .lock()?
            .users
            .iter()
            .find(|user| user.id() == id)
            .cloned())
    }
}
