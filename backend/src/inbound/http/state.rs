//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! the [`Authenticator`] driving port, so tests can wire an in-memory
//! directory instead of PostgreSQL.

use std::sync::Arc;

use crate::domain::ports::Authenticator;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn Authenticator>,
}

impl HttpState {
    /// Construct state from the authentication use-case port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use carvalue::domain::AuthService;
    /// use carvalue::inbound::http::state::HttpState;
    /// use carvalue::outbound::hashing::Argon2CredentialHasher;
    /// use carvalue::outbound::memory::InMemoryUserDirectory;
    ///
    /// let service = AuthService::new(
    ///     Arc::new(InMemoryUserDirectory::new()),
    ///     Arc::new(Argon2CredentialHasher::default()),
    /// );
    /// let _state = HttpState::new(Arc::new(service));
    /// ```
    pub fn new(auth: Arc<dyn Authenticator>) -> Self {
        Self { auth }
    }
}
