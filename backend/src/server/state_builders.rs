//! Builders wiring the authentication service to a storage adapter.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use carvalue::domain::AuthService;
use carvalue::domain::ports::{Authenticator, UserDirectory};
use carvalue::inbound::http::state::HttpState;
use carvalue::outbound::hashing::{Argon2CredentialHasher, KdfParams};
use carvalue::outbound::memory::InMemoryUserDirectory;
use carvalue::outbound::persistence::DieselUserDirectory;

use super::ServerConfig;

fn build_authenticator<D>(directory: D, params: KdfParams) -> Arc<dyn Authenticator>
where
    D: UserDirectory + 'static,
{
    Arc::new(AuthService::new(
        Arc::new(directory),
        Arc::new(Argon2CredentialHasher::new(params)),
    ))
}

/// Build handler state, using PostgreSQL when a pool is configured and the
/// in-memory directory otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let auth = match &config.db_pool {
        Some(pool) => {
            info!("user directory: postgres");
            build_authenticator(DieselUserDirectory::new(pool.clone()), config.kdf_params)
        }
        None => {
            info!("user directory: in-memory (development mode)");
            build_authenticator(InMemoryUserDirectory::new(), config.kdf_params)
        }
    };
    web::Data::new(HttpState::new(auth))
}
