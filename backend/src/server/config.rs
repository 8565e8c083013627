//! Process settings and the HTTP server configuration object.

use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use carvalue::outbound::hashing::KdfParams;
use carvalue::outbound::persistence::DbPool;
use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Settings loaded from `CARVALUE_*` variables, config files, and flags.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CARVALUE")]
pub struct ServerSettings {
    /// Interface to bind.
    #[ortho_config(default = "0.0.0.0".to_owned())]
    pub host: String,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. When absent the in-memory directory is used.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub db_max_connections: u32,
    /// Argon2 memory cost in KiB.
    #[ortho_config(default = 19_456)]
    pub kdf_memory_kib: u32,
    /// Argon2 iteration count.
    #[ortho_config(default = 2)]
    pub kdf_iterations: u32,
}

impl ServerSettings {
    /// Resolve the socket address from host and port.
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|error| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw}: {error}"),
            )
        })
    }

    /// Argon2 cost parameters.
    pub fn kdf_params(&self) -> KdfParams {
        KdfParams::new(self.kdf_memory_kib, self.kdf_iterations)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) kdf_params: KdfParams,
}

impl ServerConfig {
    /// Construct a server configuration using session preferences.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
            db_pool: None,
            kdf_params: KdfParams::default(),
        }
    }

    /// Attach a database connection pool.
    ///
    /// When provided, users are stored in PostgreSQL instead of process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the credential hasher cost.
    #[must_use]
    pub fn with_kdf_params(mut self, params: KdfParams) -> Self {
        self.kdf_params = params;
        self
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "CARVALUE_HOST",
        "CARVALUE_PORT",
        "CARVALUE_DATABASE_URL",
        "CARVALUE_DB_MAX_CONNECTIONS",
        "CARVALUE_KDF_MEMORY_KIB",
        "CARVALUE_KDF_ITERATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("carvalue")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.port, 8080);
        assert!(settings.database_url.is_none());
        assert_eq!(settings.db_max_connections, 10);
        assert_eq!(settings.kdf_params(), KdfParams::default());
        assert_eq!(
            settings.bind_addr().expect("default address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("literal address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("CARVALUE_HOST", Some("127.0.0.1".to_owned())),
            ("CARVALUE_PORT", Some("9090".to_owned())),
            (
                "CARVALUE_DATABASE_URL",
                Some("postgres://localhost/carvalue".to_owned()),
            ),
            ("CARVALUE_DB_MAX_CONNECTIONS", Some("4".to_owned())),
            ("CARVALUE_KDF_MEMORY_KIB", Some("4096".to_owned())),
            ("CARVALUE_KDF_ITERATIONS", Some("3".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.port, 9090);
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/carvalue")
        );
        assert_eq!(settings.db_max_connections, 4);
        assert_eq!(settings.kdf_params(), KdfParams::new(4096, 3));
        assert_eq!(
            settings.bind_addr().expect("override address"),
            "127.0.0.1:9090".parse::<SocketAddr>().expect("literal address")
        );
    }

    #[rstest]
    fn unparsable_host_is_reported() {
        let settings = ServerSettings {
            host: "not a host".to_owned(),
            port: 8080,
            database_url: None,
            db_max_connections: 10,
            kdf_memory_kib: 19_456,
            kdf_iterations: 2,
        };
        let err = settings.bind_addr().expect_err("host must be an IP literal");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
