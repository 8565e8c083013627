//! Domain primitives, ports, and the authentication service.
//!
//! Purpose: define the strongly typed user and credential model used by the
//! HTTP and persistence adapters, plus the service that orchestrates signup
//! and signin over the driven ports.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User (alias to `user::User`): registered account with its credential.
//! - AuthService (alias to `auth_service::AuthService`): signup/signin.
//! - TraceId (alias to `trace_id::TraceId`): per-request correlation id.

pub mod auth;
pub mod auth_service;
pub mod credential;
pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthCredentials, AuthError, AuthValidationError, DIRECTORY_UNAVAILABLE_MESSAGE,
    INVALID_CREDENTIALS_MESSAGE,
};
pub use self::auth_service::AuthService;
pub use self::credential::{
    CREDENTIAL_SEPARATOR, Credential, CredentialFormatError, Password, PasswordDigest, Salt,
};
pub use self::error::{Error, ErrorCode};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EMAIL_MAX, EmailAddress, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use carvalue::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
