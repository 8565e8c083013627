//! Authentication primitives: validated credentials and the failure taxonomy.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use thiserror::Error as ThisError;
use tracing::{debug, error};

use super::ports::{HashingError, UserDirectoryError};
use super::{EmailAddress, Error, Password, UserId, UserValidationError};

/// Domain error returned when an auth payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthValidationError {
    /// The email failed validation.
    Email(UserValidationError),
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for AuthValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for AuthValidationError {}

/// Validated email/password pair used by signup and signin.
///
/// ## Invariants
/// - `email` satisfies [`EmailAddress`] validation.
/// - `password` is non-empty; whitespace is retained verbatim.
///
/// # Examples
/// ```
/// use carvalue::domain::AuthCredentials;
///
/// let creds = AuthCredentials::try_from_parts(" a@b.com ", "pw1").unwrap();
/// assert_eq!(creds.email().as_ref(), "a@b.com");
/// assert_eq!(creds.password().expose(), "pw1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCredentials {
    email: EmailAddress,
    password: Password,
}

impl AuthCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, AuthValidationError> {
        let email = EmailAddress::new(email).map_err(AuthValidationError::Email)?;
        let password = Password::new(password);
        if password.is_empty() {
            return Err(AuthValidationError::EmptyPassword);
        }
        Ok(Self { email, password })
    }

    /// Email used for the directory lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Failures produced by the authentication service.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AuthError {
    /// Signup was attempted with an email that already has an account.
    #[error("email already in use")]
    DuplicateEmail,
    /// Signin was attempted with an email no user has.
    #[error("no user with that email")]
    UnknownEmail,
    /// The password did not match the stored credential.
    #[error("wrong password")]
    InvalidPassword,
    /// No user has the requested id.
    #[error("user {id} not found")]
    NotFound { id: UserId },
    /// The user directory failed.
    #[error(transparent)]
    Directory(#[from] UserDirectoryError),
    /// The credential hasher failed.
    #[error(transparent)]
    Hashing(#[from] HashingError),
}

/// Message returned for both unknown emails and wrong passwords.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid credentials";

/// Message returned when the user directory cannot be reached. Driver
/// details stay in the logs.
pub const DIRECTORY_UNAVAILABLE_MESSAGE: &str = "user directory unavailable";

impl From<AuthError> for Error {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::DuplicateEmail => Error::invalid_request("email already in use"),
            AuthError::UnknownEmail | AuthError::InvalidPassword => {
                debug!(reason = %value, "signin rejected");
                Error::invalid_request(INVALID_CREDENTIALS_MESSAGE)
            }
            AuthError::NotFound { id } => Error::not_found(format!("user {id} not found")),
            AuthError::Directory(UserDirectoryError::Connection { message }) => {
                error!(%message, "user directory connection failed");
                Error::service_unavailable(DIRECTORY_UNAVAILABLE_MESSAGE)
            }
            AuthError::Directory(UserDirectoryError::Query { message }) => {
                Error::internal(format!("user directory error: {message}"))
            }
            AuthError::Hashing(inner) => Error::internal(format!("credential hashing failed: {inner}")),
        }
    }
}
