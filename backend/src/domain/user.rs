//! User data model.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::Credential;

/// Validation errors returned by the user primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NonPositiveId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveId => write!(f, "user id must be a positive integer"),
            Self::InvalidId => write!(f, "user id must be an integer"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// System-assigned user identifier.
///
/// Identifiers are allocated by the user directory in insertion order and
/// never change once assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Validate and construct a [`UserId`].
    ///
    /// # Examples
    /// ```
    /// use carvalue::domain::UserId;
    ///
    /// assert_eq!(UserId::new(1).expect("positive").value(), 1);
    /// assert!(UserId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, UserValidationError> {
        if value <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .parse::<i64>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(value)
    }
}

/// Maximum accepted length for an email address.
pub const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Email address used as the user's login name.
///
/// ## Invariants
/// - Surrounding whitespace is trimmed.
/// - Contains exactly one `@` with non-empty local and domain parts.
///
/// Comparison is exact: `A@b.com` and `a@b.com` are different users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(trimmed) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Registered user.
///
/// The stored [`Credential`] is reachable only through [`User::credential`].
/// `User` is not `Serialize` and its `Debug` output omits the credential;
/// adapters project public fields explicitly.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: EmailAddress,
    credential: Credential,
    admin: bool,
}

impl User {
    /// Build a non-admin user from validated components.
    pub fn new(id: UserId, email: EmailAddress, credential: Credential) -> Self {
        Self {
            id,
            email,
            credential,
            admin: false,
        }
    }

    /// Set the admin flag. Only storage adapters rehydrating records use this.
    pub fn with_admin(mut self, admin: bool) -> Self {
        self.admin = admin;
        self
    }

    /// Stable user identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login email.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored salted credential.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Whether the user passes the admin gate.
    pub fn is_admin(&self) -> bool {
        self.admin
    }
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("admin", &self.admin)
            .finish_non_exhaustive()
    }
}
