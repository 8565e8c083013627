//! Salted credential primitives.
//!
//! A stored credential has the textual shape `salt.digest`, where both halves
//! are lowercase hexadecimal. The separator is outside the hex alphabet, so
//! splitting on the first `.` is unambiguous.

use std::fmt;

use thiserror::Error;
use zeroize::Zeroizing;

/// Separator between the salt and digest halves of a stored credential.
pub const CREDENTIAL_SEPARATOR: char = '.';

/// Errors raised when a salt, digest, or stored credential is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialFormatError {
    /// The component was empty.
    #[error("{component} must not be empty")]
    Empty { component: &'static str },
    /// The component contained characters outside `[0-9a-f]`.
    #[error("{component} must be lowercase hexadecimal")]
    NotHex { component: &'static str },
    /// The stored credential had no separator.
    #[error("stored credential is missing the salt separator")]
    MissingSeparator,
}

fn validate_hex(value: &str, component: &'static str) -> Result<(), CredentialFormatError> {
    if value.is_empty() {
        return Err(CredentialFormatError::Empty { component });
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return Err(CredentialFormatError::NotHex { component });
    }
    Ok(())
}

/// Random per-user salt, hex encoded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Salt(String);

impl Salt {
    /// Validate and wrap a hex-encoded salt.
    pub fn new(hex: impl Into<String>) -> Result<Self, CredentialFormatError> {
        let hex = hex.into();
        validate_hex(&hex, "salt")?;
        Ok(Self(hex))
    }

    /// Hex-encode raw random bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Hex text of the salt; this text is what the hasher mixes in.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Key-derivation output, hex encoded.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Validate and wrap a hex-encoded digest.
    pub fn new(hex: impl Into<String>) -> Result<Self, CredentialFormatError> {
        let hex = hex.into();
        validate_hex(&hex, "digest")?;
        Ok(Self(hex))
    }

    /// Hex-encode raw KDF output.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(hex::encode(bytes))
    }

    /// Hex text of the digest.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([REDACTED])")
    }
}

/// Stored `salt.digest` credential.
///
/// # Examples
/// ```
/// use carvalue::domain::Credential;
///
/// let credential = Credential::parse("0a1b.ff00").expect("well formed");
/// assert_eq!(credential.salt().as_str(), "0a1b");
/// assert_eq!(credential.digest().as_str(), "ff00");
/// assert_eq!(credential.to_stored(), "0a1b.ff00");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    salt: Salt,
    digest: PasswordDigest,
}

impl Credential {
    /// Join a salt and the digest computed with it.
    pub fn compose(salt: Salt, digest: PasswordDigest) -> Self {
        Self { salt, digest }
    }

    /// Split a stored credential into its salt and digest.
    pub fn parse(stored: &str) -> Result<Self, CredentialFormatError> {
        let (salt, digest) = stored
            .split_once(CREDENTIAL_SEPARATOR)
            .ok_or(CredentialFormatError::MissingSeparator)?;
        Ok(Self {
            salt: Salt::new(salt)?,
            digest: PasswordDigest::new(digest)?,
        })
    }

    /// Salt half.
    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    /// Digest half.
    pub fn digest(&self) -> &PasswordDigest {
        &self.digest
    }

    /// Textual form written to storage.
    pub fn to_stored(&self) -> String {
        format!(
            "{}{CREDENTIAL_SEPARATOR}{}",
            self.salt.as_str(),
            self.digest.as_str()
        )
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("salt", &self.salt)
            .field("digest", &self.digest)
            .finish()
    }
}

/// Plaintext password held only for the duration of a request.
///
/// Memory is wiped on drop and `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Wrap a caller-supplied password. Whitespace is preserved.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Expose the plaintext to the hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }

    /// Whether the password is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}
