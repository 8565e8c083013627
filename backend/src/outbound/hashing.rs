//! Argon2id-backed `CredentialHasher` adapter.
//!
//! Salts are 8 random bytes from the OS generator, hex encoded. The hex text
//! itself is the salt input to Argon2id, which keeps a stored credential
//! self-describing: recomputing a digest needs only the two halves of
//! `salt.digest`. Derivation runs on Tokio's blocking pool.

use argon2::{Algorithm, Argon2, Params, Version};
use async_trait::async_trait;
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::domain::ports::{CredentialHasher, HashingError};
use crate::domain::{Password, PasswordDigest, Salt};

/// Random salt length in bytes before hex encoding.
pub const SALT_BYTES: usize = 8;

/// Digest length in bytes before hex encoding.
pub const DIGEST_BYTES: usize = 32;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfParams {
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        // OWASP baseline for Argon2id: 19 MiB, two passes, one lane.
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl KdfParams {
    /// Build parameters with a single lane.
    ///
    /// # Examples
    /// ```
    /// use carvalue::outbound::hashing::KdfParams;
    ///
    /// let params = KdfParams::new(1024, 1);
    /// assert_eq!(params.memory_kib(), 1024);
    /// ```
    pub fn new(memory_kib: u32, iterations: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism: 1,
        }
    }

    /// Memory cost in KiB.
    pub fn memory_kib(&self) -> u32 {
        self.memory_kib
    }

    /// Number of passes.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Password hasher using Argon2id with a 32-byte output.
#[derive(Debug, Clone, Default)]
pub struct Argon2CredentialHasher {
    params: KdfParams,
}

impl Argon2CredentialHasher {
    /// Create a hasher with the given cost parameters.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// Cost parameters in use.
    pub fn params(&self) -> KdfParams {
        self.params
    }
}

fn derive(
    password: &[u8],
    salt: &[u8],
    params: KdfParams,
) -> Result<PasswordDigest, HashingError> {
    let argon2_params = Params::new(
        params.memory_kib,
        params.iterations,
        params.parallelism,
        Some(DIGEST_BYTES),
    )
    .map_err(|err| HashingError::derivation(err.to_string()))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut output = Zeroizing::new([0_u8; DIGEST_BYTES]);
    argon2
        .hash_password_into(password, salt, &mut output[..])
        .map_err(|err| HashingError::derivation(err.to_string()))?;
    Ok(PasswordDigest::from_bytes(&output[..]))
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    fn generate_salt(&self) -> Salt {
        let mut bytes = [0_u8; SALT_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Salt::from_bytes(&bytes)
    }

    async fn hash(&self, password: &Password, salt: &Salt) -> Result<PasswordDigest, HashingError> {
        let plaintext = Zeroizing::new(password.expose().as_bytes().to_vec());
        let salt = salt.as_str().as_bytes().to_vec();
        let params = self.params;

        tokio::task::spawn_blocking(move || derive(&plaintext, &salt, params))
            .await
            .map_err(|err| HashingError::worker(err.to_string()))?
    }
}
