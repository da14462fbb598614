use crate::credential::{CredentialConfig, PasswordPolicy};
use crate::error::AccountError;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;
use std::fmt;
use tracing::debug;
use zeroize::Zeroizing;

/// Hashes and verifies passwords with Argon2id.
pub struct CredentialManager {
    params: Params,
    pepper: Option<Zeroizing<Vec<u8>>>,
    policy: PasswordPolicy,
}

impl CredentialManager {
    /// # Errors
    ///
    /// Returns a configuration error if the Argon2 parameters or length
    /// limits are invalid.
    pub fn new(config: CredentialConfig) -> Result<Self, AccountError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| AccountError::config(format!("Invalid Argon2 parameters: {}", e)))?;
        let policy = PasswordPolicy::new(config.min_length, config.max_length)?;

        Ok(Self {
            params,
            pepper: config.pepper,
            policy,
        })
    }

    #[must_use]
    pub const fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Hash `plaintext` with a fresh random salt, returning a PHC string.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `plaintext` violates the password policy.
    pub fn set_password(&self, plaintext: &str) -> Result<String, AccountError> {
        self.policy.validate(plaintext)?;

        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .hasher()?
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AccountError::validation(format!("Password hashing failed: {}", e)))?
            .to_string();

        Ok(hash)
    }

    /// Check `plaintext` against `password_hash` in constant time.
    ///
    /// A malformed stored hash counts as a mismatch.
    #[must_use]
    pub fn verify_password(&self, plaintext: &str, password_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(password_hash) else {
            debug!("Stored password hash is not a valid PHC string");
            return false;
        };
        let Ok(hasher) = self.hasher() else {
            return false;
        };

        hasher.verify_password(plaintext.as_bytes(), &parsed).is_ok()
    }

    fn hasher(&self) -> Result<Argon2<'_>, AccountError> {
        match &self.pepper {
            Some(pepper) => Argon2::new_with_secret(
                pepper,
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )
            .map_err(|e| AccountError::internal(format!("Failed to initialize Argon2id: {}", e))),
            None => Ok(Argon2::new(
                Algorithm::Argon2id,
                Version::V0x13,
                self.params.clone(),
            )),
        }
    }
}

impl fmt::Debug for CredentialManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialManager")
            .field("params", &self.params)
            .field("peppered", &self.pepper.is_some())
            .field("policy", &self.policy)
            .finish()
    }
}
