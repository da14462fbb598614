//! Configuration for the credential manager.

use std::fmt;
use zeroize::Zeroizing;

/// Hashing cost, password length limits and optional pepper.
#[derive(Clone)]
pub struct CredentialConfig {
    /// Minimum password length in characters
    pub min_length: usize,
    /// Maximum password length in bytes
    pub max_length: usize,
    /// Argon2 memory cost in KiB
    pub memory_kib: u32,
    /// Argon2 iterations
    pub iterations: u32,
    /// Argon2 lanes
    pub parallelism: u32,
    /// Server-side secret mixed into every hash
    pub pepper: Option<Zeroizing<Vec<u8>>>,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 1024,
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
            pepper: None,
        }
    }
}

impl CredentialConfig {
    /// Set the Argon2 cost parameters.
    #[must_use]
    pub const fn with_cost(mut self, memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        self.memory_kib = memory_kib;
        self.iterations = iterations;
        self.parallelism = parallelism;
        self
    }

    /// Set password length limits.
    #[must_use]
    pub const fn with_length_limits(mut self, min_length: usize, max_length: usize) -> Self {
        self.min_length = min_length;
        self.max_length = max_length;
        self
    }

    /// Set the pepper. Hashes made with a pepper only verify with the same pepper.
    #[must_use]
    pub fn with_pepper(mut self, pepper: Vec<u8>) -> Self {
        self.pepper = Some(Zeroizing::new(pepper));
        self
    }
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("memory_kib", &self.memory_kib)
            .field("iterations", &self.iterations)
            .field("parallelism", &self.parallelism)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_argon2() {
        let config = CredentialConfig::default();
        assert_eq!(config.memory_kib, 19 * 1024);
        assert_eq!(config.iterations, 2);
        assert_eq!(config.parallelism, 1);
        assert_eq!(config.min_length, 1);
        assert!(config.pepper.is_none());
    }

    #[test]
    fn test_debug_hides_pepper() {
        let config = CredentialConfig::default().with_pepper(b"pepper-bytes".to_vec());
        let debug = format!("{:?}", config);
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("[112"));
    }
}
