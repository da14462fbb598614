use crate::error::AccountError;

/// Length limits applied before hashing.
///
/// The minimum counts characters; the maximum counts bytes, since that is
/// what the hasher consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    min_length: usize,
    max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 1024,
        }
    }
}

impl PasswordPolicy {
    /// # Errors
    ///
    /// Returns a configuration error if `min_length` is zero or exceeds `max_length`.
    pub fn new(min_length: usize, max_length: usize) -> Result<Self, AccountError> {
        if min_length == 0 {
            return Err(AccountError::config("minimum password length must be at least 1"));
        }
        if max_length < min_length {
            return Err(AccountError::config(format!(
                "maximum password length {} is below minimum {}",
                max_length, min_length
            )));
        }
        Ok(Self {
            min_length,
            max_length,
        })
    }

    #[must_use]
    pub const fn min_length(&self) -> usize {
        self.min_length
    }

    #[must_use]
    pub const fn max_length(&self) -> usize {
        self.max_length
    }

    /// # Errors
    ///
    /// Returns a validation error describing the violated limit.
    pub fn validate(&self, plaintext: &str) -> Result<(), AccountError> {
        if plaintext.is_empty() {
            return Err(AccountError::validation("password must not be empty"));
        }
        if plaintext.chars().count() < self.min_length {
            return Err(AccountError::validation(format!(
                "password must be at least {} characters",
                self.min_length
            )));
        }
        if plaintext.len() > self.max_length {
            return Err(AccountError::validation(format!(
                "password must be at most {} bytes",
                self.max_length
            )));
        }
        Ok(())
    }
}
