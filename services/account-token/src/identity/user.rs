use crate::credential::CredentialManager;
use crate::error::AccountError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// One user account.
///
/// The plaintext password is write-only: it goes in through
/// [`UserIdentity::set_password`] and can never be read back.
/// `is_confirmed` only moves from false to true, and only through a
/// verified confirmation token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    id: UserId,
    username: String,
    email: String,
    password_hash: String,
    #[serde(default)]
    is_confirmed: bool,
}

impl UserIdentity {
    /// Create an unconfirmed account without a password.
    ///
    /// Password checks fail until [`UserIdentity::set_password`] is called.
    #[must_use]
    pub fn new(id: UserId, username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: email.into(),
            password_hash: String::new(),
            is_confirmed: false,
        }
    }

    /// Create an unconfirmed account with its initial password.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the password violates the policy.
    pub fn with_password(
        id: UserId,
        username: impl Into<String>,
        email: impl Into<String>,
        credentials: &CredentialManager,
        password: &str,
    ) -> Result<Self, AccountError> {
        let mut user = Self::new(id, username, email);
        user.set_password(credentials, password)?;
        Ok(user)
    }

    /// Rebuild an account from storage.
    ///
    /// Meant for repository implementations hydrating stored rows.
    #[must_use]
    pub fn restore(
        id: UserId,
        username: String,
        email: String,
        password_hash: String,
        is_confirmed: bool,
    ) -> Self {
        Self {
            id,
            username,
            email,
            password_hash,
            is_confirmed,
        }
    }

    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        self.is_confirmed
    }

    /// The plaintext password is not stored, so reading it always fails.
    ///
    /// # Errors
    ///
    /// Always returns [`AccountError::PasswordNotReadable`].
    pub fn password(&self) -> Result<&str, AccountError> {
        Err(AccountError::PasswordNotReadable)
    }

    /// Hash `plaintext` and replace the stored password hash.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the password violates the policy; the
    /// stored hash is left untouched in that case.
    pub fn set_password(
        &mut self,
        credentials: &CredentialManager,
        plaintext: &str,
    ) -> Result<(), AccountError> {
        self.password_hash = credentials.set_password(plaintext)?;
        Ok(())
    }

    /// Check `plaintext` against the stored hash.
    #[must_use]
    pub fn verify_password(&self, credentials: &CredentialManager, plaintext: &str) -> bool {
        credentials.verify_password(plaintext, &self.password_hash)
    }

    pub(crate) fn confirm(&mut self) {
        self.is_confirmed = true;
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }
}

impl fmt::Debug for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserIdentity")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .field("is_confirmed", &self.is_confirmed)
            .finish()
    }
}

impl fmt::Display for UserIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<User {}>", self.email)
    }
}
