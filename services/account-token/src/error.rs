use rust_common::PlatformError;
use thiserror::Error;

/// Errors reported to callers of the account token engine.
///
/// Token verification problems are never reported here; they surface as
/// a `false` result or a [`crate::token::TokenRejection`].
#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("password is not a readable attribute")]
    PasswordNotReadable,

    #[error("Repository error: {0}")]
    Repository(#[from] PlatformError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token encoding error: {0}")]
    TokenEncoding(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountError {
    #[must_use]
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Only repository failures can be transient.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Repository(err) => err.is_retryable(),
            _ => false,
        }
    }

    /// Stable error code for logs and API responses.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => ACCOUNT_VALIDATION,
            Self::PasswordNotReadable => ACCOUNT_PASSWORD_NOT_READABLE,
            Self::Repository(_) => ACCOUNT_REPOSITORY,
            Self::Config(_) => ACCOUNT_CONFIG,
            Self::TokenEncoding(_) => ACCOUNT_TOKEN_ENCODING,
            Self::Internal(_) => ACCOUNT_INTERNAL,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccountError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::TokenEncoding(err.to_string())
    }
}

// Error codes
pub const ACCOUNT_VALIDATION: &str = "ACCOUNT_VALIDATION";
pub const ACCOUNT_PASSWORD_NOT_READABLE: &str = "ACCOUNT_PASSWORD_NOT_READABLE";
pub const ACCOUNT_REPOSITORY: &str = "ACCOUNT_REPOSITORY";
pub const ACCOUNT_CONFIG: &str = "ACCOUNT_CONFIG";
pub const ACCOUNT_TOKEN_ENCODING: &str = "ACCOUNT_TOKEN_ENCODING";
pub const ACCOUNT_INTERNAL: &str = "ACCOUNT_INTERNAL";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_errors_keep_retryability() {
        let err: AccountError = PlatformError::unavailable("primary down").into();
        assert!(err.is_retryable());
        assert_eq!(err.code(), ACCOUNT_REPOSITORY);

        let err: AccountError = PlatformError::conflict("email taken").into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_non_repository_errors_not_retryable() {
        assert!(!AccountError::validation("empty").is_retryable());
        assert!(!AccountError::PasswordNotReadable.is_retryable());
        assert!(!AccountError::config("bad").is_retryable());
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AccountError::PasswordNotReadable.to_string(),
            "password is not a readable attribute"
        );
        assert_eq!(
            AccountError::validation("password must not be empty").to_string(),
            "Validation error: password must not be empty"
        );
    }
}
