//! Configuration for token issuance.

use crate::token::TokenAlgorithm;
use chrono::TimeDelta;

/// Token issuer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// `iss` claim written into and required from every token
    pub issuer: String,
    /// Signature algorithm
    pub algorithm: TokenAlgorithm,
    /// Lifetime used when the caller does not pass one
    pub default_ttl: TimeDelta,
    /// Reject tokens that were already used once
    pub single_use: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: "account-token".to_string(),
            algorithm: TokenAlgorithm::HS512,
            default_ttl: TimeDelta::seconds(3600),
            single_use: false,
        }
    }
}

impl TokenConfig {
    #[must_use]
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    #[must_use]
    pub const fn with_algorithm(mut self, algorithm: TokenAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[must_use]
    pub const fn with_default_ttl(mut self, ttl: TimeDelta) -> Self {
        self.default_ttl = ttl;
        self
    }

    #[must_use]
    pub const fn with_single_use(mut self, enabled: bool) -> Self {
        self.single_use = enabled;
        self
    }
}
