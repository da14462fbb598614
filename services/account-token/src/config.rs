//! Centralized configuration for the account token service.
//!
//! All configuration is loaded from environment variables and validated
//! at startup.

use crate::credential::{CredentialConfig, CredentialManager};
use crate::error::AccountError;
use crate::token::{SigningKey, TokenAlgorithm, TokenConfig};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::TimeDelta;
use rust_common::TracingConfig;
use std::env;
use tracing::warn;

/// Account token service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Token issuance settings
    pub token: TokenConfig,
    /// Password hashing settings
    pub credential: CredentialConfig,
    /// Secret used to sign tokens
    pub signing_key: SigningKey,
    /// Log output settings
    pub tracing: TracingConfig,
}

impl Config {
    /// Default settings around the given signing key.
    #[must_use]
    pub fn new(signing_key: SigningKey) -> Self {
        Self {
            token: TokenConfig::default(),
            credential: CredentialConfig::default(),
            signing_key,
            tracing: TracingConfig::default().with_service_name("account-token"),
        }
    }

    /// Load configuration from environment variables, reading `.env` first.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, AccountError> {
        dotenvy::dotenv().ok();
        Self::from_source(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_source<F>(lookup: F) -> Result<Self, AccountError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let issuer = lookup("TOKEN_ISSUER").unwrap_or_else(|| "account-token".to_string());
        let algorithm: TokenAlgorithm = parse_var(&lookup, "TOKEN_ALGORITHM", TokenAlgorithm::HS512)?;
        let ttl_secs: i64 = parse_var(&lookup, "TOKEN_TTL", 3600)?;
        if ttl_secs <= 0 {
            return Err(AccountError::config(format!(
                "TOKEN_TTL must be positive, got {}",
                ttl_secs
            )));
        }
        let single_use = parse_var(&lookup, "TOKEN_SINGLE_USE", false)?;

        let token = TokenConfig::default()
            .with_issuer(issuer)
            .with_algorithm(algorithm)
            .with_default_ttl(TimeDelta::seconds(ttl_secs))
            .with_single_use(single_use);

        let signing_key = match lookup("TOKEN_SIGNING_KEY") {
            Some(encoded) => SigningKey::from_base64(&encoded)?,
            None => {
                warn!("TOKEN_SIGNING_KEY not set, using an ephemeral key; tokens will not survive a restart");
                SigningKey::generate()
            }
        };

        let defaults = CredentialConfig::default();
        let mut credential = CredentialConfig::default()
            .with_length_limits(
                parse_var(&lookup, "PASSWORD_MIN_LENGTH", defaults.min_length)?,
                parse_var(&lookup, "PASSWORD_MAX_LENGTH", defaults.max_length)?,
            )
            .with_cost(
                parse_var(&lookup, "ARGON2_MEMORY_KIB", defaults.memory_kib)?,
                parse_var(&lookup, "ARGON2_ITERATIONS", defaults.iterations)?,
                parse_var(&lookup, "ARGON2_PARALLELISM", defaults.parallelism)?,
            );
        if let Some(encoded) = lookup("PASSWORD_PEPPER") {
            let pepper = STANDARD
                .decode(encoded.trim())
                .map_err(|e| AccountError::config(format!("Invalid PASSWORD_PEPPER: {}", e)))?;
            credential = credential.with_pepper(pepper);
        }
        CredentialManager::new(credential.clone())?;

        let tracing = TracingConfig::default()
            .with_service_name("account-token")
            .with_log_level(lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()))
            .with_json_output(parse_var(&lookup, "LOG_JSON", false)?);

        Ok(Self {
            token,
            credential,
            signing_key,
            tracing,
        })
    }
}

/// Parse a variable with a default when it is absent.
fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> Result<T, AccountError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(val) => val
            .trim()
            .parse()
            .map_err(|e| AccountError::config(format!("Invalid {}: {}", name, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_source(source(&[])).unwrap();

        assert_eq!(config.token.issuer, "account-token");
        assert_eq!(config.token.algorithm, TokenAlgorithm::HS512);
        assert_eq!(config.token.default_ttl.num_seconds(), 3600);
        assert!(!config.token.single_use);
        assert_eq!(config.credential.min_length, 1);
        assert!(config.credential.pepper.is_none());
        assert_eq!(config.tracing.log_level, "info");
        assert!(!config.tracing.json_output);
    }

    #[test]
    fn test_overrides() {
        let key = STANDARD.encode([9u8; 32]);
        let pepper = STANDARD.encode(b"pepper");
        let config = Config::from_source(source(&[
            ("TOKEN_ISSUER", "accounts.example.com"),
            ("TOKEN_ALGORITHM", "hs256"),
            ("TOKEN_TTL", "900"),
            ("TOKEN_SINGLE_USE", "true"),
            ("TOKEN_SIGNING_KEY", &key),
            ("PASSWORD_MIN_LENGTH", "8"),
            ("PASSWORD_PEPPER", &pepper),
            ("ARGON2_MEMORY_KIB", "65536"),
            ("LOG_LEVEL", "debug"),
            ("LOG_JSON", "true"),
        ]))
        .unwrap();

        assert_eq!(config.token.issuer, "accounts.example.com");
        assert_eq!(config.token.algorithm, TokenAlgorithm::HS256);
        assert_eq!(config.token.default_ttl.num_seconds(), 900);
        assert!(config.token.single_use);
        assert_eq!(config.credential.min_length, 8);
        assert_eq!(config.credential.memory_kib, 65536);
        assert!(config.credential.pepper.is_some());
        assert_eq!(config.tracing.log_level, "debug");
        assert!(config.tracing.json_output);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(Config::from_source(source(&[("TOKEN_TTL", "soon")])).is_err());
        assert!(Config::from_source(source(&[("TOKEN_TTL", "0")])).is_err());
        assert!(Config::from_source(source(&[("TOKEN_ALGORITHM", "RS256")])).is_err());
        assert!(Config::from_source(source(&[("TOKEN_SIGNING_KEY", "c2hvcnQ=")])).is_err());
        assert!(Config::from_source(source(&[("PASSWORD_PEPPER", "%%%")])).is_err());
        assert!(Config::from_source(source(&[("LOG_JSON", "maybe")])).is_err());
    }

    #[test]
    fn test_credential_limits_checked_on_load() {
        assert!(Config::from_source(source(&[("PASSWORD_MIN_LENGTH", "0")])).is_err());
        assert!(
            Config::from_source(source(&[
                ("PASSWORD_MIN_LENGTH", "12"),
                ("PASSWORD_MAX_LENGTH", "8"),
            ]))
            .is_err()
        );
        assert!(Config::from_source(source(&[("ARGON2_PARALLELISM", "0")])).is_err());
        assert!(Config::from_source(source(&[("PASSWORD_MIN_LENGTH", "12")])).is_ok());
    }
}
