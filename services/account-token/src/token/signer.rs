//! Token signing and signature verification.
//!
//! Tokens are compact JWS strings signed with an HMAC key shared by issuer
//! and verifier. Expiry is not checked here; the service checks it against
//! its own clock.

use crate::error::AccountError;
use crate::token::{TokenClaims, TokenRejection};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// HMAC secret used to sign and verify tokens.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Shortest accepted key, in bytes.
    pub const MIN_LEN: usize = 32;

    /// # Errors
    ///
    /// Returns a configuration error if the key is shorter than [`Self::MIN_LEN`].
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, AccountError> {
        let bytes = bytes.into();
        if bytes.len() < Self::MIN_LEN {
            return Err(AccountError::config(format!(
                "signing key must be at least {} bytes, got {}",
                Self::MIN_LEN,
                bytes.len()
            )));
        }
        Ok(Self(bytes))
    }

    /// Decode a standard base64 key.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the input is not base64 or too short.
    pub fn from_base64(encoded: &str) -> Result<Self, AccountError> {
        let bytes = STANDARD
            .decode(encoded.trim())
            .map_err(|e| AccountError::config(format!("Invalid signing key encoding: {}", e)))?;
        Self::new(bytes)
    }

    /// Generate a random 64-byte key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = vec![0u8; 64];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes)
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey([REDACTED; {} bytes])", self.0.len())
    }
}

/// HMAC algorithm used for token signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenAlgorithm {
    /// HMAC with SHA-256
    HS256,
    /// HMAC with SHA-384
    HS384,
    /// HMAC with SHA-512
    #[default]
    HS512,
}

impl TokenAlgorithm {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HS256 => "HS256",
            Self::HS384 => "HS384",
            Self::HS512 => "HS512",
        }
    }

    const fn to_jwt(self) -> Algorithm {
        match self {
            Self::HS256 => Algorithm::HS256,
            Self::HS384 => Algorithm::HS384,
            Self::HS512 => Algorithm::HS512,
        }
    }
}

impl FromStr for TokenAlgorithm {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "HS256" => Ok(Self::HS256),
            "HS384" => Ok(Self::HS384),
            "HS512" => Ok(Self::HS512),
            _ => Err(AccountError::config(format!("Invalid token algorithm: {}", s))),
        }
    }
}

impl fmt::Display for TokenAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signs claims into tokens and checks signatures and issuer on the way back.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: TokenAlgorithm,
    issuer: String,
    validation: Validation,
}

impl TokenSigner {
    #[must_use]
    pub fn new(key: &SigningKey, algorithm: TokenAlgorithm, issuer: impl Into<String>) -> Self {
        let issuer = issuer.into();

        let mut validation = Validation::new(algorithm.to_jwt());
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iss"]);
        validation.set_issuer(&[issuer.as_str()]);

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            algorithm,
            issuer,
            validation,
        }
    }

    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    #[must_use]
    pub const fn algorithm(&self) -> TokenAlgorithm {
        self.algorithm
    }

    /// # Errors
    ///
    /// Returns [`AccountError::TokenEncoding`] if the claims cannot be signed.
    pub fn sign(&self, claims: &TokenClaims) -> Result<String, AccountError> {
        let header = Header::new(self.algorithm.to_jwt());
        Ok(encode(&header, claims, &self.encoding_key)?)
    }

    /// Check signature, algorithm and issuer, and decode the claims.
    ///
    /// # Errors
    ///
    /// Returns the rejection cause for any malformed or forged token.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenRejection> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(TokenRejection::from)
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .finish_non_exhaustive()
    }
}
