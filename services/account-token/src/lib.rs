//! Account token service library.
//!
//! Provides password hashing for user accounts and signed, expiring,
//! purpose-bound tokens for email confirmation, password reset and email
//! change, applied through an injected account repository.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod clock;
pub mod config;
pub mod credential;
pub mod error;
pub mod identity;
pub mod repository;
pub mod token;

// Re-exports for convenience
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use credential::{CredentialConfig, CredentialManager};
pub use error::AccountError;
pub use identity::{UserId, UserIdentity};
pub use repository::{MemoryUserRepository, UserRepository};
pub use token::{
    SigningKey, TokenAlgorithm, TokenClaims, TokenOutcome, TokenPurpose, TokenRejection,
    TokenService,
};
