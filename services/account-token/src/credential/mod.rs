//! Password hashing and verification.
//!
//! Passwords are hashed with Argon2id into PHC strings. Verification reads
//! the parameters back out of the stored hash, so raising the configured
//! cost does not invalidate existing hashes.

pub mod config;
pub mod manager;
pub mod policy;

pub use config::CredentialConfig;
pub use manager::CredentialManager;
pub use policy::PasswordPolicy;
