//! Purpose-bound, expiring account tokens.

pub mod claims;
pub mod config;
pub mod outcome;
pub mod purpose;
pub mod replay;
pub mod service;
pub mod signer;

pub use claims::TokenClaims;
pub use config::TokenConfig;
pub use outcome::{TokenOutcome, TokenRejection};
pub use purpose::TokenPurpose;
pub use replay::UsedTokenRegistry;
pub use service::TokenService;
pub use signer::{SigningKey, TokenAlgorithm, TokenSigner};
