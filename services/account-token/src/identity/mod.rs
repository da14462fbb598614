//! Account identity model.

pub mod user;

pub use user::{UserId, UserIdentity};
