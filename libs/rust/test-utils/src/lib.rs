//! Shared test utilities for the account token workspace.
//!
//! This crate provides:
//! - Proptest generators for account inputs
//! - Sample account fixtures

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;

pub use fixtures::SampleAccount;
pub use generators::*;
