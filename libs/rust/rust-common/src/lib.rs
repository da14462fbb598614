//! Shared library for cross-cutting concerns in auth-platform Rust services.
//!
//! This crate provides centralized implementations for:
//! - Error types for storage and collaborator calls, with retryability classification
//! - Tracing subscriber setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod tracing_config;

pub use error::PlatformError;
pub use tracing_config::{TracingConfig, init_tracing};
