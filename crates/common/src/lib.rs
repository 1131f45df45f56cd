//! Shared configuration and error handling for Fitroom
//!
//! This crate provides common functionality used across the Fitroom client core:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - Salted secret hashing

pub mod config;
pub mod crypto;
pub mod error;

pub use config::{Config, LogFormat};
pub use crypto::{hash_secret, verify_secret_hash};
pub use error::{Error, Result};
