//! Core types, configuration, and validation for the raffle service.
//!
//! This crate provides the foundational types used throughout the service:
//! - Domain structures for raffles, registrations, and viewer-facing views
//! - Configuration structs with validated builders
//! - Input validation for raffle names and email addresses

pub mod config;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use config::{ConfigError, RaffleConfig, ValidationConfig};
pub use types::*;
pub use validation::{ValidationError, validate_description, validate_email, validate_raffle_name};
