//! Configuration module
//!
//! This module assembles the option groups of a cluster into one immutable
//! [`Configuration`], and provides the builder used to create it and the
//! defaults every group falls back to.

mod builder;
mod configuration;
pub mod defaults;
mod traits;

// Re-export types and traits
pub use self::builder::ConfigurationBuilder;
pub use self::configuration::{Configuration, ConfigurationSnapshot, RegistrationState};
pub use self::traits::ConfigLogger;
