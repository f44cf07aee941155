//! Common module
//!
//! This module contains the shared error type and logging helpers.

pub mod error;
pub mod log;

// Re-export commonly used types and functions
pub use error::{DriverError, Result};
pub use log::init_logger;
