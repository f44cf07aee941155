//! Error handling module
//!
//! This module defines the error type and result alias shared by the
//! configuration aggregate and its option groups.

use thiserror::Error;
use std::io;

/// Cluster client configuration error type
#[derive(Error, Debug)]
pub enum DriverError {
    /// A one-shot registration hook was invoked a second time
    #[error("{0} is already registered with a cluster manager")]
    AlreadyRegistered(&'static str),

    /// A setter rejected the supplied value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error while applying options to a socket
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Diagnostics snapshot could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `DriverError`.
pub type Result<T> = std::result::Result<T, DriverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "setsockopt refused");
        let driver_err: DriverError = io_err.into();

        match driver_err {
            DriverError::Io(_) => {}
            _ => panic!("Should convert to IO error"),
        }
    }

    #[test]
    fn test_error_display() {
        let err = DriverError::AlreadyRegistered("pooling options");
        assert_eq!(
            err.to_string(),
            "pooling options is already registered with a cluster manager"
        );

        let err = DriverError::InvalidArgument("cannot size pools for ignored hosts".to_string());
        assert!(err.to_string().contains("ignored hosts"));
    }
}
