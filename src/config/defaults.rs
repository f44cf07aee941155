//! Default configuration values
//!
//! This module provides default values for every option group.
//! It is designed to be a single source of truth for defaults,
//! so the option groups and the builder never disagree.

use std::time::Duration;

/// Default native protocol port
pub const PORT: u16 = 9042;

/// Default core connections per local host
pub const CORE_CONNECTIONS_LOCAL: u32 = 2;

/// Default max connections per local host
pub const MAX_CONNECTIONS_LOCAL: u32 = 8;

/// Default core connections per remote host
pub const CORE_CONNECTIONS_REMOTE: u32 = 1;

/// Default max connections per remote host
pub const MAX_CONNECTIONS_REMOTE: u32 = 2;

/// Below this many in-flight requests on a connection, an extra connection may be closed
pub const MIN_SIMULTANEOUS_REQUESTS: u32 = 25;

/// Above this many in-flight requests on every connection, a new one is opened
pub const MAX_SIMULTANEOUS_REQUESTS: u32 = 100;

/// Default connect timeout in milliseconds
pub const CONNECT_TIMEOUT_MILLIS: u64 = 5000;

/// Default reconnection base delay in milliseconds
pub const RECONNECTION_BASE_DELAY_MILLIS: u64 = 1000;

/// Default reconnection max delay in milliseconds (10 minutes)
pub const RECONNECTION_MAX_DELAY_MILLIS: u64 = 10 * 60 * 1000;

/// Metrics are collected unless explicitly disabled
pub const METRICS_ENABLED: bool = true;

/// Default connect timeout
pub fn connect_timeout() -> Duration {
    Duration::from_millis(CONNECT_TIMEOUT_MILLIS)
}

/// Default reconnection base delay
pub fn reconnection_base_delay() -> Duration {
    Duration::from_millis(RECONNECTION_BASE_DELAY_MILLIS)
}

/// Default reconnection max delay
pub fn reconnection_max_delay() -> Duration {
    Duration::from_millis(RECONNECTION_MAX_DELAY_MILLIS)
}
