//! Native protocol options
//!
//! Wire-level settings: the port every node listens on, the frame
//! compression algorithm and the protocol version to start negotiation with.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use serde::Serialize;

use crate::common::{DriverError, Result};
use crate::config::defaults;
use crate::manager::{ClusterManager, ManagerSlot};

/// Frame compression algorithm
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Compression {
    /// Frames are sent uncompressed
    #[default]
    None,
    /// Snappy block compression
    Snappy,
    /// LZ4 block compression
    Lz4,
}

impl fmt::Display for Compression {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Snappy => write!(f, "snappy"),
            Self::Lz4 => write!(f, "lz4"),
        }
    }
}

impl FromStr for Compression {
    type Err = DriverError;

    #[inline]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "snappy" => Ok(Self::Snappy),
            "lz4" => Ok(Self::Lz4),
            _ => Err(DriverError::InvalidArgument(format!(
                "Invalid compression: {}. Valid values are: none, snappy, lz4",
                s
            ))),
        }
    }
}

/// Native protocol version
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProtocolVersion {
    V1,
    V2,
    V3,
    V4,
}

impl ProtocolVersion {
    /// Version number as sent in the frame header
    pub fn as_u8(self) -> u8 {
        match self {
            Self::V1 => 1,
            Self::V2 => 2,
            Self::V3 => 3,
            Self::V4 => 4,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.as_u8())
    }
}

/// Protocol-level options
///
/// Values are fixed once built. The only state that changes afterwards is the
/// cluster manager binding set by [`ProtocolOptions::register`].
#[derive(Debug, Serialize)]
pub struct ProtocolOptions {
    port: u16,
    compression: Compression,
    #[serde(skip_serializing_if = "Option::is_none")]
    initial_version: Option<ProtocolVersion>,
    #[serde(skip)]
    manager: ManagerSlot,
}

impl Default for ProtocolOptions {
    fn default() -> Self {
        Self {
            port: defaults::PORT,
            compression: Compression::default(),
            initial_version: None,
            manager: ManagerSlot::new("protocol options"),
        }
    }
}

impl ProtocolOptions {
    /// Create protocol options with the default port and no compression
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `port` to reach every node of the cluster
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Compress frames with `compression`
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Start negotiation at `version` instead of the newest supported one
    pub fn with_protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.initial_version = Some(version);
        self
    }

    /// Port used to connect to nodes
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Frame compression algorithm
    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// Effective protocol version
    ///
    /// Once registered, the version negotiated by the manager takes precedence;
    /// before that (or while nothing is negotiated) the configured one is returned.
    /// `None` means the newest supported version will be tried first.
    pub fn protocol_version(&self) -> Option<ProtocolVersion> {
        self.manager
            .get()
            .and_then(|manager| manager.protocol_version())
            .or(self.initial_version)
    }

    /// Hook these options into the cluster manager
    ///
    /// Called once during cluster startup; a second call fails with
    /// [`DriverError::AlreadyRegistered`].
    pub fn register(&self, manager: &Arc<dyn ClusterManager>) -> Result<()> {
        self.manager.bind(manager)
    }

    /// Whether [`ProtocolOptions::register`] has been called
    pub fn is_registered(&self) -> bool {
        self.manager.is_bound()
    }

    /// The registered cluster manager, if it is still alive
    pub fn manager(&self) -> Option<Arc<dyn ClusterManager>> {
        self.manager.get()
    }
}
