//! Cluster Client Config: configuration aggregate for a clustered-database client
//!
//! This library bundles every tunable of a cluster client (policies, native
//! protocol options, connection pooling, socket options, authentication and
//! the metrics toggle) into one immutable [`Configuration`], shared through an
//! `Arc` by every task that handles connections.
//!
//! The configuration is built before the cluster's internal manager exists.
//! During startup the manager calls [`Configuration::register`] once, which
//! hands the protocol and pooling options a weak back-reference so they can
//! react to connection events.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use cluster_client_config::{ClusterManager, Compression, Configuration, ProtocolVersion, Result};
//!
//! struct Manager;
//!
//! impl ClusterManager for Manager {
//!     fn ensure_pools_sizing(&self) {}
//!     fn protocol_version(&self) -> Option<ProtocolVersion> {
//!         Some(ProtocolVersion::V3)
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     // Finalize the cluster builder
//!     let config = Arc::new(
//!         Configuration::builder()
//!             .with_compression(Compression::Lz4)
//!             .with_credentials("cassie", "s3cret")
//!             .build(),
//!     );
//!
//!     // Cluster startup
//!     let manager: Arc<dyn ClusterManager> = Arc::new(Manager);
//!     config.register(&manager)?;
//!
//!     assert_eq!(config.protocol_options().protocol_version(), Some(ProtocolVersion::V3));
//!     Ok(())
//! }
//! ```

// Public modules
pub mod auth;
pub mod common;
pub mod config;
pub mod manager;
pub mod options;
pub mod policies;

// Re-export commonly used structures and functions for convenience
pub use auth::{AuthInfoProvider, NoAuthProvider, PlainTextAuthProvider, NO_AUTH};
pub use common::{init_logger, DriverError, Result};
pub use config::{ConfigLogger, Configuration, ConfigurationBuilder, RegistrationState};
pub use manager::ClusterManager;
pub use options::{Compression, PoolingOptions, ProtocolOptions, ProtocolVersion, SocketOptions};
pub use policies::{HostDistance, Policies};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
