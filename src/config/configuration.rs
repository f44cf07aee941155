//! Cluster configuration
//!
//! [`Configuration`] bundles every option group of a cluster into one value
//! that is built once, shared through an `Arc` by every connection-handling
//! task, and never modified afterwards.
//!
//! Its lifecycle has two states. It starts [`RegistrationState::Unregistered`]
//! when the cluster builder finishes; the cluster manager then calls
//! [`Configuration::register`] exactly once during startup, before any
//! connection is opened, which forwards the manager to the protocol and
//! pooling options and moves the configuration to
//! [`RegistrationState::Registered`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use serde::Serialize;
use log::debug;

use crate::auth::{is_no_auth, AuthInfoProvider, NO_AUTH};
use crate::common::{DriverError, Result};
use crate::config::builder::ConfigurationBuilder;
use crate::config::defaults;
use crate::manager::ClusterManager;
use crate::options::{PoolingOptions, PoolingSnapshot, ProtocolOptions, SocketOptions};
use crate::policies::Policies;

/// Registration state of a [`Configuration`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
    /// Built, not yet known to a cluster manager
    Unregistered,
    /// Forwarded to the cluster manager
    Registered,
}

/// The configuration of a cluster
///
/// Holds:
/// - the policy bundle (load balancing, reconnection, retry),
/// - native protocol options (port, compression),
/// - connection pooling options,
/// - low-level socket options (no-delay, keep-alive, ...),
/// - the authentication provider,
/// - whether metrics are collected.
///
/// Option groups are held behind `Arc`s: accessors hand out the very handle
/// given at construction, never a copy.
#[derive(Debug)]
pub struct Configuration {
    policies: Arc<Policies>,
    protocol_options: Arc<ProtocolOptions>,
    pooling_options: Arc<PoolingOptions>,
    socket_options: Arc<SocketOptions>,
    auth_provider: Arc<dyn AuthInfoProvider>,
    metrics_enabled: bool,
    registered: AtomicBool,
}

impl Configuration {
    /// Create a configuration with default values everywhere
    ///
    /// Every option group is a fresh default instance, authentication is
    /// [`NO_AUTH`] and metrics are enabled.
    pub fn new() -> Self {
        Self::with_parts(
            Arc::new(Policies::default()),
            Arc::new(ProtocolOptions::default()),
            Arc::new(PoolingOptions::default()),
            Arc::new(SocketOptions::default()),
            Arc::clone(&*NO_AUTH),
            defaults::METRICS_ENABLED,
        )
    }

    /// Create a configuration from explicit values
    ///
    /// No validation happens here; each group is expected to be consistent
    /// on its own.
    pub fn with_parts(
        policies: Arc<Policies>,
        protocol_options: Arc<ProtocolOptions>,
        pooling_options: Arc<PoolingOptions>,
        socket_options: Arc<SocketOptions>,
        auth_provider: Arc<dyn AuthInfoProvider>,
        metrics_enabled: bool,
    ) -> Self {
        Self {
            policies,
            protocol_options,
            pooling_options,
            socket_options,
            auth_provider,
            metrics_enabled,
            registered: AtomicBool::new(false),
        }
    }

    /// Start building a configuration
    pub fn builder() -> ConfigurationBuilder {
        ConfigurationBuilder::new()
    }

    /// Hook the configuration into the cluster manager
    ///
    /// Forwards `manager` to the protocol options, then to the pooling options.
    /// Policies, socket options and the authentication provider need no live
    /// hook and are left untouched. Must be called once, during cluster
    /// startup and before any connection is opened.
    ///
    /// Both option groups are checked before either is bound, so a group
    /// already owned by another cluster leaves this configuration unregistered
    /// and untouched.
    ///
    /// # Returns
    ///
    /// Returns [`DriverError::AlreadyRegistered`] if this configuration, or one
    /// of the forwarded option groups, was already registered.
    pub fn register(&self, manager: &Arc<dyn ClusterManager>) -> Result<()> {
        if self
            .registered
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DriverError::AlreadyRegistered("configuration"));
        }

        if let Err(e) = self.forward(manager) {
            self.registered.store(false, Ordering::Release);
            return Err(e);
        }

        if self.metrics_enabled {
            self.pooling_options.enable_metrics();
        }

        Ok(())
    }

    fn forward(&self, manager: &Arc<dyn ClusterManager>) -> Result<()> {
        if self.protocol_options.is_registered() {
            return Err(DriverError::AlreadyRegistered("protocol options"));
        }
        if self.pooling_options.is_registered() {
            return Err(DriverError::AlreadyRegistered("pooling options"));
        }

        debug!("Registering configuration with cluster manager");
        self.protocol_options.register(manager)?;
        self.pooling_options.register(manager)
    }

    /// Current lifecycle state
    pub fn registration_state(&self) -> RegistrationState {
        if self.registered.load(Ordering::Acquire) {
            RegistrationState::Registered
        } else {
            RegistrationState::Unregistered
        }
    }

    /// Returns the policies set for the cluster.
    pub fn policies(&self) -> &Arc<Policies> {
        &self.policies
    }

    /// Returns the native protocol options (port, compression).
    pub fn protocol_options(&self) -> &Arc<ProtocolOptions> {
        &self.protocol_options
    }

    /// Returns the connection pooling options.
    pub fn pooling_options(&self) -> &Arc<PoolingOptions> {
        &self.pooling_options
    }

    /// Returns the low-level TCP options (no-delay, keep-alive, ...).
    pub fn socket_options(&self) -> &Arc<SocketOptions> {
        &self.socket_options
    }

    /// Returns the authentication provider used to connect to the cluster.
    pub fn auth_info_provider(&self) -> &Arc<dyn AuthInfoProvider> {
        &self.auth_provider
    }

    /// Returns whether metrics collection is enabled for the cluster.
    ///
    /// Enabled by default; disabled with [`ConfigurationBuilder::without_metrics`].
    pub fn is_metrics_enabled(&self) -> bool {
        self.metrics_enabled
    }

    /// Serializable view of the configuration, for diagnostics
    pub fn snapshot(&self) -> ConfigurationSnapshot<'_> {
        ConfigurationSnapshot {
            protocol: &self.protocol_options,
            pooling: self.pooling_options.snapshot(),
            socket: &self.socket_options,
            load_balancing_policy: format!("{:?}", self.policies.load_balancing_policy()),
            reconnection_policy: format!("{:?}", self.policies.reconnection_policy()),
            retry_policy: format!("{:?}", self.policies.retry_policy()),
            authentication: !is_no_auth(&self.auth_provider),
            metrics_enabled: self.metrics_enabled,
        }
    }

    /// The diagnostics snapshot as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of a [`Configuration`]
///
/// Credentials are never included, only whether authentication is on.
#[derive(Debug, Serialize)]
pub struct ConfigurationSnapshot<'a> {
    pub protocol: &'a ProtocolOptions,
    pub pooling: PoolingSnapshot,
    pub socket: &'a SocketOptions,
    pub load_balancing_policy: String,
    pub reconnection_policy: String,
    pub retry_policy: String,
    pub authentication: bool,
    pub metrics_enabled: bool,
}
