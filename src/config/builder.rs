//! Configuration builder
//!
//! This module provides a builder pattern for constructing a [`Configuration`]
//! when the cluster builder is finalized.

use std::sync::Arc;
use log::debug;

use crate::auth::{AuthInfoProvider, PlainTextAuthProvider, NO_AUTH};
use crate::config::configuration::Configuration;
use crate::config::defaults;
use crate::options::{Compression, PoolingOptions, ProtocolOptions, ProtocolVersion, SocketOptions};
use crate::policies::{
    DefaultRetryPolicy, ExponentialReconnectionPolicy, LoadBalancingPolicy, Policies, ReconnectionPolicy,
    RetryPolicy, RoundRobinPolicy,
};

/// Configuration builder
///
/// Provides a fluent API for assembling a configuration. Anything left unset
/// gets a fresh default instance.
#[derive(Debug)]
pub struct ConfigurationBuilder {
    port: Option<u16>,
    compression: Option<Compression>,
    protocol_version: Option<ProtocolVersion>,
    load_balancing: Option<Arc<dyn LoadBalancingPolicy>>,
    reconnection: Option<Arc<dyn ReconnectionPolicy>>,
    retry: Option<Arc<dyn RetryPolicy>>,
    pooling: Option<PoolingOptions>,
    socket: Option<SocketOptions>,
    auth_provider: Option<Arc<dyn AuthInfoProvider>>,
    metrics_enabled: bool,
}

impl ConfigurationBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self {
            port: None,
            compression: None,
            protocol_version: None,
            load_balancing: None,
            reconnection: None,
            retry: None,
            pooling: None,
            socket: None,
            auth_provider: None,
            metrics_enabled: defaults::METRICS_ENABLED,
        }
    }

    /// Port every node listens on for native protocol connections
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = Some(compression);
        self
    }

    /// Start protocol negotiation at `version`
    pub fn with_protocol_version(mut self, version: ProtocolVersion) -> Self {
        self.protocol_version = Some(version);
        self
    }

    pub fn with_load_balancing_policy(mut self, policy: impl LoadBalancingPolicy + 'static) -> Self {
        self.load_balancing = Some(Arc::new(policy));
        self
    }

    pub fn with_reconnection_policy(mut self, policy: impl ReconnectionPolicy + 'static) -> Self {
        self.reconnection = Some(Arc::new(policy));
        self
    }

    pub fn with_retry_policy(mut self, policy: impl RetryPolicy + 'static) -> Self {
        self.retry = Some(Arc::new(policy));
        self
    }

    pub fn with_pooling_options(mut self, options: PoolingOptions) -> Self {
        self.pooling = Some(options);
        self
    }

    pub fn with_socket_options(mut self, options: SocketOptions) -> Self {
        self.socket = Some(options);
        self
    }

    /// Authenticate with a username and password
    pub fn with_credentials(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.with_auth_info_provider(Arc::new(PlainTextAuthProvider::new(username, password)))
    }

    pub fn with_auth_info_provider(mut self, provider: Arc<dyn AuthInfoProvider>) -> Self {
        self.auth_provider = Some(provider);
        self
    }

    /// Disable metrics collection
    pub fn without_metrics(mut self) -> Self {
        self.metrics_enabled = false;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Configuration {
        let mut protocol = ProtocolOptions::new();
        if let Some(port) = self.port {
            protocol = protocol.with_port(port);
        }
        if let Some(compression) = self.compression {
            protocol = protocol.with_compression(compression);
        }
        if let Some(version) = self.protocol_version {
            protocol = protocol.with_protocol_version(version);
        }

        let policies = Policies::new(
            self.load_balancing
                .unwrap_or_else(|| Arc::new(RoundRobinPolicy::new())),
            self.reconnection
                .unwrap_or_else(|| Arc::new(ExponentialReconnectionPolicy::default())),
            self.retry.unwrap_or_else(|| Arc::new(DefaultRetryPolicy)),
        );

        let auth_provider = self.auth_provider.unwrap_or_else(|| Arc::clone(&*NO_AUTH));

        debug!(
            "Building configuration: port {}, compression {}, metrics {}",
            protocol.port(),
            protocol.compression(),
            if self.metrics_enabled { "enabled" } else { "disabled" }
        );

        Configuration::with_parts(
            Arc::new(policies),
            Arc::new(protocol),
            Arc::new(self.pooling.unwrap_or_default()),
            Arc::new(self.socket.unwrap_or_default()),
            auth_provider,
            self.metrics_enabled,
        )
    }
}

impl Default for ConfigurationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
