//! Connection pooling options
//!
//! Pool sizing per host distance. Unlike the other option groups these values
//! can be tuned while the cluster runs: they are stored atomically, and once the
//! options are registered every sizing change asks the cluster manager to
//! re-check its pools.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use serde::Serialize;
use log::{debug, warn};

use crate::common::{DriverError, Result};
use crate::config::defaults;
use crate::manager::{ClusterManager, ManagerSlot};
use crate::policies::HostDistance;

/// Pool sizing for one host distance
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DistanceSizing {
    pub core_connections: u32,
    pub max_connections: u32,
    pub min_simultaneous_requests: u32,
    pub max_simultaneous_requests: u32,
}

/// Point-in-time copy of the pooling options, for diagnostics
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PoolingSnapshot {
    pub local: DistanceSizing,
    pub remote: DistanceSizing,
}

/// Per-distance values, indexed local then remote
#[derive(Debug)]
struct PerDistance([AtomicU32; 2]);

impl PerDistance {
    fn new(local: u32, remote: u32) -> Self {
        Self([AtomicU32::new(local), AtomicU32::new(remote)])
    }

    fn get(&self, distance: HostDistance) -> u32 {
        match index(distance) {
            Some(i) => self.0[i].load(Ordering::Acquire),
            None => 0,
        }
    }

    fn set(&self, distance: HostDistance, value: u32, what: &str) -> Result<()> {
        let i = index(distance).ok_or_else(|| {
            DriverError::InvalidArgument(format!("Cannot set {} for {} hosts", what, distance))
        })?;
        self.0[i].store(value, Ordering::Release);
        Ok(())
    }
}

fn index(distance: HostDistance) -> Option<usize> {
    match distance {
        HostDistance::Local => Some(0),
        HostDistance::Remote => Some(1),
        HostDistance::Ignored => None,
    }
}

/// Connection pool sizing options
#[derive(Debug)]
pub struct PoolingOptions {
    core_connections: PerDistance,
    max_connections: PerDistance,
    min_simultaneous_requests: PerDistance,
    max_simultaneous_requests: PerDistance,
    manager: ManagerSlot,
    metrics: AtomicBool,
}

impl Default for PoolingOptions {
    fn default() -> Self {
        Self {
            core_connections: PerDistance::new(
                defaults::CORE_CONNECTIONS_LOCAL,
                defaults::CORE_CONNECTIONS_REMOTE,
            ),
            max_connections: PerDistance::new(
                defaults::MAX_CONNECTIONS_LOCAL,
                defaults::MAX_CONNECTIONS_REMOTE,
            ),
            min_simultaneous_requests: PerDistance::new(
                defaults::MIN_SIMULTANEOUS_REQUESTS,
                defaults::MIN_SIMULTANEOUS_REQUESTS,
            ),
            max_simultaneous_requests: PerDistance::new(
                defaults::MAX_SIMULTANEOUS_REQUESTS,
                defaults::MAX_SIMULTANEOUS_REQUESTS,
            ),
            manager: ManagerSlot::new("pooling options"),
            metrics: AtomicBool::new(false),
        }
    }
}

impl PoolingOptions {
    /// Create pooling options with the default sizing
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of connections always kept open to a host at `distance`
    ///
    /// Always 0 for ignored hosts.
    pub fn core_connections_per_host(&self, distance: HostDistance) -> u32 {
        self.core_connections.get(distance)
    }

    /// Upper bound of connections to a host at `distance`
    pub fn max_connections_per_host(&self, distance: HostDistance) -> u32 {
        self.max_connections.get(distance)
    }

    /// In-flight requests per connection under which an extra connection is closed
    pub fn min_simultaneous_requests_per_connection_threshold(&self, distance: HostDistance) -> u32 {
        self.min_simultaneous_requests.get(distance)
    }

    /// In-flight requests per connection over which a new connection is opened
    pub fn max_simultaneous_requests_per_connection_threshold(&self, distance: HostDistance) -> u32 {
        self.max_simultaneous_requests.get(distance)
    }

    /// Set the core number of connections per host
    ///
    /// Fails for [`HostDistance::Ignored`]. If registered, the cluster manager
    /// is asked to resize its pools.
    pub fn set_core_connections_per_host(&self, distance: HostDistance, connections: u32) -> Result<&Self> {
        self.core_connections.set(distance, connections, "core connections")?;
        debug!("Core connections for {} hosts set to {}", distance, connections);
        self.pools_changed();
        Ok(self)
    }

    /// Set the maximum number of connections per host
    pub fn set_max_connections_per_host(&self, distance: HostDistance, connections: u32) -> Result<&Self> {
        self.max_connections.set(distance, connections, "max connections")?;
        debug!("Max connections for {} hosts set to {}", distance, connections);
        self.pools_changed();
        Ok(self)
    }

    pub fn set_min_simultaneous_requests_per_connection_threshold(
        &self,
        distance: HostDistance,
        requests: u32,
    ) -> Result<&Self> {
        self.min_simultaneous_requests
            .set(distance, requests, "min simultaneous requests")?;
        Ok(self)
    }

    pub fn set_max_simultaneous_requests_per_connection_threshold(
        &self,
        distance: HostDistance,
        requests: u32,
    ) -> Result<&Self> {
        self.max_simultaneous_requests
            .set(distance, requests, "max simultaneous requests")?;
        Ok(self)
    }

    /// Hook these options into the cluster manager
    ///
    /// Called once during cluster startup; a second call fails with
    /// [`DriverError::AlreadyRegistered`].
    pub fn register(&self, manager: &Arc<dyn ClusterManager>) -> Result<()> {
        self.manager.bind(manager)
    }

    /// Whether [`PoolingOptions::register`] has been called
    pub fn is_registered(&self) -> bool {
        self.manager.is_bound()
    }

    /// The registered cluster manager, if it is still alive
    pub fn manager(&self) -> Option<Arc<dyn ClusterManager>> {
        self.manager.get()
    }

    /// Publish pool sizing gauges now and after every sizing change
    ///
    /// Gauges `cluster.pool.core_connections` and `cluster.pool.max_connections`
    /// are labelled by `distance` (local, remote).
    pub(crate) fn enable_metrics(&self) {
        self.metrics.store(true, Ordering::Release);
        self.publish_metrics();
    }

    fn publish_metrics(&self) {
        for distance in [HostDistance::Local, HostDistance::Remote] {
            let core = self.core_connections_per_host(distance);
            let max = self.max_connections_per_host(distance);

            metrics::gauge!("cluster.pool.core_connections", "distance" => distance.to_string())
                .set(f64::from(core));
            metrics::gauge!("cluster.pool.max_connections", "distance" => distance.to_string())
                .set(f64::from(max));
        }
    }

    /// Current sizing for local and remote hosts
    pub fn snapshot(&self) -> PoolingSnapshot {
        let sizing = |distance: HostDistance| DistanceSizing {
            core_connections: self.core_connections_per_host(distance),
            max_connections: self.max_connections_per_host(distance),
            min_simultaneous_requests: self.min_simultaneous_requests_per_connection_threshold(distance),
            max_simultaneous_requests: self.max_simultaneous_requests_per_connection_threshold(distance),
        };

        PoolingSnapshot {
            local: sizing(HostDistance::Local),
            remote: sizing(HostDistance::Remote),
        }
    }

    fn pools_changed(&self) {
        if self.metrics.load(Ordering::Acquire) {
            self.publish_metrics();
        }

        if !self.manager.is_bound() {
            return;
        }

        match self.manager.get() {
            Some(manager) => manager.ensure_pools_sizing(),
            None => warn!("Pooling options changed after the cluster manager was dropped"),
        }
    }
}
