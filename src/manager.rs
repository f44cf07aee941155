//! Cluster manager hook
//!
//! The cluster manager owns live connections, pools and topology state. It is
//! created after the [`Configuration`](crate::config::Configuration), so option
//! groups that need to react to connection events receive it later through a
//! one-shot registration. Only a weak reference is kept: the manager owns the
//! configuration, never the other way round.

use std::fmt;
use std::sync::{Arc, Weak};
use once_cell::sync::OnceCell;
use log::debug;

use crate::common::{DriverError, Result};
use crate::options::ProtocolVersion;

/// Interface the configuration consumes from the cluster's internal manager
pub trait ClusterManager: Send + Sync {
    /// Re-check every host pool against the current pooling options,
    /// opening or trimming connections as needed.
    fn ensure_pools_sizing(&self);

    /// Protocol version negotiated by the control connection, if any yet.
    fn protocol_version(&self) -> Option<ProtocolVersion>;
}

/// One-shot slot holding a weak back-reference to the cluster manager
pub(crate) struct ManagerSlot {
    owner: &'static str,
    manager: OnceCell<Weak<dyn ClusterManager>>,
}

impl ManagerSlot {
    pub(crate) const fn new(owner: &'static str) -> Self {
        Self {
            owner,
            manager: OnceCell::new(),
        }
    }

    /// Bind the slot to `manager`
    ///
    /// Fails with [`DriverError::AlreadyRegistered`] if the slot is already bound.
    pub(crate) fn bind(&self, manager: &Arc<dyn ClusterManager>) -> Result<()> {
        self.manager
            .set(Arc::downgrade(manager))
            .map_err(|_| DriverError::AlreadyRegistered(self.owner))?;

        debug!("{} registered with cluster manager", self.owner);
        Ok(())
    }

    pub(crate) fn is_bound(&self) -> bool {
        self.manager.get().is_some()
    }

    /// The manager, unless the slot is unbound or the manager was dropped
    pub(crate) fn get(&self) -> Option<Arc<dyn ClusterManager>> {
        self.manager.get().and_then(Weak::upgrade)
    }
}

impl fmt::Debug for ManagerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManagerSlot")
            .field("owner", &self.owner)
            .field("bound", &self.is_bound())
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Manager double that counts pool sizing requests
    #[derive(Default)]
    pub(crate) struct CountingManager {
        pub(crate) sizing_calls: AtomicUsize,
        pub(crate) version: Option<ProtocolVersion>,
    }

    impl ClusterManager for CountingManager {
        fn ensure_pools_sizing(&self) {
            self.sizing_calls.fetch_add(1, Ordering::SeqCst);
        }

        fn protocol_version(&self) -> Option<ProtocolVersion> {
            self.version
        }
    }

    #[test]
    fn test_bind_once() {
        let slot = ManagerSlot::new("test slot");
        let manager: Arc<dyn ClusterManager> = Arc::new(CountingManager::default());

        assert!(!slot.is_bound());
        assert!(slot.get().is_none());

        slot.bind(&manager).unwrap();
        assert!(slot.is_bound());
        assert!(Arc::ptr_eq(&slot.get().unwrap(), &manager));

        match slot.bind(&manager) {
            Err(DriverError::AlreadyRegistered(owner)) => assert_eq!(owner, "test slot"),
            other => panic!("Expected AlreadyRegistered, got {:?}", other),
        }
    }

    #[test]
    fn test_dropped_manager_is_not_resurrected() {
        let slot = ManagerSlot::new("test slot");
        let manager: Arc<dyn ClusterManager> = Arc::new(CountingManager::default());

        slot.bind(&manager).unwrap();
        drop(manager);

        assert!(slot.is_bound());
        assert!(slot.get().is_none());
    }
}
