//! Registration tests
//!
//! Forwarding of the cluster manager from the configuration to the option
//! groups that need a live hook.

use std::sync::Arc;

use mockall::mock;

use cluster_client_config::{
    ClusterManager, Configuration, DriverError, HostDistance, Policies, PoolingOptions,
    ProtocolOptions, ProtocolVersion, RegistrationState, SocketOptions, NO_AUTH,
};

mock! {
    pub Manager {}

    impl ClusterManager for Manager {
        fn ensure_pools_sizing(&self);
        fn protocol_version(&self) -> Option<ProtocolVersion>;
    }
}

/// Test that register forwards the same manager to protocol and pooling options
#[test]
fn test_register_forwards_manager() {
    let config = Configuration::new();

    let mut mock = MockManager::new();
    // Registration alone must not call into the manager
    mock.expect_ensure_pools_sizing().times(0);
    mock.expect_protocol_version().times(0);
    let manager: Arc<dyn ClusterManager> = Arc::new(mock);

    config.register(&manager).expect("Failed to register configuration");

    let protocol_manager = config
        .protocol_options()
        .manager()
        .expect("Protocol options should hold the manager");
    let pooling_manager = config
        .pooling_options()
        .manager()
        .expect("Pooling options should hold the manager");

    assert!(Arc::ptr_eq(&protocol_manager, &manager));
    assert!(Arc::ptr_eq(&pooling_manager, &manager));
}

/// Test that the configuration does not keep the manager alive
#[test]
fn test_manager_is_held_weakly() {
    let config = Configuration::new();
    let manager: Arc<dyn ClusterManager> = Arc::new(MockManager::new());

    config.register(&manager).expect("Failed to register configuration");
    assert_eq!(Arc::strong_count(&manager), 1);

    drop(manager);
    assert!(config.protocol_options().manager().is_none());
    assert!(config.pooling_options().is_registered());
}

/// Test that pool sizing changes reach the registered manager
#[test]
fn test_pooling_change_triggers_pool_sizing() {
    let config = Configuration::new();

    let mut mock = MockManager::new();
    mock.expect_ensure_pools_sizing().times(1).return_const(());
    let manager: Arc<dyn ClusterManager> = Arc::new(mock);

    config.register(&manager).expect("Failed to register configuration");
    config
        .pooling_options()
        .set_core_connections_per_host(HostDistance::Local, 4)
        .expect("Failed to set core connections");

    assert_eq!(config.pooling_options().core_connections_per_host(HostDistance::Local), 4);
}

/// Test that the protocol version comes from the manager once registered
#[test]
fn test_protocol_version_from_manager() {
    let config = Configuration::builder()
        .with_protocol_version(ProtocolVersion::V2)
        .build();

    let mut mock = MockManager::new();
    mock.expect_protocol_version()
        .times(1)
        .return_const(Some(ProtocolVersion::V4));
    let manager: Arc<dyn ClusterManager> = Arc::new(mock);

    assert_eq!(config.protocol_options().protocol_version(), Some(ProtocolVersion::V2));

    config.register(&manager).expect("Failed to register configuration");
    assert_eq!(config.protocol_options().protocol_version(), Some(ProtocolVersion::V4));
}

/// Test that a second registration is rejected
#[test]
fn test_register_twice() {
    let config = Configuration::new();
    let manager: Arc<dyn ClusterManager> = Arc::new(MockManager::new());
    let other: Arc<dyn ClusterManager> = Arc::new(MockManager::new());

    config.register(&manager).expect("Failed to register configuration");

    let err = config.register(&other).unwrap_err();
    assert!(matches!(err, DriverError::AlreadyRegistered("configuration")));
    assert_eq!(config.registration_state(), RegistrationState::Registered);

    // The first manager stays bound
    let bound = config.pooling_options().manager().expect("Manager should be bound");
    assert!(Arc::ptr_eq(&bound, &manager));
}

/// Test that a protocol group owned by another cluster stops registration before pooling is bound
#[test]
fn test_shared_protocol_options_leave_pooling_unbound() {
    let protocol = Arc::new(ProtocolOptions::new());
    let build = |protocol: Arc<ProtocolOptions>| {
        Configuration::with_parts(
            Arc::new(Policies::default()),
            protocol,
            Arc::new(PoolingOptions::new()),
            Arc::new(SocketOptions::new()),
            Arc::clone(&*NO_AUTH),
            false,
        )
    };
    let first = build(Arc::clone(&protocol));
    let second = build(protocol);

    let manager: Arc<dyn ClusterManager> = Arc::new(MockManager::new());
    let other: Arc<dyn ClusterManager> = Arc::new(MockManager::new());
    first.register(&manager).expect("Failed to register configuration");

    let err = second.register(&other).unwrap_err();
    assert!(matches!(err, DriverError::AlreadyRegistered("protocol options")));
    assert_eq!(second.registration_state(), RegistrationState::Unregistered);
    assert!(!second.pooling_options().is_registered());

    // The shared group still points at the first manager
    let bound = second.protocol_options().manager().expect("Manager should be bound");
    assert!(Arc::ptr_eq(&bound, &manager));
}
