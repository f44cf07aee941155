//! Configuration traits

use log::info;

use crate::auth::is_no_auth;
use crate::config::configuration::Configuration;
use crate::policies::HostDistance;

/// Trait for logging configuration
pub trait ConfigLogger {
    /// Log the effective configuration at info level
    fn log(&self);
}

impl ConfigLogger for Configuration {
    fn log(&self) {
        // Only log in info level or below
        if !log::log_enabled!(log::Level::Info) {
            return;
        }

        info!("=== Cluster Configuration ===");

        let protocol = self.protocol_options();
        info!("Protocol Options:");
        info!("  Port: {}", protocol.port());
        info!("  Compression: {}", protocol.compression());
        match protocol.protocol_version() {
            Some(version) => info!("  Protocol version: {}", version),
            None => info!("  Protocol version: negotiated"),
        }

        let pooling = self.pooling_options();
        info!("Pooling Options:");
        for distance in [HostDistance::Local, HostDistance::Remote] {
            info!(
                "  {} hosts: {} core / {} max connections, {}-{} simultaneous requests per connection",
                distance,
                pooling.core_connections_per_host(distance),
                pooling.max_connections_per_host(distance),
                pooling.min_simultaneous_requests_per_connection_threshold(distance),
                pooling.max_simultaneous_requests_per_connection_threshold(distance),
            );
        }

        let socket = self.socket_options();
        info!("Socket Options:");
        info!("  Connect timeout: {} ms", socket.connect_timeout().as_millis());
        if let Some(keep_alive) = socket.keep_alive() {
            info!("  Keep-alive: {}", keep_alive);
        }
        if let Some(tcp_no_delay) = socket.tcp_no_delay() {
            info!("  TCP no-delay: {}", tcp_no_delay);
        }
        if let Some(reuse_address) = socket.reuse_address() {
            info!("  Reuse address: {}", reuse_address);
        }
        if let Some(linger) = socket.linger() {
            info!("  Linger: {} ms", linger.as_millis());
        }
        if let Some(size) = socket.receive_buffer_size() {
            info!("  Receive buffer: {} bytes", size);
        }
        if let Some(size) = socket.send_buffer_size() {
            info!("  Send buffer: {} bytes", size);
        }

        let policies = self.policies();
        info!("Policies:");
        info!("  Load balancing: {:?}", policies.load_balancing_policy());
        info!("  Reconnection: {:?}", policies.reconnection_policy());
        info!("  Retry: {:?}", policies.retry_policy());

        if is_no_auth(self.auth_info_provider()) {
            info!("Authentication: none");
        } else {
            info!("Authentication: {:?}", self.auth_info_provider());
        }
        info!("Metrics: {}", if self.is_metrics_enabled() { "enabled" } else { "disabled" });

        info!("=============================");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::init_logger;
    use crate::options::SocketOptions;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_log_full_configuration() {
        init_logger("info");

        let config = Configuration::builder()
            .with_socket_options(SocketOptions::new().with_keep_alive(true).with_send_buffer_size(65536))
            .with_credentials("cassie", "s3cret")
            .build();

        // Must not panic, whatever the active filter
        config.log();
        Configuration::new().log();
    }
}
