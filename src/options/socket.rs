//! Low-level socket options
//!
//! TCP settings applied to every connection the client opens. Only the
//! connect timeout always has a value; the other knobs are left to the
//! operating system unless explicitly set.

use std::time::Duration;
use serde::Serialize;
use socket2::Socket;
use log::debug;

use crate::common::Result;
use crate::config::defaults;

/// Socket options
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SocketOptions {
    connect_timeout: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    keep_alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reuse_address: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linger: Option<Duration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tcp_no_delay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    receive_buffer_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    send_buffer_size: Option<usize>,
}

impl Default for SocketOptions {
    fn default() -> Self {
        Self {
            connect_timeout: defaults::connect_timeout(),
            keep_alive: None,
            reuse_address: None,
            linger: None,
            tcp_no_delay: None,
            receive_buffer_size: None,
            send_buffer_size: None,
        }
    }
}

impl SocketOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = Some(keep_alive);
        self
    }

    pub fn with_reuse_address(mut self, reuse_address: bool) -> Self {
        self.reuse_address = Some(reuse_address);
        self
    }

    /// Linger on close for `linger` (`SO_LINGER`)
    pub fn with_linger(mut self, linger: Duration) -> Self {
        self.linger = Some(linger);
        self
    }

    pub fn with_tcp_no_delay(mut self, tcp_no_delay: bool) -> Self {
        self.tcp_no_delay = Some(tcp_no_delay);
        self
    }

    /// Receive buffer hint (`SO_RCVBUF`), in bytes
    pub fn with_receive_buffer_size(mut self, size: usize) -> Self {
        self.receive_buffer_size = Some(size);
        self
    }

    /// Send buffer hint (`SO_SNDBUF`), in bytes
    pub fn with_send_buffer_size(mut self, size: usize) -> Self {
        self.send_buffer_size = Some(size);
        self
    }

    /// How long to wait for a connection to be established
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn keep_alive(&self) -> Option<bool> {
        self.keep_alive
    }

    pub fn reuse_address(&self) -> Option<bool> {
        self.reuse_address
    }

    pub fn linger(&self) -> Option<Duration> {
        self.linger
    }

    pub fn tcp_no_delay(&self) -> Option<bool> {
        self.tcp_no_delay
    }

    pub fn receive_buffer_size(&self) -> Option<usize> {
        self.receive_buffer_size
    }

    pub fn send_buffer_size(&self) -> Option<usize> {
        self.send_buffer_size
    }

    /// Apply every configured option to `socket`
    ///
    /// Called by the connection factory right after the socket is created and
    /// before it connects. The connect timeout is not applied here; it is passed
    /// to `Socket::connect_timeout` by the caller.
    ///
    /// # Returns
    ///
    /// Returns an error if the operating system rejects any of the options
    pub fn apply(&self, socket: &Socket) -> Result<()> {
        if let Some(keep_alive) = self.keep_alive {
            socket.set_keepalive(keep_alive)?;
        }
        if let Some(reuse_address) = self.reuse_address {
            socket.set_reuse_address(reuse_address)?;
        }
        if let Some(linger) = self.linger {
            socket.set_linger(Some(linger))?;
        }
        if let Some(tcp_no_delay) = self.tcp_no_delay {
            socket.set_nodelay(tcp_no_delay)?;
        }
        if let Some(size) = self.receive_buffer_size {
            socket.set_recv_buffer_size(size)?;
        }
        if let Some(size) = self.send_buffer_size {
            socket.set_send_buffer_size(size)?;
        }

        debug!("Applied socket options: {:?}", self);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use socket2::{Domain, Protocol, Type};

    fn tcp_socket() -> Socket {
        Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP)).expect("Failed to create socket")
    }

    #[test]
    fn test_defaults_leave_os_settings() {
        let options = SocketOptions::new();

        assert_eq!(options.connect_timeout(), Duration::from_millis(5000));
        assert_eq!(options.keep_alive(), None);
        assert_eq!(options.tcp_no_delay(), None);
        assert_eq!(options.linger(), None);

        let socket = tcp_socket();
        options.apply(&socket).unwrap();
    }

    #[test]
    fn test_apply_sets_configured_options() {
        let options = SocketOptions::new()
            .with_keep_alive(true)
            .with_tcp_no_delay(true)
            .with_reuse_address(true)
            .with_linger(Duration::from_secs(1));

        let socket = tcp_socket();
        options.apply(&socket).unwrap();

        assert!(socket.keepalive().unwrap());
        assert!(socket.nodelay().unwrap());
        assert!(socket.reuse_address().unwrap());
        assert_eq!(socket.linger().unwrap(), Some(Duration::from_secs(1)));
    }

    #[test]
    fn test_snapshot_omits_unset_options() {
        let options = SocketOptions::new().with_tcp_no_delay(false);
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["tcp_no_delay"], false);
        assert!(json.get("keep_alive").is_none());
        assert_eq!(json["connect_timeout"]["secs"], 5);
    }
}
