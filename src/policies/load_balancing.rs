//! Load balancing policies

use std::fmt;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use serde::Serialize;

/// How far a host is from the client, as judged by the load balancing policy
///
/// The distance decides how many connections are pooled to the host.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum HostDistance {
    /// Host in the local datacenter
    Local,
    /// Host reachable but not preferred
    Remote,
    /// Host never queried; no connection is opened to it
    Ignored,
}

impl fmt::Display for HostDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
            Self::Ignored => write!(f, "ignored"),
        }
    }
}

/// Decides which hosts are queried and in what order
pub trait LoadBalancingPolicy: Send + Sync + fmt::Debug {
    /// Distance of `host` from the client
    fn distance(&self, host: &SocketAddr) -> HostDistance;

    /// Hosts to try for the next query, in order
    fn query_plan(&self, hosts: &[SocketAddr]) -> Vec<SocketAddr>;
}

/// Round-robin over every known host
///
/// Each query plan starts one host further than the previous one. All hosts
/// are considered local.
#[derive(Debug, Default)]
pub struct RoundRobinPolicy {
    index: AtomicUsize,
}

impl RoundRobinPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LoadBalancingPolicy for RoundRobinPolicy {
    fn distance(&self, _host: &SocketAddr) -> HostDistance {
        HostDistance::Local
    }

    fn query_plan(&self, hosts: &[SocketAddr]) -> Vec<SocketAddr> {
        if hosts.is_empty() {
            return Vec::new();
        }

        let start = self.index.fetch_add(1, Ordering::Relaxed) % hosts.len();
        hosts
            .iter()
            .cycle()
            .skip(start)
            .take(hosts.len())
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts() -> Vec<SocketAddr> {
        vec![
            "10.0.0.1:9042".parse().unwrap(),
            "10.0.0.2:9042".parse().unwrap(),
            "10.0.0.3:9042".parse().unwrap(),
        ]
    }

    #[test]
    fn test_round_robin_rotates() {
        let policy = RoundRobinPolicy::new();
        let hosts = hosts();

        let first = policy.query_plan(&hosts);
        let second = policy.query_plan(&hosts);
        let fourth = {
            policy.query_plan(&hosts);
            policy.query_plan(&hosts)
        };

        assert_eq!(first, hosts);
        assert_eq!(second, vec![hosts[1], hosts[2], hosts[0]]);
        assert_eq!(fourth, first);
    }

    #[test]
    fn test_round_robin_empty_and_distance() {
        let policy = RoundRobinPolicy::new();
        assert!(policy.query_plan(&[]).is_empty());
        assert_eq!(policy.distance(&hosts()[0]), HostDistance::Local);
    }
}
