//! Policies module
//!
//! Pluggable strategies consulted by the client runtime on demand:
//! load balancing, reconnection and retry. Each is a trait object so users
//! can bring their own implementation.

mod load_balancing;
mod reconnection;
mod retry;

pub use load_balancing::{HostDistance, LoadBalancingPolicy, RoundRobinPolicy};
pub use reconnection::{
    ConstantReconnectionPolicy, ExponentialReconnectionPolicy, ReconnectionPolicy, ReconnectionSchedule,
};
pub use retry::{DefaultRetryPolicy, FallthroughRetryPolicy, RetryDecision, RetryPolicy, WriteType};

use std::sync::Arc;

/// Policy bundle
///
/// Groups the three strategies used by the cluster. The defaults are
/// [`RoundRobinPolicy`], [`ExponentialReconnectionPolicy`] (1 second base,
/// 10 minutes max) and [`DefaultRetryPolicy`].
#[derive(Debug, Clone)]
pub struct Policies {
    load_balancing: Arc<dyn LoadBalancingPolicy>,
    reconnection: Arc<dyn ReconnectionPolicy>,
    retry: Arc<dyn RetryPolicy>,
}

impl Policies {
    pub fn new(
        load_balancing: Arc<dyn LoadBalancingPolicy>,
        reconnection: Arc<dyn ReconnectionPolicy>,
        retry: Arc<dyn RetryPolicy>,
    ) -> Self {
        Self {
            load_balancing,
            reconnection,
            retry,
        }
    }

    /// Policy deciding host distances and query plans
    pub fn load_balancing_policy(&self) -> &Arc<dyn LoadBalancingPolicy> {
        &self.load_balancing
    }

    /// Policy scheduling reconnections to hosts that went down
    pub fn reconnection_policy(&self) -> &Arc<dyn ReconnectionPolicy> {
        &self.reconnection
    }

    /// Policy deciding whether failed requests are retried
    pub fn retry_policy(&self) -> &Arc<dyn RetryPolicy> {
        &self.retry
    }
}

impl Default for Policies {
    fn default() -> Self {
        Self::new(
            Arc::new(RoundRobinPolicy::new()),
            Arc::new(ExponentialReconnectionPolicy::default()),
            Arc::new(DefaultRetryPolicy),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_policies() {
        let policies = Policies::default();

        let mut schedule = policies.reconnection_policy().new_schedule();
        assert_eq!(schedule.next_delay(), Duration::from_secs(1));
        assert_eq!(schedule.next_delay(), Duration::from_secs(2));

        assert_eq!(
            policies.retry_policy().on_write_timeout(WriteType::BatchLog, 1, 0, 0),
            RetryDecision::Retry
        );

        let host = "127.0.0.1:9042".parse().unwrap();
        assert_eq!(policies.load_balancing_policy().distance(&host), HostDistance::Local);
    }

    #[test]
    fn test_custom_policies_are_kept() {
        let retry: Arc<dyn RetryPolicy> = Arc::new(FallthroughRetryPolicy);
        let policies = Policies::new(
            Arc::new(RoundRobinPolicy::new()),
            Arc::new(ConstantReconnectionPolicy::new(Duration::from_secs(5))),
            retry.clone(),
        );

        assert!(Arc::ptr_eq(policies.retry_policy(), &retry));
    }
}
