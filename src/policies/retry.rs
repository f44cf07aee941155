//! Retry policies
//!
//! Consulted when a coordinator reports a timeout or too few live replicas.
//! The policy only decides; re-sending the request is up to the caller.

use std::fmt;

/// What to do with a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Send the request again
    Retry,
    /// Surface the error to the user
    Rethrow,
    /// Swallow the error and report an empty result
    Ignore,
}

/// Kind of write that timed out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteType {
    Simple,
    Batch,
    UnloggedBatch,
    Counter,
    /// Write to the distributed batch log, before the batch itself is applied
    BatchLog,
}

/// Decides whether failed requests are retried
pub trait RetryPolicy: Send + Sync + fmt::Debug {
    /// A read timed out on the coordinator
    fn on_read_timeout(
        &self,
        required_responses: u32,
        received_responses: u32,
        data_retrieved: bool,
        retry_count: u32,
    ) -> RetryDecision;

    /// A write timed out on the coordinator
    fn on_write_timeout(
        &self,
        write_type: WriteType,
        required_acks: u32,
        received_acks: u32,
        retry_count: u32,
    ) -> RetryDecision;

    /// The coordinator knew too few replicas were alive to even try
    fn on_unavailable(&self, required_replicas: u32, alive_replicas: u32, retry_count: u32) -> RetryDecision;
}

/// Conservative retry policy
///
/// Retries at most once, and only when a retry is likely to succeed:
/// - a read whose replicas answered in time but the data replica did not,
/// - a write to the batch log, which is idempotent.
///
/// Everything else is rethrown.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultRetryPolicy;

impl RetryPolicy for DefaultRetryPolicy {
    fn on_read_timeout(
        &self,
        required_responses: u32,
        received_responses: u32,
        data_retrieved: bool,
        retry_count: u32,
    ) -> RetryDecision {
        if retry_count != 0 {
            return RetryDecision::Rethrow;
        }

        if received_responses >= required_responses && !data_retrieved {
            RetryDecision::Retry
        } else {
            RetryDecision::Rethrow
        }
    }

    fn on_write_timeout(
        &self,
        write_type: WriteType,
        _required_acks: u32,
        _received_acks: u32,
        retry_count: u32,
    ) -> RetryDecision {
        if retry_count != 0 {
            return RetryDecision::Rethrow;
        }

        match write_type {
            WriteType::BatchLog => RetryDecision::Retry,
            _ => RetryDecision::Rethrow,
        }
    }

    fn on_unavailable(&self, _required_replicas: u32, _alive_replicas: u32, _retry_count: u32) -> RetryDecision {
        RetryDecision::Rethrow
    }
}

/// Never retries, never ignores
#[derive(Debug, Clone, Copy, Default)]
pub struct FallthroughRetryPolicy;

impl RetryPolicy for FallthroughRetryPolicy {
    fn on_read_timeout(&self, _: u32, _: u32, _: bool, _: u32) -> RetryDecision {
        RetryDecision::Rethrow
    }

    fn on_write_timeout(&self, _: WriteType, _: u32, _: u32, _: u32) -> RetryDecision {
        RetryDecision::Rethrow
    }

    fn on_unavailable(&self, _: u32, _: u32, _: u32) -> RetryDecision {
        RetryDecision::Rethrow
    }
}
