//! Reconnection policies
//!
//! A policy hands out one schedule per host that went down; the schedule
//! yields the delay before each successive reconnection attempt.

use std::fmt;
use std::time::Duration;

use crate::common::{DriverError, Result};
use crate::config::defaults;

/// Delays between reconnection attempts to one host
pub trait ReconnectionSchedule: Send {
    /// Delay before the next attempt
    fn next_delay(&mut self) -> Duration;
}

/// Creates reconnection schedules
pub trait ReconnectionPolicy: Send + Sync + fmt::Debug {
    fn new_schedule(&self) -> Box<dyn ReconnectionSchedule>;
}

/// Exponentially growing delays, capped at a maximum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialReconnectionPolicy {
    base_delay: Duration,
    max_delay: Duration,
}

impl ExponentialReconnectionPolicy {
    /// Create a policy starting at `base_delay` and doubling up to `max_delay`
    ///
    /// Fails if `base_delay` is zero or greater than `max_delay`.
    pub fn new(base_delay: Duration, max_delay: Duration) -> Result<Self> {
        if base_delay.is_zero() {
            return Err(DriverError::InvalidArgument(
                "Reconnection base delay must be strictly positive".to_string(),
            ));
        }
        if max_delay < base_delay {
            return Err(DriverError::InvalidArgument(format!(
                "Reconnection max delay ({:?}) cannot be lower than base delay ({:?})",
                max_delay, base_delay
            )));
        }

        Ok(Self { base_delay, max_delay })
    }

    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }
}

impl Default for ExponentialReconnectionPolicy {
    fn default() -> Self {
        Self {
            base_delay: defaults::reconnection_base_delay(),
            max_delay: defaults::reconnection_max_delay(),
        }
    }
}

impl ReconnectionPolicy for ExponentialReconnectionPolicy {
    fn new_schedule(&self) -> Box<dyn ReconnectionSchedule> {
        Box::new(ExponentialSchedule {
            base_delay: self.base_delay,
            max_delay: self.max_delay,
            attempts: 0,
        })
    }
}

struct ExponentialSchedule {
    base_delay: Duration,
    max_delay: Duration,
    attempts: u32,
}

impl ReconnectionSchedule for ExponentialSchedule {
    fn next_delay(&mut self) -> Duration {
        let factor = 1u32.checked_shl(self.attempts).unwrap_or(u32::MAX);
        self.attempts = self.attempts.saturating_add(1);

        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// The same delay between every attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConstantReconnectionPolicy {
    delay: Duration,
}

impl ConstantReconnectionPolicy {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl ReconnectionPolicy for ConstantReconnectionPolicy {
    fn new_schedule(&self) -> Box<dyn ReconnectionSchedule> {
        Box::new(ConstantSchedule(self.delay))
    }
}

struct ConstantSchedule(Duration);

impl ReconnectionSchedule for ConstantSchedule {
    fn next_delay(&mut self) -> Duration {
        self.0
    }
}
