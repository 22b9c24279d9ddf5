//! Per-topic publish throttle

use heapless::Vec;

use crate::config::MetricsConfig;
use crate::evaluator::ValidityResult;
use crate::rules::{LowerBodyReport, UpperBodyReport};

/// Number of metric topics
pub const MAX_TOPICS: usize = 2;

/// Metric stream identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MetricsTopic {
    UpperBody,
    LowerBody,
}

impl MetricsTopic {
    const fn slot(self) -> usize {
        match self {
            MetricsTopic::UpperBody => 0,
            MetricsTopic::LowerBody => 1,
        }
    }
}

/// Metric values carried by a snapshot
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MetricValues {
    UpperBody(UpperBodyReport),
    LowerBody(LowerBodyReport),
}

impl MetricValues {
    pub fn topic(&self) -> MetricsTopic {
        match self {
            MetricValues::UpperBody(_) => MetricsTopic::UpperBody,
            MetricValues::LowerBody(_) => MetricsTopic::LowerBody,
        }
    }
}

/// One published diagnostic sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MetricsSnapshot {
    pub values: MetricValues,
    /// Time the frame was evaluated (ms)
    pub timestamp_ms: u64,
}

impl MetricsSnapshot {
    pub fn topic(&self) -> MetricsTopic {
        self.values.topic()
    }
}

/// Tracks the next allowed publish time for each topic
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MetricsThrottle {
    /// Earliest time each topic may publish again (ms); None = immediately
    next_allowed_ms: [Option<u64>; MAX_TOPICS],
    /// Minimum spacing between snapshots of one topic (ms)
    interval_ms: u32,
}

impl Default for MetricsThrottle {
    fn default() -> Self {
        Self::new(MetricsConfig::default())
    }
}

impl MetricsThrottle {
    pub fn new(config: MetricsConfig) -> Self {
        Self {
            next_allowed_ms: [None; MAX_TOPICS],
            interval_ms: config.publish_interval_ms,
        }
    }

    /// Check whether `topic` may publish at `now_ms`, claiming the slot if so
    pub fn admit(&mut self, topic: MetricsTopic, now_ms: u64) -> bool {
        let slot = &mut self.next_allowed_ms[topic.slot()];
        match *slot {
            Some(next) if now_ms < next => false,
            _ => {
                *slot = Some(now_ms + u64::from(self.interval_ms));
                true
            }
        }
    }

    /// Snapshot whichever rule reports in `result` are due
    pub fn collect(
        &mut self,
        result: &ValidityResult,
        now_ms: u64,
    ) -> Vec<MetricsSnapshot, MAX_TOPICS> {
        let mut out = Vec::new();

        let candidates = [
            result.upper.map(MetricValues::UpperBody),
            result.lower.map(MetricValues::LowerBody),
        ];

        for values in candidates.into_iter().flatten() {
            if self.admit(values.topic(), now_ms) {
                // Capacity equals the number of topics
                let _ = out.push(MetricsSnapshot {
                    values,
                    timestamp_ms: now_ms,
                });
            }
        }

        out
    }

    /// Forget all publish history
    pub fn reset(&mut self) {
        self.next_allowed_ms = [None; MAX_TOPICS];
    }
}
