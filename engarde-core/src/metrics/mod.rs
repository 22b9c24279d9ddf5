//! Diagnostic metrics
//!
//! Rate-limited snapshots of rule metrics for diagnostic consumers. The
//! throttle sits beside the decision path and never feeds back into it.

pub mod throttle;

pub use throttle::{MetricValues, MetricsSnapshot, MetricsThrottle, MetricsTopic, MAX_TOPICS};
