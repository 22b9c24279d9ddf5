//! Hold timer and diagnostics timing

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference hold duration before a pose counts as achieved
pub const DEFAULT_HOLD_DURATION_MS: u32 = 5000;

/// Reference tick cadence (20 Hz) for smooth progress updates
pub const DEFAULT_TICK_INTERVAL_MS: u32 = 50;

/// Reference minimum spacing between diagnostic snapshots per topic
pub const DEFAULT_PUBLISH_INTERVAL_MS: u32 = 3000;

/// Hold timer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HoldConfig {
    /// Continuous valid time required for success (ms)
    pub hold_duration_ms: u32,
    /// Progress tick period while a hold is in progress (ms)
    pub tick_interval_ms: u32,
}

impl Default for HoldConfig {
    fn default() -> Self {
        Self {
            hold_duration_ms: DEFAULT_HOLD_DURATION_MS,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

/// Diagnostic metrics configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MetricsConfig {
    /// Minimum time between snapshots of the same topic (ms)
    pub publish_interval_ms: u32,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            publish_interval_ms: DEFAULT_PUBLISH_INTERVAL_MS,
        }
    }
}
