//! Configuration types
//!
//! Platform-agnostic configuration structures. The engine crate loads them
//! from TOML; embedded users can construct them directly.

pub mod thresholds;
pub mod timing;

pub use thresholds::*;
pub use timing::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Rule thresholds
    pub rules: RuleThresholds,
    /// Hold timer timing
    pub hold: HoldConfig,
    /// Diagnostic metrics throttling
    pub metrics: MetricsConfig,
}
