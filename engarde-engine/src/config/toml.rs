//! TOML engine configuration
//!
//! Every key is optional; missing keys take the calibration defaults.
//!
//! ```toml
//! [rules]
//! min_confidence = 0.3
//! forward_reach = 0.06
//! front_elbow = { min = 100.0, max = 170.0 }
//! require_full_body = false
//!
//! [hold]
//! hold_duration_ms = 5000
//! tick_interval_ms = 50
//!
//! [metrics]
//! publish_interval_ms = 3000
//! ```

use core::fmt;

use engarde_core::config::{Band, EngineConfig};

/// Configuration error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Not valid TOML, or a value of the wrong type
    InvalidToml,
    /// Angle band whose minimum is not below its maximum
    EmptyBand(&'static str),
    /// Hold duration of zero
    ZeroHoldDuration,
    /// Tick interval of zero
    ZeroTickInterval,
    /// Confidence outside 0..=1 or negative distance
    ThresholdOutOfRange(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidToml => write!(f, "invalid TOML"),
            ConfigError::EmptyBand(key) => write!(f, "{key}: min must be below max"),
            ConfigError::ZeroHoldDuration => write!(f, "hold.hold_duration_ms must be non-zero"),
            ConfigError::ZeroTickInterval => write!(f, "hold.tick_interval_ms must be non-zero"),
            ConfigError::ThresholdOutOfRange(key) => write!(f, "{key}: value out of range"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Parse and validate TOML configuration
pub fn parse_config(input: &str) -> Result<EngineConfig, ConfigError> {
    let config: EngineConfig = ::toml::from_str(input).map_err(|_| ConfigError::InvalidToml)?;
    validate(&config)?;
    Ok(config)
}

/// Check a configuration for values the engine cannot run with
pub fn validate(config: &EngineConfig) -> Result<(), ConfigError> {
    let rules = &config.rules;

    check_confidence("rules.min_confidence", rules.min_confidence)?;
    check_confidence("rules.nose_confidence", rules.nose_confidence)?;
    check_confidence("rules.wrist_confidence", rules.wrist_confidence)?;
    check_confidence("rules.ankle_confidence", rules.ankle_confidence)?;

    check_distance("rules.ankle_knee_gap", rules.ankle_knee_gap)?;
    check_distance("rules.forward_reach", rules.forward_reach)?;
    check_distance("rules.back_wrist_margin", rules.back_wrist_margin)?;
    check_distance("rules.shin_tolerance", rules.shin_tolerance)?;

    check_band("rules.front_elbow", &rules.front_elbow)?;
    check_band("rules.front_knee", &rules.front_knee)?;
    check_band("rules.back_knee", &rules.back_knee)?;

    if config.hold.hold_duration_ms == 0 {
        return Err(ConfigError::ZeroHoldDuration);
    }
    if config.hold.tick_interval_ms == 0 {
        return Err(ConfigError::ZeroTickInterval);
    }

    Ok(())
}

fn check_confidence(key: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange(key))
    }
}

fn check_distance(key: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange(key))
    }
}

fn check_band(key: &'static str, band: &Band) -> Result<(), ConfigError> {
    if band.is_empty() {
        Err(ConfigError::EmptyBand(key))
    } else {
        Ok(())
    }
}
