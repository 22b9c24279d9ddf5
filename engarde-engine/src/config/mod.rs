//! Configuration loading and validation
//!
//! Loads the engine configuration from TOML, falling back to the built-in
//! calibration defaults when no file is supplied or it cannot be used.

pub mod toml;

pub use self::toml::{parse_config, validate, ConfigError};

use engarde_core::config::EngineConfig;

/// Load configuration from optional TOML text
///
/// Any parse or validation failure is logged and the defaults are used.
pub fn load(source: Option<&str>) -> EngineConfig {
    let Some(source) = source else {
        info!("no engine config, using defaults");
        return EngineConfig::default();
    };

    match parse_config(source) {
        Ok(config) => {
            info!("engine config loaded");
            config
        }
        Err(e) => {
            warn!("engine config rejected ({}), using defaults", e);
            EngineConfig::default()
        }
    }
}
