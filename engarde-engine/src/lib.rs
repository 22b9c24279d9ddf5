//! Host runtime for the En Garde posture engine
//!
//! Wraps the pure logic in `engarde-core` with everything needed to run it
//! against a live camera feed:
//!
//! - Serialized hold-timer session shared by the frame producer and ticks
//! - Status, success, and diagnostics outputs on embassy-sync primitives
//! - TOML configuration loading and validation
//! - Optional embassy-time tick driver (`embassy` feature)

#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod channels;
pub mod config;
pub mod engine;
#[cfg(feature = "embassy")]
pub mod ticker;

pub use channels::{StatusSnapshot, SuccessEvent};
pub use engine::PostureEngine;
