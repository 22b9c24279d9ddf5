//! Platform-agnostic core logic for the En Garde posture trainer
//!
//! This crate contains every decision the trainer makes about a pose, with
//! no dependency on cameras, detectors, or presentation:
//!
//! - Joint model and handedness-mirrored joint access
//! - Geometry helpers (joint angles, distances)
//! - Rule engine (boundary visibility, upper body, lower body, full pose)
//! - Frame evaluator dispatching rules per mode and training step
//! - Hold-timer state machine with one-shot success
//! - Diagnostic metrics throttling
//! - Configuration type definitions
//! - Clock and tick scheduling traits

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod evaluator;
pub mod feedback;
pub mod geometry;
pub mod hold;
pub mod joints;
pub mod metrics;
pub mod rules;
pub mod traits;

pub use evaluator::{EvalContext, FrameEvaluator, Mode, TrainingStep, ValidityResult};
pub use hold::{HoldState, HoldTimer};
pub use joints::{Handedness, JointName, JointObservation, Point};
