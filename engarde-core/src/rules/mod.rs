//! Posture rules
//!
//! Each rule is a conjunction of independent sub-checks over one frame. Rules
//! report every sub-check and the scalar behind it so callers can explain
//! exactly which part of the stance is off.
//!
//! A rule whose joints are missing or under their confidence floor fails;
//! missing data never passes.

pub mod boundary;
pub mod lower;
pub mod upper;

pub use boundary::BoundaryReport;
pub use lower::LowerBodyReport;
pub use upper::UpperBodyReport;

use crate::config::{Band, RuleThresholds};
use crate::joints::{HandedJoints, Handedness, JointObservation, Point};

/// Joints and thresholds shared by every rule evaluation
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub joints: HandedJoints<'a>,
    pub thresholds: &'a RuleThresholds,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        observation: &'a JointObservation,
        handedness: Handedness,
        thresholds: &'a RuleThresholds,
    ) -> Self {
        Self {
            joints: HandedJoints::new(observation, handedness),
            thresholds,
        }
    }

    /// Confidence floor for posture joints
    pub fn floor(&self) -> f32 {
        self.thresholds.min_confidence
    }
}

/// Horizontal displacement of `tip` past `base`, positive toward the front
pub fn forward_displacement(tip: Point, base: Point, handedness: Handedness) -> f32 {
    handedness.forward_sign() * (tip.x - base.x)
}

/// Check an optional scalar against a band; a missing value never passes
pub fn within(band: &Band, value: Option<f32>) -> bool {
    value.is_some_and(|v| band.contains(v))
}

/// Check an optional scalar is strictly above a threshold
pub fn exceeds(value: Option<f32>, threshold: f32) -> bool {
    value.is_some_and(|v| v > threshold)
}

/// Check an optional scalar is at most a limit
pub fn at_most(value: Option<f32>, limit: f32) -> bool {
    value.is_some_and(|v| v <= limit)
}

/// Upper- and lower-body rules evaluated on the same frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FullPoseReport {
    pub upper: UpperBodyReport,
    pub lower: LowerBodyReport,
}

impl FullPoseReport {
    pub fn evaluate(ctx: &RuleContext<'_>) -> Self {
        Self {
            upper: UpperBodyReport::evaluate(ctx),
            lower: LowerBodyReport::evaluate(ctx),
        }
    }

    pub fn passed(&self) -> bool {
        self.upper.passed() && self.lower.passed()
    }
}
