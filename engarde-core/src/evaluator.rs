//! Frame evaluator
//!
//! Turns one observation into one `ValidityResult` for the active mode and
//! training step. Evaluation is a pure function of its inputs: no state is
//! carried between frames.

use crate::config::RuleThresholds;
use crate::joints::{Handedness, JointObservation};
use crate::rules::{BoundaryReport, FullPoseReport, LowerBodyReport, RuleContext, UpperBodyReport};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which rule family gates the hold timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mode {
    /// Camera setup: boundary visibility only
    #[default]
    Setup,
    /// Stance training: the active step's rule
    Posture,
}

/// Training step selecting the posture rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrainingStep {
    #[default]
    UpperBody,
    LowerBody,
    FullPose,
    /// All steps done; nothing left to gate
    Completed,
}

impl TrainingStep {
    /// Step that follows this one once it has been held
    pub const fn next(self) -> Self {
        match self {
            TrainingStep::UpperBody => TrainingStep::LowerBody,
            TrainingStep::LowerBody => TrainingStep::FullPose,
            TrainingStep::FullPose | TrainingStep::Completed => TrainingStep::Completed,
        }
    }

    /// Check if this is the terminal step
    pub const fn is_completed(self) -> bool {
        matches!(self, TrainingStep::Completed)
    }
}

/// Externally supplied evaluation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalContext {
    pub handedness: Handedness,
    pub step: TrainingStep,
    pub mode: Mode,
}

impl EvalContext {
    pub const fn new(handedness: Handedness, step: TrainingStep, mode: Mode) -> Self {
        Self {
            handedness,
            step,
            mode,
        }
    }
}

/// Per-frame verdict plus every metric behind it
///
/// Only `valid` drives the hold timer; the reports exist for feedback and
/// diagnostics. A report is `None` when its rule was not evaluated this frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ValidityResult {
    pub valid: bool,
    pub boundary: Option<BoundaryReport>,
    pub upper: Option<UpperBodyReport>,
    pub lower: Option<LowerBodyReport>,
}

impl ValidityResult {
    /// Result for a frame where no body was detected
    pub const fn absent() -> Self {
        Self {
            valid: false,
            boundary: None,
            upper: None,
            lower: None,
        }
    }

    /// Whole-body visibility, false when not evaluated
    pub fn body_visible(&self) -> bool {
        self.boundary.is_some_and(|b| b.passed())
    }
}

/// Stateless rule dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameEvaluator {
    thresholds: RuleThresholds,
}

impl FrameEvaluator {
    pub const fn new(thresholds: RuleThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &RuleThresholds {
        &self.thresholds
    }

    /// Evaluate one frame
    ///
    /// `None` means the detector found no body this frame; the result is
    /// invalid with every metric cleared.
    pub fn evaluate(
        &self,
        ctx: EvalContext,
        observation: Option<&JointObservation>,
    ) -> ValidityResult {
        let Some(observation) = observation else {
            return ValidityResult::absent();
        };

        let rules = RuleContext::new(observation, ctx.handedness, &self.thresholds);
        let boundary = BoundaryReport::evaluate(&rules);

        match ctx.mode {
            Mode::Setup => ValidityResult {
                valid: boundary.passed(),
                boundary: Some(boundary),
                upper: None,
                lower: None,
            },
            Mode::Posture => {
                let (upper, lower) = match ctx.step {
                    TrainingStep::UpperBody => (Some(UpperBodyReport::evaluate(&rules)), None),
                    TrainingStep::LowerBody => (None, Some(LowerBodyReport::evaluate(&rules))),
                    TrainingStep::FullPose => {
                        let full = FullPoseReport::evaluate(&rules);
                        (Some(full.upper), Some(full.lower))
                    }
                    TrainingStep::Completed => (None, None),
                };

                let step_passed = match ctx.step {
                    TrainingStep::Completed => true,
                    _ => {
                        upper.map_or(true, |u| u.passed()) && lower.map_or(true, |l| l.passed())
                    }
                };

                let body_ok = !self.thresholds.require_full_body || boundary.passed();

                ValidityResult {
                    valid: step_passed && body_ok,
                    boundary: Some(boundary),
                    upper,
                    lower,
                }
            }
        }
    }
}
