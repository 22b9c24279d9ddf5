//! Boundary visibility rule
//!
//! Confirms the whole body is inside the frame: head, both hands and both
//! feet. Used on its own during camera setup and as an auxiliary "whole body
//! visible" signal during posture steps.

use super::RuleContext;
use crate::joints::{JointName, JointObservation};

/// Outcome of the boundary visibility rule
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BoundaryReport {
    pub nose_visible: bool,
    pub left_wrist_visible: bool,
    pub right_wrist_visible: bool,
    pub left_ankle_reliable: bool,
    pub right_ankle_reliable: bool,
    /// Knee height minus ankle height on the left leg
    pub left_ankle_gap: Option<f32>,
    /// Knee height minus ankle height on the right leg
    pub right_ankle_gap: Option<f32>,
}

impl BoundaryReport {
    pub fn evaluate(ctx: &RuleContext<'_>) -> Self {
        let t = ctx.thresholds;
        let obs = ctx.joints.observation();

        let left_ankle_gap = ankle_gap(ctx, JointName::LeftAnkle, JointName::LeftKnee);
        let right_ankle_gap = ankle_gap(ctx, JointName::RightAnkle, JointName::RightKnee);

        Self {
            nose_visible: obs.confident(JointName::Nose, t.nose_confidence).is_some(),
            left_wrist_visible: visible(obs, JointName::LeftWrist, t.wrist_confidence),
            right_wrist_visible: visible(obs, JointName::RightWrist, t.wrist_confidence),
            left_ankle_reliable: left_ankle_gap.is_some_and(|gap| gap >= t.ankle_knee_gap),
            right_ankle_reliable: right_ankle_gap.is_some_and(|gap| gap >= t.ankle_knee_gap),
            left_ankle_gap,
            right_ankle_gap,
        }
    }

    /// All five visibility conditions hold
    pub fn passed(&self) -> bool {
        self.nose_visible
            && self.left_wrist_visible
            && self.right_wrist_visible
            && self.left_ankle_reliable
            && self.right_ankle_reliable
    }
}

fn visible(obs: &JointObservation, name: JointName, floor: f32) -> bool {
    obs.confident(name, floor).is_some()
}

/// Vertical gap from knee down to ankle, if both are usable
///
/// The detector sometimes reports a mid-shin point as the ankle; such a point
/// sits at or just below the knee and yields a small or negative gap.
fn ankle_gap(ctx: &RuleContext<'_>, ankle: JointName, knee: JointName) -> Option<f32> {
    let ankle = ctx.joints.named(ankle, ctx.thresholds.ankle_confidence)?;
    let knee = ctx.joints.named(knee, ctx.floor())?;
    Some(knee.y - ankle.y)
}
