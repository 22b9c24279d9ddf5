//! Lower-body rule
//!
//! Checks the legs:
//! - each knee angle (hip-knee-ankle) inside its own configured band
//! - stance wider than the shoulders (ankle spread > shoulder spread)
//! - front shin close to vertical (knee over ankle)
//!
//! The back leg's lean from vertical is reported for diagnostics only.

use super::{at_most, within, RuleContext};
use crate::geometry::{angle_degrees, distance};
use crate::joints::{Limb, Point};

/// Outcome of the lower-body rule
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LowerBodyReport {
    /// Hips, knees, ankles and shoulders all cleared the confidence floor
    pub joints_present: bool,
    /// Front hip-knee-ankle angle (degrees)
    pub front_knee_angle: Option<f32>,
    pub front_knee_in_band: bool,
    /// Back hip-knee-ankle angle (degrees)
    pub back_knee_angle: Option<f32>,
    pub back_knee_in_band: bool,
    /// Distance between the ankles
    pub ankle_spread: Option<f32>,
    /// Distance between the shoulders
    pub shoulder_spread: Option<f32>,
    pub stance_wide: bool,
    /// Horizontal offset between front knee and front ankle
    pub shin_offset: Option<f32>,
    pub shin_vertical: bool,
    /// Back hip-to-ankle line measured from vertical (degrees), never gates
    pub back_leg_lean: Option<f32>,
}

impl LowerBodyReport {
    pub fn evaluate(ctx: &RuleContext<'_>) -> Self {
        let j = &ctx.joints;
        let t = ctx.thresholds;
        let floor = ctx.floor();

        let (
            Some(front_hip),
            Some(back_hip),
            Some(front_knee),
            Some(back_knee),
            Some(front_ankle),
            Some(back_ankle),
            Some(front_shoulder),
            Some(back_shoulder),
        ) = (
            j.front(Limb::Hip, floor),
            j.back(Limb::Hip, floor),
            j.front_knee(floor),
            j.back_knee(floor),
            j.front_ankle(floor),
            j.back_ankle(floor),
            j.front_shoulder(floor),
            j.back_shoulder(floor),
        ) else {
            return Self::default();
        };

        let front_knee_angle = Some(angle_degrees(front_hip, front_knee, front_ankle));
        let back_knee_angle = Some(angle_degrees(back_hip, back_knee, back_ankle));

        let ankle_spread = distance(front_ankle, back_ankle);
        let shoulder_spread = distance(front_shoulder, back_shoulder);

        let shin_offset = Some(libm::fabsf(front_ankle.x - front_knee.x));

        let straight_up = Point::new(back_ankle.x, back_ankle.y + 1.0);
        let back_leg_lean = Some(angle_degrees(back_hip, back_ankle, straight_up));

        Self {
            joints_present: true,
            front_knee_angle,
            front_knee_in_band: within(&t.front_knee, front_knee_angle),
            back_knee_angle,
            back_knee_in_band: within(&t.back_knee, back_knee_angle),
            ankle_spread: Some(ankle_spread),
            shoulder_spread: Some(shoulder_spread),
            stance_wide: ankle_spread > shoulder_spread,
            shin_offset,
            shin_vertical: at_most(shin_offset, t.shin_tolerance),
            back_leg_lean,
        }
    }

    pub fn passed(&self) -> bool {
        self.joints_present
            && self.front_knee_in_band
            && self.back_knee_in_band
            && self.stance_wide
            && self.shin_vertical
    }
}
