//! Upper-body rule
//!
//! Checks the weapon arm and the back arm:
//! - front wrist reaches forward of the front shoulder
//! - front elbow is slightly bent (angle inside the configured band)
//! - back wrist is held up near or above back shoulder height

use super::{exceeds, forward_displacement, within, RuleContext};
use crate::geometry::angle_degrees;

/// Outcome of the upper-body rule
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UpperBodyReport {
    /// All six arm joints cleared the confidence floor
    pub joints_present: bool,
    /// Front wrist x minus front shoulder x, positive toward the front
    pub forward_reach: Option<f32>,
    pub arm_forward: bool,
    /// Shoulder-elbow-wrist angle of the front arm (degrees)
    pub front_elbow_angle: Option<f32>,
    pub elbow_in_band: bool,
    /// Back wrist height minus back shoulder height
    pub back_wrist_lift: Option<f32>,
    pub back_wrist_raised: bool,
}

impl UpperBodyReport {
    pub fn evaluate(ctx: &RuleContext<'_>) -> Self {
        let j = &ctx.joints;
        let t = ctx.thresholds;
        let floor = ctx.floor();

        let (
            Some(front_wrist),
            Some(front_elbow),
            Some(front_shoulder),
            Some(back_wrist),
            Some(_back_elbow),
            Some(back_shoulder),
        ) = (
            j.front_wrist(floor),
            j.front_elbow(floor),
            j.front_shoulder(floor),
            j.back_wrist(floor),
            j.back_elbow(floor),
            j.back_shoulder(floor),
        ) else {
            return Self::default();
        };

        let forward_reach = Some(forward_displacement(
            front_wrist,
            front_shoulder,
            j.handedness(),
        ));
        let front_elbow_angle = Some(angle_degrees(front_shoulder, front_elbow, front_wrist));
        let back_wrist_lift = Some(back_wrist.y - back_shoulder.y);

        Self {
            joints_present: true,
            forward_reach,
            arm_forward: exceeds(forward_reach, t.forward_reach),
            front_elbow_angle,
            elbow_in_band: within(&t.front_elbow, front_elbow_angle),
            back_wrist_lift,
            back_wrist_raised: exceeds(back_wrist_lift, -t.back_wrist_margin),
        }
    }

    pub fn passed(&self) -> bool {
        self.joints_present && self.arm_forward && self.elbow_in_band && self.back_wrist_raised
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleThresholds;
    use crate::joints::{Handedness, JointName, JointObservation};
    use crate::rules::fixtures::right_handed_guard;

    fn evaluate(obs: &JointObservation, hand: Handedness) -> UpperBodyReport {
        let thresholds = RuleThresholds::default();
        let ctx = RuleContext::new(obs, hand, &thresholds);
        UpperBodyReport::evaluate(&ctx)
    }

    #[test]
    fn test_guard_passes() {
        let report = evaluate(&right_handed_guard(), Handedness::Right);
        assert!(report.passed());
        assert!(report.forward_reach.unwrap() > 0.15);
        let angle = report.front_elbow_angle.unwrap();
        assert!(angle > 120.0 && angle < 145.0);
    }

    #[test]
    fn test_wrong_handedness_fails() {
        // Right-handed stance read as left-handed: the "front" arm is now the
        // raised back arm, which does not reach toward -x enough
        let report = evaluate(&right_handed_guard(), Handedness::Left);
        assert!(!report.passed());
    }

    #[test]
    fn test_arm_not_forward() {
        let obs = right_handed_guard().with_joint(JointName::RightWrist, 0.58, 0.62, 0.9);
        let report = evaluate(&obs, Handedness::Right);
        assert!(!report.arm_forward);
        assert!(!report.passed());
    }

    #[test]
    fn test_elbow_locked_straight() {
        // Shoulder, elbow and wrist collinear
        let obs = right_handed_guard()
            .with_joint(JointName::RightElbow, 0.65, 0.75, 0.9)
            .with_joint(JointName::RightWrist, 0.75, 0.75, 0.9);
        let report = evaluate(&obs, Handedness::Right);
        assert!(report.arm_forward);
        assert!(!report.elbow_in_band);
        assert!((report.front_elbow_angle.unwrap() - 180.0).abs() < 0.1);
        assert!(!report.passed());
    }

    #[test]
    fn test_back_arm_dropped() {
        // Back wrist well below shoulder minus margin
        let obs = right_handed_guard().with_joint(JointName::LeftWrist, 0.40, 0.55, 0.9);
        let report = evaluate(&obs, Handedness::Right);
        assert!(!report.back_wrist_raised);
        assert!(report.back_wrist_lift.unwrap() < -0.05);
        assert!(!report.passed());
    }

    #[test]
    fn test_back_wrist_within_margin() {
        // Slightly below the shoulder but inside the margin
        let obs = right_handed_guard().with_joint(JointName::LeftWrist, 0.36, 0.72, 0.9);
        assert!(evaluate(&obs, Handedness::Right).back_wrist_raised);
    }

    #[test]
    fn test_low_confidence_joint_clears_metrics() {
        let obs = right_handed_guard().with_joint(JointName::LeftElbow, 0.38, 0.80, 0.3);
        let report = evaluate(&obs, Handedness::Right);
        assert_eq!(report, UpperBodyReport::default());
        assert!(!report.passed());
    }
}
