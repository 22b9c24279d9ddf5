//! User-facing feedback derived from engine output
//!
//! Maps a frame's sub-checks and the hold state to a status style and to
//! granular guidance ("raise the back arm" rather than just "wrong").

use heapless::Vec;

use crate::evaluator::{Mode, ValidityResult};
use crate::hold::HoldState;

/// Maximum number of guidance items for one frame
pub const MAX_GUIDANCE: usize = 12;

/// Overall status styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusStyle {
    /// Nothing evaluated yet
    Neutral,
    /// Target met or hold complete
    Success,
    /// Target not met
    Warning,
}

impl StatusStyle {
    pub fn for_status(result: Option<&ValidityResult>, hold: HoldState) -> Self {
        if hold.is_terminal() {
            return StatusStyle::Success;
        }
        match result {
            None => StatusStyle::Neutral,
            Some(r) if r.valid => StatusStyle::Success,
            Some(_) => StatusStyle::Warning,
        }
    }
}

/// One actionable correction, or a status line when nothing needs fixing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Guidance {
    /// Hold finished for this activation
    HoldComplete,
    /// Setup target met; keep still
    BodyDetected,
    /// Posture target met; keep still
    PoseDetected,
    /// No body detected at all
    StepIntoFrame,
    ShowHead,
    ShowHands,
    ShowFeet,
    /// Arm joints missing or low confidence
    ArmsNotVisible,
    ExtendFrontArm,
    AdjustFrontElbow,
    RaiseBackArm,
    /// Leg or shoulder joints missing or low confidence
    LegsNotVisible,
    AdjustFrontKnee,
    AdjustBackKnee,
    WidenStance,
    KneeOverAnkle,
}

impl Guidance {
    /// Short message for display
    pub fn message(&self) -> &'static str {
        match self {
            Guidance::HoldComplete => "Great work. You can continue.",
            Guidance::BodyDetected => "Body detected. Hold steady.",
            Guidance::PoseDetected => "En garde posture detected. Hold steady.",
            Guidance::StepIntoFrame => "Position yourself in frame",
            Guidance::ShowHead => "Keep your head in frame",
            Guidance::ShowHands => "Keep both hands in frame",
            Guidance::ShowFeet => "Keep both feet in frame",
            Guidance::ArmsNotVisible => "Arms not clearly visible",
            Guidance::ExtendFrontArm => "Reach the weapon arm further forward",
            Guidance::AdjustFrontElbow => "Keep the weapon elbow slightly bent",
            Guidance::RaiseBackArm => "Raise the back arm",
            Guidance::LegsNotVisible => "Legs not clearly visible",
            Guidance::AdjustFrontKnee => "Adjust the bend of the front knee",
            Guidance::AdjustBackKnee => "Adjust the bend of the back knee",
            Guidance::WidenStance => "Widen your stance",
            Guidance::KneeOverAnkle => "Keep the front knee over the ankle",
        }
    }

    /// Every correction that applies to this frame, most basic first
    ///
    /// In posture mode, visibility problems are only listed when no rule
    /// report explains the failure.
    pub fn all(
        mode: Mode,
        result: &ValidityResult,
        hold: HoldState,
    ) -> Vec<Guidance, MAX_GUIDANCE> {
        let mut out = Vec::new();

        if hold.is_terminal() {
            let _ = out.push(Guidance::HoldComplete);
            return out;
        }
        if result.valid {
            let _ = out.push(match mode {
                Mode::Setup => Guidance::BodyDetected,
                Mode::Posture => Guidance::PoseDetected,
            });
            return out;
        }

        let Some(boundary) = result.boundary else {
            let _ = out.push(Guidance::StepIntoFrame);
            return out;
        };

        let mut push = |g: Guidance, failed: bool| {
            if failed {
                let _ = out.push(g);
            }
        };

        if let Some(upper) = result.upper {
            push(Guidance::ArmsNotVisible, !upper.joints_present);
            if upper.joints_present {
                push(Guidance::ExtendFrontArm, !upper.arm_forward);
                push(Guidance::AdjustFrontElbow, !upper.elbow_in_band);
                push(Guidance::RaiseBackArm, !upper.back_wrist_raised);
            }
        }

        if let Some(lower) = result.lower {
            push(Guidance::LegsNotVisible, !lower.joints_present);
            if lower.joints_present {
                push(Guidance::AdjustFrontKnee, !lower.front_knee_in_band);
                push(Guidance::AdjustBackKnee, !lower.back_knee_in_band);
                push(Guidance::WidenStance, !lower.stance_wide);
                push(Guidance::KneeOverAnkle, !lower.shin_vertical);
            }
        }

        let explained = !out.is_empty();
        if mode == Mode::Setup || !explained {
            if !boundary.nose_visible {
                let _ = out.push(Guidance::ShowHead);
            }
            if !(boundary.left_wrist_visible && boundary.right_wrist_visible) {
                let _ = out.push(Guidance::ShowHands);
            }
            if !(boundary.left_ankle_reliable && boundary.right_ankle_reliable) {
                let _ = out.push(Guidance::ShowFeet);
            }
        }

        if out.is_empty() {
            let _ = out.push(Guidance::StepIntoFrame);
        }
        out
    }

    /// The single most relevant line for this frame
    pub fn primary(mode: Mode, result: &ValidityResult, hold: HoldState) -> Guidance {
        Self::all(mode, result, hold)
            .first()
            .copied()
            .unwrap_or(Guidance::StepIntoFrame)
    }
}
