//! Rule thresholds
//!
//! Every numeric cut-off the rules use. The defaults are empirically tuned
//! calibration values, not physiological constants; deployments override them
//! from the engine config file.

use core::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Open interval of accepted values, in degrees for angle bands
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Band {
    /// Exclusive lower bound
    pub min: f32,
    /// Exclusive upper bound
    pub max: f32,
}

impl Band {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check if `value` lies strictly between the bounds
    pub fn contains(&self, value: f32) -> bool {
        self.min < value && value < self.max
    }

    /// Check if the band can contain any value at all
    pub fn is_empty(&self) -> bool {
        !matches!(self.min.partial_cmp(&self.max), Some(Ordering::Less))
    }
}

/// Thresholds for the boundary, upper-body, and lower-body rules
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RuleThresholds {
    /// Confidence floor for joints used by the posture rules
    pub min_confidence: f32,

    // Boundary visibility
    /// Nose confidence floor
    pub nose_confidence: f32,
    /// Wrist confidence floor
    pub wrist_confidence: f32,
    /// Ankle confidence floor
    pub ankle_confidence: f32,
    /// Minimum vertical gap between knee and ankle (rejects shin-as-ankle)
    pub ankle_knee_gap: f32,

    // Upper body
    /// Minimum forward reach of the front wrist past the front shoulder
    pub forward_reach: f32,
    /// Accepted front elbow angle (shoulder-elbow-wrist)
    pub front_elbow: Band,
    /// How far below the back shoulder the back wrist may sit
    pub back_wrist_margin: f32,

    // Lower body
    /// Accepted front knee angle (hip-knee-ankle)
    pub front_knee: Band,
    /// Accepted back knee angle (hip-knee-ankle)
    pub back_knee: Band,
    /// Maximum horizontal offset between front knee and front ankle
    pub shin_tolerance: f32,

    /// Also require the boundary rule to pass in posture mode
    pub require_full_body: bool,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            nose_confidence: 0.4,
            wrist_confidence: 0.3,
            ankle_confidence: 0.45,
            ankle_knee_gap: 0.035,
            forward_reach: 0.06,
            front_elbow: Band::new(100.0, 170.0),
            back_wrist_margin: 0.05,
            front_knee: Band::new(90.0, 150.0),
            // Upper bound above 180 admits a locked-straight back leg
            back_knee: Band::new(110.0, 181.0),
            shin_tolerance: 0.05,
            require_full_body: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_is_open_interval() {
        let band = Band::new(100.0, 170.0);
        assert!(band.contains(135.0));
        assert!(!band.contains(100.0));
        assert!(!band.contains(170.0));
        assert!(!band.contains(95.0));
    }

    #[test]
    fn test_empty_band() {
        assert!(Band::new(10.0, 10.0).is_empty());
        assert!(Band::new(20.0, 10.0).is_empty());
        assert!(Band::new(f32::NAN, 10.0).is_empty());
        assert!(Band::new(10.0, f32::NAN).is_empty());
        assert!(Band::new(f32::NAN, f32::NAN).is_empty());
        assert!(!Band::new(10.0, 20.0).is_empty());
        assert!(!Band::new(f32::NEG_INFINITY, 20.0).is_empty());
    }

    #[test]
    fn test_default_bands_are_usable() {
        let t = RuleThresholds::default();
        assert!(!t.front_elbow.is_empty());
        assert!(!t.front_knee.is_empty());
        assert!(t.back_knee.contains(180.0));
    }
}
