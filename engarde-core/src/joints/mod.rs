//! Joint model
//!
//! A `JointObservation` is one frame of detector output: for each anatomical
//! landmark, an optional normalized position plus a confidence score.
//!
//! Coordinates are normalized to `[0, 1]` with the origin at the bottom-left
//! of the frame, so `y` grows upward.

pub mod accessor;

pub use accessor::{Handedness, HandedJoints, Limb};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Position in normalized frame space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Reflect across the vertical center line of the frame
    pub fn mirrored(self) -> Self {
        Self::new(1.0 - self.x, self.y)
    }
}

/// Anatomical landmarks the rules consume
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum JointName {
    Nose,
    Neck,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl JointName {
    /// Number of landmarks
    pub const COUNT: usize = 14;

    /// Every landmark, in index order
    pub const ALL: [JointName; Self::COUNT] = [
        JointName::Nose,
        JointName::Neck,
        JointName::LeftShoulder,
        JointName::RightShoulder,
        JointName::LeftElbow,
        JointName::RightElbow,
        JointName::LeftWrist,
        JointName::RightWrist,
        JointName::LeftHip,
        JointName::RightHip,
        JointName::LeftKnee,
        JointName::RightKnee,
        JointName::LeftAnkle,
        JointName::RightAnkle,
    ];

    /// Storage index for this landmark
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The same landmark on the opposite side of the body
    ///
    /// Midline landmarks (nose, neck) map to themselves.
    pub const fn mirrored(self) -> Self {
        use JointName::*;

        match self {
            Nose => Nose,
            Neck => Neck,
            LeftShoulder => RightShoulder,
            RightShoulder => LeftShoulder,
            LeftElbow => RightElbow,
            RightElbow => LeftElbow,
            LeftWrist => RightWrist,
            RightWrist => LeftWrist,
            LeftHip => RightHip,
            RightHip => LeftHip,
            LeftKnee => RightKnee,
            RightKnee => LeftKnee,
            LeftAnkle => RightAnkle,
            RightAnkle => LeftAnkle,
        }
    }
}

/// A single detected landmark
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Joint {
    /// Normalized position
    pub position: Point,
    /// Detector confidence in `[0, 1]`
    pub confidence: f32,
}

impl Joint {
    pub const fn new(x: f32, y: f32, confidence: f32) -> Self {
        Self {
            position: Point::new(x, y),
            confidence,
        }
    }
}

/// One frame of joint detections
///
/// Produced fresh per frame by the joint source; the rules only read it.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JointObservation {
    joints: [Option<Joint>; JointName::COUNT],
}

impl JointObservation {
    /// Create an observation with no detected joints
    pub const fn new() -> Self {
        Self {
            joints: [None; JointName::COUNT],
        }
    }

    /// Builder-style insert of a detected joint
    pub fn with_joint(mut self, name: JointName, x: f32, y: f32, confidence: f32) -> Self {
        self.set(name, Joint::new(x, y, confidence));
        self
    }

    /// Record a detected joint, replacing any previous value
    pub fn set(&mut self, name: JointName, joint: Joint) {
        self.joints[name.index()] = Some(joint);
    }

    /// Drop a joint from the observation
    pub fn remove(&mut self, name: JointName) {
        self.joints[name.index()] = None;
    }

    /// Get a joint regardless of confidence
    pub fn get(&self, name: JointName) -> Option<&Joint> {
        self.joints[name.index()].as_ref()
    }

    /// Get a joint's position only if its confidence is strictly above `floor`
    pub fn confident(&self, name: JointName, floor: f32) -> Option<Point> {
        self.get(name)
            .filter(|joint| joint.confidence > floor)
            .map(|joint| joint.position)
    }

    /// Check if no joints were detected
    pub fn is_empty(&self) -> bool {
        self.joints.iter().all(Option::is_none)
    }

    /// Mirror the observation across the body's sagittal plane
    ///
    /// Left and right labels are swapped and every position is reflected
    /// horizontally, which is what a left-handed subject performing the same
    /// stance as a right-handed one produces.
    pub fn mirrored(&self) -> Self {
        let mut out = Self::new();
        for name in JointName::ALL {
            if let Some(joint) = self.get(name) {
                out.set(
                    name.mirrored(),
                    Joint {
                        position: joint.position.mirrored(),
                        confidence: joint.confidence,
                    },
                );
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, name) in JointName::ALL.iter().enumerate() {
            assert_eq!(name.index(), i);
        }
    }

    #[test]
    fn test_mirror_is_involution() {
        for name in JointName::ALL {
            assert_eq!(name.mirrored().mirrored(), name);
        }
        assert_eq!(JointName::Nose.mirrored(), JointName::Nose);
        assert_eq!(JointName::LeftAnkle.mirrored(), JointName::RightAnkle);
    }

    #[test]
    fn test_confident_is_strict() {
        let obs = JointObservation::new().with_joint(JointName::Nose, 0.5, 0.9, 0.3);
        assert!(obs.confident(JointName::Nose, 0.3).is_none());
        assert!(obs.confident(JointName::Nose, 0.29).is_some());
        assert!(obs.confident(JointName::Neck, 0.0).is_none());
    }

    #[test]
    fn test_mirrored_observation() {
        let obs = JointObservation::new().with_joint(JointName::LeftWrist, 0.2, 0.6, 0.8);
        let mirrored = obs.mirrored();

        assert!(mirrored.get(JointName::LeftWrist).is_none());
        let wrist = mirrored.get(JointName::RightWrist).unwrap();
        assert!((wrist.position.x - 0.8).abs() < 1e-6);
        assert_eq!(wrist.position.y, 0.6);
        assert_eq!(wrist.confidence, 0.8);
    }

    #[test]
    fn test_empty_and_remove() {
        let mut obs = JointObservation::new().with_joint(JointName::Neck, 0.5, 0.8, 0.9);
        assert!(!obs.is_empty());
        obs.remove(JointName::Neck);
        assert!(obs.is_empty());
    }
}
