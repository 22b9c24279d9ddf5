//! Handedness-aware joint access
//!
//! Rules are written in terms of "front" and "back" limbs. The front side is
//! the dominant (weapon) hand side; the back side is the other one. Resolving
//! through this accessor keeps every rule mirrored the same way for left- and
//! right-handed subjects.

use super::{JointName, JointObservation, Point};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dominant hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Handedness {
    #[default]
    Right,
    Left,
}

impl Handedness {
    /// Sign applied to horizontal displacement so "forward" is positive
    ///
    /// A right-handed stance extends toward +x; a left-handed one toward -x.
    pub const fn forward_sign(self) -> f32 {
        match self {
            Handedness::Right => 1.0,
            Handedness::Left => -1.0,
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Handedness::Right => Handedness::Left,
            Handedness::Left => Handedness::Right,
        }
    }
}

/// Paired limb joints that have a front and a back variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Limb {
    Shoulder,
    Elbow,
    Wrist,
    Hip,
    Knee,
    Ankle,
}

impl Limb {
    const fn joints(self) -> (JointName, JointName) {
        match self {
            Limb::Shoulder => (JointName::LeftShoulder, JointName::RightShoulder),
            Limb::Elbow => (JointName::LeftElbow, JointName::RightElbow),
            Limb::Wrist => (JointName::LeftWrist, JointName::RightWrist),
            Limb::Hip => (JointName::LeftHip, JointName::RightHip),
            Limb::Knee => (JointName::LeftKnee, JointName::RightKnee),
            Limb::Ankle => (JointName::LeftAnkle, JointName::RightAnkle),
        }
    }

    /// Joint on the dominant side
    pub const fn front(self, handedness: Handedness) -> JointName {
        let (left, right) = self.joints();
        match handedness {
            Handedness::Right => right,
            Handedness::Left => left,
        }
    }

    /// Joint on the non-dominant side
    pub const fn back(self, handedness: Handedness) -> JointName {
        self.front(handedness.opposite())
    }
}

/// Observation view resolving front/back limbs for a given handedness
#[derive(Debug, Clone, Copy)]
pub struct HandedJoints<'a> {
    observation: &'a JointObservation,
    handedness: Handedness,
}

impl<'a> HandedJoints<'a> {
    pub fn new(observation: &'a JointObservation, handedness: Handedness) -> Self {
        Self {
            observation,
            handedness,
        }
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn observation(&self) -> &'a JointObservation {
        self.observation
    }

    /// Front-side joint position if confidence exceeds `floor`
    pub fn front(&self, limb: Limb, floor: f32) -> Option<Point> {
        self.observation.confident(limb.front(self.handedness), floor)
    }

    /// Back-side joint position if confidence exceeds `floor`
    pub fn back(&self, limb: Limb, floor: f32) -> Option<Point> {
        self.observation.confident(limb.back(self.handedness), floor)
    }

    /// Anatomical joint position if confidence exceeds `floor`
    pub fn named(&self, name: JointName, floor: f32) -> Option<Point> {
        self.observation.confident(name, floor)
    }

    pub fn front_wrist(&self, floor: f32) -> Option<Point> {
        self.front(Limb::Wrist, floor)
    }

    pub fn back_wrist(&self, floor: f32) -> Option<Point> {
        self.back(Limb::Wrist, floor)
    }

    pub fn front_elbow(&self, floor: f32) -> Option<Point> {
        self.front(Limb::Elbow, floor)
    }

    pub fn back_elbow(&self, floor: f32) -> Option<Point> {
        self.back(Limb::Elbow, floor)
    }

    pub fn front_shoulder(&self, floor: f32) -> Option<Point> {
        self.front(Limb::Shoulder, floor)
    }

    pub fn back_shoulder(&self, floor: f32) -> Option<Point> {
        self.back(Limb::Shoulder, floor)
    }

    pub fn front_knee(&self, floor: f32) -> Option<Point> {
        self.front(Limb::Knee, floor)
    }

    pub fn back_knee(&self, floor: f32) -> Option<Point> {
        self.back(Limb::Knee, floor)
    }

    pub fn front_ankle(&self, floor: f32) -> Option<Point> {
        self.front(Limb::Ankle, floor)
    }

    pub fn back_ankle(&self, floor: f32) -> Option<Point> {
        self.back(Limb::Ankle, floor)
    }
}
