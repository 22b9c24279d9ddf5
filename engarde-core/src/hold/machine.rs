//! Hold state definition

use super::events::HoldInput;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hold states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum HoldState {
    /// Waiting for a valid frame
    #[default]
    Searching,
    /// Valid pose held; accumulating time
    InFrame,
    /// Pose held for the full duration; terminal until restart
    Success,
}

impl HoldState {
    /// Check if the hold is accumulating time
    pub fn is_holding(&self) -> bool {
        matches!(self, HoldState::InFrame)
    }

    /// Check if this activation is finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, HoldState::Success)
    }

    /// Process an input and return the next state
    pub fn transition(self, input: HoldInput) -> Self {
        use HoldInput::*;
        use HoldState::*;

        match (self, input) {
            (_, Restart) => Searching,

            (Searching, ValidFrame) => InFrame,

            (InFrame, InvalidFrame) => Searching,
            (InFrame, HoldElapsed) => Success,

            // Success is not revoked within an activation
            _ => self,
        }
    }
}
