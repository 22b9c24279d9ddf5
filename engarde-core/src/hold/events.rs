//! Hold timer inputs and outputs

/// Inputs that drive hold state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldInput {
    /// Current frame satisfies the active rule
    ValidFrame,
    /// Current frame fails the active rule or has no body
    InvalidFrame,
    /// Continuous valid time reached the hold duration
    HoldElapsed,
    /// New activation (mode or step change, explicit restart)
    Restart,
}

/// Notable transitions reported to the timer's owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HoldEvent {
    /// Entered `InFrame`; periodic ticking should start
    Entered,
    /// Dropped back to `Searching`; ticking should stop
    Reset,
    /// Reached `Success` for the first time this activation; ticking should stop
    Succeeded,
}

impl HoldEvent {
    /// Check if this event ends periodic ticking
    pub fn stops_ticking(&self) -> bool {
        matches!(self, HoldEvent::Reset | HoldEvent::Succeeded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticking_events() {
        assert!(!HoldEvent::Entered.stops_ticking());
        assert!(HoldEvent::Reset.stops_ticking());
        assert!(HoldEvent::Succeeded.stops_ticking());
    }
}
