//! Engine outputs
//!
//! The engine publishes immutable snapshots through embassy-sync primitives.
//! Consumers poll or await them; nothing holds a reference back into the
//! caller's state.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use engarde_core::feedback::{Guidance, StatusStyle, MAX_GUIDANCE};
use engarde_core::metrics::MetricsSnapshot;
use engarde_core::{EvalContext, HoldState, ValidityResult};

/// Channel capacity for diagnostic snapshots
pub const DIAGNOSTICS_CHANNEL_SIZE: usize = 8;

/// Latest engine status; newer snapshots overwrite unread ones
pub type StatusSignal = Signal<CriticalSectionRawMutex, StatusSnapshot>;

/// One-shot success notification per activation
pub type SuccessSignal = Signal<CriticalSectionRawMutex, SuccessEvent>;

/// Rate-limited diagnostic metrics
pub type DiagnosticsChannel =
    Channel<CriticalSectionRawMutex, MetricsSnapshot, DIAGNOSTICS_CHANNEL_SIZE>;

/// Everything a presentation layer needs to render one update
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusSnapshot {
    /// Context the frame was evaluated under
    pub context: EvalContext,
    /// Engine activated
    pub active: bool,
    /// Most recent frame verdict; None until a frame arrives
    pub result: Option<ValidityResult>,
    pub hold: HoldState,
    /// Hold progress, 0.0 to 1.0
    pub progress: f32,
    /// Success already reported this activation
    pub success_fired: bool,
    /// Time of the update (ms)
    pub timestamp_ms: u64,
}

impl StatusSnapshot {
    /// Overall verdict of the last frame
    pub fn valid(&self) -> bool {
        self.result.is_some_and(|r| r.valid)
    }

    /// Whole-body visibility of the last frame
    pub fn body_visible(&self) -> bool {
        self.result.is_some_and(|r| r.body_visible())
    }

    pub fn style(&self) -> StatusStyle {
        StatusStyle::for_status(self.result.as_ref(), self.hold)
    }

    /// Most relevant message for the current state
    pub fn guidance(&self) -> Guidance {
        let result = self.result.unwrap_or_else(ValidityResult::absent);
        Guidance::primary(self.context.mode, &result, self.hold)
    }

    /// All corrections for the last frame
    pub fn corrections(&self) -> Vec<Guidance, MAX_GUIDANCE> {
        let result = self.result.unwrap_or_else(ValidityResult::absent);
        Guidance::all(self.context.mode, &result, self.hold)
    }
}

/// Hold completed for the active step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SuccessEvent {
    pub context: EvalContext,
    /// Time the hold completed (ms)
    pub timestamp_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use engarde_core::{Handedness, Mode, TrainingStep};

    fn snapshot(result: Option<ValidityResult>, hold: HoldState) -> StatusSnapshot {
        StatusSnapshot {
            context: EvalContext::new(Handedness::Right, TrainingStep::UpperBody, Mode::Posture),
            active: true,
            result,
            hold,
            progress: 0.0,
            success_fired: false,
            timestamp_ms: 0,
        }
    }

    #[test]
    fn test_snapshot_before_first_frame() {
        let s = snapshot(None, HoldState::Searching);
        assert!(!s.valid());
        assert!(!s.body_visible());
        assert_eq!(s.style(), StatusStyle::Neutral);
        assert_eq!(s.guidance(), Guidance::StepIntoFrame);
    }

    #[test]
    fn test_snapshot_success() {
        let s = snapshot(Some(ValidityResult::absent()), HoldState::Success);
        assert_eq!(s.style(), StatusStyle::Success);
        assert_eq!(s.guidance(), Guidance::HoldComplete);
        assert_eq!(s.corrections().len(), 1);
    }

    #[test]
    fn test_status_signal_overwrites() {
        let signal = StatusSignal::new();
        signal.signal(snapshot(None, HoldState::Searching));
        signal.signal(snapshot(None, HoldState::InFrame));
        assert_eq!(signal.try_take().map(|s| s.hold), Some(HoldState::InFrame));
        assert!(signal.try_take().is_none());
    }
}
