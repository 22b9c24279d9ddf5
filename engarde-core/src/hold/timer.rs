//! Hold timer
//!
//! Owns the hold state, the time the current valid span started, the derived
//! progress, and the one-shot success flag. Time is supplied by the caller in
//! milliseconds from any monotonic source.

use super::events::{HoldEvent, HoldInput};
use super::machine::HoldState;
use crate::config::HoldConfig;

/// Hold timer for one activation
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HoldTimer {
    /// Current state
    state: HoldState,
    /// Start of the current valid span (ms)
    start_ms: Option<u64>,
    /// Fraction of the hold duration achieved, 0.0 to 1.0
    progress: f32,
    /// Success already reported this activation
    success_fired: bool,
    /// Required continuous valid time (ms)
    hold_duration_ms: u32,
}

impl Default for HoldTimer {
    fn default() -> Self {
        Self::new(HoldConfig::default())
    }
}

impl HoldTimer {
    /// Create a timer in the `Searching` state
    pub fn new(config: HoldConfig) -> Self {
        Self {
            state: HoldState::Searching,
            start_ms: None,
            progress: 0.0,
            success_fired: false,
            hold_duration_ms: config.hold_duration_ms,
        }
    }

    pub fn state(&self) -> HoldState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Start of the current valid span, if holding
    pub fn start_ms(&self) -> Option<u64> {
        self.start_ms
    }

    pub fn success_fired(&self) -> bool {
        self.success_fired
    }

    pub fn hold_duration_ms(&self) -> u32 {
        self.hold_duration_ms
    }

    /// Feed one frame's validity
    ///
    /// Returns an event when the frame caused a notable transition.
    pub fn on_frame(&mut self, valid: bool, now_ms: u64) -> Option<HoldEvent> {
        match (self.state, valid) {
            (HoldState::Success, _) => None,
            (HoldState::Searching, true) => {
                self.apply(HoldInput::ValidFrame);
                self.start_ms = Some(now_ms);
                self.progress = 0.0;
                Some(HoldEvent::Entered)
            }
            (HoldState::Searching, false) => None,
            (HoldState::InFrame, true) => self.advance(now_ms),
            (HoldState::InFrame, false) => {
                self.apply(HoldInput::InvalidFrame);
                self.start_ms = None;
                self.progress = 0.0;
                Some(HoldEvent::Reset)
            }
        }
    }

    /// Clock tick while a hold may be in progress
    pub fn tick(&mut self, now_ms: u64) -> Option<HoldEvent> {
        if self.state.is_holding() {
            self.advance(now_ms)
        } else {
            None
        }
    }

    /// Return to the initial state for a new activation
    pub fn restart(&mut self) {
        self.apply(HoldInput::Restart);
        self.start_ms = None;
        self.progress = 0.0;
        self.success_fired = false;
    }

    /// Recompute progress from elapsed time and detect completion
    fn advance(&mut self, now_ms: u64) -> Option<HoldEvent> {
        let start_ms = self.start_ms?;
        let elapsed_ms = now_ms.saturating_sub(start_ms);
        let duration_ms = u64::from(self.hold_duration_ms);

        if elapsed_ms < duration_ms {
            let fraction = elapsed_ms as f32 / duration_ms as f32;
            // Never step backwards within a span, whatever the clock does
            self.progress = self.progress.max(fraction.min(1.0));
            return None;
        }

        self.apply(HoldInput::HoldElapsed);
        self.progress = 1.0;

        if self.success_fired {
            None
        } else {
            self.success_fired = true;
            Some(HoldEvent::Succeeded)
        }
    }

    fn apply(&mut self, input: HoldInput) {
        self.state = self.state.transition(input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::vec::Vec;

    const FRAME_MS: u64 = 50;

    fn timer() -> HoldTimer {
        HoldTimer::new(HoldConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let t = timer();
        assert_eq!(t.state(), HoldState::Searching);
        assert_eq!(t.progress(), 0.0);
        assert!(t.start_ms().is_none());
        assert!(!t.success_fired());
    }

    #[test]
    fn test_valid_frame_enters_hold() {
        let mut t = timer();
        assert_eq!(t.on_frame(true, 1000), Some(HoldEvent::Entered));
        assert_eq!(t.state(), HoldState::InFrame);
        assert_eq!(t.start_ms(), Some(1000));
    }

    #[test]
    fn test_progress_from_ticks() {
        let mut t = timer();
        t.on_frame(true, 0);
        assert_eq!(t.tick(2500), None);
        assert!((t.progress() - 0.5).abs() < 1e-6);
        assert_eq!(t.state(), HoldState::InFrame);
    }

    #[test]
    fn test_tick_ignored_when_searching() {
        let mut t = timer();
        assert_eq!(t.tick(10_000), None);
        assert_eq!(t.state(), HoldState::Searching);
        assert_eq!(t.progress(), 0.0);
    }

    #[test]
    fn test_hold_succeeds_once() {
        let mut t = timer();
        t.on_frame(true, 0);
        assert_eq!(t.tick(5000), Some(HoldEvent::Succeeded));
        assert_eq!(t.state(), HoldState::Success);
        assert_eq!(t.progress(), 1.0);
        assert!(t.success_fired());

        assert_eq!(t.tick(5050), None);
        assert_eq!(t.on_frame(true, 5100), None);
    }

    #[test]
    fn test_success_not_revoked() {
        let mut t = timer();
        t.on_frame(true, 0);
        t.tick(6000);
        assert_eq!(t.on_frame(false, 6050), None);
        assert_eq!(t.state(), HoldState::Success);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_restart_rearms_success() {
        let mut t = timer();
        t.on_frame(true, 0);
        t.tick(5000);
        t.restart();

        assert_eq!(t.state(), HoldState::Searching);
        assert_eq!(t.progress(), 0.0);
        assert!(!t.success_fired());

        t.on_frame(true, 10_000);
        assert_eq!(t.tick(15_000), Some(HoldEvent::Succeeded));
    }

    #[test]
    fn test_sixty_valid_frames() {
        let mut t = timer();
        let mut events = Vec::new();
        for i in 0..60 {
            events.extend(t.on_frame(true, i * FRAME_MS));
        }

        assert_eq!(events, [HoldEvent::Entered]);
        assert_eq!(t.state(), HoldState::InFrame);
        assert!((t.progress() - 0.6).abs() < 0.02);
    }

    #[test]
    fn test_full_hold_fires_single_success() {
        let mut t = timer();
        let mut successes = 0;
        let mut success_frame = None;

        for i in 0..120u64 {
            if t.on_frame(true, i * FRAME_MS) == Some(HoldEvent::Succeeded) {
                successes += 1;
                success_frame.get_or_insert(i + 1);
            }
        }

        assert_eq!(successes, 1);
        assert!(success_frame.unwrap() >= 100);
        assert_eq!(t.state(), HoldState::Success);
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_invalid_frame_resets_progress() {
        let mut t = timer();
        for i in 0..49u64 {
            t.on_frame(true, i * FRAME_MS);
        }
        assert!(t.progress() > 0.4);

        // 50th frame: back arm drops
        assert_eq!(t.on_frame(false, 49 * FRAME_MS), Some(HoldEvent::Reset));
        assert_eq!(t.state(), HoldState::Searching);
        assert_eq!(t.progress(), 0.0);
        assert!(t.start_ms().is_none());

        // Accumulation restarts from zero
        assert_eq!(t.on_frame(true, 50 * FRAME_MS), Some(HoldEvent::Entered));
        t.tick(51 * FRAME_MS);
        assert!(t.progress() < 0.02);
    }

    proptest! {
        #[test]
        fn prop_continuous_hold_succeeds_once(
            deltas in proptest::collection::vec(1u64..400, 1..300),
        ) {
            let mut t = timer();
            let mut now = 0u64;
            let mut successes = 0;
            let mut last_progress = 0.0f32;

            t.on_frame(true, now);
            for delta in deltas {
                now += delta;
                if t.tick(now) == Some(HoldEvent::Succeeded) {
                    successes += 1;
                }
                let p = t.progress();
                prop_assert!((0.0..=1.0).contains(&p));
                prop_assert!(p >= last_progress);
                last_progress = p;
            }
            // Drive past the hold in case the generated run was short
            if t.tick(now + 5000) == Some(HoldEvent::Succeeded) {
                successes += 1;
            }

            prop_assert_eq!(successes, 1);
            prop_assert_eq!(t.state(), HoldState::Success);
            prop_assert_eq!(t.progress(), 1.0);
        }

        #[test]
        fn prop_invalid_frame_before_duration_resets(
            valid_for in 0u64..4999,
        ) {
            let mut t = timer();
            t.on_frame(true, 0);
            t.tick(valid_for);
            prop_assert_eq!(t.on_frame(false, valid_for), Some(HoldEvent::Reset));
            prop_assert_eq!(t.state(), HoldState::Searching);
            prop_assert_eq!(t.progress(), 0.0);
        }
    }
}
