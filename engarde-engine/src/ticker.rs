//! Async tick driver
//!
//! Embassy-backed `Clock` and `TickScheduler`. The scheduler only records
//! the latest start/cancel request; `drive_ticks` runs the actual ticker and
//! feeds each tick back into the engine.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Instant, Ticker};

use engarde_core::traits::{Clock, TickScheduler};

use crate::engine::PostureEngine;

/// Milliseconds since the embassy time driver started
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

/// Request for the tick driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickCommand {
    Start(u32),
    Cancel,
}

/// Scheduler handing requests to `drive_ticks`
pub struct EmbassyTickScheduler {
    control: Signal<CriticalSectionRawMutex, TickCommand>,
}

impl EmbassyTickScheduler {
    pub const fn new() -> Self {
        Self {
            control: Signal::new(),
        }
    }

    /// Wait for the next start/cancel request
    pub async fn next_command(&self) -> TickCommand {
        self.control.wait().await
    }

    /// Take a pending request without waiting
    pub fn try_command(&self) -> Option<TickCommand> {
        self.control.try_take()
    }
}

impl Default for EmbassyTickScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TickScheduler for EmbassyTickScheduler {
    fn start(&self, period_ms: u32) {
        self.control.signal(TickCommand::Start(period_ms));
    }

    fn cancel(&self) {
        self.control.signal(TickCommand::Cancel);
    }
}

/// Tick loop; run it as its own task for the lifetime of the engine
pub async fn drive_ticks<C: Clock>(engine: &PostureEngine<C, EmbassyTickScheduler>) -> ! {
    info!("tick driver started");
    let scheduler = engine.scheduler();

    loop {
        // Idle until a hold begins
        let TickCommand::Start(mut period_ms) = scheduler.next_command().await else {
            continue;
        };

        let mut ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));
        loop {
            match select(scheduler.next_command(), ticker.next()).await {
                Either::First(TickCommand::Start(p)) => {
                    period_ms = p;
                    ticker = Ticker::every(Duration::from_millis(u64::from(period_ms)));
                }
                Either::First(TickCommand::Cancel) => break,
                Either::Second(()) => {
                    engine.tick();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::future::Future;
    use core::sync::atomic::{AtomicU32, Ordering};
    use embassy_futures::block_on;
    use embassy_time::Timer;
    use engarde_core::config::{EngineConfig, HoldConfig};
    use engarde_core::{Handedness, HoldState, JointObservation, Mode, TrainingStep};

    /// Embassy clock that counts reads; the engine reads it once per tick
    #[derive(Default)]
    struct CountingClock(AtomicU32);

    impl CountingClock {
        fn reads(&self) -> u32 {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl Clock for CountingClock {
        fn now_ms(&self) -> u64 {
            self.0.fetch_add(1, Ordering::SeqCst);
            EmbassyClock.now_ms()
        }
    }

    type DrivenEngine = PostureEngine<CountingClock, EmbassyTickScheduler>;

    /// Engine on the final step, where any detected body is a valid frame
    fn driven_engine() -> DrivenEngine {
        let config = EngineConfig {
            hold: HoldConfig {
                hold_duration_ms: 400,
                tick_interval_ms: 20,
            },
            ..EngineConfig::default()
        };
        let engine = PostureEngine::new(
            config,
            CountingClock::default(),
            EmbassyTickScheduler::new(),
        );
        engine.configure(Handedness::Right, TrainingStep::Completed, Mode::Posture);
        engine.activate(Mode::Posture);
        engine
    }

    /// Run `scenario` with the tick driver alongside it
    fn run_with_driver(engine: &DrivenEngine, scenario: impl Future<Output = ()>) {
        match block_on(select(drive_ticks(engine), scenario)) {
            Either::First(_) => unreachable!("tick driver returned"),
            Either::Second(()) => {}
        }
    }

    #[test]
    fn test_driver_ticks_hold_to_success() {
        let engine = driven_engine();
        let body = JointObservation::new();

        run_with_driver(&engine, async {
            // One frame, then only ticks
            engine.observe(Some(&body));
            Timer::after_millis(200).await;
            let mid = engine.status();
            assert_eq!(mid.hold, HoldState::InFrame);
            assert!(mid.progress > 0.0 && mid.progress < 1.0);
            Timer::after_millis(400).await;
        });

        let end = engine.status();
        assert_eq!(end.hold, HoldState::Success);
        assert_eq!(end.progress, 1.0);
        assert!(engine.success_signal().try_take().is_some());
        assert!(engine.success_signal().try_take().is_none());
        // Driver consumed the cancel issued on success
        assert_eq!(engine.scheduler().try_command(), None);
    }

    #[test]
    fn test_driver_stops_on_invalid_frame() {
        let engine = driven_engine();
        let body = JointObservation::new();

        run_with_driver(&engine, async {
            engine.observe(Some(&body));
            Timer::after_millis(100).await;
            engine.observe(None);
            Timer::after_millis(20).await;

            let reads = engine.clock().reads();
            Timer::after_millis(400).await;
            assert_eq!(engine.clock().reads(), reads);
        });

        let status = engine.status();
        assert_eq!(status.hold, HoldState::Searching);
        assert_eq!(status.progress, 0.0);
        assert!(engine.success_signal().try_take().is_none());
    }

    #[test]
    fn test_driver_stops_on_deactivate() {
        let engine = driven_engine();
        let body = JointObservation::new();

        run_with_driver(&engine, async {
            engine.observe(Some(&body));
            Timer::after_millis(100).await;
            engine.deactivate();
            Timer::after_millis(20).await;

            // Well past the hold duration
            let reads = engine.clock().reads();
            Timer::after_millis(500).await;
            assert_eq!(engine.clock().reads(), reads);
        });

        assert!(!engine.is_active());
        assert_eq!(engine.status().hold, HoldState::Searching);
        assert!(engine.success_signal().try_take().is_none());
        assert_eq!(engine.scheduler().try_command(), None);
    }

    #[test]
    fn test_latest_command_wins() {
        let scheduler = EmbassyTickScheduler::new();
        assert_eq!(scheduler.try_command(), None);

        scheduler.start(50);
        scheduler.cancel();
        assert_eq!(scheduler.try_command(), Some(TickCommand::Cancel));
        assert_eq!(scheduler.try_command(), None);

        scheduler.start(20);
        assert_eq!(scheduler.try_command(), Some(TickCommand::Start(20)));
    }

    #[test]
    fn test_clock_is_monotonic() {
        let clock = EmbassyClock;
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
