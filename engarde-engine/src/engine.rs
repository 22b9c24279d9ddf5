//! Posture engine
//!
//! Owns the one stateful piece of the pipeline: the hold-timer session. Frame
//! observations and clock ticks both enter through `&self` methods and are
//! linearized by a critical-section mutex, so a frame producer and a tick
//! driver can share one engine.
//!
//! The clock is read, the scheduler driven and every output signalled while
//! the critical section is held (after the session borrow is released), so
//! timestamps, start/cancel calls and the latest published status all follow
//! the order of the transitions that caused them.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use engarde_core::config::{EngineConfig, HoldConfig};
use engarde_core::hold::HoldEvent;
use engarde_core::metrics::MetricsThrottle;
use engarde_core::traits::{Clock, TickScheduler};
use engarde_core::{
    EvalContext, FrameEvaluator, Handedness, HoldTimer, JointObservation, Mode, TrainingStep,
    ValidityResult,
};

use crate::channels::{
    DiagnosticsChannel, StatusSignal, StatusSnapshot, SuccessEvent, SuccessSignal,
};

/// Scheduler work decided inside the session borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickAction {
    None,
    Start,
    Cancel,
}

impl TickAction {
    fn for_event(event: Option<HoldEvent>) -> Self {
        match event {
            Some(HoldEvent::Entered) => TickAction::Start,
            Some(e) if e.stops_ticking() => TickAction::Cancel,
            _ => TickAction::None,
        }
    }
}

/// Mutable per-activation state
#[derive(Debug, Clone)]
struct Session {
    active: bool,
    context: EvalContext,
    timer: HoldTimer,
    last_result: Option<ValidityResult>,
}

impl Session {
    fn new(hold: HoldConfig) -> Self {
        Self {
            active: false,
            context: EvalContext::default(),
            timer: HoldTimer::new(hold),
            last_result: None,
        }
    }

    /// Begin a fresh activation under the current context
    fn restart(&mut self) {
        self.timer.restart();
        self.last_result = None;
    }

    fn snapshot(&self, now_ms: u64) -> StatusSnapshot {
        StatusSnapshot {
            context: self.context,
            active: self.active,
            result: self.last_result,
            hold: self.timer.state(),
            progress: self.timer.progress(),
            success_fired: self.timer.success_fired(),
            timestamp_ms: now_ms,
        }
    }
}

/// Real-time posture validation engine
pub struct PostureEngine<C: Clock, S: TickScheduler> {
    evaluator: FrameEvaluator,
    config: EngineConfig,
    clock: C,
    scheduler: S,
    session: Mutex<CriticalSectionRawMutex, RefCell<Session>>,
    throttle: Mutex<CriticalSectionRawMutex, RefCell<MetricsThrottle>>,
    status: StatusSignal,
    success: SuccessSignal,
    diagnostics: DiagnosticsChannel,
}

impl<C: Clock, S: TickScheduler> PostureEngine<C, S> {
    /// Create an inactive engine
    ///
    /// `config` is expected to be validated already; see
    /// [`crate::config::validate`].
    pub fn new(config: EngineConfig, clock: C, scheduler: S) -> Self {
        Self {
            evaluator: FrameEvaluator::new(config.rules),
            config,
            clock,
            scheduler,
            session: Mutex::new(RefCell::new(Session::new(config.hold))),
            throttle: Mutex::new(RefCell::new(MetricsThrottle::new(config.metrics))),
            status: StatusSignal::new(),
            success: SuccessSignal::new(),
            diagnostics: DiagnosticsChannel::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Latest-status notifications
    pub fn status_signal(&self) -> &StatusSignal {
        &self.status
    }

    /// One-shot success notifications
    pub fn success_signal(&self) -> &SuccessSignal {
        &self.success
    }

    /// Throttled diagnostic snapshots
    pub fn diagnostics(&self) -> &DiagnosticsChannel {
        &self.diagnostics
    }

    /// Current status, whether or not anything changed since the last update
    pub fn status(&self) -> StatusSnapshot {
        let now_ms = self.clock.now_ms();
        self.session.lock(|cell| cell.borrow().snapshot(now_ms))
    }

    pub fn context(&self) -> EvalContext {
        self.session.lock(|cell| cell.borrow().context)
    }

    pub fn is_active(&self) -> bool {
        self.session.lock(|cell| cell.borrow().active)
    }

    /// Start a new activation in `mode`
    ///
    /// Always a fresh activation: progress is cleared and success re-armed,
    /// even if the engine was already active. A success event from the
    /// previous activation stays pending until taken.
    pub fn activate(&self, mode: Mode) {
        self.session.lock(|cell| {
            let now_ms = self.clock.now_ms();
            let snapshot = {
                let mut session = cell.borrow_mut();
                session.active = true;
                session.context.mode = mode;
                session.restart();
                session.snapshot(now_ms)
            };
            self.scheduler.cancel();
            self.begin_activation();
            info!("engine activated: {}", snapshot.context);
            self.status.signal(snapshot);
        });
    }

    /// Stop the engine
    ///
    /// Safe in any state and idempotent. Always cancels ticking.
    pub fn deactivate(&self) {
        self.session.lock(|cell| {
            let now_ms = self.clock.now_ms();
            let (was_active, snapshot) = {
                let mut session = cell.borrow_mut();
                let was_active = session.active;
                session.active = false;
                session.restart();
                (was_active, session.snapshot(now_ms))
            };
            self.scheduler.cancel();
            if was_active {
                info!("engine deactivated");
                self.status.signal(snapshot);
            }
        });
    }

    /// Update the evaluation context
    ///
    /// A step or mode change starts a new activation. A handedness change
    /// alone keeps the running hold.
    pub fn configure(&self, handedness: Handedness, step: TrainingStep, mode: Mode) {
        self.session.lock(|cell| {
            let now_ms = self.clock.now_ms();
            let (reset, snapshot) = {
                let mut session = cell.borrow_mut();
                let reset = session.context.step != step || session.context.mode != mode;
                session.context = EvalContext::new(handedness, step, mode);
                if reset {
                    session.restart();
                }
                (reset, session.snapshot(now_ms))
            };

            if reset {
                self.scheduler.cancel();
                self.begin_activation();
                info!("context changed, hold reset: {}", snapshot.context);
            } else {
                debug!("handedness set: {}", handedness);
            }
            if snapshot.active {
                self.status.signal(snapshot);
            }
        });
    }

    /// Process one camera frame
    ///
    /// `None` means no body was detected. Returns the updated status, or
    /// `None` when the engine is inactive.
    pub fn observe(&self, observation: Option<&JointObservation>) -> Option<StatusSnapshot> {
        let tick_ms = self.config.hold.tick_interval_ms;

        self.session.lock(|cell| {
            let now_ms = self.clock.now_ms();
            let (snapshot, event, result) = {
                let mut session = cell.borrow_mut();
                if !session.active {
                    return None;
                }
                let result = self.evaluator.evaluate(session.context, observation);
                let event = session.timer.on_frame(result.valid, now_ms);
                session.last_result = Some(result);
                (session.snapshot(now_ms), event, result)
            };
            self.apply(TickAction::for_event(event), tick_ms);
            self.publish_diagnostics(&result, now_ms);
            self.publish(snapshot, event);
            Some(snapshot)
        })
    }

    /// Clock tick from the scheduler
    ///
    /// Returns the updated status while a hold is accumulating, `None` for
    /// ticks that arrive when nothing is being timed.
    pub fn tick(&self) -> Option<StatusSnapshot> {
        self.session.lock(|cell| {
            let now_ms = self.clock.now_ms();
            let (snapshot, event) = {
                let mut session = cell.borrow_mut();
                if !session.active || !session.timer.state().is_holding() {
                    return None;
                }
                let event = session.timer.tick(now_ms);
                (session.snapshot(now_ms), event)
            };
            self.apply(TickAction::for_event(event), 0);
            self.publish(snapshot, event);
            Some(snapshot)
        })
    }

    fn apply(&self, action: TickAction, period_ms: u32) {
        match action {
            TickAction::Start => self.scheduler.start(period_ms),
            TickAction::Cancel => self.scheduler.cancel(),
            TickAction::None => {}
        }
    }

    /// Forget per-activation throttle state
    ///
    /// A pending `SuccessEvent` is left alone; it carries its own context.
    fn begin_activation(&self) {
        self.throttle.lock(|cell| cell.borrow_mut().reset());
    }

    fn publish(&self, snapshot: StatusSnapshot, event: Option<HoldEvent>) {
        match event {
            Some(HoldEvent::Entered) => debug!("hold started at {}", snapshot.timestamp_ms),
            Some(HoldEvent::Reset) => debug!("hold reset"),
            Some(HoldEvent::Succeeded) => {
                info!("hold complete: {}", snapshot.context);
                self.success.signal(SuccessEvent {
                    context: snapshot.context,
                    timestamp_ms: snapshot.timestamp_ms,
                });
            }
            None => {}
        }
        self.status.signal(snapshot);
    }

    fn publish_diagnostics(&self, result: &ValidityResult, now_ms: u64) {
        let due = self
            .throttle
            .lock(|cell| cell.borrow_mut().collect(result, now_ms));

        for snapshot in due {
            if self.diagnostics.try_send(snapshot).is_err() {
                warn!("diagnostics channel full, dropping {}", snapshot.topic());
            }
        }
    }
}
