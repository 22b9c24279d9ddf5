//! Time source and tick scheduling traits

/// Monotonic time source
///
/// Implementations must never go backwards. The epoch is arbitrary; only
/// differences between readings are used.
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> u64;
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }
}

/// Periodic tick source
///
/// The engine starts ticking when a hold begins and cancels it when the
/// hold resets, succeeds, or the engine is deactivated. Each tick is
/// delivered back to the engine's `tick` entry point.
pub trait TickScheduler {
    /// Begin periodic ticks, replacing any schedule already running
    fn start(&self, period_ms: u32);

    /// Stop ticks; must be safe to call when nothing is scheduled
    fn cancel(&self);
}

impl<T: TickScheduler + ?Sized> TickScheduler for &T {
    fn start(&self, period_ms: u32) {
        (**self).start(period_ms)
    }

    fn cancel(&self) {
        (**self).cancel()
    }
}
