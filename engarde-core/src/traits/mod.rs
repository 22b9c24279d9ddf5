//! Platform abstraction traits
//!
//! These traits define the interface between the engine and the host's
//! notion of time.

pub mod clock;

pub use clock::{Clock, TickScheduler};
