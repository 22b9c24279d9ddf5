//! Hold-timer state machine
//!
//! A pose only counts once it has been held continuously for the configured
//! duration. The state machine is explicit, finite, and deterministic: it
//! moves only on frame validity and clock input.

pub mod events;
pub mod machine;
pub mod timer;

pub use events::{HoldEvent, HoldInput};
pub use machine::HoldState;
pub use timer::HoldTimer;
