//! Core traits and types for cycle-accurate emulation.
//!
//! Component crates depend on this one for the shared vocabulary: the
//! `Ticks` time unit and the `Observable` state-inspection trait. Nothing
//! here emulates anything by itself.

mod observable;
mod ticks;

pub use observable::{Observable, Value};
pub use ticks::Ticks;
