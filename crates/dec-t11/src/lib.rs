//! DEC T-11 (DCT11) CPU core.
//!
//! The T-11 is the single-chip PDP-11: 8 general registers (R6 = SP,
//! R7 = PC), an 8-bit status word with a 3-bit interrupt priority field,
//! and the PDP-11 base instruction set with all 8 addressing modes.
//!
//! Execution is budgeted rather than per-cycle ticked: `T11::execute` runs
//! whole instructions until the requested cycle budget is exhausted,
//! checking the interrupt lines once at every instruction boundary. Memory,
//! interrupt acknowledge, and the trace hook all go through the [`T11Bus`]
//! trait supplied by the host machine.

pub mod bus;
pub mod cpu;
pub mod flags;
pub mod registers;
mod branches;
mod control;
mod decode;
mod double_ops;
mod ea;
mod interrupts;
mod single_ops;
mod snapshot;
mod timing;

pub use bus::T11Bus;
pub use cpu::{Line, T11};
pub use flags::{Status, C, N, V, Z};
pub use registers::Registers;
