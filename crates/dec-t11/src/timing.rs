//! Cycle-cost tables.
//!
//! Each instruction charges a class base cost plus per-addressing-mode
//! surcharges for its operands; interrupt service is a single fixed cost.
//! All values are input-clock cycles.

/// Cycles charged for any interrupt or HLT service.
pub(crate) const INTERRUPT: u32 = 114;

/// Extra cycles to resolve and fetch a source operand, by mode. Mode 0 is
/// free; each level of memory indirection adds a bus cycle plus address
/// arithmetic.
pub(crate) const SRC_MODE: [u32; 8] = [0, 6, 6, 12, 9, 15, 15, 21];

/// Extra cycles to resolve a destination operand, by mode. Destinations
/// cost more than sources: the operand location is revisited for the
/// write-back.
pub(crate) const DST_MODE: [u32; 8] = [0, 9, 9, 15, 12, 18, 18, 24];

/// Double-operand base (MOV, CMP, BIT, BIC, BIS, ADD, SUB, XOR).
pub(crate) const DOUBLE: u32 = 9;

/// Single-operand base (CLR through ASL, SWAB, SXT).
pub(crate) const SINGLE: u32 = 9;

/// Branch costs: the taken path refills the instruction stream.
pub(crate) const BRANCH_TAKEN: u32 = 12;
pub(crate) const BRANCH_NOT_TAKEN: u32 = 9;

pub(crate) const JMP: u32 = 9;
pub(crate) const JSR: u32 = 27;
pub(crate) const RTS: u32 = 21;
pub(crate) const SOB: u32 = 18;
pub(crate) const MARK: u32 = 27;

/// EMT, TRAP, BPT, IOT, and the reserved-opcode traps.
pub(crate) const TRAP: u32 = 48;
pub(crate) const RTI: u32 = 24;

pub(crate) const HALT: u32 = 48;
pub(crate) const WAIT: u32 = 12;
pub(crate) const RESET: u32 = 120;
pub(crate) const MFPT: u32 = 9;

/// Condition-code operator group (NOP, CLx, SEx).
pub(crate) const CCOP: u32 = 18;

pub(crate) const MTPS: u32 = 24;
pub(crate) const MFPS: u32 = 12;

/// Source surcharge for the mode field of a source specifier.
pub(crate) const fn src(spec: u16) -> u32 {
    SRC_MODE[((spec >> 3) & 7) as usize]
}

/// Destination surcharge for the mode field of a destination specifier.
pub(crate) const fn dst(spec: u16) -> u32 {
    DST_MODE[((spec >> 3) & 7) as usize]
}
