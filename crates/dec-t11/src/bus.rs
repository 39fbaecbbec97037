//! T-11 bus trait: memory access plus the chip's host-facing signals.
//!
//! The DCT11 multiplexes everything over one 16-bit bus: program fetches,
//! data reads and writes, interrupt-acknowledge cycles, and the reset pulse
//! driven by the RESET instruction. The trait mirrors that surface. The
//! core masks bit 0 off every word-access address before calling in, so
//! implementors always see even word addresses.
//!
//! Out-of-range behavior is entirely the implementor's: wrap, open bus,
//! or a device trap. The core never bounds-checks and never fails on any
//! address value.

use crate::registers::Registers;

/// Byte returned by an interrupt-acknowledge read when no device drives
/// the bus (all lines pulled high).
pub const NO_VECTOR: u8 = 0o377;

/// Memory and device interface for the T-11 core.
///
/// Only the four memory accessors are required. The rest are optional
/// collaborators with safe defaults: an unconnected vector read floats to
/// [`NO_VECTOR`], and the acknowledge, reset, and trace hooks are no-ops.
pub trait T11Bus {
    /// Read a byte from the given address.
    fn read_byte(&mut self, addr: u16) -> u8;

    /// Write a byte to the given address.
    fn write_byte(&mut self, addr: u16, value: u8);

    /// Read a word. The core guarantees `addr` is even.
    fn read_word(&mut self, addr: u16) -> u16;

    /// Write a word. The core guarantees `addr` is even.
    fn write_word(&mut self, addr: u16, value: u16);

    /// Opcode-fetch read. Hosts with a faster cached view of program
    /// memory can override this; the value must be identical to a
    /// `read_word` at the same address.
    fn fetch_word(&mut self, addr: u16) -> u16 {
        self.read_word(addr)
    }

    /// A CP interrupt is being serviced. `line` is the highest asserted
    /// request line (0-3). Devices use this to drop or re-arm their
    /// request; the core ignores any effect it has.
    fn ack_interrupt(&mut self, _line: u8) {}

    /// Interrupt-acknowledge read. `selector` carries the bit-reversed
    /// inactive-line mask in bits 0-3 and the non-vectored marker in
    /// bit 4, as the chip drives DAL<12:8>. Returns the vector byte the
    /// interrupt controller places on DAL<7:2>.
    fn read_vector(&mut self, _selector: u8) -> u8 {
        NO_VECTOR
    }

    /// The RESET instruction is pulsing the bus reset line.
    fn bus_reset(&mut self) {}

    /// Called once per instruction with the PC about to be fetched and
    /// the current register file. Must not depend on being called for
    /// correctness; the core's behavior is identical with or without it.
    fn trace(&mut self, _pc: u16, _regs: &Registers) {}
}
