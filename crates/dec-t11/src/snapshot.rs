//! Save-state codec for the T-11.
//!
//! Fixed little-endian layout, 41 bytes:
//!
//! | offset | size | field |
//! |-------:|-----:|-------|
//! | 0      | 4    | magic `"T11S"` |
//! | 4      | 1    | format version (currently 1) |
//! | 5      | 2    | mode word |
//! | 7      | 16   | R0-R7 |
//! | 23     | 1    | PSW |
//! | 24     | 2    | previous PC |
//! | 26     | 1    | wait state |
//! | 27     | 1    | CP line state |
//! | 28     | 1    | VEC level |
//! | 29     | 1    | PF level |
//! | 30     | 1    | HLT level |
//! | 31     | 1    | PF pending edge |
//! | 32     | 1    | HLT pending edge |
//! | 33     | 8    | total cycles |
//!
//! Restore validates magic, version, and exact length before touching any
//! state; a mismatch means the snapshot came from a different layout and
//! is rejected whole. After a successful restore, execution continues
//! bit-identically to a run that never paused.

use emu_core::Ticks;

use crate::cpu::T11;
use crate::flags::Status;

const MAGIC: &[u8; 4] = b"T11S";
const VERSION: u8 = 1;
const SNAPSHOT_SIZE: usize = 41;

impl T11 {
    /// Serialize every piece of mutable CPU state.
    #[must_use]
    pub fn save_state(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(SNAPSHOT_SIZE);
        out.extend_from_slice(MAGIC);
        out.push(VERSION);
        out.extend_from_slice(&self.mode.to_le_bytes());
        for i in 0..8 {
            out.extend_from_slice(&self.regs.get(i).to_le_bytes());
        }
        out.push(self.psw.0);
        out.extend_from_slice(&self.ppc.to_le_bytes());
        out.push(u8::from(self.wait_state));
        out.push(self.cp_state);
        out.push(u8::from(self.vec_active));
        out.push(u8::from(self.pf_active));
        out.push(u8::from(self.hlt_active));
        out.push(u8::from(self.power_fail));
        out.push(u8::from(self.ext_halt));
        out.extend_from_slice(&self.total_cycles.get().to_le_bytes());
        out
    }

    /// Restore state saved by [`T11::save_state`].
    ///
    /// # Errors
    ///
    /// Returns an error without modifying any state if the data is the
    /// wrong length, carries the wrong magic, or was produced by a
    /// different format version.
    pub fn restore_state(&mut self, data: &[u8]) -> Result<(), String> {
        if data.len() != SNAPSHOT_SIZE {
            return Err(format!(
                "T11 snapshot must be {SNAPSHOT_SIZE} bytes, got {}",
                data.len()
            ));
        }
        if &data[0..4] != MAGIC {
            return Err("not a T11 snapshot (bad magic)".into());
        }
        if data[4] != VERSION {
            return Err(format!(
                "T11 snapshot version {} not supported (expected {VERSION})",
                data[4]
            ));
        }

        self.mode = u16::from_le_bytes([data[5], data[6]]);
        self.restart = crate::cpu::start_address(self.mode);
        for i in 0..8 {
            let off = 7 + i * 2;
            self.regs.set(i, u16::from_le_bytes([data[off], data[off + 1]]));
        }
        self.psw = Status(data[23]);
        self.ppc = u16::from_le_bytes([data[24], data[25]]);
        self.wait_state = data[26] != 0;
        self.cp_state = data[27] & 15;
        self.vec_active = data[28] != 0;
        self.pf_active = data[29] != 0;
        self.hlt_active = data[30] != 0;
        self.power_fail = data[31] != 0;
        self.ext_halt = data[32] != 0;
        let mut cycles = [0u8; 8];
        cycles.copy_from_slice(&data[33..41]);
        self.total_cycles = Ticks::new(u64::from_le_bytes(cycles));

        Ok(())
    }
}
