//! Control instructions: HALT, RTI/RTT, RESET, MFPT, and the
//! condition-code operator group.

use crate::bus::T11Bus;
use crate::cpu::{RESET_PSW, T11};
use crate::flags::Status;
use crate::timing;

/// MFPT processor code for this part.
const PROCESSOR_CODE: u16 = 4;

impl T11 {
    /// HALT has no console on the DCT11: it restarts through the fixed
    /// location at restart+4, same as an assertion of the HLT line, but
    /// at instruction cost.
    pub(crate) fn exec_halt<B: T11Bus>(&mut self, bus: &mut B) {
        self.charge(timing::HALT);
        let old_psw = u16::from(self.psw.0);
        let old_pc = self.regs.pc();
        self.push(bus, old_psw);
        self.push(bus, old_pc);
        self.regs.set_pc(self.restart.wrapping_add(4));
        self.psw = Status(RESET_PSW);
    }

    /// RTI and RTT. The DCT11 has no trace traps, so the two are
    /// indistinguishable here.
    pub(crate) fn exec_rti<B: T11Bus>(&mut self, bus: &mut B) {
        self.charge(timing::RTI);
        let pc = self.pop(bus);
        let psw = self.pop(bus);
        self.regs.set_pc(pc);
        self.psw = Status(psw as u8);
    }

    /// RESET pulses the bus reset line; processor state is untouched.
    pub(crate) fn exec_reset<B: T11Bus>(&mut self, bus: &mut B) {
        self.charge(timing::RESET);
        bus.bus_reset();
    }

    /// MFPT: R0 takes the processor code. Flags untouched.
    pub(crate) fn exec_mfpt(&mut self) {
        self.charge(timing::MFPT);
        self.regs.set(0, PROCESSOR_CODE);
    }

    /// Condition-code operators 000240-000277: bit 4 selects set or
    /// clear, the low nibble selects which flags. NOP is the member that
    /// selects none.
    pub(crate) fn exec_ccop(&mut self, op: u16) {
        self.charge(timing::CCOP);
        let mask = (op & 0o17) as u8;
        if op & 0o20 != 0 {
            self.psw.set(mask);
        } else {
            self.psw.clear(mask);
        }
    }
}
