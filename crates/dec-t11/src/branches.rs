//! Program-flow instructions: conditional branches, SOB, JMP, JSR, RTS,
//! MARK.
//!
//! Branch displacements are signed word offsets from the updated PC.
//! Signed conditions (BGE through BLE) test N xor V, which makes them
//! correct across overflow where a plain N test would not be.

use crate::bus::T11Bus;
use crate::cpu::T11;
use crate::decode::VECTOR_ILLEGAL;
use crate::ea::{Operand, Size};
use crate::flags::{C, N, V, Z};
use crate::timing;

impl T11 {
    pub(crate) fn exec_branch(&mut self, op: u16) {
        let n = self.psw.is_set(N);
        let z = self.psw.is_set(Z);
        let v = self.psw.is_set(V);
        let c = self.psw.is_set(C);

        let taken = match op >> 8 {
            0o001 => true,       // BR
            0o002 => !z,         // BNE
            0o003 => z,          // BEQ
            0o004 => n == v,     // BGE
            0o005 => n != v,     // BLT
            0o006 => !z && n == v, // BGT
            0o007 => z || n != v,  // BLE
            0o200 => !n,         // BPL
            0o201 => n,          // BMI
            0o202 => !c && !z,   // BHI
            0o203 => c || z,     // BLOS
            0o204 => !v,         // BVC
            0o205 => v,          // BVS
            0o206 => !c,         // BCC
            _ => c,              // BCS
        };

        if taken {
            self.charge(timing::BRANCH_TAKEN);
            let disp = i16::from(op as i8) * 2;
            self.regs.set_pc(self.regs.pc().wrapping_add(disp as u16));
        } else {
            self.charge(timing::BRANCH_NOT_TAKEN);
        }
    }

    /// SOB: decrement and branch backward while nonzero. Flags untouched.
    pub(crate) fn exec_sob(&mut self, op: u16) {
        self.charge(timing::SOB);
        let reg = ((op >> 6) & 7) as usize;
        let value = self.regs.get(reg).wrapping_sub(1);
        self.regs.set(reg, value);
        if value != 0 {
            let back = (op & 0o77) * 2;
            self.regs.set_pc(self.regs.pc().wrapping_sub(back));
        }
    }

    pub(crate) fn exec_jmp<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::JMP + timing::dst(op));
        match self.resolve(bus, op, Size::Word) {
            // Jumping into a register is illegal on every PDP-11.
            Operand::Reg(_) => self.trap(bus, VECTOR_ILLEGAL, timing::TRAP),
            Operand::Mem(addr) => self.regs.set_pc(addr),
        }
    }

    pub(crate) fn exec_jsr<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::JSR + timing::dst(op));
        match self.resolve(bus, op, Size::Word) {
            Operand::Reg(_) => self.trap(bus, VECTOR_ILLEGAL, timing::TRAP),
            Operand::Mem(addr) => {
                let linkage = ((op >> 6) & 7) as usize;
                let saved = self.regs.get(linkage);
                self.push(bus, saved);
                self.regs.set(linkage, self.regs.pc());
                self.regs.set_pc(addr);
            }
        }
    }

    pub(crate) fn exec_rts<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::RTS);
        let linkage = (op & 7) as usize;
        self.regs.set_pc(self.regs.get(linkage));
        let restored = self.pop(bus);
        self.regs.set(linkage, restored);
    }

    /// MARK: stack clean-up for the standard subroutine convention.
    /// SP moves past `nn` parameter words, control returns through R5.
    pub(crate) fn exec_mark<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::MARK);
        let nn = op & 0o77;
        self.regs.set_sp(self.regs.pc().wrapping_add(nn * 2));
        self.regs.set_pc(self.regs.get(5));
        let r5 = self.pop(bus);
        self.regs.set(5, r5);
    }
}
