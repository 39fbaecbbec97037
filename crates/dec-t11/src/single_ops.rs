//! Single-operand instructions, plus the status-word movers.
//!
//! INC, DEC, and SXT leave carry alone; the shifts and rotates set
//! V = N xor C after the move, which is why their flag updates run in
//! that order.

use crate::bus::T11Bus;
use crate::cpu::T11;
use crate::ea::{Operand, Size};
use crate::flags::{Status, C, N, T, V, Z};
use crate::timing;

impl T11 {
    pub(crate) fn exec_single<B: T11Bus>(&mut self, bus: &mut B, op: u16, size: Size) {
        self.charge(timing::SINGLE + timing::dst(op));
        let dst_op = self.resolve(bus, op, size);
        match size {
            Size::Word => self.single_word(bus, op, dst_op),
            Size::Byte => self.single_byte(bus, op, dst_op),
        }
    }

    fn single_word<B: T11Bus>(&mut self, bus: &mut B, op: u16, dst_op: Operand) {
        let dst = if (op >> 6) & 0o77 == 0o50 {
            0 // CLR never reads its destination
        } else {
            self.read_operand(bus, dst_op, Size::Word)
        };

        let result = match (op >> 6) & 0o77 {
            0o50 => {
                // CLR
                self.psw.clear(N | V | C);
                self.psw.set(Z);
                0
            }
            0o51 => {
                // COM
                let r = !dst;
                self.psw.update_nz_word(r);
                self.psw.clear(V);
                self.psw.set(C);
                r
            }
            0o52 => {
                // INC
                let r = dst.wrapping_add(1);
                self.psw.update_nz_word(r);
                self.psw.set_if(V, dst == 0o077777);
                r
            }
            0o53 => {
                // DEC
                let r = dst.wrapping_sub(1);
                self.psw.update_nz_word(r);
                self.psw.set_if(V, dst == 0o100000);
                r
            }
            0o54 => {
                // NEG
                let r = 0u16.wrapping_sub(dst);
                self.psw.update_nz_word(r);
                self.psw.set_if(V, r == 0o100000);
                self.psw.set_if(C, r != 0);
                r
            }
            0o55 => {
                // ADC
                let carry = self.psw.carry();
                let r = dst.wrapping_add(carry);
                self.psw.update_nz_word(r);
                self.psw.set_if(V, dst == 0o077777 && carry != 0);
                self.psw.set_if(C, dst == 0o177777 && carry != 0);
                r
            }
            0o56 => {
                // SBC
                let carry = self.psw.carry();
                let r = dst.wrapping_sub(carry);
                self.psw.update_nz_word(r);
                self.psw.set_if(V, dst == 0o100000);
                self.psw.set_if(C, dst == 0 && carry != 0);
                r
            }
            0o57 => {
                // TST
                self.psw.update_nz_word(dst);
                self.psw.clear(V | C);
                return;
            }
            0o60 => {
                // ROR
                let r = (dst >> 1) | (self.psw.carry() << 15);
                self.psw.set_if(C, dst & 1 != 0);
                self.shift_flags_word(r)
            }
            0o61 => {
                // ROL
                let r = (dst << 1) | self.psw.carry();
                self.psw.set_if(C, dst & 0o100000 != 0);
                self.shift_flags_word(r)
            }
            0o62 => {
                // ASR
                let r = (dst >> 1) | (dst & 0o100000);
                self.psw.set_if(C, dst & 1 != 0);
                self.shift_flags_word(r)
            }
            _ => {
                // ASL
                let r = dst << 1;
                self.psw.set_if(C, dst & 0o100000 != 0);
                self.shift_flags_word(r)
            }
        };
        self.write_operand(bus, dst_op, Size::Word, result);
    }

    fn single_byte<B: T11Bus>(&mut self, bus: &mut B, op: u16, dst_op: Operand) {
        let dst = if (op >> 6) & 0o77 == 0o50 {
            0
        } else {
            self.read_operand(bus, dst_op, Size::Byte) as u8
        };

        let result = match (op >> 6) & 0o77 {
            0o50 => {
                // CLRB
                self.psw.clear(N | V | C);
                self.psw.set(Z);
                0
            }
            0o51 => {
                // COMB
                let r = !dst;
                self.psw.update_nz_byte(r);
                self.psw.clear(V);
                self.psw.set(C);
                r
            }
            0o52 => {
                // INCB
                let r = dst.wrapping_add(1);
                self.psw.update_nz_byte(r);
                self.psw.set_if(V, dst == 0o177);
                r
            }
            0o53 => {
                // DECB
                let r = dst.wrapping_sub(1);
                self.psw.update_nz_byte(r);
                self.psw.set_if(V, dst == 0o200);
                r
            }
            0o54 => {
                // NEGB
                let r = 0u8.wrapping_sub(dst);
                self.psw.update_nz_byte(r);
                self.psw.set_if(V, r == 0o200);
                self.psw.set_if(C, r != 0);
                r
            }
            0o55 => {
                // ADCB
                let carry = self.psw.carry() as u8;
                let r = dst.wrapping_add(carry);
                self.psw.update_nz_byte(r);
                self.psw.set_if(V, dst == 0o177 && carry != 0);
                self.psw.set_if(C, dst == 0o377 && carry != 0);
                r
            }
            0o56 => {
                // SBCB
                let carry = self.psw.carry() as u8;
                let r = dst.wrapping_sub(carry);
                self.psw.update_nz_byte(r);
                self.psw.set_if(V, dst == 0o200);
                self.psw.set_if(C, dst == 0 && carry != 0);
                r
            }
            0o57 => {
                // TSTB
                self.psw.update_nz_byte(dst);
                self.psw.clear(V | C);
                return;
            }
            0o60 => {
                // RORB
                let r = (dst >> 1) | ((self.psw.carry() as u8) << 7);
                self.psw.set_if(C, dst & 1 != 0);
                self.shift_flags_byte(r)
            }
            0o61 => {
                // ROLB
                let r = (dst << 1) | self.psw.carry() as u8;
                self.psw.set_if(C, dst & 0o200 != 0);
                self.shift_flags_byte(r)
            }
            0o62 => {
                // ASRB
                let r = (dst >> 1) | (dst & 0o200);
                self.psw.set_if(C, dst & 1 != 0);
                self.shift_flags_byte(r)
            }
            _ => {
                // ASLB
                let r = dst << 1;
                self.psw.set_if(C, dst & 0o200 != 0);
                self.shift_flags_byte(r)
            }
        };
        self.write_operand(bus, dst_op, Size::Byte, u16::from(result));
    }

    /// SWAB: exchange bytes; N and Z reflect the new low byte.
    pub(crate) fn exec_swab<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::SINGLE + timing::dst(op));
        let dst_op = self.resolve(bus, op, Size::Word);
        let dst = self.read_operand(bus, dst_op, Size::Word);

        let result = dst.rotate_left(8);
        self.psw.update_nz_byte(result as u8);
        self.psw.clear(V | C);
        self.write_operand(bus, dst_op, Size::Word, result);
    }

    /// SXT: replicate N through the destination. Z mirrors !N; N and C
    /// are untouched.
    pub(crate) fn exec_sxt<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::SINGLE + timing::dst(op));
        let dst_op = self.resolve(bus, op, Size::Word);

        let result = if self.psw.is_set(N) { 0o177777 } else { 0 };
        self.psw.set_if(Z, !self.psw.is_set(N));
        self.psw.clear(V);
        self.write_operand(bus, dst_op, Size::Word, result);
    }

    /// MTPS: load PSW bits 7-5 and 3-0 from a byte source; the T bit is
    /// not writable.
    pub(crate) fn exec_mtps<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::MTPS + timing::src(op));
        let value = self.read_source(bus, op, Size::Byte) as u8;
        self.psw = Status((value & !T) | (self.psw.0 & T));
    }

    /// MFPS: move the PSW byte out. A register destination takes it
    /// sign-extended, the MOVB convention.
    pub(crate) fn exec_mfps<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::MFPS + timing::dst(op));
        let dst_op = self.resolve(bus, op, Size::Byte);

        let value = self.psw.0;
        self.psw.update_nz_byte(value);
        self.psw.clear(V);
        if let Operand::Reg(r) = dst_op {
            self.regs.set(r, i16::from(value as i8) as u16);
        } else {
            self.write_operand(bus, dst_op, Size::Byte, u16::from(value));
        }
    }

    fn shift_flags_word(&mut self, result: u16) -> u16 {
        self.psw.update_nz_word(result);
        let v = self.psw.is_set(N) != self.psw.is_set(C);
        self.psw.set_if(V, v);
        result
    }

    fn shift_flags_byte(&mut self, result: u8) -> u8 {
        self.psw.update_nz_byte(result);
        let v = self.psw.is_set(N) != self.psw.is_set(C);
        self.psw.set_if(V, v);
        result
    }
}
