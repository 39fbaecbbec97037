//! Double-operand instructions: MOV, CMP, BIT, BIC, BIS, ADD, SUB, XOR.
//!
//! Source resolves before destination, so a source autoincrement is
//! visible to a destination specifier naming the same register. The
//! logical group (MOV, BIT, BIC, BIS, XOR) clears V and leaves C alone;
//! only the arithmetic instructions touch carry.

use crate::bus::T11Bus;
use crate::cpu::T11;
use crate::ea::{Operand, Size};
use crate::flags::{C, V};
use crate::timing;

impl T11 {
    pub(crate) fn exec_mov<B: T11Bus>(&mut self, bus: &mut B, op: u16, size: Size) {
        self.charge(timing::DOUBLE + timing::src(op >> 6) + timing::dst(op));
        let value = self.read_source(bus, op >> 6, size);
        let dst = self.resolve(bus, op, size);

        self.psw.clear(V);
        match size {
            Size::Word => {
                self.psw.update_nz_word(value);
                self.write_operand(bus, dst, size, value);
            }
            Size::Byte => {
                self.psw.update_nz_byte(value as u8);
                // MOVB to a register sign-extends into the full word.
                if let Operand::Reg(r) = dst {
                    self.regs.set(r, i16::from(value as u8 as i8) as u16);
                } else {
                    self.write_operand(bus, dst, size, value);
                }
            }
        }
    }

    pub(crate) fn exec_cmp<B: T11Bus>(&mut self, bus: &mut B, op: u16, size: Size) {
        self.charge(timing::DOUBLE + timing::src(op >> 6) + timing::dst(op));
        let src = self.read_source(bus, op >> 6, size);
        let dst_op = self.resolve(bus, op, size);
        let dst = self.read_operand(bus, dst_op, size);

        match size {
            Size::Word => {
                let result = src.wrapping_sub(dst);
                self.psw.update_nz_word(result);
                self.psw
                    .set_if(V, (src ^ dst) & (src ^ result) & 0x8000 != 0);
                self.psw.set_if(C, src < dst);
            }
            Size::Byte => {
                let (src, dst) = (src as u8, dst as u8);
                let result = src.wrapping_sub(dst);
                self.psw.update_nz_byte(result);
                self.psw.set_if(V, (src ^ dst) & (src ^ result) & 0x80 != 0);
                self.psw.set_if(C, src < dst);
            }
        }
    }

    pub(crate) fn exec_bit<B: T11Bus>(&mut self, bus: &mut B, op: u16, size: Size) {
        self.charge(timing::DOUBLE + timing::src(op >> 6) + timing::dst(op));
        let src = self.read_source(bus, op >> 6, size);
        let dst_op = self.resolve(bus, op, size);
        let dst = self.read_operand(bus, dst_op, size);

        self.logical_flags(src & dst, size);
    }

    pub(crate) fn exec_bic<B: T11Bus>(&mut self, bus: &mut B, op: u16, size: Size) {
        self.charge(timing::DOUBLE + timing::src(op >> 6) + timing::dst(op));
        let src = self.read_source(bus, op >> 6, size);
        let dst_op = self.resolve(bus, op, size);
        let dst = self.read_operand(bus, dst_op, size);

        let result = dst & !src;
        self.logical_flags(result, size);
        self.write_operand(bus, dst_op, size, result);
    }

    pub(crate) fn exec_bis<B: T11Bus>(&mut self, bus: &mut B, op: u16, size: Size) {
        self.charge(timing::DOUBLE + timing::src(op >> 6) + timing::dst(op));
        let src = self.read_source(bus, op >> 6, size);
        let dst_op = self.resolve(bus, op, size);
        let dst = self.read_operand(bus, dst_op, size);

        let result = dst | src;
        self.logical_flags(result, size);
        self.write_operand(bus, dst_op, size, result);
    }

    pub(crate) fn exec_add<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::DOUBLE + timing::src(op >> 6) + timing::dst(op));
        let src = self.read_source(bus, op >> 6, Size::Word);
        let dst_op = self.resolve(bus, op, Size::Word);
        let dst = self.read_operand(bus, dst_op, Size::Word);

        let result = dst.wrapping_add(src);
        self.psw.update_nz_word(result);
        self.psw
            .set_if(V, !(src ^ dst) & (src ^ result) & 0x8000 != 0);
        self.psw
            .set_if(C, u32::from(src) + u32::from(dst) > 0xFFFF);
        self.write_operand(bus, dst_op, Size::Word, result);
    }

    pub(crate) fn exec_sub<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::DOUBLE + timing::src(op >> 6) + timing::dst(op));
        let src = self.read_source(bus, op >> 6, Size::Word);
        let dst_op = self.resolve(bus, op, Size::Word);
        let dst = self.read_operand(bus, dst_op, Size::Word);

        let result = dst.wrapping_sub(src);
        self.psw.update_nz_word(result);
        self.psw
            .set_if(V, (src ^ dst) & (dst ^ result) & 0x8000 != 0);
        self.psw.set_if(C, dst < src);
        self.write_operand(bus, dst_op, Size::Word, result);
    }

    /// XOR 074RDD: register source, general destination, word only.
    pub(crate) fn exec_xor<B: T11Bus>(&mut self, bus: &mut B, op: u16) {
        self.charge(timing::DOUBLE + timing::dst(op));
        let src = self.regs.get(((op >> 6) & 7) as usize);
        let dst_op = self.resolve(bus, op, Size::Word);
        let dst = self.read_operand(bus, dst_op, Size::Word);

        let result = dst ^ src;
        self.logical_flags(result, Size::Word);
        self.write_operand(bus, dst_op, Size::Word, result);
    }

    /// N and Z from the result, V cleared, C untouched.
    fn logical_flags(&mut self, result: u16, size: Size) {
        match size {
            Size::Word => self.psw.update_nz_word(result),
            Size::Byte => self.psw.update_nz_byte(result as u8),
        }
        self.psw.clear(V);
    }
}
