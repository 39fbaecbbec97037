//! T-11 CPU: construction, reset, line latches, and the execution loop.

use emu_core::{Observable, Ticks, Value};

use crate::bus::T11Bus;
use crate::flags::{Status, C, N, V, Z};
use crate::registers::Registers;
use crate::timing;

/// Power-up start addresses, selected by the top 3 bits of the mode word
/// latched from the bus at reset. The restart address also anchors the
/// HALT vector at restart+4.
const START_ADDRESSES: [u16; 8] = [
    0xC000, 0x8000, 0x4000, 0x2000, 0x1000, 0x0000, 0xF600, 0xF400,
];

/// Decode the start address from a mode word.
pub(crate) const fn start_address(mode: u16) -> u16 {
    START_ADDRESSES[(mode >> 13) as usize]
}

/// Stack pointer value after reset.
const RESET_SP: u16 = 0o376;

/// PSW after reset and after a HALT trap: priority 7, flags clear.
pub(crate) const RESET_PSW: u8 = 0o340;

/// External input lines of the DCT11.
///
/// `Cp0`-`Cp3` are the coded interrupt-request inputs; their combination
/// indexes the priority table. `Vec` selects vectored acknowledge cycles.
/// `PowerFail` and `Halt` are edge-latched: the transition to asserted
/// arms a one-shot pending flag sampled at the next instruction boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line {
    Cp0,
    Cp1,
    Cp2,
    Cp3,
    Vec,
    PowerFail,
    Halt,
}

/// DEC T-11 CPU.
#[derive(Debug, Clone)]
pub struct T11 {
    /// General registers R0-R7.
    pub regs: Registers,
    /// Processor status word.
    pub psw: Status,

    /// PC at the start of the current instruction.
    pub(crate) ppc: u16,
    /// Mode word latched at power-up; top 3 bits select the start address.
    pub(crate) mode: u16,
    /// Start address decoded from the mode word.
    pub(crate) restart: u16,

    /// Set by WAIT, cleared by any taken interrupt.
    pub(crate) wait_state: bool,

    // === Interrupt line state ===
    /// CP0-CP3 levels in bits 0-3.
    pub(crate) cp_state: u8,
    /// VEC line level.
    pub(crate) vec_active: bool,
    /// PF line level.
    pub(crate) pf_active: bool,
    /// HLT line level.
    pub(crate) hlt_active: bool,
    /// One-shot latch armed by a PF rising edge.
    pub(crate) power_fail: bool,
    /// One-shot latch armed by a HLT rising edge.
    pub(crate) ext_halt: bool,

    // === Timing ===
    /// Cycles remaining in the current execute() budget.
    pub(crate) icount: i64,
    /// Total elapsed cycles since construction or restore.
    pub(crate) total_cycles: Ticks,
}

impl T11 {
    /// Create a CPU in reset state. `mode` is the power-up mode word; its
    /// top 3 bits select the start address.
    #[must_use]
    pub fn new(mode: u16) -> Self {
        let mut cpu = Self {
            regs: Registers::new(),
            psw: Status(RESET_PSW),
            ppc: 0,
            mode,
            restart: start_address(mode),
            wait_state: false,
            cp_state: 0,
            vec_active: false,
            pf_active: false,
            hlt_active: false,
            power_fail: false,
            ext_halt: false,
            icount: 0,
            total_cycles: Ticks::ZERO,
        };
        cpu.reset();
        cpu
    }

    /// Reset to power-up state: PC from the mode word's start address,
    /// SP = 0o376, priority raised to 7, pending edges dropped. Line
    /// levels are external signals and are left alone.
    pub fn reset(&mut self) {
        self.regs.set_sp(RESET_SP);
        self.regs.set_pc(self.restart);
        self.ppc = self.restart;
        self.psw = Status(RESET_PSW);
        self.wait_state = false;
        self.power_fail = false;
        self.ext_halt = false;
    }

    /// The start address selected by the mode word.
    #[must_use]
    pub const fn restart_address(&self) -> u16 {
        self.restart
    }

    /// Total elapsed cycles.
    #[must_use]
    pub const fn total_cycles(&self) -> Ticks {
        self.total_cycles
    }

    /// True if the CPU is idling in a WAIT.
    #[must_use]
    pub const fn is_waiting(&self) -> bool {
        self.wait_state
    }

    /// Drive an external line. Only latches and levels change here; the
    /// arbiter samples them at the next instruction boundary, never from
    /// inside this call.
    pub fn set_line(&mut self, line: Line, asserted: bool) {
        match line {
            Line::Cp0 | Line::Cp1 | Line::Cp2 | Line::Cp3 => {
                let bit = 1u8 << (line as u8);
                if asserted {
                    self.cp_state |= bit;
                } else {
                    self.cp_state &= !bit;
                }
            }
            Line::Vec => self.vec_active = asserted,
            Line::PowerFail => {
                if asserted && !self.pf_active {
                    self.power_fail = true;
                }
                self.pf_active = asserted;
            }
            Line::Halt => {
                if asserted && !self.hlt_active {
                    self.ext_halt = true;
                }
                self.hlt_active = asserted;
            }
        }
    }

    /// Run for `budget` cycles. Returns the cycles actually consumed: a
    /// WAIT with no interrupt burns exactly the budget; otherwise the last
    /// instruction may overshoot by its tail.
    ///
    /// Interrupts are evaluated once per instruction boundary, including
    /// before the first fetch, so a line asserted between calls is
    /// serviced before any instruction runs.
    pub fn execute<B: T11Bus>(&mut self, bus: &mut B, budget: Ticks) -> Ticks {
        self.icount = budget.get() as i64;

        while self.icount > 0 {
            self.check_interrupts(bus);

            if self.wait_state {
                // Idle until an interrupt arrives; the budget is consumed
                // without fetching.
                self.icount = 0;
                break;
            }
            if self.icount <= 0 {
                break;
            }

            self.ppc = self.regs.pc();
            bus.trace(self.regs.pc(), &self.regs);

            let op = self.fetch(bus);
            self.dispatch(bus, op);
        }

        let consumed = (budget.get() as i64 - self.icount).unsigned_abs();
        let consumed = Ticks::new(consumed);
        self.total_cycles += consumed;
        consumed
    }

    // === Memory helpers ===
    //
    // Word addresses are masked even here, so the bus only ever sees
    // aligned word accesses. Byte addresses pass through untouched.

    /// Fetch the next opcode word. PC is forced even first.
    pub(crate) fn fetch<B: T11Bus>(&mut self, bus: &mut B) -> u16 {
        let pc = self.regs.pc() & !1;
        let op = bus.fetch_word(pc);
        self.regs.set_pc(pc.wrapping_add(2));
        op
    }

    /// Read the next word of the instruction stream (index words and
    /// immediates travel the data path, not the fetch path).
    pub(crate) fn next_word<B: T11Bus>(&mut self, bus: &mut B) -> u16 {
        let pc = self.regs.pc() & !1;
        let value = bus.read_word(pc);
        self.regs.set_pc(pc.wrapping_add(2));
        value
    }

    pub(crate) fn read_word<B: T11Bus>(&mut self, bus: &mut B, addr: u16) -> u16 {
        bus.read_word(addr & !1)
    }

    pub(crate) fn write_word<B: T11Bus>(&mut self, bus: &mut B, addr: u16, value: u16) {
        bus.write_word(addr & !1, value);
    }

    /// Push a word: SP -= 2, then a full-width write.
    pub(crate) fn push<B: T11Bus>(&mut self, bus: &mut B, value: u16) {
        let sp = self.regs.sp().wrapping_sub(2);
        self.regs.set_sp(sp);
        self.write_word(bus, sp, value);
    }

    /// Pop a word: read, then SP += 2.
    pub(crate) fn pop<B: T11Bus>(&mut self, bus: &mut B) -> u16 {
        let value = self.read_word(bus, self.regs.sp());
        self.regs.set_sp(self.regs.sp().wrapping_add(2));
        value
    }

    /// Deduct cycles from the current budget.
    pub(crate) fn charge(&mut self, cycles: u32) {
        self.icount -= i64::from(cycles);
    }

    /// Enter the wait state and stop charging: the loop burns the rest of
    /// the budget at its next boundary check.
    pub(crate) fn enter_wait(&mut self) {
        self.charge(timing::WAIT);
        self.wait_state = true;
    }

    /// Condition-code string in the PDP-11 console style.
    fn flags_string(&self) -> String {
        let mut s = String::with_capacity(4);
        s.push(if self.psw.is_set(N) { 'N' } else { '.' });
        s.push(if self.psw.is_set(Z) { 'Z' } else { '.' });
        s.push(if self.psw.is_set(V) { 'V' } else { '.' });
        s.push(if self.psw.is_set(C) { 'C' } else { '.' });
        s
    }
}

impl Default for T11 {
    /// Mode 0: start address 0xC000.
    fn default() -> Self {
        Self::new(0)
    }
}

// === Observable implementation ===

const T11_QUERY_PATHS: &[&str] = &[
    "r0", "r1", "r2", "r3", "r4", "r5",
    "sp", "pc", "prev_pc",
    "psw", "flags", "flags.n", "flags.z", "flags.v", "flags.c",
    "priority",
    "wait",
    "cp_state",
    "lines.vec", "lines.pf", "lines.hlt",
    "pending.pf", "pending.hlt",
    "mode", "restart",
    "cycles",
];

impl Observable for T11 {
    fn query(&self, path: &str) -> Option<Value> {
        match path {
            "r0" => Some(Value::Octal16(self.regs.get(0))),
            "r1" => Some(Value::Octal16(self.regs.get(1))),
            "r2" => Some(Value::Octal16(self.regs.get(2))),
            "r3" => Some(Value::Octal16(self.regs.get(3))),
            "r4" => Some(Value::Octal16(self.regs.get(4))),
            "r5" => Some(Value::Octal16(self.regs.get(5))),
            "sp" => Some(Value::Octal16(self.regs.sp())),
            "pc" => Some(Value::Octal16(self.regs.pc())),
            "prev_pc" => Some(Value::Octal16(self.ppc)),
            "psw" => Some(Value::Octal8(self.psw.0)),
            "flags" => Some(self.flags_string().into()),
            "flags.n" => Some(self.psw.is_set(N).into()),
            "flags.z" => Some(self.psw.is_set(Z).into()),
            "flags.v" => Some(self.psw.is_set(V).into()),
            "flags.c" => Some(self.psw.is_set(C).into()),
            "priority" => Some(Value::U8(self.psw.priority() >> 5)),
            "wait" => Some(self.wait_state.into()),
            "cp_state" => Some(Value::U8(self.cp_state)),
            "lines.vec" => Some(self.vec_active.into()),
            "lines.pf" => Some(self.pf_active.into()),
            "lines.hlt" => Some(self.hlt_active.into()),
            "pending.pf" => Some(self.power_fail.into()),
            "pending.hlt" => Some(self.ext_halt.into()),
            "mode" => Some(Value::Octal16(self.mode)),
            "restart" => Some(Value::Octal16(self.restart)),
            "cycles" => Some(self.total_cycles.get().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        T11_QUERY_PATHS
    }
}
