//! Save-state round-trip tests: restoring a snapshot and continuing must
//! be bit-identical to never having paused.

use dec_t11::{Line, Status, T11, T11Bus};
use emu_core::{Observable, Ticks};

#[derive(Clone)]
struct TestBus {
    ram: Vec<u8>,
}

impl TestBus {
    fn new() -> Self {
        Self {
            ram: vec![0; 0x1_0000],
        }
    }

    fn poke_word(&mut self, addr: u16, value: u16) {
        let addr = (addr & !1) as usize;
        self.ram[addr] = value as u8;
        self.ram[addr + 1] = (value >> 8) as u8;
    }
}

impl T11Bus for TestBus {
    fn read_byte(&mut self, addr: u16) -> u8 {
        self.ram[addr as usize]
    }

    fn write_byte(&mut self, addr: u16, value: u8) {
        self.ram[addr as usize] = value;
    }

    fn read_word(&mut self, addr: u16) -> u16 {
        let a = (addr & !1) as usize;
        u16::from(self.ram[a]) | (u16::from(self.ram[a + 1]) << 8)
    }

    fn write_word(&mut self, addr: u16, value: u16) {
        self.poke_word(addr, value);
    }
}

const ORIGIN: u16 = 0o10000;

/// A program that churns registers, memory, and the stack:
///   MOV #10,R0 ; MOV #1000,R2
/// loop:
///   INC R1 ; MOV R1,(R2)+ ; JSR PC,@#sub ; SOB R0,loop ; WAIT
/// sub:
///   ADD R1,R3 ; RTS PC
fn load_program(bus: &mut TestBus) {
    let sub = ORIGIN + 0o40;
    let program: &[u16] = &[
        0o012700, 0o10,    // MOV #10,R0
        0o012702, 0o1000,  // MOV #1000,R2
        0o005201,          // INC R1
        0o010122,          // MOV R1,(R2)+
        0o004737, sub,     // JSR PC,@#sub
        0o077005,          // SOB R0,loop
        0o000001,          // WAIT
    ];
    for (i, &w) in program.iter().enumerate() {
        bus.poke_word(ORIGIN + (i as u16) * 2, w);
    }
    bus.poke_word(sub, 0o060103); // ADD R1,R3
    bus.poke_word(sub + 2, 0o000207); // RTS PC
}

fn assert_same_state(a: &T11, b: &T11) {
    assert_eq!(a.regs, b.regs);
    assert_eq!(a.psw, b.psw);
    assert_eq!(a.save_state(), b.save_state());
}

#[test]
fn restore_then_run_matches_an_unpaused_run() {
    let mut reference_bus = TestBus::new();
    load_program(&mut reference_bus);
    let mut reference = T11::new(0o100000);

    let mut paused_bus = reference_bus.clone();
    let mut paused = T11::new(0o100000);

    // Run both to an arbitrary mid-program point.
    reference.execute(&mut reference_bus, Ticks::new(137));
    paused.execute(&mut paused_bus, Ticks::new(137));

    // Snapshot, restore into a fresh core, and continue both.
    let snapshot = paused.save_state();
    let mut resumed = T11::new(0);
    resumed.restore_state(&snapshot).unwrap();

    let consumed_ref = reference.execute(&mut reference_bus, Ticks::new(400));
    let consumed_res = resumed.execute(&mut paused_bus, Ticks::new(400));

    assert_eq!(consumed_ref, consumed_res);
    assert_same_state(&reference, &resumed);
    assert_eq!(reference_bus.ram, paused_bus.ram);
}

#[test]
fn snapshot_preserves_pending_interrupt_edges() {
    let mut bus = TestBus::new();
    load_program(&mut bus);
    bus.poke_word(0o24, 0o20000);
    bus.poke_word(0o26, 0);
    bus.poke_word(0o20000, 0o000001); // WAIT at the handler

    let mut cpu = T11::new(0o100000);
    cpu.psw = Status(0);
    // Arm the edge, then drop the line: the latch must travel with the
    // snapshot.
    cpu.set_line(Line::PowerFail, true);
    cpu.set_line(Line::PowerFail, false);

    let snapshot = cpu.save_state();
    let mut resumed = T11::new(0);
    resumed.restore_state(&snapshot).unwrap();

    let mut resumed_bus = bus.clone();
    resumed.execute(&mut resumed_bus, Ticks::new(1));
    assert_eq!(resumed.regs.pc(), 0o20000, "latched PF edge serviced after restore");
}

#[test]
fn snapshot_preserves_wait_state() {
    let mut bus = TestBus::new();
    bus.poke_word(ORIGIN, 0o000001); // WAIT

    let mut cpu = T11::new(0o100000);
    cpu.execute(&mut bus, Ticks::new(100));
    assert!(cpu.is_waiting());

    let mut resumed = T11::new(0);
    resumed.restore_state(&cpu.save_state()).unwrap();
    assert!(resumed.is_waiting());

    // A restored waiting core keeps burning budget without fetching.
    let consumed = resumed.execute(&mut bus, Ticks::new(250));
    assert_eq!(consumed, Ticks::new(250));
    assert_eq!(resumed.regs.pc(), ORIGIN + 2);
}

#[test]
fn restore_carries_the_boot_mode_selector() {
    let cpu = T11::new(0o100000);
    let mut other = T11::new(0);
    assert_ne!(other.restart_address(), cpu.restart_address());
    other.restore_state(&cpu.save_state()).unwrap();
    assert_eq!(other.restart_address(), cpu.restart_address());
}

#[test]
fn observable_paths_all_resolve() {
    let cpu = T11::new(0);
    for path in cpu.query_paths() {
        assert!(cpu.query(path).is_some(), "path {path} must resolve");
    }
    assert!(cpu.query("no_such_register").is_none());
}

#[test]
fn observable_words_render_octal() {
    let mut cpu = T11::new(0);
    cpu.regs.set(0, 0o177776);
    assert_eq!(cpu.query("r0").unwrap().to_string(), "177776");
    assert_eq!(cpu.query("psw").unwrap().to_string(), "340");
}
