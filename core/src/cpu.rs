//! The CPU: registers, call stack, and the fetch/decode/execute cycle.

use log::trace;

use crate::decoder::Decoder;
use crate::display::Display;
use crate::error::{Abort, Error, Fault};
use crate::keypad::Keypad;
use crate::memory::{Memory, ROM_START};
use crate::quirks::Quirks;
use crate::timers::Timers;

/// Call stack depth.
pub const STACK_DEPTH: usize = 16;

/// The outcome of one machine cycle.
///
/// A halt is not an error at this level: the machine stopped for a
/// reportable reason and its state remains valid for inspection or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Continue,
    Halt(Fault),
}

/// Registers, call stack, memory, timers, and the decoder, stepped one
/// instruction at a time by [`Cpu::run_cycle`].
///
/// The display and keypad are not owned; the embedding application passes
/// them into each cycle so it keeps control of rendering and input.
pub struct Cpu {
    /// general purpose registers; VF doubles as the flag register
    v: [u8; 16],
    /// the index register
    i: u16,
    /// the program counter
    pc: u16,
    /// the stack pointer, indexing the next free stack slot
    sp: usize,
    /// return addresses for subroutine calls
    stack: [u16; STACK_DEPTH],
    quirks: Quirks,
    memory: Memory,
    timers: Timers,
    decoder: Decoder,
    last_fault: Option<Fault>,
}

impl Cpu {
    /// A powered-on machine with the font loaded and no program.
    pub fn new(quirks: Quirks) -> Result<Self, Error> {
        Ok(Cpu {
            v: [0x0; 16],
            i: 0x0,
            pc: ROM_START,
            sp: 0,
            stack: [0x0; STACK_DEPTH],
            quirks,
            memory: Memory::new(),
            timers: Timers::new(),
            decoder: Decoder::new()?,
            last_fault: None,
        })
    }

    /// Fetch, decode, and execute a single instruction.
    ///
    /// The program counter is advanced past the fetched word before the
    /// instruction runs, so control flow instructions see the address of
    /// the next word and key-wait can rewind by two to retry.
    pub fn run_cycle(
        &mut self,
        display: &mut dyn Display,
        keypad: &mut dyn Keypad,
    ) -> Result<Cycle, Error> {
        let opcode = self.memory.get_word(self.pc).map_err(Error::Fetch)?;
        let instruction = self.decoder.decode(opcode);
        trace!("{:04X} {:04X} {}", self.pc, opcode, instruction.mnemonic());

        self.pc = self.pc.wrapping_add(2);
        match instruction.execute(self, display, keypad) {
            Ok(()) => Ok(Cycle::Continue),
            Err(Abort::Halt(fault)) => {
                self.last_fault = Some(fault);
                Ok(Cycle::Halt(fault))
            }
            Err(Abort::Fatal(error)) => Err(error),
        }
    }

    /// Clear registers, the call stack, and the index and program
    /// counters. With `full_system_reset` the memory is rebuilt (font
    /// kept, program dropped) and the display blanked as well.
    pub fn reset(&mut self, full_system_reset: bool, display: &mut dyn Display) {
        self.v = [0x0; 16];
        self.i = 0x0;
        self.pc = ROM_START;
        self.sp = 0;
        self.stack = [0x0; STACK_DEPTH];
        self.timers = Timers::new();
        self.last_fault = None;
        if full_system_reset {
            self.memory.reset();
            display.clear();
        }
    }

    /// Load a program into memory at the standard start address.
    pub fn load_rom(&mut self, reader: &mut dyn std::io::Read) -> Result<(), Error> {
        self.memory.load_rom(reader)
    }

    pub fn push_stack(&mut self, addr: u16) -> Result<(), Error> {
        if self.sp >= STACK_DEPTH {
            return Err(Error::StackOverflow { depth: STACK_DEPTH });
        }
        self.stack[self.sp] = addr;
        self.sp += 1;
        Ok(())
    }

    pub fn pop_stack(&mut self) -> Result<u16, Error> {
        if self.sp == 0 {
            return Err(Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    pub fn register(&self, x: u8) -> u8 {
        self.v[usize::from(x & 0xF)]
    }

    pub fn set_register(&mut self, x: u8, value: u8) {
        self.v[usize::from(x & 0xF)] = value;
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn set_index(&mut self, value: u16) {
        self.i = value;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Step over the next instruction word.
    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    pub fn quirks(&self) -> &Quirks {
        &self.quirks
    }

    pub fn quirks_mut(&mut self) -> &mut Quirks {
        &mut self.quirks
    }

    /// The fault that halted the last cycle, if any.
    pub fn last_fault(&self) -> Option<Fault> {
        self.last_fault
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::Screen;
    use crate::error::MemoryError;
    use crate::keypad::KeypadState;
    use crate::memory::{FONT_GLYPH_SIZE, FONT_START};

    fn machine() -> (Cpu, Screen, KeypadState) {
        (
            Cpu::new(Quirks::default()).unwrap(),
            Screen::base(),
            KeypadState::new(),
        )
    }

    /// Write `opcode` at the program counter and run one cycle.
    fn step(
        cpu: &mut Cpu,
        screen: &mut Screen,
        keypad: &mut KeypadState,
        opcode: u16,
    ) -> Result<Cycle, Error> {
        let pc = cpu.pc();
        cpu.memory_mut().set_byte(pc, (opcode >> 8) as u8).unwrap();
        cpu.memory_mut().set_byte(pc + 1, opcode as u8).unwrap();
        cpu.run_cycle(screen, keypad)
    }

    fn step_ok(cpu: &mut Cpu, screen: &mut Screen, keypad: &mut KeypadState, opcode: u16) {
        assert_eq!(step(cpu, screen, keypad, opcode).unwrap(), Cycle::Continue);
    }

    #[test]
    fn test_initial_state() {
        let (cpu, _, _) = machine();
        assert_eq!(cpu.pc(), 0x200);
        assert_eq!(cpu.index(), 0x0);
        assert_eq!(cpu.register(0xF), 0x0);
        assert_eq!(cpu.last_fault(), None);
        // the font survives in low memory
        assert_eq!(cpu.memory().get_byte(FONT_START).unwrap(), 0xF0);
    }

    #[test]
    fn test_pc_advances_by_two() {
        let (mut cpu, mut screen, mut keypad) = machine();
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x6A42);
        assert_eq!(cpu.pc(), 0x202);
    }

    #[test]
    fn test_fetch_out_of_bounds_is_fatal() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_pc(0xFFF);
        assert!(matches!(
            cpu.run_cycle(&mut screen, &mut keypad),
            Err(Error::Fetch(MemoryError { address: 0xFFF, .. }))
        ));
    }

    #[test]
    fn test_add_sets_carry_last() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0xFF);
        cpu.set_register(0x1, 0x01);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x8014);
        assert_eq!(cpu.register(0x0), 0x00);
        assert_eq!(cpu.register(0xF), 0x1);

        // carry into VF even when VF is an operand
        cpu.set_register(0xF, 0x80);
        cpu.set_register(0x2, 0x80);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x8F24);
        assert_eq!(cpu.register(0xF), 0x1);
    }

    #[test]
    fn test_sub_clears_vf_on_borrow() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0x05);
        cpu.set_register(0x1, 0x0A);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x8015);
        assert_eq!(cpu.register(0x0), 0xFB);
        assert_eq!(cpu.register(0xF), 0x0);
    }

    #[test]
    fn test_subn_sets_vf_without_borrow() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0x05);
        cpu.set_register(0x1, 0x0A);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x8017);
        assert_eq!(cpu.register(0x0), 0x05);
        assert_eq!(cpu.register(0xF), 0x1);
    }

    #[test]
    fn test_add_byte_ignores_carry() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x3, 0xFF);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x7302);
        assert_eq!(cpu.register(0x3), 0x01);
        assert_eq!(cpu.register(0xF), 0x0);
    }

    #[test]
    fn test_logic_resets_vf_by_default() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0b1010);
        cpu.set_register(0x1, 0b0110);
        cpu.set_register(0xF, 0xFF);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x8013);
        assert_eq!(cpu.register(0x0), 0b1100);
        assert_eq!(cpu.register(0xF), 0x0);
    }

    #[test]
    fn test_logic_keeps_vf_with_quirk_off() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.quirks_mut().vf_reset = false;
        cpu.set_register(0x0, 0b1010);
        cpu.set_register(0x1, 0b0110);
        cpu.set_register(0xF, 0xFF);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x8011);
        assert_eq!(cpu.register(0x0), 0b1110);
        assert_eq!(cpu.register(0xF), 0xFF);
    }

    #[test]
    fn test_shift_reads_vy_by_default() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0x00);
        cpu.set_register(0x1, 0b0000_0101);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x8016);
        assert_eq!(cpu.register(0x0), 0b0000_0010);
        assert_eq!(cpu.register(0xF), 0x1);
    }

    #[test]
    fn test_shift_reads_vx_under_quirk() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.quirks_mut().shift = true;
        cpu.set_register(0x0, 0b1000_0001);
        cpu.set_register(0x1, 0x00);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x801E);
        assert_eq!(cpu.register(0x0), 0b0000_0010);
        assert_eq!(cpu.register(0xF), 0x1);
    }

    #[test]
    fn test_skip_family() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0x42);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x3042);
        assert_eq!(cpu.pc(), 0x204);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x3043);
        assert_eq!(cpu.pc(), 0x206);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x4043);
        assert_eq!(cpu.pc(), 0x20A);
        cpu.set_register(0x1, 0x42);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x5010);
        assert_eq!(cpu.pc(), 0x20E);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x9010);
        assert_eq!(cpu.pc(), 0x210);
    }

    #[test]
    fn test_call_and_ret_round_trip() {
        let (mut cpu, mut screen, mut keypad) = machine();
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x2400);
        assert_eq!(cpu.pc(), 0x400);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x00EE);
        // RET lands on the word after the CALL
        assert_eq!(cpu.pc(), 0x202);
    }

    #[test]
    fn test_stack_overflow_is_fatal() {
        let (mut cpu, mut screen, mut keypad) = machine();
        for _ in 0..STACK_DEPTH {
            step_ok(&mut cpu, &mut screen, &mut keypad, 0x2200);
        }
        assert!(matches!(
            step(&mut cpu, &mut screen, &mut keypad, 0x2200),
            Err(Error::StackOverflow { depth: 16 })
        ));
    }

    #[test]
    fn test_stack_underflow_is_fatal() {
        let (mut cpu, mut screen, mut keypad) = machine();
        assert!(matches!(
            step(&mut cpu, &mut screen, &mut keypad, 0x00EE),
            Err(Error::StackUnderflow)
        ));
    }

    #[test]
    fn test_endless_jump_halts() {
        let (mut cpu, mut screen, mut keypad) = machine();
        let cycle = step(&mut cpu, &mut screen, &mut keypad, 0x1200).unwrap();
        assert_eq!(cycle, Cycle::Halt(Fault::EndlessJump { addr: 0x200 }));
        assert_eq!(cpu.last_fault(), Some(Fault::EndlessJump { addr: 0x200 }));
    }

    #[test]
    fn test_endless_jump_runs_with_quirk_off() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.quirks_mut().catch_endless_jump = false;
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x1200);
        assert_eq!(cpu.pc(), 0x200);
    }

    #[test]
    fn test_jump_with_offset() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0x10);
        cpu.set_register(0x3, 0x20);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xB300);
        assert_eq!(cpu.pc(), 0x310);

        cpu.quirks_mut().jump = true;
        cpu.set_pc(0x200);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xB300);
        assert_eq!(cpu.pc(), 0x320);
    }

    #[test]
    fn test_illegal_opcode_halts_with_address() {
        let (mut cpu, mut screen, mut keypad) = machine();
        let cycle = step(&mut cpu, &mut screen, &mut keypad, 0x8008).unwrap();
        assert_eq!(
            cycle,
            Cycle::Halt(Fault::IllegalOpcode {
                opcode: 0x8008,
                addr: 0x200,
            })
        );
    }

    #[test]
    fn test_exit_halts() {
        let (mut cpu, mut screen, mut keypad) = machine();
        let cycle = step(&mut cpu, &mut screen, &mut keypad, 0x00FD).unwrap();
        assert_eq!(cycle, Cycle::Halt(Fault::Exit));
    }

    #[test]
    fn test_draw_xor_and_collision() {
        let (mut cpu, mut screen, mut keypad) = machine();
        // one 0xFF sprite row at 0x300
        cpu.memory_mut().set_byte(0x300, 0xFF).unwrap();
        cpu.set_index(0x300);
        cpu.set_register(0x0, 0x0);
        cpu.set_register(0x1, 0x0);

        step_ok(&mut cpu, &mut screen, &mut keypad, 0xD011);
        assert_eq!(cpu.register(0xF), 0x0);
        assert!(screen.pixel(0, 0).unwrap());
        assert!(screen.pixel(7, 0).unwrap());
        assert!(screen.update_required());

        // drawing the same sprite again erases it and reports collision
        cpu.set_pc(0x200);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xD011);
        assert_eq!(cpu.register(0xF), 0x1);
        assert!(!screen.pixel(0, 0).unwrap());
    }

    #[test]
    fn test_draw_clips_by_default() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.memory_mut().set_byte(0x300, 0xFF).unwrap();
        cpu.set_index(0x300);
        // origin wraps into range, overhang clips
        cpu.set_register(0x0, 60 + 64);
        cpu.set_register(0x1, 0x0);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xD011);
        assert!(screen.pixel(60, 0).unwrap());
        assert!(screen.pixel(63, 0).unwrap());
        assert!(!screen.pixel(0, 0).unwrap());
    }

    #[test]
    fn test_draw_wraps_under_quirk() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.quirks_mut().wrap_sprite = true;
        cpu.memory_mut().set_byte(0x300, 0xFF).unwrap();
        cpu.set_index(0x300);
        cpu.set_register(0x0, 60);
        cpu.set_register(0x1, 0x0);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xD011);
        assert!(screen.pixel(63, 0).unwrap());
        assert!(screen.pixel(3, 0).unwrap());
    }

    #[test]
    fn test_draw_past_memory_halts_but_keeps_partial_draw() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.memory_mut().set_byte(0xFFF, 0xFF).unwrap();
        cpu.set_index(0xFFF);
        cpu.set_register(0x0, 0x0);
        cpu.set_register(0x1, 0x0);
        let cycle = step(&mut cpu, &mut screen, &mut keypad, 0xD012).unwrap();
        assert!(matches!(cycle, Cycle::Halt(Fault::Memory(_))));
        // the first row made it to the screen before the fault
        assert!(screen.pixel(0, 0).unwrap());
        assert!(screen.update_required());
    }

    #[test]
    fn test_font_lookup() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0xA);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF029);
        assert_eq!(cpu.index(), FONT_START + 0xA * FONT_GLYPH_SIZE);
        let glyph: Vec<u8> = (0..5)
            .map(|row| cpu.memory().get_byte(cpu.index() + row).unwrap())
            .collect();
        assert_eq!(glyph, [0xF0, 0x90, 0xF0, 0x90, 0x90]);
    }

    #[test]
    fn test_font_lookup_masks_high_nibble() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0x1A);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF029);
        assert_eq!(cpu.index(), FONT_START + 0xA * FONT_GLYPH_SIZE);
    }

    #[test]
    fn test_bcd() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 234);
        cpu.set_index(0x300);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF033);
        assert_eq!(cpu.memory().get_byte(0x300).unwrap(), 2);
        assert_eq!(cpu.memory().get_byte(0x301).unwrap(), 3);
        assert_eq!(cpu.memory().get_byte(0x302).unwrap(), 4);
    }

    #[test]
    fn test_store_and_load_advance_index() {
        let (mut cpu, mut screen, mut keypad) = machine();
        for x in 0..=0x3u8 {
            cpu.set_register(x, x + 10);
        }
        cpu.set_index(0x300);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF355);
        assert_eq!(cpu.index(), 0x304);
        assert_eq!(cpu.memory().get_byte(0x303).unwrap(), 13);

        cpu.set_index(0x300);
        for x in 0..=0x3u8 {
            cpu.set_register(x, 0);
        }
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF365);
        assert_eq!(cpu.index(), 0x304);
        assert_eq!(cpu.register(0x3), 13);
    }

    #[test]
    fn test_store_index_quirks() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.quirks_mut().memory_increment_by_x = true;
        cpu.set_index(0x300);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF355);
        assert_eq!(cpu.index(), 0x303);

        // leaving I untouched wins over increment-by-x
        cpu.quirks_mut().memory_leave_i_unchanged = true;
        cpu.set_index(0x300);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF355);
        assert_eq!(cpu.index(), 0x300);
    }

    #[test]
    fn test_load_past_memory_halts() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_index(0xFFE);
        let cycle = step(&mut cpu, &mut screen, &mut keypad, 0xF365).unwrap();
        assert!(matches!(cycle, Cycle::Halt(Fault::Memory(_))));
    }

    #[test]
    fn test_key_skips() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 0x7);
        keypad.press(0x7);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xE09E);
        assert_eq!(cpu.pc(), 0x204);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xE0A1);
        assert_eq!(cpu.pc(), 0x206);
        keypad.release(0x7);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xE0A1);
        assert_eq!(cpu.pc(), 0x20A);
    }

    #[test]
    fn test_key_wait_rewinds_until_pressed() {
        let (mut cpu, mut screen, mut keypad) = machine();
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF50A);
        assert_eq!(cpu.pc(), 0x200);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF50A);
        assert_eq!(cpu.pc(), 0x200);
        keypad.press(0xB);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF50A);
        assert_eq!(cpu.pc(), 0x202);
        assert_eq!(cpu.register(0x5), 0xB);
    }

    #[test]
    fn test_timer_instructions() {
        let (mut cpu, mut screen, mut keypad) = machine();
        cpu.set_register(0x0, 42);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF015);
        assert_eq!(cpu.timers().delay(), 42);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF018);
        assert_eq!(cpu.timers().sound(), 42);
        assert!(cpu.timers().beeper());
        step_ok(&mut cpu, &mut screen, &mut keypad, 0xF107);
        assert_eq!(cpu.register(0x1), 42);
    }

    #[test]
    fn test_random_respects_mask() {
        let (mut cpu, mut screen, mut keypad) = machine();
        for _ in 0..32 {
            cpu.set_pc(0x200);
            step_ok(&mut cpu, &mut screen, &mut keypad, 0xC00F);
            assert_eq!(cpu.register(0x0) & 0xF0, 0x00);
        }
    }

    #[test]
    fn test_extended_mode_round_trip() {
        let mut cpu = Cpu::new(Quirks::default()).unwrap();
        let mut screen = Screen::extended();
        let mut keypad = KeypadState::new();
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x00FF);
        assert!(screen.high_res());
        assert_eq!(screen.width(), 128);
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x00FE);
        assert!(!screen.high_res());
        assert_eq!(screen.width(), 64);
    }

    #[test]
    fn test_scroll_instructions_run() {
        let mut cpu = Cpu::new(Quirks::default()).unwrap();
        let mut screen = Screen::extended();
        let mut keypad = KeypadState::new();
        screen.set_pixel(10, 0, true).unwrap();
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x00C2);
        assert!(screen.pixel(10, 2).unwrap());
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x00FB);
        assert!(screen.pixel(14, 2).unwrap());
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x00FC);
        assert!(screen.pixel(10, 2).unwrap());
    }

    #[test]
    fn test_reset_keeps_program() {
        let (mut cpu, mut screen, mut keypad) = machine();
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x6A42);
        cpu.set_index(0x300);
        cpu.reset(false, &mut screen);
        assert_eq!(cpu.pc(), 0x200);
        assert_eq!(cpu.register(0xA), 0x0);
        assert_eq!(cpu.index(), 0x0);
        // the program word written by the test step survives
        assert_eq!(cpu.memory().get_word(0x200).unwrap(), 0x6A42);
    }

    #[test]
    fn test_full_reset_drops_program_and_blanks_screen() {
        let (mut cpu, mut screen, mut keypad) = machine();
        step_ok(&mut cpu, &mut screen, &mut keypad, 0x6A42);
        screen.set_pixel(0, 0, true).unwrap();
        cpu.reset(true, &mut screen);
        assert_eq!(cpu.memory().get_word(0x200).unwrap(), 0x0000);
        assert_eq!(cpu.memory().get_byte(FONT_START).unwrap(), 0xF0);
        assert!(!screen.pixel(0, 0).unwrap());
    }

    #[test]
    fn test_program_scenario_clears_then_halts() {
        let (mut cpu, mut screen, mut keypad) = machine();
        screen.set_pixel(5, 5, true).unwrap();
        let rom: [u8; 4] = [0x00, 0xE0, 0x12, 0x02];
        cpu.load_rom(&mut rom.as_slice()).unwrap();

        assert_eq!(
            cpu.run_cycle(&mut screen, &mut keypad).unwrap(),
            Cycle::Continue
        );
        assert!(!screen.pixel(5, 5).unwrap());
        assert_eq!(
            cpu.run_cycle(&mut screen, &mut keypad).unwrap(),
            Cycle::Halt(Fault::EndlessJump { addr: 0x202 })
        );
    }
}
