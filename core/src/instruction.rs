//! The instruction set: one family per opcode pattern, decoded into
//! value records with their operands bound.
//!
//! A [`Family`] is the tag stored in the decoder's lookup table and knows
//! its fixed opcode bits and mask. An [`Instruction`] is a family plus the
//! operand fields extracted from one concrete opcode word; it knows how to
//! execute against the CPU and how to print itself.

use crate::cpu::Cpu;
use crate::display::Display;
use crate::error::{Abort, Fault};
use crate::keypad::Keypad;
use crate::memory::FONT_GLYPH_SIZE;
use crate::opcode::Opcode;

/// The fixed bit pattern identifying an opcode family.
///
/// `mask` selects the family-defining bits; bits outside it carry
/// operands. A raw word `w` belongs to the family iff
/// `w & mask == opcode & mask`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub opcode: u16,
    pub mask: u16,
}

/// Every recognized opcode family, plus the illegal-instruction sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Cls,
    Ret,
    ScrollDown,
    ScrollRight,
    ScrollLeft,
    Exit,
    LowRes,
    HighRes,
    Jp,
    Call,
    SeByte,
    SneByte,
    SeReg,
    LdByte,
    AddByte,
    LdReg,
    Or,
    And,
    Xor,
    AddReg,
    Sub,
    Shr,
    Subn,
    Shl,
    SneReg,
    LdI,
    JpV0,
    Rnd,
    Drw,
    Skp,
    Sknp,
    LdFromDt,
    LdKey,
    LdDt,
    LdSt,
    AddI,
    LdFont,
    LdBcd,
    Store,
    Load,
    Illegal,
}

impl Family {
    /// Every real family, in registration order. `Illegal` is the
    /// decoder's fill value and is never registered.
    pub const ALL: [Family; 40] = [
        Family::Cls,
        Family::Ret,
        Family::ScrollDown,
        Family::ScrollRight,
        Family::ScrollLeft,
        Family::Exit,
        Family::LowRes,
        Family::HighRes,
        Family::Jp,
        Family::Call,
        Family::SeByte,
        Family::SneByte,
        Family::SeReg,
        Family::LdByte,
        Family::AddByte,
        Family::LdReg,
        Family::Or,
        Family::And,
        Family::Xor,
        Family::AddReg,
        Family::Sub,
        Family::Shr,
        Family::Subn,
        Family::Shl,
        Family::SneReg,
        Family::LdI,
        Family::JpV0,
        Family::Rnd,
        Family::Drw,
        Family::Skp,
        Family::Sknp,
        Family::LdFromDt,
        Family::LdKey,
        Family::LdDt,
        Family::LdSt,
        Family::AddI,
        Family::LdFont,
        Family::LdBcd,
        Family::Store,
        Family::Load,
    ];

    pub fn info(self) -> OpcodeInfo {
        let (opcode, mask) = match self {
            Family::Cls => (0x00E0, 0xFFFF),
            Family::Ret => (0x00EE, 0xFFFF),
            Family::ScrollDown => (0x00C0, 0xFFF0),
            Family::ScrollRight => (0x00FB, 0xFFFF),
            Family::ScrollLeft => (0x00FC, 0xFFFF),
            Family::Exit => (0x00FD, 0xFFFF),
            Family::LowRes => (0x00FE, 0xFFFF),
            Family::HighRes => (0x00FF, 0xFFFF),
            Family::Jp => (0x1000, 0xF000),
            Family::Call => (0x2000, 0xF000),
            Family::SeByte => (0x3000, 0xF000),
            Family::SneByte => (0x4000, 0xF000),
            Family::SeReg => (0x5000, 0xF00F),
            Family::LdByte => (0x6000, 0xF000),
            Family::AddByte => (0x7000, 0xF000),
            Family::LdReg => (0x8000, 0xF00F),
            Family::Or => (0x8001, 0xF00F),
            Family::And => (0x8002, 0xF00F),
            Family::Xor => (0x8003, 0xF00F),
            Family::AddReg => (0x8004, 0xF00F),
            Family::Sub => (0x8005, 0xF00F),
            Family::Shr => (0x8006, 0xF00F),
            Family::Subn => (0x8007, 0xF00F),
            Family::Shl => (0x800E, 0xF00F),
            Family::SneReg => (0x9000, 0xF00F),
            Family::LdI => (0xA000, 0xF000),
            Family::JpV0 => (0xB000, 0xF000),
            Family::Rnd => (0xC000, 0xF000),
            Family::Drw => (0xD000, 0xF000),
            Family::Skp => (0xE09E, 0xF0FF),
            Family::Sknp => (0xE0A1, 0xF0FF),
            Family::LdFromDt => (0xF007, 0xF0FF),
            Family::LdKey => (0xF00A, 0xF0FF),
            Family::LdDt => (0xF015, 0xF0FF),
            Family::LdSt => (0xF018, 0xF0FF),
            Family::AddI => (0xF01E, 0xF0FF),
            Family::LdFont => (0xF029, 0xF0FF),
            Family::LdBcd => (0xF033, 0xF0FF),
            Family::Store => (0xF055, 0xF0FF),
            Family::Load => (0xF065, 0xF0FF),
            Family::Illegal => (0x0000, 0x0000),
        };
        OpcodeInfo { opcode, mask }
    }
}

/// A decoded instruction with its operands bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0` clear the display
    Cls,
    /// `00EE` return from subroutine
    Ret,
    /// `00CN` scroll the display n lines down
    ScrollDown { n: u8 },
    /// `00FB` scroll the display right
    ScrollRight,
    /// `00FC` scroll the display left
    ScrollLeft,
    /// `00FD` exit the interpreter
    Exit,
    /// `00FE` disable extended resolution
    LowRes,
    /// `00FF` enable extended resolution
    HighRes,
    /// `1NNN` jump
    Jp { addr: u16 },
    /// `2NNN` call subroutine
    Call { addr: u16 },
    /// `3XKK` skip next if Vx == kk
    SeByte { x: u8, kk: u8 },
    /// `4XKK` skip next if Vx != kk
    SneByte { x: u8, kk: u8 },
    /// `5XY0` skip next if Vx == Vy
    SeReg { x: u8, y: u8 },
    /// `6XKK` Vx = kk
    LdByte { x: u8, kk: u8 },
    /// `7XKK` Vx += kk without carry
    AddByte { x: u8, kk: u8 },
    /// `8XY0` Vx = Vy
    LdReg { x: u8, y: u8 },
    /// `8XY1` Vx |= Vy
    Or { x: u8, y: u8 },
    /// `8XY2` Vx &= Vy
    And { x: u8, y: u8 },
    /// `8XY3` Vx ^= Vy
    Xor { x: u8, y: u8 },
    /// `8XY4` Vx += Vy, VF = carry
    AddReg { x: u8, y: u8 },
    /// `8XY5` Vx -= Vy, VF = no borrow
    Sub { x: u8, y: u8 },
    /// `8XY6` shift right, VF = shifted-out bit
    Shr { x: u8, y: u8 },
    /// `8XY7` Vx = Vy - Vx, VF = no borrow
    Subn { x: u8, y: u8 },
    /// `8XYE` shift left, VF = shifted-out bit
    Shl { x: u8, y: u8 },
    /// `9XY0` skip next if Vx != Vy
    SneReg { x: u8, y: u8 },
    /// `ANNN` I = addr
    LdI { addr: u16 },
    /// `BNNN` jump to addr + V0 (or Vx under the jump quirk)
    JpV0 { addr: u16 },
    /// `CXKK` Vx = random byte AND kk
    Rnd { x: u8, kk: u8 },
    /// `DXYN` draw an n-byte sprite at (Vx, Vy), VF = collision
    Drw { x: u8, y: u8, n: u8 },
    /// `EX9E` skip next if key Vx is pressed
    Skp { x: u8 },
    /// `EXA1` skip next if key Vx is not pressed
    Sknp { x: u8 },
    /// `FX07` Vx = delay timer
    LdFromDt { x: u8 },
    /// `FX0A` wait for a key press, store it in Vx
    LdKey { x: u8 },
    /// `FX15` delay timer = Vx
    LdDt { x: u8 },
    /// `FX18` sound timer = Vx
    LdSt { x: u8 },
    /// `FX1E` I += Vx
    AddI { x: u8 },
    /// `FX29` I = font sprite address of Vx
    LdFont { x: u8 },
    /// `FX33` store BCD of Vx at I..I+3
    LdBcd { x: u8 },
    /// `FX55` store V0..=Vx at I
    Store { x: u8 },
    /// `FX65` load V0..=Vx from I
    Load { x: u8 },
    /// anything the decoder could not match
    Illegal { opcode: u16 },
}

impl Instruction {
    /// Bind the operand fields of `raw` for the given family.
    pub fn decode(family: Family, raw: u16) -> Instruction {
        match family {
            Family::Cls => Instruction::Cls,
            Family::Ret => Instruction::Ret,
            Family::ScrollDown => Instruction::ScrollDown { n: raw.n() },
            Family::ScrollRight => Instruction::ScrollRight,
            Family::ScrollLeft => Instruction::ScrollLeft,
            Family::Exit => Instruction::Exit,
            Family::LowRes => Instruction::LowRes,
            Family::HighRes => Instruction::HighRes,
            Family::Jp => Instruction::Jp { addr: raw.addr() },
            Family::Call => Instruction::Call { addr: raw.addr() },
            Family::SeByte => Instruction::SeByte {
                x: raw.x(),
                kk: raw.kk(),
            },
            Family::SneByte => Instruction::SneByte {
                x: raw.x(),
                kk: raw.kk(),
            },
            Family::SeReg => Instruction::SeReg {
                x: raw.x(),
                y: raw.y(),
            },
            Family::LdByte => Instruction::LdByte {
                x: raw.x(),
                kk: raw.kk(),
            },
            Family::AddByte => Instruction::AddByte {
                x: raw.x(),
                kk: raw.kk(),
            },
            Family::LdReg => Instruction::LdReg {
                x: raw.x(),
                y: raw.y(),
            },
            Family::Or => Instruction::Or {
                x: raw.x(),
                y: raw.y(),
            },
            Family::And => Instruction::And {
                x: raw.x(),
                y: raw.y(),
            },
            Family::Xor => Instruction::Xor {
                x: raw.x(),
                y: raw.y(),
            },
            Family::AddReg => Instruction::AddReg {
                x: raw.x(),
                y: raw.y(),
            },
            Family::Sub => Instruction::Sub {
                x: raw.x(),
                y: raw.y(),
            },
            Family::Shr => Instruction::Shr {
                x: raw.x(),
                y: raw.y(),
            },
            Family::Subn => Instruction::Subn {
                x: raw.x(),
                y: raw.y(),
            },
            Family::Shl => Instruction::Shl {
                x: raw.x(),
                y: raw.y(),
            },
            Family::SneReg => Instruction::SneReg {
                x: raw.x(),
                y: raw.y(),
            },
            Family::LdI => Instruction::LdI { addr: raw.addr() },
            Family::JpV0 => Instruction::JpV0 { addr: raw.addr() },
            Family::Rnd => Instruction::Rnd {
                x: raw.x(),
                kk: raw.kk(),
            },
            Family::Drw => Instruction::Drw {
                x: raw.x(),
                y: raw.y(),
                n: raw.n(),
            },
            Family::Skp => Instruction::Skp { x: raw.x() },
            Family::Sknp => Instruction::Sknp { x: raw.x() },
            Family::LdFromDt => Instruction::LdFromDt { x: raw.x() },
            Family::LdKey => Instruction::LdKey { x: raw.x() },
            Family::LdDt => Instruction::LdDt { x: raw.x() },
            Family::LdSt => Instruction::LdSt { x: raw.x() },
            Family::AddI => Instruction::AddI { x: raw.x() },
            Family::LdFont => Instruction::LdFont { x: raw.x() },
            Family::LdBcd => Instruction::LdBcd { x: raw.x() },
            Family::Store => Instruction::Store { x: raw.x() },
            Family::Load => Instruction::Load { x: raw.x() },
            Family::Illegal => Instruction::Illegal { opcode: raw },
        }
    }

    /// Execute against the CPU and its collaborators.
    ///
    /// `Ok(())` on success; `Abort::Halt` for recoverable stops (with the
    /// printable reason); `Abort::Fatal` when the machine state is broken.
    /// The program counter has already been advanced past this
    /// instruction when this runs.
    pub fn execute(
        &self,
        cpu: &mut Cpu,
        display: &mut dyn Display,
        keypad: &mut dyn Keypad,
    ) -> Result<(), Abort> {
        match *self {
            Instruction::Cls => {
                display.clear();
                Ok(())
            }
            Instruction::Ret => {
                let addr = cpu.pop_stack()?;
                cpu.set_pc(addr);
                Ok(())
            }
            Instruction::ScrollDown { n } => {
                display.scroll_down(n);
                Ok(())
            }
            Instruction::ScrollRight => {
                display.scroll_right();
                Ok(())
            }
            Instruction::ScrollLeft => {
                display.scroll_left();
                Ok(())
            }
            Instruction::Exit => Err(Fault::Exit.into()),
            Instruction::LowRes => {
                display.set_high_res(false);
                Ok(())
            }
            Instruction::HighRes => {
                display.set_high_res(true);
                Ok(())
            }
            Instruction::Jp { addr } => {
                if cpu.quirks().catch_endless_jump && addr == cpu.pc().wrapping_sub(2) {
                    return Err(Fault::EndlessJump { addr }.into());
                }
                cpu.set_pc(addr);
                Ok(())
            }
            Instruction::Call { addr } => {
                cpu.push_stack(cpu.pc())?;
                cpu.set_pc(addr);
                Ok(())
            }
            Instruction::SeByte { x, kk } => {
                if cpu.register(x) == kk {
                    cpu.skip();
                }
                Ok(())
            }
            Instruction::SneByte { x, kk } => {
                if cpu.register(x) != kk {
                    cpu.skip();
                }
                Ok(())
            }
            Instruction::SeReg { x, y } => {
                if cpu.register(x) == cpu.register(y) {
                    cpu.skip();
                }
                Ok(())
            }
            Instruction::LdByte { x, kk } => {
                cpu.set_register(x, kk);
                Ok(())
            }
            Instruction::AddByte { x, kk } => {
                cpu.set_register(x, cpu.register(x).wrapping_add(kk));
                Ok(())
            }
            Instruction::LdReg { x, y } => {
                cpu.set_register(x, cpu.register(y));
                Ok(())
            }
            Instruction::Or { x, y } => {
                cpu.set_register(x, cpu.register(x) | cpu.register(y));
                if cpu.quirks().vf_reset {
                    cpu.set_register(0xF, 0);
                }
                Ok(())
            }
            Instruction::And { x, y } => {
                cpu.set_register(x, cpu.register(x) & cpu.register(y));
                if cpu.quirks().vf_reset {
                    cpu.set_register(0xF, 0);
                }
                Ok(())
            }
            Instruction::Xor { x, y } => {
                cpu.set_register(x, cpu.register(x) ^ cpu.register(y));
                if cpu.quirks().vf_reset {
                    cpu.set_register(0xF, 0);
                }
                Ok(())
            }
            Instruction::AddReg { x, y } => {
                let (result, carry) = cpu.register(x).overflowing_add(cpu.register(y));
                cpu.set_register(x, result);
                cpu.set_register(0xF, carry as u8);
                Ok(())
            }
            Instruction::Sub { x, y } => {
                let (result, borrow) = cpu.register(x).overflowing_sub(cpu.register(y));
                cpu.set_register(x, result);
                cpu.set_register(0xF, !borrow as u8);
                Ok(())
            }
            Instruction::Shr { x, y } => {
                let source = if cpu.quirks().shift { x } else { y };
                let value = cpu.register(source);
                cpu.set_register(x, value >> 1);
                cpu.set_register(0xF, value & 0x1);
                Ok(())
            }
            Instruction::Subn { x, y } => {
                let (result, borrow) = cpu.register(y).overflowing_sub(cpu.register(x));
                cpu.set_register(x, result);
                cpu.set_register(0xF, !borrow as u8);
                Ok(())
            }
            Instruction::Shl { x, y } => {
                let source = if cpu.quirks().shift { x } else { y };
                let value = cpu.register(source);
                cpu.set_register(x, value << 1);
                cpu.set_register(0xF, value >> 7);
                Ok(())
            }
            Instruction::SneReg { x, y } => {
                if cpu.register(x) != cpu.register(y) {
                    cpu.skip();
                }
                Ok(())
            }
            Instruction::LdI { addr } => {
                cpu.set_index(addr);
                Ok(())
            }
            Instruction::JpV0 { addr } => {
                let reg = if cpu.quirks().jump {
                    (addr >> 8) as u8
                } else {
                    0x0
                };
                cpu.set_pc(addr.wrapping_add(u16::from(cpu.register(reg))));
                Ok(())
            }
            Instruction::Rnd { x, kk } => {
                let byte: u8 = rand::random();
                cpu.set_register(x, byte & kk);
                Ok(())
            }
            Instruction::Drw { x, y, n } => {
                let width = display.width();
                let height = display.height();
                let origin_x = cpu.register(x) as usize % width;
                let origin_y = cpu.register(y) as usize % height;
                let wrap = cpu.quirks().wrap_sprite;
                let mut collision = false;
                let mut fault = None;

                for row in 0..u16::from(n) {
                    let byte = match cpu.memory().get_byte(cpu.index().wrapping_add(row)) {
                        Ok(byte) => byte,
                        Err(e) => {
                            // surface the fault, but only after VF and the
                            // dirty flag reflect what was drawn so far
                            fault = Some(e);
                            break;
                        }
                    };
                    for bit in 0..8 {
                        if byte & (0x80 >> bit) == 0 {
                            continue;
                        }
                        let mut px = origin_x + bit;
                        let mut py = origin_y + row as usize;
                        if wrap {
                            px %= width;
                            py %= height;
                        } else if px >= width || py >= height {
                            continue;
                        }
                        let lit = display.pixel(px, py).map_err(Fault::OffScreen)?;
                        if lit {
                            collision = true;
                        }
                        display.set_pixel(px, py, !lit).map_err(Fault::OffScreen)?;
                    }
                }

                display.set_update_required();
                cpu.set_register(0xF, collision as u8);
                match fault {
                    None => Ok(()),
                    Some(e) => Err(e.into()),
                }
            }
            Instruction::Skp { x } => {
                if keypad.is_key_pressed(cpu.register(x) & 0xF) {
                    cpu.skip();
                }
                Ok(())
            }
            Instruction::Sknp { x } => {
                if !keypad.is_key_pressed(cpu.register(x) & 0xF) {
                    cpu.skip();
                }
                Ok(())
            }
            Instruction::LdFromDt { x } => {
                cpu.set_register(x, cpu.timers().delay());
                Ok(())
            }
            Instruction::LdKey { x } => {
                match keypad.first_pressed() {
                    Some(key) => cpu.set_register(x, key),
                    None => {
                        // rewind so the instruction re-runs next cycle;
                        // the driver keeps servicing display and timers
                        keypad.update_keys();
                        cpu.set_pc(cpu.pc().wrapping_sub(2));
                    }
                }
                Ok(())
            }
            Instruction::LdDt { x } => {
                let vx = cpu.register(x);
                cpu.timers_mut().set_delay(vx);
                Ok(())
            }
            Instruction::LdSt { x } => {
                let vx = cpu.register(x);
                cpu.timers_mut().set_sound(vx);
                Ok(())
            }
            Instruction::AddI { x } => {
                cpu.set_index(cpu.index().wrapping_add(u16::from(cpu.register(x))));
                Ok(())
            }
            Instruction::LdFont { x } => {
                let glyph = u16::from(cpu.register(x) & 0xF);
                cpu.set_index(cpu.memory().font_start() + glyph * FONT_GLYPH_SIZE);
                Ok(())
            }
            Instruction::LdBcd { x } => {
                let value = cpu.register(x);
                let i = cpu.index();
                cpu.memory_mut().set_byte(i, value / 100)?;
                cpu.memory_mut().set_byte(i.wrapping_add(1), value / 10 % 10)?;
                cpu.memory_mut().set_byte(i.wrapping_add(2), value % 10)?;
                Ok(())
            }
            Instruction::Store { x } => {
                let i = cpu.index();
                for offset in 0..=u16::from(x) {
                    let value = cpu.register(offset as u8);
                    cpu.memory_mut().set_byte(i.wrapping_add(offset), value)?;
                }
                cpu.set_index(block_transfer_index(cpu, x));
                Ok(())
            }
            Instruction::Load { x } => {
                let i = cpu.index();
                for offset in 0..=u16::from(x) {
                    let value = cpu.memory().get_byte(i.wrapping_add(offset))?;
                    cpu.set_register(offset as u8, value);
                }
                cpu.set_index(block_transfer_index(cpu, x));
                Ok(())
            }
            Instruction::Illegal { opcode } => Err(Fault::IllegalOpcode {
                opcode,
                addr: cpu.pc().wrapping_sub(2),
            }
            .into()),
        }
    }

    /// Disassembly-style mnemonic with the bound operands.
    pub fn mnemonic(&self) -> String {
        match *self {
            Instruction::Cls => "CLS".to_string(),
            Instruction::Ret => "RET".to_string(),
            Instruction::ScrollDown { n } => format!("DSV {:X}", n),
            Instruction::ScrollRight => "SCR".to_string(),
            Instruction::ScrollLeft => "SCL".to_string(),
            Instruction::Exit => "EXT".to_string(),
            Instruction::LowRes => "LRS".to_string(),
            Instruction::HighRes => "HRS".to_string(),
            Instruction::Jp { addr } => format!("JP {:03X}", addr),
            Instruction::Call { addr } => format!("CALL {:03X}", addr),
            Instruction::SeByte { x, kk } => format!("SE V{:X}, {:02X}", x, kk),
            Instruction::SneByte { x, kk } => format!("SNE V{:X}, {:02X}", x, kk),
            Instruction::SeReg { x, y } => format!("SE V{:X}, V{:X}", x, y),
            Instruction::LdByte { x, kk } => format!("LD V{:X}, {:02X}", x, kk),
            Instruction::AddByte { x, kk } => format!("ADD V{:X}, {:02X}", x, kk),
            Instruction::LdReg { x, y } => format!("LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => format!("OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => format!("AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => format!("XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => format!("ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => format!("SUB V{:X}, V{:X}", x, y),
            Instruction::Shr { x, y } => format!("SHR V{:X}, V{:X}", x, y),
            Instruction::Subn { x, y } => format!("SUBN V{:X}, V{:X}", x, y),
            Instruction::Shl { x, y } => format!("SHL V{:X}, V{:X}", x, y),
            Instruction::SneReg { x, y } => format!("SNE V{:X}, V{:X}", x, y),
            Instruction::LdI { addr } => format!("LD I, {:03X}", addr),
            Instruction::JpV0 { addr } => format!("JP V0, {:03X}", addr),
            Instruction::Rnd { x, kk } => format!("RND V{:X}, {:02X}", x, kk),
            Instruction::Drw { x, y, n } => format!("DRAW V{:X}, V{:X}, {:X}", x, y, n),
            Instruction::Skp { x } => format!("SKP V{:X}", x),
            Instruction::Sknp { x } => format!("SKNP V{:X}", x),
            Instruction::LdFromDt { x } => format!("LD V{:X}, DT", x),
            Instruction::LdKey { x } => format!("LD V{:X}, K", x),
            Instruction::LdDt { x } => format!("LD DT, V{:X}", x),
            Instruction::LdSt { x } => format!("LD ST, V{:X}", x),
            Instruction::AddI { x } => format!("ADD I, V{:X}", x),
            Instruction::LdFont { x } => format!("LD F, V{:X}", x),
            Instruction::LdBcd { x } => format!("LD B, V{:X}", x),
            Instruction::Store { x } => format!("LD [I], V{:X}", x),
            Instruction::Load { x } => format!("LD V{:X}, [I]", x),
            Instruction::Illegal { opcode } => format!("ILL {:04X}", opcode),
        }
    }

    /// Human-readable description of what this instruction does.
    pub fn description(&self) -> String {
        match *self {
            Instruction::Cls => "Clear the display".to_string(),
            Instruction::Ret => "Return from the current subroutine".to_string(),
            Instruction::ScrollDown { n } => {
                format!("Scroll the display {} lines down", n)
            }
            Instruction::ScrollRight => "Scroll the display right".to_string(),
            Instruction::ScrollLeft => "Scroll the display left".to_string(),
            Instruction::Exit => "Exit the interpreter".to_string(),
            Instruction::LowRes => "Disable extended screen mode".to_string(),
            Instruction::HighRes => "Enable extended screen mode".to_string(),
            Instruction::Jp { addr } => format!("Jump to address {:03X}", addr),
            Instruction::Call { addr } => format!("Call subroutine at {:03X}", addr),
            Instruction::SeByte { x, kk } => {
                format!("Skip the next instruction if V{:X} == {:02X}", x, kk)
            }
            Instruction::SneByte { x, kk } => {
                format!("Skip the next instruction if V{:X} != {:02X}", x, kk)
            }
            Instruction::SeReg { x, y } => {
                format!("Skip the next instruction if V{:X} == V{:X}", x, y)
            }
            Instruction::LdByte { x, kk } => format!("Set V{:X} to {:02X}", x, kk),
            Instruction::AddByte { x, kk } => format!("Add {:02X} to V{:X}", kk, x),
            Instruction::LdReg { x, y } => format!("Copy V{:X} into V{:X}", y, x),
            Instruction::Or { x, y } => format!("Set V{:X} to V{:X} OR V{:X}", x, x, y),
            Instruction::And { x, y } => format!("Set V{:X} to V{:X} AND V{:X}", x, x, y),
            Instruction::Xor { x, y } => format!("Set V{:X} to V{:X} XOR V{:X}", x, x, y),
            Instruction::AddReg { x, y } => {
                format!("Add V{:X} to V{:X}, VF holds the carry", y, x)
            }
            Instruction::Sub { x, y } => {
                format!("Subtract V{:X} from V{:X}, VF clear on borrow", y, x)
            }
            Instruction::Shr { x, y } => {
                format!("Shift V{:X} right by one into V{:X}, VF holds the old bit 0", y, x)
            }
            Instruction::Subn { x, y } => {
                format!("Set V{:X} to V{:X} - V{:X}, VF clear on borrow", x, y, x)
            }
            Instruction::Shl { x, y } => {
                format!("Shift V{:X} left by one into V{:X}, VF holds the old bit 7", y, x)
            }
            Instruction::SneReg { x, y } => {
                format!("Skip the next instruction if V{:X} != V{:X}", x, y)
            }
            Instruction::LdI { addr } => format!("Set I to {:03X}", addr),
            Instruction::JpV0 { addr } => {
                format!("Jump to address {:03X} plus an offset register", addr)
            }
            Instruction::Rnd { x, kk } => {
                format!("Set V{:X} to a random byte masked with {:02X}", x, kk)
            }
            Instruction::Drw { x, y, n } => format!(
                "Draw a sprite at (V{:X}, V{:X}) with {:X} bytes of sprite data \
                 starting at the address stored in I",
                x, y, n
            ),
            Instruction::Skp { x } => {
                format!("Skip the next instruction if key V{:X} is pressed", x)
            }
            Instruction::Sknp { x } => {
                format!("Skip the next instruction if key V{:X} is not pressed", x)
            }
            Instruction::LdFromDt { x } => format!("Set V{:X} to the delay timer", x),
            Instruction::LdKey { x } => {
                format!("Wait for a key press and store the key in V{:X}", x)
            }
            Instruction::LdDt { x } => format!("Set the delay timer to V{:X}", x),
            Instruction::LdSt { x } => format!("Set the sound timer to V{:X}", x),
            Instruction::AddI { x } => format!("Add V{:X} to I", x),
            Instruction::LdFont { x } => {
                format!("Set I to the font sprite address for V{:X}", x)
            }
            Instruction::LdBcd { x } => format!(
                "Store the three decimal digits of V{:X} at I, I+1 and I+2",
                x
            ),
            Instruction::Store { x } => {
                format!("Store registers V0 through V{:X} in memory starting at I", x)
            }
            Instruction::Load { x } => format!(
                "Fill registers V0 through V{:X} with values from memory starting at I",
                x
            ),
            Instruction::Illegal { opcode } => {
                format!("Illegal instruction {:04X}", opcode)
            }
        }
    }
}

/// Post-transfer index register value for `FX55`/`FX65`, per the memory
/// quirks. Leaving I untouched wins when both flags are set.
fn block_transfer_index(cpu: &Cpu, x: u8) -> u16 {
    let i = cpu.index();
    if cpu.quirks().memory_leave_i_unchanged {
        i
    } else if cpu.quirks().memory_increment_by_x {
        i.wrapping_add(u16::from(x))
    } else {
        i.wrapping_add(u16::from(x) + 1)
    }
}
