//! Field accessors for raw 16-bit opcodes.
//!
//! A CHIP-8 opcode packs its operands into fixed nibble positions:
//! the high nibble selects the family, `x`/`y` select registers, and the
//! low byte/nibble/12 bits carry immediates, counts, and addresses.

/// Operand extraction on a raw opcode word.
pub trait Opcode {
    /// All four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// Register index in `[_x__]`.
    fn x(&self) -> u8;

    /// Register index in `[__y_]`.
    fn y(&self) -> u8;

    /// Nibble count in `[___n]`.
    fn n(&self) -> u8;

    /// Immediate byte in `[__kk]`.
    fn kk(&self) -> u8;

    /// Address in `[_nnn]`.
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}
