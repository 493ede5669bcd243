use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, MemoryError};

/// Total addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// Where ROMs are loaded and where the program counter starts.
pub const ROM_START: u16 = 0x200;

/// Where the built-in font glyphs live.
pub const FONT_START: u16 = 0x050;

/// Bytes per font glyph.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// The built-in hex font: 16 glyphs of 5 rows each, 4 effective pixels
/// wide, left-aligned in the 8-bit row.
const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Flat 4K byte array with the font baked in below the ROM origin.
///
/// Every access is bounds-checked and returns a typed [`MemoryError`]
/// rather than panicking; the caller decides whether that is fatal.
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.load_font();
        memory
    }

    fn load_font(&mut self) {
        let start = FONT_START as usize;
        self.bytes[start..start + FONT.len()].copy_from_slice(&FONT);
    }

    /// Zero everything, then restore the font.
    pub fn reset(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
        self.load_font();
    }

    pub fn get_byte(&self, address: u16) -> Result<u8, MemoryError> {
        self.bytes
            .get(address as usize)
            .copied()
            .ok_or(MemoryError {
                address,
                size: MEMORY_SIZE,
            })
    }

    pub fn set_byte(&mut self, address: u16, value: u8) -> Result<(), MemoryError> {
        match self.bytes.get_mut(address as usize) {
            Some(byte) => {
                *byte = value;
                Ok(())
            }
            None => Err(MemoryError {
                address,
                size: MEMORY_SIZE,
            }),
        }
    }

    /// Big-endian 16-bit read of two consecutive bytes.
    pub fn get_word(&self, address: u16) -> Result<u16, MemoryError> {
        let high = self.get_byte(address)?;
        let low = self.get_byte(address.wrapping_add(1))?;
        Ok(u16::from(high) << 8 | u16::from(low))
    }

    /// Copy a raw ROM byte stream to the ROM origin.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<(), Error> {
        let mut rom = Vec::new();
        reader.read_to_end(&mut rom)?;

        let max = MEMORY_SIZE - ROM_START as usize;
        if rom.len() > max {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max,
            });
        }

        let start = ROM_START as usize;
        self.bytes[start..start + rom.len()].copy_from_slice(&rom);
        Ok(())
    }

    /// Open a ROM file and load its contents verbatim at the ROM origin.
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<(), Error> {
        let mut file = File::open(path)?;
        self.load_rom(&mut file)
    }

    /// Base address of the built-in font, used by `LD F,Vx`.
    pub fn font_start(&self) -> u16 {
        FONT_START
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
