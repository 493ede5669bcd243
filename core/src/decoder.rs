//! Direct-lookup instruction decoder.
//!
//! Registration expands each family's opcode/mask pair into every raw
//! word it matches and writes the family tag into a 65536-entry table.
//! Decoding is then a single index plus operand binding; words no family
//! claimed come back as [`Instruction::Illegal`].

use crate::error::Error;
use crate::instruction::{Family, Instruction, OpcodeInfo};

pub struct Decoder {
    table: Vec<Family>,
}

impl Decoder {
    /// A decoder with the full instruction set registered.
    pub fn new() -> Result<Self, Error> {
        let mut decoder = Decoder {
            table: vec![Family::Illegal; 0x10000],
        };
        for family in Family::ALL {
            decoder.register(family)?;
        }
        Ok(decoder)
    }

    /// Claim every table slot matching the family's opcode pattern.
    ///
    /// The mask must constrain the primary nibble; a mask that leaves it
    /// free would claim words from every other family's range.
    fn register(&mut self, family: Family) -> Result<(), Error> {
        let OpcodeInfo { opcode, mask } = family.info();
        if mask & 0xF000 == 0 {
            return Err(Error::IndistinctMask { mask });
        }
        let pattern = opcode & mask;
        for raw in 0..=0xFFFFu16 {
            if raw & mask == pattern {
                self.table[raw as usize] = family;
            }
        }
        Ok(())
    }

    pub fn decode(&self, raw: u16) -> Instruction {
        Instruction::decode(self.table[raw as usize], raw)
    }
}
