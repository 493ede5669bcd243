pub use cpu::{Cpu, Cycle, STACK_DEPTH};
pub use decoder::Decoder;
pub use display::{
    Display, Screen, Variant, BASE_HEIGHT, BASE_WIDTH, EXTENDED_HEIGHT, EXTENDED_WIDTH,
};
pub use error::{Abort, Error, Fault, MemoryError, OffScreen};
pub use instruction::{Family, Instruction, OpcodeInfo};
pub use keypad::{Keypad, KeypadState};
pub use memory::{Memory, FONT_GLYPH_SIZE, FONT_START, MEMORY_SIZE, ROM_START};
pub use quirks::Quirks;
pub use timers::Timers;

mod cpu;
mod decoder;
mod display;
mod error;
mod instruction;
mod keypad;
mod memory;
mod opcode;
mod quirks;
mod timers;
