//! Error taxonomy for the interpreter.
//!
//! [`Error`] is fatal: the machine state can no longer be trusted and the
//! run must stop. [`Fault`] is recoverable: the program halted for a
//! reason worth reporting, but registers, memory, and display remain
//! intact and can be inspected or reset. [`Abort`] is the union the
//! instruction layer returns, since a single instruction can end the run
//! either way.

use std::io;

use thiserror::Error as ThisError;

/// An out-of-bounds memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[error("memory address {address:#05X} outside of 0..{size:#05X}")]
pub struct MemoryError {
    pub address: u16,
    pub size: usize,
}

/// A pixel coordinate outside the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[error("pixel ({x}, {y}) outside of {width}x{height} screen")]
pub struct OffScreen {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Fatal conditions. Once one of these is raised the machine must not be
/// stepped again without a reset.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("instruction fetch failed: {0}")]
    Fetch(#[from] MemoryError),
    #[error("call stack overflow at depth {depth}")]
    StackOverflow { depth: usize },
    #[error("return with an empty call stack")]
    StackUnderflow,
    #[error("opcode mask {mask:#06X} does not constrain the primary nibble")]
    IndistinctMask { mask: u16 },
    #[error("rom of {size} bytes exceeds the {max} bytes of program memory")]
    RomTooLarge { size: usize, max: usize },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Recoverable halt reasons. The machine state stays valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum Fault {
    #[error("endless jump to {addr:#05X}")]
    EndlessJump { addr: u16 },
    #[error("illegal opcode {opcode:#06X} at {addr:#05X}")]
    IllegalOpcode { opcode: u16, addr: u16 },
    #[error("program requested exit")]
    Exit,
    #[error(transparent)]
    Memory(#[from] MemoryError),
    #[error(transparent)]
    OffScreen(#[from] OffScreen),
}

/// How a single instruction can end the run.
#[derive(Debug, ThisError)]
pub enum Abort {
    #[error(transparent)]
    Fatal(Error),
    #[error(transparent)]
    Halt(Fault),
}

impl From<Error> for Abort {
    fn from(error: Error) -> Self {
        Abort::Fatal(error)
    }
}

impl From<Fault> for Abort {
    fn from(fault: Fault) -> Self {
        Abort::Halt(fault)
    }
}

// memory and screen range errors raised inside an instruction leave the
// machine intact, so they halt rather than kill
impl From<MemoryError> for Abort {
    fn from(error: MemoryError) -> Self {
        Abort::Halt(Fault::Memory(error))
    }
}

impl From<OffScreen> for Abort {
    fn from(error: OffScreen) -> Self {
        Abort::Halt(Fault::OffScreen(error))
    }
}
