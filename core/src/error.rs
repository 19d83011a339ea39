use std::io;

use thiserror::Error;

/// Faults raised by the interpreter.
///
/// Most of these end the session; see [`Chip8Error::is_fatal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    #[error("unknown opcode {opcode:#06X} at {address:#05X}")]
    UnknownOpcode { opcode: u16, address: u16 },

    #[error("program counter exceeded program memory: {0:#05X}")]
    ProgramCounterOutOfBounds(u16),

    #[error("memory access out of bounds at {0:#06X}")]
    MemoryOutOfBounds(usize),

    #[error("return instruction with empty stack")]
    StackUnderflow,

    #[error("call instruction with full stack")]
    StackOverflow,

    #[error("invalid key {0:#04X}")]
    InvalidKey(u8),

    #[error("ROM too large: {size} bytes (max {max})")]
    RomTooLarge { size: usize, max: usize },

    #[error("interpreter is halted")]
    Halted,
}

impl Chip8Error {
    /// Whether this error halts the interpreter.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Chip8Error::InvalidKey(_) | Chip8Error::RomTooLarge { .. } | Chip8Error::Halted
        )
    }
}

/// Errors from loading a ROM out of some reader
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unable to read ROM: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Rom(#[from] Chip8Error),
}
