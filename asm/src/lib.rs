//! A two-pass assembler for Chip-8 programs.
//!
//! Source is one statement per line, with optional `label:` prefixes and `;` or `#` comments.
//! Mnemonics follow the usual Chip-8 syntax, so anything `chip8_core::Instruction` displays
//! will assemble back to the same opcode.
pub use assembler::{assemble_file, assemble_text};
pub use encoding::parse_number;
pub use error::AssemblerError;

mod assembler;
mod encoding;
mod error;
