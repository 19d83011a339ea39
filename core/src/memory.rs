use std::io;

use log::info;

use crate::constants::{FONT_START, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Chip8Error;

/// # Memory
/// 4096 bytes of flat, byte-addressable memory.
///
/// ```text
/// 0x000-0x04F  sprite sheet
/// 0x050-0x1FF  unused (historically the interpreter itself)
/// 0x200-0xFFF  program and working data
/// ```
///
/// Nothing stops a program from writing over the sprite sheet; that's the program's problem.
/// Any access outside 0x000..=0xFFF is a `MemoryOutOfBounds` fault.
#[derive(Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet loaded
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: [0; MEMORY_SIZE],
        };
        memory.load_font();
        memory
    }

    /// Zeroes everything, including the sprite sheet
    pub fn clear(&mut self) {
        self.bytes = [0; MEMORY_SIZE];
    }

    pub fn load_font(&mut self) {
        info!("load font");
        self.bytes[FONT_START..FONT_START + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Copies a program verbatim into memory starting at 0x200.
    /// Memory past the end of the program is left untouched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        let start = PROGRAM_START as usize;
        let max = MEMORY_SIZE - start;
        if program.len() > max {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max,
            });
        }

        self.bytes[start..start + program.len()].copy_from_slice(program);
        info!(
            "loaded rom into mem starting at {:#05x} - to {:#05x}",
            start,
            start + program.len()
        );
        Ok(())
    }

    pub fn read(&self, addr: usize) -> Result<u8, Chip8Error> {
        self.bytes
            .get(addr)
            .copied()
            .ok_or(Chip8Error::MemoryOutOfBounds(addr))
    }

    pub fn write(&mut self, addr: usize, value: u8) -> Result<(), Chip8Error> {
        let byte = self
            .bytes
            .get_mut(addr)
            .ok_or(Chip8Error::MemoryOutOfBounds(addr))?;
        *byte = value;
        Ok(())
    }

    /// Reads `len` bytes starting at `addr`
    pub fn slice(&self, addr: usize, len: usize) -> Result<&[u8], Chip8Error> {
        self.bytes
            .get(addr..addr + len)
            .ok_or(Chip8Error::MemoryOutOfBounds(MEMORY_SIZE.max(addr)))
    }

    /// Mutable view of `len` bytes starting at `addr`
    pub fn slice_mut(&mut self, addr: usize, len: usize) -> Result<&mut [u8], Chip8Error> {
        self.bytes
            .get_mut(addr..addr + len)
            .ok_or(Chip8Error::MemoryOutOfBounds(MEMORY_SIZE.max(addr)))
    }

    /// Gets the big-endian 16-bit word at `addr`.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn word(&self, addr: usize) -> Result<u16, Chip8Error> {
        let left = u16::from(self.read(addr)?);
        let right = u16::from(self.read(addr + 1)?);
        Ok(left << 8 | right)
    }

    pub fn as_bytes(&self) -> &[u8; MEMORY_SIZE] {
        &self.bytes
    }

    /// Writes the full 4096 byte image verbatim
    pub fn dump(&self, writer: &mut dyn io::Write) -> io::Result<()> {
        writer.write_all(&self.bytes)?;
        writer.flush()
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
