use crate::constants::{ADDRESS_MASK, PROGRAM_START, REGISTER_COUNT, STACK_DEPTH};
use crate::error::Chip8Error;

/// # Register File
///
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) doubles as the carry, borrow and collision flag
/// - (i) a 12-bit memory address register
///
/// Counter
/// - (pc) the address of the next opcode; starts at 0x200 and steps by 2
///
/// Stack
/// - 16 return addresses, pushed by CALL and popped by RET
/// - (sp) the number of addresses currently on the stack
///
/// Widths are enforced here: V registers are bytes and every write to `i` is masked to 12 bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    v: [u8; REGISTER_COUNT],
    i: u16,
    pc: u16,
    stack: [u16; STACK_DEPTH],
    sp: u8,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            stack: [0; STACK_DEPTH],
            sp: 0,
        }
    }

    pub fn v(&self, x: usize) -> u8 {
        self.v[x]
    }

    pub fn set_v(&mut self, x: usize, value: u8) {
        self.v[x] = value;
    }

    /// All of V0..=VF
    pub fn all_v(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    /// VF = 1 if set, otherwise 0
    pub fn set_flag(&mut self, set: bool) {
        self.v[0xF] = u8::from(set);
    }

    pub fn i(&self) -> u16 {
        self.i
    }

    pub fn set_i(&mut self, value: u16) {
        self.i = value & ADDRESS_MASK;
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// The pc is deliberately left unmasked so that running off the end of memory is detectable
    pub fn set_pc(&mut self, addr: u16) {
        self.pc = addr;
    }

    /// Steps the pc forwards by one opcode
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }

    /// Steps the pc back by one opcode so that it is executed again
    pub fn rewind_pc(&mut self) {
        self.pc = self.pc.wrapping_sub(2);
    }

    /// STACK.push(addr)
    pub fn push(&mut self, addr: u16) -> Result<(), Chip8Error> {
        if self.sp as usize == STACK_DEPTH {
            return Err(Chip8Error::StackOverflow);
        }
        self.stack[self.sp as usize] = addr;
        self.sp += 1;
        Ok(())
    }

    /// STACK.pop()
    pub fn pop(&mut self) -> Result<u16, Chip8Error> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp as usize])
    }

    /// Return addresses currently on the stack, oldest first
    pub fn stack(&self) -> &[u16] {
        &self.stack[..self.sp as usize]
    }

    pub fn depth(&self) -> usize {
        self.sp as usize
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
