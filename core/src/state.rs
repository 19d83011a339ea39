use crate::display::DisplayBuffer;
use crate::error::Chip8Error;
use crate::keypad::Keypad;
use crate::memory::Memory;
use crate::registers::Registers;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// - `registers` V0..VF, I, the program counter and the call stack
/// - `timers` the delay and sound timers
///
/// ## Memory
/// - 4096 bytes of addressable memory, with the sprite sheet at 0x000 and programs at 0x200
/// - a 64x32 frame buffer holding the contents of the next frame to be drawn
///
/// ## Input
/// - the pressed status of keys 0..F
#[derive(Clone, Default)]
pub struct State {
    pub memory: Memory,
    pub registers: Registers,
    pub timers: Timers,
    pub keypad: Keypad,
    pub display: DisplayBuffer,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts everything back the way it was at power on and loads `program` at 0x200
    pub fn reset(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        self.display.clear();
        self.registers = Registers::new();
        self.timers = Timers::new();
        self.keypad.release_all();
        self.memory.clear();
        self.memory.load_font();
        self.memory.load_program(program)
    }
}
