/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Where programs are loaded into memory and where the pc starts
pub const PROGRAM_START: u16 = 0x200;

/// Where the sprite sheet is loaded into memory
pub const FONT_START: usize = 0x000;

/// Height of a single glyph in the sprite sheet
pub const GLYPH_HEIGHT: u16 = 5;

/// Highest value the 12-bit index register and addresses can hold
pub const ADDRESS_MASK: u16 = 0x0FFF;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;
pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Width of every sprite in pixels; each row is one byte
pub const SPRITE_WIDTH: usize = 8;

/// Nanoseconds per CPU cycle when running at 700Hz
pub const CLOCK_SPEED: u64 = 1_000_000_000 / 700;

/// Nanoseconds per timer tick at 60Hz
pub const TIMER_SPEED: u64 = 1_000_000_000 / 60;

/// # Sprite Sheet
/// Glyphs for the hexadecimal digits 0..F, five bytes each.
/// Each byte is a row of the glyph; only the high nibble is drawn.
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
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
