use crate::constants::KEY_COUNT;
use crate::error::Chip8Error;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad.
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
/// Keys are only ever changed by the host; programs can only look.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index of the key that was pressed, 0x0..=0xF
    pub fn key_down(&mut self, key: u8) -> Result<(), Chip8Error> {
        *self.slot(key)? = true;
        Ok(())
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index of the key that was released, 0x0..=0xF
    pub fn key_up(&mut self, key: u8) -> Result<(), Chip8Error> {
        *self.slot(key)? = false;
        Ok(())
    }

    /// Only the low nibble of `key` is used, as the skip instructions do
    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed[(key & 0xF) as usize]
    }

    /// The lowest-indexed key that is currently down
    pub fn first_pressed(&self) -> Option<u8> {
        self.pressed
            .iter()
            .position(|&pressed| pressed)
            .map(|key| key as u8)
    }

    pub fn release_all(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }

    pub fn pressed(&self) -> &[bool; KEY_COUNT] {
        &self.pressed
    }

    fn slot(&mut self, key: u8) -> Result<&mut bool, Chip8Error> {
        self.pressed
            .get_mut(key as usize)
            .ok_or(Chip8Error::InvalidKey(key))
    }
}
