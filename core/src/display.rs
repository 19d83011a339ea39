use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH, SPRITE_WIDTH};
use crate::quirks::CollisionPolicy;

/// The FrameBuffer is indexed as [y][x]; every cell is 0 or 1
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display Buffer
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Pixels only change by being cleared or by having a sprite XORed onto them.
/// Either marks the buffer dirty, meaning the host owes a redraw.
#[derive(Clone)]
pub struct DisplayBuffer {
    frame: FrameBuffer,
    dirty: bool,
}

impl DisplayBuffer {
    pub fn new() -> Self {
        DisplayBuffer {
            frame: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: true,
        }
    }

    pub fn clear(&mut self) {
        self.frame = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// The pixel at column `x`, row `y`
    ///
    /// # Panics
    /// If `x` is not below 64 or `y` is not below 32.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.frame[y][x]
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// draw_sprite(x, y, rows)
    /// XORs an 8-pixel-wide sprite onto the FrameBuffer, one byte per row, most significant bit leftmost.
    ///
    /// The starting position always wraps onto the grid. Pixels that then run off the right or
    /// bottom edge are dropped, unless `wrap` is set in which case they come back on the other side.
    ///
    /// Returns whether a pixel was erased, according to `collision`.
    pub fn draw_sprite(
        &mut self,
        x: u8,
        y: u8,
        rows: &[u8],
        wrap: bool,
        collision: CollisionPolicy,
    ) -> bool {
        let x_start = x as usize % DISPLAY_WIDTH;
        let y_start = y as usize % DISPLAY_HEIGHT;
        let mut collided = false;

        for (row, byte) in rows.iter().enumerate() {
            let mut y_pos = y_start + row;
            if y_pos >= DISPLAY_HEIGHT {
                if !wrap {
                    break;
                }
                y_pos %= DISPLAY_HEIGHT;
            }

            for bit in 0..SPRITE_WIDTH {
                let mut x_pos = x_start + bit;
                if x_pos >= DISPLAY_WIDTH {
                    if !wrap {
                        break;
                    }
                    x_pos %= DISPLAY_WIDTH;
                }

                let pixel = (byte >> (SPRITE_WIDTH - 1 - bit)) & 0x1;
                if pixel == 0 {
                    continue;
                }

                let cell = &mut self.frame[y_pos][x_pos];
                *cell ^= pixel;
                let erased = *cell == 0;
                match collision {
                    CollisionPolicy::Accumulate => collided |= erased,
                    CollisionPolicy::LastPixel => collided = erased,
                }
            }
        }

        self.dirty = true;
        collided
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}
