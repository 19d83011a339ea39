//! Turns Chip-8 frame buffers into something a person can look at.
//!
//! The text and RGB conversions are always available; the SDL2 window needs the `sdl` feature.
use chip8_core::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8_core::FrameBuffer;

#[cfg(feature = "sdl")]
pub use display::Display;

#[cfg(feature = "sdl")]
mod display;

/// Bytes in an RGB24 rendering of a frame
pub const RGB24_LEN: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT * 3;

/// Formats a Chip-8 FrameBuffer as RGB24 pixels.
///
/// An RGB24 texture is a 1D array of bytes that represent concatenated rows of RGB pixels.
///
/// This creates a black and white rendering by:
/// - Flattening the 2D frame buffer into a 1D array by concatenating its rows
/// - Triplicating each element of that 1D array to represent the RGB values of each pixel
/// - Multiplying each value by 255 to convert from a binary state to 0-255 intensity
///
/// # Arguments
/// * `frame` a Chip-8 FrameBuffer
pub fn frame_to_rgb24(frame: &FrameBuffer) -> Vec<u8> {
    frame
        .iter()
        .flat_map(|row| row.iter())
        .flat_map(|pixel| std::iter::repeat(pixel).take(3))
        .map(|pixel| pixel * 255)
        .collect()
}

/// Renders a frame as text, one line per row, `#` for lit pixels and `.` for unlit ones
pub fn frame_to_text(frame: &FrameBuffer) -> String {
    let mut text = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT);
    for row in frame.iter() {
        text.extend(row.iter().map(|pixel| if *pixel == 0 { '.' } else { '#' }));
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_rgb24() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][0..2].copy_from_slice(&[0, 1]);
        frame[1][0..2].copy_from_slice(&[1, 0]);
        let rgb = frame_to_rgb24(&frame);

        let mut expected: Vec<u8> = vec![0; RGB24_LEN];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(rgb, expected);
    }

    #[test]
    fn test_frame_to_text() {
        let mut frame: FrameBuffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        frame[0][1] = 1;
        let text = frame_to_text(&frame);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), DISPLAY_HEIGHT);
        assert!(lines[0].starts_with(".#.."));
        assert_eq!(lines[1], ".".repeat(DISPLAY_WIDTH));
    }
}
