use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// The FrameBuffer is indexed as [y][x]; each pixel is 0 (off) or 1 (on)
pub type FrameBuffer = [[u8; DISPLAY_WIDTH]; DISPLAY_HEIGHT];

/// # Display
/// The Chip-8 display is composed of 64x32 black/white pixels.
///
/// Pixels only change by XOR-ing sprites onto the frame buffer or by clearing it.
/// Either sets the `dirty` flag, which stays set until whoever presents the frame clears it.
#[derive(Copy, Clone)]
pub struct Display {
    frame_buffer: FrameBuffer,
    dirty: bool,
}

impl Display {
    pub fn new() -> Self {
        Display {
            frame_buffer: [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT],
            dirty: false,
        }
    }

    pub fn clear(&mut self) {
        self.frame_buffer = [[0; DISPLAY_WIDTH]; DISPLAY_HEIGHT];
        self.dirty = true;
    }

    /// XORs an 8-pixel-wide sprite onto the frame buffer with its top left corner at x, y.
    /// Each byte of `sprite` is one row, most significant bit leftmost.
    ///
    /// Pixels that fall off the right or bottom edge wrap around to the opposite edge.
    /// Returns whether any pixel that was on got turned off.
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let mut collision = false;

        for (row, byte) in sprite.iter().enumerate() {
            let py = (y as usize + row) % DISPLAY_HEIGHT;
            for bit in 0..8 {
                if byte & (0x80 >> bit) == 0 {
                    continue;
                }
                let px = (x as usize + bit) % DISPLAY_WIDTH;
                let pixel = &mut self.frame_buffer[py][px];
                collision |= *pixel == 1;
                *pixel ^= 1;
            }
        }

        self.dirty = true;
        collision
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}
