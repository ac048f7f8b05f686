use std::time::Duration;

/// Nanoseconds per CPU cycle at the recommended clock speed of 500Hz
pub const CLOCK_SPEED: u64 = 2_000_000;

/// Interval at which the delay and sound timers count down (60Hz)
pub const TIMER_INTERVAL: Duration = Duration::from_nanos(1_000_000_000 / 60);

pub const MEMORY_SIZE: usize = 4096;

/// Highest addressable byte
pub const MAX_ADDRESS: u16 = 0xFFF;

/// ROMs are loaded here and the pc starts here
pub const PROGRAM_START: u16 = 0x200;

/// The most bytes a ROM may occupy; anything past this is truncated
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const STACK_DEPTH: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// The register that doubles as the carry/borrow/collision flag
pub const FLAG: usize = 0xF;

/// Each glyph in the sprite sheet is 5 rows tall
pub const GLYPH_SIZE: u16 = 5;

/// # Sprite sheet
/// Hex digits 0..F drawn as 4x5 sprites, one byte per row.
/// Lives at 0x000..0x050 for the lifetime of the machine.
///
/// ```text
/// 0: ****   1:   *    2: ****   3: ****
///    *  *      **          *         *
///    *  *       *       ****      ****
///    *  *       *       *            *
///    ****      ***      ****      ****
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
