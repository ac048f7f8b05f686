//! A Chip-8 interpreter core: memory, registers, stack, timers, display and keypad, driven
//! one instruction at a time by a host that owns the window, speaker and clock.

pub use chip8::{Chip8, Status};
pub use constants::CLOCK_SPEED;
pub use display::FrameBuffer;
pub use error::{Error, Result};
pub use instruction::Instruction;
pub use keymap::{hex_keymap, keymap};
pub use keypad::Keypad;
pub use timers::{Silent, Speaker};

mod chip8;
pub mod constants;
pub mod display;
mod error;
mod instruction;
mod keymap;
mod keypad;
pub mod memory;
mod opcode;
mod operations;
pub mod stack;
pub mod state;
pub mod timers;
