use crate::constants::PROGRAM_START;
use crate::display::Display;
use crate::memory::Memory;
use crate::stack::Stack;
use crate::timers::Timers;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is also the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, starting where ROMs are loaded
///
/// Timers
/// - 2 8-bit timers (delay & sound) counting down at 60Hz
///
/// ## Memory
/// - a 16 deep stack of return addresses
/// - 4096 bytes of addressable memory
/// - 64x32 display
///
/// ## Input
/// - (awaiting_key) the register FX0A is blocked on, if any
///
/// Operations never mutate a State in place; they return a new one. A failed
/// operation therefore leaves the previous State untouched.
#[derive(Copy, Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub stack: Stack,
    pub memory: Memory,
    pub display: Display,
    pub timers: Timers,
    pub awaiting_key: Option<u8>,
}

impl State {
    pub fn new() -> Self {
        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            stack: Stack::new(),
            memory: Memory::new(),
            display: Display::new(),
            timers: Timers::new(),
            awaiting_key: None,
        }
    }

    /// The state after a non-branching instruction
    pub fn next(&self) -> Self {
        State {
            pc: self.pc + 0x2,
            ..*self
        }
    }

    /// The state after a conditional skip; skips the following instruction if `condition`
    pub fn skip_if(&self, condition: bool) -> Self {
        State {
            pc: if condition { self.pc + 0x4 } else { self.pc + 0x2 },
            ..*self
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
