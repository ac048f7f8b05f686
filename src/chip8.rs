use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::MAX_ROM_SIZE;
use crate::display::FrameBuffer;
use crate::error::{Error, Result};
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::state::State;
use crate::timers::{Silent, Speaker};

/// What the interpreter will do on its next step
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Nothing has been loaded, or the last load failed; stepping does nothing
    Idle,
    /// Fetching and executing instructions
    Running,
    /// Blocked on FX0A until some key is pressed; the key will be written to this register
    AwaitingKey(u8),
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the `keypad`, which may be shared with the thread that receives input
///  - the random number generator behind CXNN
///  - the `speaker` the sound timer beeps through
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - stepping the CPU and ticking its timers, separately or together as a `cycle`
/// - inspecting its frame buffer for rendering by some display
///
/// The host calls `cycle` repeatedly (well above 60Hz, see `CLOCK_SPEED`) passing the time
/// elapsed since its previous call. Errors are reported but never leave the machine in a
/// half-executed state; the host decides whether to `skip`, `reset` or stop.
pub struct Chip8 {
    state: State,
    loaded: bool,
    keypad: Keypad,
    seed: Option<u64>,
    rng: StdRng,
    speaker: Box<dyn Speaker>,
}

impl Chip8 {
    pub fn new() -> Self {
        Chip8::build(None)
    }

    /// A machine whose random numbers are derived from `seed`, including after a reset
    pub fn with_seed(seed: u64) -> Self {
        Chip8::build(Some(seed))
    }

    fn build(seed: Option<u64>) -> Self {
        Chip8 {
            state: State::new(),
            loaded: false,
            keypad: Keypad::new(),
            seed,
            rng: Chip8::seed_rng(seed),
            speaker: Box::new(Silent),
        }
    }

    fn seed_rng(seed: Option<u64>) -> StdRng {
        match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Route the sound timer's tone to `speaker`
    pub fn set_speaker(&mut self, speaker: Box<dyn Speaker>) {
        self.speaker = speaker;
    }

    /// Zero every register, timer, key, pixel and byte of memory, reinstall the sprite sheet
    /// and reseed the random number generator. The machine is left running from 0x200.
    pub fn reset(&mut self) {
        debug!("resetting");
        self.state = State::new();
        self.keypad.clear();
        self.rng = Chip8::seed_rng(self.seed);
        self.loaded = true;
    }

    /// Reset, then copy a ROM image into memory at 0x200.
    /// Anything past `MAX_ROM_SIZE` bytes is dropped. Returns the number of bytes loaded.
    pub fn load_image(&mut self, image: &[u8]) -> usize {
        self.reset();
        let len = self.state.memory.load(image);
        if len < image.len() {
            warn!(
                "ROM is {} bytes; truncated to {}",
                image.len(),
                MAX_ROM_SIZE
            );
        }
        debug!("loaded {} byte ROM", len);
        len
    }

    /// Reset, then load a ROM from `reader`.
    ///
    /// # Arguments
    /// * `reader` a source that contains a ROM
    ///
    /// If reading fails the machine is left reset and `Idle`.
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize> {
        // Read one byte more than fits so truncation can be reported
        let mut image = Vec::with_capacity(MAX_ROM_SIZE + 1);
        let read = reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut image);
        match read {
            Ok(_) => Ok(self.load_image(&image)),
            Err(e) => {
                self.reset();
                self.loaded = false;
                warn!("unable to read ROM: {}", e);
                Err(Error::Load(e))
            }
        }
    }

    /// Reset, then load the ROM at `path`
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        match File::open(path.as_ref()) {
            Ok(mut file) => self.load_rom(&mut file),
            Err(e) => {
                self.reset();
                self.loaded = false;
                warn!("unable to open ROM {}: {}", path.as_ref().display(), e);
                Err(Error::Load(e))
            }
        }
    }

    pub fn status(&self) -> Status {
        match (self.loaded, self.state.awaiting_key) {
            (false, _) => Status::Idle,
            (true, Some(register)) => Status::AwaitingKey(register),
            (true, None) => Status::Running,
        }
    }

    /// A handle on the keypad that may be moved to another thread
    pub fn keypad(&self) -> Keypad {
        self.keypad.clone()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex keypad key (0x0..=0xF) that was pressed; others are ignored
    pub fn key_press(&self, key: u8) {
        self.keypad.press(key);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the hex keypad key (0x0..=0xF) that was released; others are ignored
    pub fn key_release(&self, key: u8) {
        self.keypad.release(key);
    }

    /// Executes a single instruction, or polls the keypad if awaiting a key.
    ///
    /// On error the state is left exactly as it was before the step.
    pub fn step(&mut self) -> Result<()> {
        match self.status() {
            Status::Idle => Ok(()),
            Status::AwaitingKey(register) => {
                self.poll_key(register);
                Ok(())
            }
            Status::Running => self.execute().map_err(|e| {
                warn!("{}", e);
                e
            }),
        }
    }

    /// Counts down the timers if at least 1/60s has built up across calls.
    /// Returns whether they counted down.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        self.state.timers.tick(elapsed, self.speaker.as_mut())
    }

    /// One full cycle: `step` then `tick`. The timers tick even if the step failed.
    pub fn cycle(&mut self, elapsed: Duration) -> Result<()> {
        let stepped = self.step();
        self.tick(elapsed);
        stepped
    }

    /// Moves the pc past the current instruction without executing it.
    /// Does nothing while `Idle`.
    pub fn skip(&mut self) {
        if self.status() == Status::Idle {
            return;
        }
        debug!("skipping instruction at {:#05X}", self.state.pc);
        self.state.pc = self.state.pc.wrapping_add(0x2);
        self.state.awaiting_key = None;
    }

    /// Returns the FrameBuffer if the display should be redrawn
    pub fn get_frame(&self) -> Option<FrameBuffer> {
        if self.state.display.is_dirty() {
            Some(*self.state.display.frame())
        } else {
            None
        }
    }

    /// Returns the FrameBuffer if the display should be redrawn, marking it as presented
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        let frame = self.get_frame();
        self.state.display.clear_dirty();
        frame
    }

    /// The current frame whether or not it changed
    pub fn frame(&self) -> &FrameBuffer {
        self.state.display.frame()
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    fn execute(&mut self) -> Result<()> {
        let pc = self.state.pc;
        let op = self.state.memory.read_word(pc)?;
        trace!(
            "{:04X} v{:02X?} i{:04X} pc{:04X}",
            op,
            self.state.v,
            self.state.i,
            pc
        );
        let instruction = Instruction::decode(op).ok_or(Error::UnknownOpcode { opcode: op, pc })?;
        let keys = self.keypad.snapshot();
        self.state = instruction.execute(&self.state, &keys, &mut self.rng)?;
        Ok(())
    }

    /// Re-run the pending FX0A against the current keys
    fn poll_key(&mut self, register: u8) {
        let keys = self.keypad.snapshot();
        if let Some(key) = keys.iter().rposition(|&pressed| pressed) {
            debug!("key {:X} pressed for v{:X}", key, register);
            self.state.v[register as usize] = key as u8;
            self.state.awaiting_key = None;
            self.state.pc += 0x2;
        }
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
