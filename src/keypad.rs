use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::warn;

pub const KEY_COUNT: usize = 16;

/// # Keypad
/// The pressed state of the 16 hex keys 0x0..=0xF.
///
/// Clones share the same keys, so a host may hand one to whichever thread receives input
/// events while the interpreter reads from another.
#[derive(Clone, Default)]
pub struct Keypad {
    keys: Arc<[AtomicBool; KEY_COUNT]>,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as pressed; keys outside 0x0..=0xF are ignored
    pub fn press(&self, key: u8) {
        self.set(key, true);
    }

    /// Marks `key` as released; keys outside 0x0..=0xF are ignored
    pub fn release(&self, key: u8) {
        self.set(key, false);
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.keys
            .get(key as usize)
            .map_or(false, |k| k.load(Ordering::Acquire))
    }

    /// The state of every key at this instant
    pub fn snapshot(&self) -> [bool; KEY_COUNT] {
        let mut pressed = [false; KEY_COUNT];
        for (p, key) in pressed.iter_mut().zip(self.keys.iter()) {
            *p = key.load(Ordering::Acquire);
        }
        pressed
    }

    /// Releases every key
    pub fn clear(&self) {
        for key in self.keys.iter() {
            key.store(false, Ordering::Release);
        }
    }

    fn set(&self, key: u8, pressed: bool) {
        match self.keys.get(key as usize) {
            Some(k) => k.store(pressed, Ordering::Release),
            None => warn!("ignoring out of range key {:#04X}", key),
        }
    }
}
