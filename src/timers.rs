use std::time::Duration;

use crate::constants::TIMER_INTERVAL;

/// # Speaker
/// Receives the tone signal raised by the sound timer.
///
/// `tone` is called once per timer tick for as long as the sound timer is non-zero,
/// not only when it reaches zero.
pub trait Speaker {
    fn tone(&mut self);
}

/// A speaker that ignores every tone
pub struct Silent;

impl Speaker for Silent {
    fn tone(&mut self) {}
}

/// # Timers
/// The delay and sound timers count down to 0 at 60Hz regardless of how fast
/// instructions are executed.
///
/// Elapsed time is accumulated across calls to `tick`; once at least one interval has
/// built up a single countdown step fires and the accumulator starts over. Any time
/// beyond that one interval is dropped rather than carried forward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    elapsed: Duration,
}

impl Timers {
    pub fn new() -> Self {
        Timers {
            delay: 0,
            sound: 0,
            elapsed: Duration::from_secs(0),
        }
    }

    /// Accounts for `elapsed` time since the previous tick.
    /// Returns whether a countdown step fired.
    pub fn tick(&mut self, elapsed: Duration, speaker: &mut dyn Speaker) -> bool {
        self.elapsed += elapsed;
        if self.elapsed < TIMER_INTERVAL {
            return false;
        }
        self.elapsed = Duration::from_secs(0);

        if self.delay > 0 {
            self.delay -= 1;
        }

        if self.sound > 0 {
            speaker.tone();
            self.sound -= 1;
        }

        true
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
