/// # Timers
/// Two independent 8-bit countdown timers.
/// - the delay timer is read and written by programs to pace themselves
/// - the sound timer makes a tone for as long as it's above 0
///
/// Both count down toward 0 by one per tick and stop there.
/// How often a tick happens is up to the interpreter; see `TimerCadence`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    delay: u8,
    sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delay(&self) -> u8 {
        self.delay
    }

    pub fn set_delay(&mut self, value: u8) {
        self.delay = value;
    }

    pub fn sound(&self) -> u8 {
        self.sound
    }

    pub fn set_sound(&mut self, value: u8) {
        self.sound = value;
    }

    pub fn is_sounding(&self) -> bool {
        self.sound > 0
    }

    /// Decrements both timers, clamped at 0
    pub fn tick(&mut self) {
        self.delay = self.delay.saturating_sub(1);
        self.sound = self.sound.saturating_sub(1);
    }
}
