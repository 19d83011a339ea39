use crate::quirks::Quirks;

/// How often the delay and sound timers count down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimerCadence {
    /// Once per executed instruction; timer speed follows CPU speed
    #[default]
    PerCycle,
    /// Once every `n` executed instructions, e.g. `Divided(12)` for a 60Hz tick at 720Hz
    Divided(u32),
    /// Only when the host calls `Chip8::tick_timers`, e.g. from its own 60Hz clock
    Manual,
}

/// # Config
/// Everything about the interpreter's behaviour that the host gets to choose.
///
/// - `quirks` compatibility switches for ambiguous instructions
/// - `timers` when the timers count down
/// - `trace` log every cycle at trace level
/// - `seed` seed for the random number instruction; entropy when absent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub quirks: Quirks,
    pub timers: TimerCadence,
    pub trace: bool,
    pub seed: Option<u64>,
}
