use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use chip8_core::{Config, Quirks, TimerCadence};

/// Run a Chip-8 ROM
#[derive(Debug, Parser)]
#[command(name = "chip8", version)]
pub struct Args {
    /// ROM to load at 0x200
    pub rom: PathBuf,

    /// Quirks profile: default, original or modern
    #[arg(long, env = "CHIP8_QUIRKS", default_value = "default")]
    pub quirks: Quirks,

    /// Instructions executed per second
    #[arg(long, default_value_t = 700, value_parser = clap::value_parser!(u32).range(1..))]
    pub hz: u32,

    /// When the delay and sound timers count down
    #[arg(long, value_enum, default_value_t = TimerMode::PerCycle)]
    pub timers: TimerMode,

    /// Size of each Chip-8 pixel on screen
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub scale: u32,

    /// Stop after this many cycles
    #[arg(long)]
    pub max_cycles: Option<u64>,

    /// Run without a window and print the final frame
    #[arg(long)]
    pub headless: bool,

    /// Seed for the random number instruction
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log every cycle
    #[arg(long)]
    pub trace: bool,

    /// Write the 4096 byte memory image here when the run ends
    #[arg(long, value_name = "PATH")]
    pub dump: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TimerMode {
    /// Once per instruction
    PerCycle,
    /// Once every hz/60 instructions
    Divided,
    /// At 60Hz of real (or, headless, simulated) time
    WallClock,
}

/// Instructions per 60Hz timer tick at `hz`
pub fn cycles_per_tick(hz: u32) -> u32 {
    (hz / 60).max(1)
}

impl Args {
    pub fn config(&self) -> Config {
        let timers = match self.timers {
            TimerMode::PerCycle => TimerCadence::PerCycle,
            TimerMode::Divided => TimerCadence::Divided(cycles_per_tick(self.hz)),
            TimerMode::WallClock => TimerCadence::Manual,
        };
        Config {
            quirks: self.quirks,
            timers,
            trace: self.trace,
            seed: self.seed,
        }
    }
}
