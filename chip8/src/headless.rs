use log::info;

use chip8_core::{Chip8, Chip8Error, Status, TimerCadence};

use crate::cli::cycles_per_tick;

/// How a headless run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Cycles executed, including the one that exited
    pub cycles: u64,
    /// Whether the program ran 00FD
    pub exited: bool,
}

/// Runs `chip8` for at most `max_cycles` cycles with no display or input.
///
/// With `TimerCadence::Manual` the timers tick every `hz / 60` cycles, standing in for a 60Hz clock.
/// Stops early when the program exits; fatal errors are returned.
pub fn run_headless(chip8: &mut Chip8, max_cycles: u64, hz: u32) -> Result<Outcome, Chip8Error> {
    let manual_timers = chip8.config().timers == TimerCadence::Manual;
    let per_tick = u64::from(cycles_per_tick(hz));

    let mut cycles = 0;
    while cycles < max_cycles {
        let status = chip8.cycle()?;
        cycles += 1;
        if status == Status::Exited {
            info!("exited after {} cycles", cycles);
            return Ok(Outcome {
                cycles,
                exited: true,
            });
        }
        if manual_timers && cycles % per_tick == 0 {
            chip8.tick_timers();
        }
    }

    info!("stopped after {} cycles", cycles);
    Ok(Outcome {
        cycles,
        exited: false,
    })
}
