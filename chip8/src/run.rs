use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8_core::{Chip8, Status, TimerCadence, TIMER_SPEED};
use chip8_display::Display;

use crate::keymap::keymap;

/// Runs `chip8` in a window until it exits, the window closes or `max_cycles` is reached
///
/// Space runs flat out while held and Escape quits.
pub fn run(chip8: &mut Chip8, hz: u32, scale: u32, max_cycles: Option<u64>) -> Result<()> {
    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, "chip8", scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let cycle_time = Duration::from_nanos(1_000_000_000 / u64::from(hz));
    let timer_time = Duration::from_nanos(TIMER_SPEED);
    let manual_timers = chip8.config().timers == TimerCadence::Manual;
    let mut last_cycle = Instant::now();
    let mut last_tick = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;
    let mut cycles: u64 = 0;

    'event: loop {
        // If the frame changed, render it
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame).map_err(|e| anyhow!(e))?;
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(k)) => chip8.key_down(k)?,
                    (Keycode::Space, _) => fast_forward = true,
                    (Keycode::Escape, _) => break 'event,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(k)) => chip8.key_up(k)?,
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if chip8.cycle()? == Status::Exited {
            break 'event;
        }
        cycles += 1;
        if max_cycles.map_or(false, |max| cycles >= max) {
            info!("reached {} cycles", cycles);
            break 'event;
        }

        if manual_timers && last_tick.elapsed() >= timer_time {
            chip8.tick_timers();
            last_tick += timer_time;
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    Ok(())
}
