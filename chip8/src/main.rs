use std::fs::File;
use std::io::BufWriter;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use chip8::cli::Args;
use chip8::run_headless;
use chip8_core::Chip8;
use chip8_display::frame_to_text;

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.trace { "trace" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut chip8 = chip8::load(&args.rom, args.config())?;
    info!("loaded {}", args.rom.display());

    let result = run(&mut chip8, &args);

    // dump whatever the run left behind, even if it faulted
    if let Some(path) = &args.dump {
        let file =
            File::create(path).with_context(|| format!("unable to create {}", path.display()))?;
        chip8
            .dump_memory(&mut BufWriter::new(file))
            .with_context(|| format!("unable to write {}", path.display()))?;
        info!("dumped memory to {}", path.display());
    }

    result
}

/// Runs without a window, then prints the final frame
fn run_in_terminal(chip8: &mut Chip8, args: &Args) -> Result<()> {
    let outcome = run_headless(chip8, args.max_cycles.unwrap_or(u64::MAX), args.hz)?;
    print!("{}", frame_to_text(chip8.frame_buffer()));
    println!("{} cycles, exited: {}", outcome.cycles, outcome.exited);
    Ok(())
}

#[cfg(feature = "gui")]
fn run(chip8: &mut Chip8, args: &Args) -> Result<()> {
    if args.headless {
        return run_in_terminal(chip8, args);
    }
    chip8::run::run(chip8, args.hz, args.scale, args.max_cycles)
}

#[cfg(not(feature = "gui"))]
fn run(chip8: &mut Chip8, args: &Args) -> Result<()> {
    if !args.headless {
        log::warn!("built without the gui feature; running headless");
    }
    run_in_terminal(chip8, args)
}
