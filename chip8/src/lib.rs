use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};

use chip8_core::{Chip8, Config};

pub use headless::{run_headless, Outcome};

pub mod cli;
mod headless;
#[cfg(feature = "gui")]
mod keymap;
#[cfg(feature = "gui")]
pub mod run;

/// Builds an interpreter from `config` with the ROM at `path` loaded
pub fn load(path: &Path, config: Config) -> Result<Chip8> {
    let file = File::open(path).with_context(|| format!("unable to open {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut chip8 = Chip8::with_config(config);
    chip8
        .load_rom(&mut reader)
        .with_context(|| format!("unable to load {}", path.display()))?;
    Ok(chip8)
}
