use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use chip8_asm::{assemble_file, parse_number};

/// Assemble Chip-8 source into a ROM
#[derive(Debug, Parser)]
#[command(name = "chip8-asm", version)]
struct Args {
    /// Source file to assemble
    source: PathBuf,

    /// Where to write the ROM; defaults to the source path with a .ch8 extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Address the program will be loaded at
    #[arg(long, default_value = "0x200", value_parser = parse_origin)]
    origin: usize,
}

fn parse_origin(text: &str) -> Result<usize> {
    parse_number(text)
        .and_then(|origin| usize::try_from(origin).ok())
        .ok_or_else(|| anyhow!("invalid origin '{}'", text))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output = args
        .output
        .unwrap_or_else(|| args.source.with_extension("ch8"));

    let rom = assemble_file(&args.source, args.origin)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&output, &rom).with_context(|| format!("failed to write {}", output.display()))?;

    println!("wrote {} bytes to {}", rom.len(), output.display());
    Ok(())
}
