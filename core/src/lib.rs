pub use chip8::{Chip8, Halt, RunState, Status};
pub use config::{Config, TimerCadence};
pub use constants::{CLOCK_SPEED, TIMER_SPEED};
pub use display::FrameBuffer;
pub use error::{Chip8Error, LoadError};
pub use instruction::{decode, Instruction};
pub use quirks::{CollisionPolicy, Quirks, UnknownProfile, DEFAULT_QUIRKS, MODERN_QUIRKS, ORIGINAL_QUIRKS};
pub use speaker::{Mute, Speaker};

mod chip8;
mod config;
pub mod constants;
pub mod display;
mod error;
mod instruction;
pub mod keypad;
pub mod memory;
mod opcode;
mod operations;
mod quirks;
pub mod registers;
mod speaker;
pub mod state;
pub mod timers;
