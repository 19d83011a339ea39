use std::io;

use log::{error, info, trace, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{Config, TimerCadence};
use crate::constants::MEMORY_SIZE;
use crate::display::FrameBuffer;
use crate::error::{Chip8Error, LoadError};
use crate::instruction::{decode, Instruction};
use crate::memory::Memory;
use crate::operations::{execute, Flow};
use crate::registers::Registers;
use crate::speaker::{Mute, Speaker};
use crate::state::State;

/// Why the engine stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The program ran 00FD
    Exited,
    /// A fatal error
    Fault(Chip8Error),
}

/// Whether the engine will execute another cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunState {
    Running,
    Halted(Halt),
}

/// The result of a successful cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Exited,
}

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - the active `program`, reloaded on every reset
///  - whether it is still running or has halted, and why
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
pub struct Chip8 {
    state: State,
    config: Config,
    rng: StdRng,
    speaker: Box<dyn Speaker>,
    program: Vec<u8>,
    run_state: RunState,
    timer_counter: u32,
    beeping: bool,
}

impl std::fmt::Debug for Chip8 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chip8")
            .field("config", &self.config)
            .field("run_state", &self.run_state)
            .field("timer_counter", &self.timer_counter)
            .field("beeping", &self.beeping)
            .finish_non_exhaustive()
    }
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Chip8 {
            state: State::new(),
            config,
            rng,
            speaker: Box::new(Mute),
            program: Vec::new(),
            run_state: RunState::Running,
            timer_counter: 0,
            beeping: false,
        }
    }

    /// Replaces the sound output
    pub fn with_speaker(mut self, speaker: Box<dyn Speaker>) -> Self {
        self.speaker = speaker;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Makes `program` the active program and resets into it.
    /// A program that doesn't fit leaves the machine untouched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        let mut state = State::new();
        state.reset(program)?;
        self.program = program.to_vec();
        self.state = state;
        self.restart();
        Ok(())
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn io::Read) -> Result<(), LoadError> {
        let mut program = Vec::new();
        reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(())
    }

    /// Puts the machine back to power on with the active program loaded
    pub fn reset(&mut self) {
        // the active program was already accepted once so this can't fail
        if let Err(e) = self.state.reset(&self.program) {
            error!("failed to reload program on reset: {}", e);
        }
        self.restart();
        info!("reset");
    }

    fn restart(&mut self) {
        self.run_state = RunState::Running;
        self.timer_counter = 0;
        if self.beeping {
            self.speaker.silence();
            self.beeping = false;
        }
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc and steps past it
    /// - decodes and executes it
    /// - counts the timers down if the cadence says so
    ///
    /// Any fatal error halts the machine; later calls return `Chip8Error::Halted`.
    pub fn cycle(&mut self) -> Result<Status, Chip8Error> {
        if let RunState::Halted(_) = self.run_state {
            return Err(Chip8Error::Halted);
        }

        match self.step() {
            Ok(Flow::Continue) => Ok(Status::Running),
            Ok(Flow::Exit) => {
                info!("program exited at {:#05X}", self.state.registers.pc());
                self.run_state = RunState::Halted(Halt::Exited);
                Ok(Status::Exited)
            }
            Err(e) => {
                error!("halting: {}", e);
                self.run_state = RunState::Halted(Halt::Fault(e.clone()));
                Err(e)
            }
        }
    }

    fn step(&mut self) -> Result<Flow, Chip8Error> {
        let address = self.state.registers.pc();
        let (op, instruction) = self.fetch(address)?;
        self.state.registers.advance_pc();

        if self.config.trace {
            self.trace(address, op, &instruction);
        }

        let flow = execute(
            instruction,
            &mut self.state,
            &self.config.quirks,
            &mut self.rng,
        )?;
        if flow == Flow::Continue {
            self.advance_timers();
        }
        Ok(flow)
    }

    /// Gets and decodes the opcode at `address`
    fn fetch(&self, address: u16) -> Result<(u16, Instruction), Chip8Error> {
        if usize::from(address) > MEMORY_SIZE - 2 {
            return Err(Chip8Error::ProgramCounterOutOfBounds(address));
        }
        let op = self.state.memory.word(usize::from(address))?;
        let instruction = decode(op).ok_or(Chip8Error::UnknownOpcode {
            opcode: op,
            address,
        })?;
        Ok((op, instruction))
    }

    fn trace(&self, address: u16, op: u16, instruction: &Instruction) {
        let registers = &self.state.registers;
        trace!(
            "{:03X}: {:04X} {:<16} v{:02X?} i{:03X} stack{:03X?} dt{:02X} st{:02X} keys{:?}",
            address,
            op,
            instruction.to_string(),
            registers.all_v(),
            registers.i(),
            registers.stack(),
            self.state.timers.delay(),
            self.state.timers.sound(),
            self.state.keypad.pressed(),
        );
    }

    /// Handles the timer cadence
    /// - `PerCycle` counts down every cycle
    /// - `Divided(n)` counts down once every n cycles
    /// - `Manual` leaves it to the host
    fn advance_timers(&mut self) {
        match self.config.timers {
            TimerCadence::PerCycle => self.tick_timers(),
            TimerCadence::Divided(n) => {
                self.timer_counter += 1;
                if self.timer_counter >= n.max(1) {
                    self.timer_counter = 0;
                    self.tick_timers();
                }
            }
            TimerCadence::Manual => {}
        }
    }

    /// Counts both timers down by one and keeps the speaker in step with the sound timer
    pub fn tick_timers(&mut self) {
        self.state.timers.tick();
        let sounding = self.state.timers.is_sounding();
        if sounding {
            self.speaker.beep();
        } else if self.beeping {
            self.speaker.silence();
        }
        self.beeping = sounding;
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index of the key that was pressed, 0x0..=0xF
    pub fn key_down(&mut self, key: u8) -> Result<(), Chip8Error> {
        self.state.keypad.key_down(key).map_err(|e| {
            warn!("ignoring key down: {}", e);
            e
        })
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the index of the key that was released, 0x0..=0xF
    pub fn key_up(&mut self, key: u8) -> Result<(), Chip8Error> {
        self.state.keypad.key_up(key).map_err(|e| {
            warn!("ignoring key up: {}", e);
            e
        })
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        self.state.display.frame()
    }

    pub fn is_dirty(&self) -> bool {
        self.state.display.is_dirty()
    }

    /// Returns the FrameBuffer if the display should be redrawn, and marks it as drawn
    pub fn take_frame(&mut self) -> Option<FrameBuffer> {
        if self.state.display.is_dirty() {
            self.state.display.mark_clean();
            Some(*self.state.display.frame())
        } else {
            None
        }
    }

    /// # Panics
    /// If `x` is not below 64 or `y` is not below 32.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.state.display.pixel(x, y)
    }

    pub fn registers(&self) -> &Registers {
        &self.state.registers
    }

    pub fn memory(&self) -> &Memory {
        &self.state.memory
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.timers.delay()
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.timers.sound()
    }

    /// Writes all 4096 bytes of memory to `writer`
    pub fn dump_memory(&self, writer: &mut impl io::Write) -> io::Result<()> {
        self.state.memory.dump(writer)
    }

    pub fn run_state(&self) -> &RunState {
        &self.run_state
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.run_state, RunState::Halted(_))
    }

    pub fn sound_active(&self) -> bool {
        self.state.timers.is_sounding()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
