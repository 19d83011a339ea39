use log::debug;
use rand::{Rng, RngCore};

use crate::constants::{ADDRESS_MASK, DISPLAY_HEIGHT, FONT_START, GLYPH_HEIGHT};
use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::quirks::Quirks;
use crate::state::State;

/// What the engine should do after an instruction has executed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Executes a single instruction against `state`.
///
/// The program counter must already point past the instruction; jumps, calls and skips work
/// relative to that address and Fx0A steps back onto itself while no key is down.
pub fn execute(
    instruction: Instruction,
    state: &mut State,
    quirks: &Quirks,
    rng: &mut dyn RngCore,
) -> Result<Flow, Chip8Error> {
    use Instruction::*;

    match instruction {
        Sys { nnn } => sys(nnn),
        Clear => cls(state),
        Return => ret(state)?,
        Exit => return Ok(Flow::Exit),
        Jump { nnn } => jp(state, nnn),
        Call { nnn } => call(state, nnn)?,
        SkipEqByte { x, nn } => se(state, x, nn),
        SkipNeByte { x, nn } => sne(state, x, nn),
        SkipEqReg { x, y } => se_reg(state, x, y),
        LoadByte { x, nn } => state.registers.set_v(x, nn),
        AddByte { x, nn } => add_byte(state, x, nn),
        Move { x, y } => state.registers.set_v(x, state.registers.v(y)),
        Or { x, y } => or(state, x, y),
        And { x, y } => and(state, x, y),
        Xor { x, y } => xor(state, x, y),
        AddReg { x, y } => add_reg(state, x, y),
        Sub { x, y } => sub(state, x, y),
        ShiftRight { x, y } => shr(state, quirks, x, y),
        SubN { x, y } => subn(state, x, y),
        ShiftLeft { x, y } => shl(state, quirks, x, y),
        SkipNeReg { x, y } => sne_reg(state, x, y),
        LoadIndex { nnn } => state.registers.set_i(nnn),
        JumpOffset { nnn } => jp_offset(state, quirks, nnn),
        Random { x, nn } => rnd(state, rng, x, nn),
        Draw { x, y, n } => drw(state, quirks, x, y, n)?,
        SkipPressed { x } => skp(state, x),
        SkipNotPressed { x } => sknp(state, x),
        LoadDelay { x } => state.registers.set_v(x, state.timers.delay()),
        WaitKey { x } => wait_key(state, x),
        SetDelay { x } => state.timers.set_delay(state.registers.v(x)),
        SetSound { x } => state.timers.set_sound(state.registers.v(x)),
        AddIndex { x } => add_index(state, x),
        LoadGlyph { x } => ld_glyph(state, x),
        StoreBcd { x } => bcd(state, x)?,
        StoreRegisters { x } => stor(state, quirks, x)?,
        LoadRegisters { x } => read(state, quirks, x)?,
    }
    Ok(Flow::Continue)
}

/// machine code routines don't exist here
fn sys(nnn: u16) {
    debug!("ignoring SYS {:#05X}", nnn);
}

/// clear
fn cls(state: &mut State) {
    state.display.clear();
}

/// PC = STACK.pop()
fn ret(state: &mut State) -> Result<(), Chip8Error> {
    let addr = state.registers.pop()?;
    state.registers.set_pc(addr);
    Ok(())
}

/// PC = addr
fn jp(state: &mut State, nnn: u16) {
    state.registers.set_pc(nnn);
}

/// STACK.push(PC); PC = addr
fn call(state: &mut State, nnn: u16) -> Result<(), Chip8Error> {
    let pc = state.registers.pc();
    state.registers.push(pc)?;
    state.registers.set_pc(nnn);
    Ok(())
}

/// if cond then pc += 2
fn skip_if(state: &mut State, cond: bool) {
    if cond {
        state.registers.advance_pc();
    }
}

/// if Vx == nn then pc += 2
fn se(state: &mut State, x: usize, nn: u8) {
    let cond = state.registers.v(x) == nn;
    skip_if(state, cond);
}

/// if Vx != nn then pc += 2
fn sne(state: &mut State, x: usize, nn: u8) {
    let cond = state.registers.v(x) != nn;
    skip_if(state, cond);
}

/// if Vx == Vy then pc += 2
fn se_reg(state: &mut State, x: usize, y: usize) {
    let cond = state.registers.v(x) == state.registers.v(y);
    skip_if(state, cond);
}

/// if Vx != Vy then pc += 2
fn sne_reg(state: &mut State, x: usize, y: usize) {
    let cond = state.registers.v(x) != state.registers.v(y);
    skip_if(state, cond);
}

/// if Vx.pressed then pc += 2
fn skp(state: &mut State, x: usize) {
    let cond = state.keypad.is_pressed(state.registers.v(x));
    skip_if(state, cond);
}

/// if !Vx.pressed then pc += 2
fn sknp(state: &mut State, x: usize) {
    let cond = !state.keypad.is_pressed(state.registers.v(x));
    skip_if(state, cond);
}

/// Vx += nn
/// Add nn to Vx; allow for overflow but implicitly drop it
fn add_byte(state: &mut State, x: usize, nn: u8) {
    let res = state.registers.v(x).wrapping_add(nn);
    state.registers.set_v(x, res);
}

/// Vx |= Vy
fn or(state: &mut State, x: usize, y: usize) {
    let res = state.registers.v(x) | state.registers.v(y);
    state.registers.set_v(x, res);
}

/// Vx &= Vy
fn and(state: &mut State, x: usize, y: usize) {
    let res = state.registers.v(x) & state.registers.v(y);
    state.registers.set_v(x, res);
}

/// Vx ^= Vy
fn xor(state: &mut State, x: usize, y: usize) {
    let res = state.registers.v(x) ^ state.registers.v(y);
    state.registers.set_v(x, res);
}

/// Vx += Vy; VF = overflow
fn add_reg(state: &mut State, x: usize, y: usize) {
    let (res, over) = state.registers.v(x).overflowing_add(state.registers.v(y));
    state.registers.set_v(x, res);
    state.registers.set_flag(over);
}

/// Vx -= Vy; VF = !underflow
fn sub(state: &mut State, x: usize, y: usize) {
    let (res, under) = state.registers.v(x).overflowing_sub(state.registers.v(y));
    state.registers.set_v(x, res);
    state.registers.set_flag(!under);
}

/// Vx = Vy - Vx; VF = !underflow
fn subn(state: &mut State, x: usize, y: usize) {
    let (res, under) = state.registers.v(y).overflowing_sub(state.registers.v(x));
    state.registers.set_v(x, res);
    state.registers.set_flag(!under);
}

/// The register a shift reads from
fn shift_source(state: &State, quirks: &Quirks, x: usize, y: usize) -> u8 {
    if quirks.shift_uses_vy {
        state.registers.v(y)
    } else {
        state.registers.v(x)
    }
}

/// Vx >>= 1; VF = lsb
fn shr(state: &mut State, quirks: &Quirks, x: usize, y: usize) {
    let source = shift_source(state, quirks, x, y);
    state.registers.set_v(x, source >> 1);
    state.registers.set_flag(source & 0x01 == 0x01);
}

/// Vx <<= 1; VF = msb
fn shl(state: &mut State, quirks: &Quirks, x: usize, y: usize) {
    let source = shift_source(state, quirks, x, y);
    state.registers.set_v(x, source << 1);
    state.registers.set_flag(source & 0x80 == 0x80);
}

/// PC = V0 + addr
fn jp_offset(state: &mut State, quirks: &Quirks, nnn: u16) {
    let offset = if quirks.jump_with_vx {
        state.registers.v(usize::from((nnn >> 8) as u8 & 0xF))
    } else {
        state.registers.v(0x0)
    };
    state
        .registers
        .set_pc((nnn + u16::from(offset)) & ADDRESS_MASK);
}

/// Vx = rand_byte & nn
fn rnd(state: &mut State, rng: &mut dyn RngCore, x: usize, nn: u8) {
    let rand_byte: u8 = rng.gen();
    state.registers.set_v(x, rand_byte & nn);
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an n-byte sprite from memory I..I+n onto the frame at Vx, Vy.
/// Rows clipped off the bottom are never read from memory.
/// Sets VF if pixels were erased
fn drw(state: &mut State, quirks: &Quirks, x: usize, y: usize, n: u8) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.registers.v(x), state.registers.v(y));
    let mut len = usize::from(n);
    if !quirks.draw_wrap {
        len = len.min(DISPLAY_HEIGHT - usize::from(vy) % DISPLAY_HEIGHT);
    }
    let rows = state
        .memory
        .slice(usize::from(state.registers.i()), len)?;
    let collided = state
        .display
        .draw_sprite(vx, vy, rows, quirks.draw_wrap, quirks.collision);
    state.registers.set_flag(collided);
    Ok(())
}

/// await keypress for Vx
/// Stays on this instruction until some key is down
fn wait_key(state: &mut State, x: usize) {
    match state.keypad.first_pressed() {
        Some(key) => state.registers.set_v(x, key),
        None => state.registers.rewind_pc(),
    }
}

/// I += Vx; VF = carry out of 12 bits
fn add_index(state: &mut State, x: usize) {
    let sum = state.registers.i() + u16::from(state.registers.v(x));
    state.registers.set_i(sum);
    state.registers.set_flag(sum > ADDRESS_MASK);
}

/// I = Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
/// See constants::SPRITE_SHEET for more details
fn ld_glyph(state: &mut State, x: usize) {
    let digit = u16::from(state.registers.v(x) & 0xF);
    state.registers.set_i(FONT_START as u16 + digit * GLYPH_HEIGHT);
}

/// mem[I..I+3] = bcd(Vx)
/// Store BCD repr of Vx in memory starting at address i
fn bcd(state: &mut State, x: usize) -> Result<(), Chip8Error> {
    let vx = state.registers.v(x);
    let digits = [vx / 100 % 10, vx / 10 % 10, vx % 10];
    state
        .memory
        .slice_mut(usize::from(state.registers.i()), digits.len())?
        .copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
fn stor(state: &mut State, quirks: &Quirks, x: usize) -> Result<(), Chip8Error> {
    let i = state.registers.i();
    state
        .memory
        .slice_mut(usize::from(i), x + 1)?
        .copy_from_slice(&state.registers.all_v()[..=x]);
    if quirks.load_store_increment_i {
        state.registers.set_i(i + x as u16 + 1);
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
fn read(state: &mut State, quirks: &Quirks, x: usize) -> Result<(), Chip8Error> {
    let i = state.registers.i();
    let bytes = state.memory.slice(usize::from(i), x + 1)?;
    for (register, byte) in bytes.iter().enumerate() {
        state.registers.set_v(register, *byte);
    }
    if quirks.load_store_increment_i {
        state.registers.set_i(i + x as u16 + 1);
    }
    Ok(())
}

#[cfg(test)]
mod test_operations {
    use super::*;
    use crate::constants::PROGRAM_START;
    use crate::instruction::decode;
    use crate::quirks::{CollisionPolicy, DEFAULT_QUIRKS, MODERN_QUIRKS, ORIGINAL_QUIRKS};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const NEXT: u16 = PROGRAM_START + 0x2;
    const SKIPPED: u16 = PROGRAM_START + 0x4;

    /// Fetch-like setup: step the pc past the opcode, then execute it
    fn run_with(state: &mut State, op: u16, quirks: &Quirks) -> Result<Flow, Chip8Error> {
        let mut rng = StdRng::seed_from_u64(0x8);
        state.registers.advance_pc();
        execute(decode(op).unwrap(), state, quirks, &mut rng)
    }

    fn run(state: &mut State, op: u16) -> Result<Flow, Chip8Error> {
        run_with(state, op, &DEFAULT_QUIRKS)
    }

    #[test]
    fn test_0nnn_sys_is_ignored() {
        let mut state = State::new();
        assert_eq!(run(&mut state, 0x0123), Ok(Flow::Continue));
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_00e0_cls() {
        let mut state = State::new();
        state.display.draw_sprite(0, 0, &[0xFF], false, CollisionPolicy::Accumulate);
        run(&mut state, 0x00E0).unwrap();
        assert_eq!(state.display.pixel(0, 0), 0);
        assert!(state.display.is_dirty());
    }

    #[test]
    fn test_00ee_ret() {
        let mut state = State::new();
        state.registers.push(0x0ABC).unwrap();
        run(&mut state, 0x00EE).unwrap();
        assert_eq!(state.registers.pc(), 0x0ABC);
        assert_eq!(state.registers.depth(), 0);
    }

    #[test]
    fn test_00ee_ret_empty_stack() {
        let mut state = State::new();
        assert_eq!(run(&mut state, 0x00EE), Err(Chip8Error::StackUnderflow));
    }

    #[test]
    fn test_00fd_exit() {
        let mut state = State::new();
        assert_eq!(run(&mut state, 0x00FD), Ok(Flow::Exit));
    }

    #[test]
    fn test_1nnn_jp() {
        let mut state = State::new();
        run(&mut state, 0x1ABC).unwrap();
        assert_eq!(state.registers.pc(), 0x0ABC);
    }

    #[test]
    fn test_2nnn_call() {
        let mut state = State::new();
        run(&mut state, 0x2ABC).unwrap();
        assert_eq!(state.registers.pc(), 0x0ABC);
        assert_eq!(state.registers.stack(), &[NEXT]);
    }

    #[test]
    fn test_2nnn_call_then_00ee_ret() {
        let mut state = State::new();
        run(&mut state, 0x2300).unwrap();
        assert_eq!(state.registers.depth(), 1);
        run(&mut state, 0x00EE).unwrap();
        assert_eq!(state.registers.depth(), 0);
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_2nnn_call_full_stack() {
        let mut state = State::new();
        for _ in 0..16 {
            state.registers.push(0x200).unwrap();
        }
        assert_eq!(run(&mut state, 0x2ABC), Err(Chip8Error::StackOverflow));
    }

    #[test]
    fn test_3xnn_se_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.registers.pc(), SKIPPED);
    }

    #[test]
    fn test_3xnn_se_doesntskip() {
        let mut state = State::new();
        run(&mut state, 0x3111).unwrap();
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_4xnn_sne_skips() {
        let mut state = State::new();
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.registers.pc(), SKIPPED);
    }

    #[test]
    fn test_4xnn_sne_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x11);
        run(&mut state, 0x4111).unwrap();
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_5xy0_se_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x3);
        state.registers.set_v(0x2, 0x3);
        run(&mut state, 0x5120).unwrap();
        assert_eq!(state.registers.pc(), SKIPPED);
    }

    #[test]
    fn test_5xy0_se_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x3);
        run(&mut state, 0x5120).unwrap();
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_6xnn_ld() {
        let mut state = State::new();
        run(&mut state, 0x6122).unwrap();
        assert_eq!(state.registers.v(0x1), 0x22);
    }

    #[test]
    fn test_7xnn_add_wraps_without_flag() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xFF);
        run(&mut state, 0x7102).unwrap();
        assert_eq!(state.registers.v(0x1), 0x01);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy0_ld() {
        let mut state = State::new();
        state.registers.set_v(0x2, 0x7);
        run(&mut state, 0x8120).unwrap();
        assert_eq!(state.registers.v(0x1), 0x7);
    }

    #[test]
    fn test_8xy1_or() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        state.registers.set_v(0x2, 0x3);
        run(&mut state, 0x8121).unwrap();
        assert_eq!(state.registers.v(0x1), 0x7);
    }

    #[test]
    fn test_8xy2_and() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        state.registers.set_v(0x2, 0x3);
        run(&mut state, 0x8122).unwrap();
        assert_eq!(state.registers.v(0x1), 0x2);
    }

    #[test]
    fn test_8xy3_xor() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x6);
        state.registers.set_v(0x2, 0x3);
        run(&mut state, 0x8123).unwrap();
        assert_eq!(state.registers.v(0x1), 0x5);
    }

    #[test]
    fn test_8xy4_add_nocarry() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x10);
        state.registers.set_v(0x2, 0x01);
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.registers.v(0x1), 0x11);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy4_add_carry() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xFF);
        state.registers.set_v(0x2, 0x01);
        run(&mut state, 0x8124).unwrap();
        assert_eq!(state.registers.v(0x1), 0x00);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy4_add_into_vf_keeps_flag() {
        let mut state = State::new();
        state.registers.set_v(0xF, 0xFF);
        state.registers.set_v(0x2, 0x01);
        run(&mut state, 0x8F24).unwrap();
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy5_sub_noborrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x0A);
        state.registers.set_v(0x2, 0x05);
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.registers.v(0x1), 0x05);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy5_sub_borrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x05);
        state.registers.set_v(0x2, 0x0A);
        run(&mut state, 0x8125).unwrap();
        assert_eq!(state.registers.v(0x1), 0xFB);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy6_shr_lsb() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x5);
        run(&mut state, 0x8126).unwrap();
        assert_eq!(state.registers.v(0x1), 0x2);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy6_shr_nolsb() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x4);
        run(&mut state, 0x8126).unwrap();
        assert_eq!(state.registers.v(0x1), 0x2);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xy6_shr_from_vy() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x4);
        state.registers.set_v(0x2, 0x9);
        run_with(&mut state, 0x8126, &ORIGINAL_QUIRKS).unwrap();
        assert_eq!(state.registers.v(0x1), 0x4);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy7_subn_noborrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x05);
        state.registers.set_v(0x2, 0x0A);
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.registers.v(0x1), 0x05);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xy7_subn_borrow() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x0A);
        state.registers.set_v(0x2, 0x05);
        run(&mut state, 0x8127).unwrap();
        assert_eq!(state.registers.v(0x1), 0xFB);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_8xye_shl_msb() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x81);
        run(&mut state, 0x812E).unwrap();
        assert_eq!(state.registers.v(0x1), 0x02);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_8xye_shl_nomsb() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x01);
        run(&mut state, 0x812E).unwrap();
        assert_eq!(state.registers.v(0x1), 0x02);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_9xy0_sne_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x1);
        run(&mut state, 0x9120).unwrap();
        assert_eq!(state.registers.pc(), SKIPPED);
    }

    #[test]
    fn test_9xy0_sne_doesntskip() {
        let mut state = State::new();
        run(&mut state, 0x9120).unwrap();
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_annn_ld() {
        let mut state = State::new();
        run(&mut state, 0xAABC).unwrap();
        assert_eq!(state.registers.i(), 0x0ABC);
    }

    #[test]
    fn test_bnnn_jp() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x2);
        run(&mut state, 0xB300).unwrap();
        assert_eq!(state.registers.pc(), 0x0302);
    }

    #[test]
    fn test_bnnn_jp_masks_address() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x10);
        run(&mut state, 0xBFFF).unwrap();
        assert_eq!(state.registers.pc(), 0x000F);
    }

    #[test]
    fn test_bnnn_jp_with_vx() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x1);
        state.registers.set_v(0x3, 0x4);
        run_with(&mut state, 0xB300, &MODERN_QUIRKS).unwrap();
        assert_eq!(state.registers.pc(), 0x0304);
    }

    #[test]
    fn test_cxnn_rnd_masks() {
        let mut state = State::new();
        run(&mut state, 0xC10F).unwrap();
        assert_eq!(state.registers.v(0x1) & 0xF0, 0x0);
    }

    #[test]
    fn test_cxnn_rnd_is_seeded() {
        let mut a = State::new();
        let mut b = State::new();
        run(&mut a, 0xC1FF).unwrap();
        run(&mut b, 0xC1FF).unwrap();
        assert_eq!(a.registers.v(0x1), b.registers.v(0x1));
    }

    #[test]
    fn test_dxyn_drw_draws() {
        let mut state = State::new();
        state.memory.write(0x300, 0xF0).unwrap();
        state.registers.set_i(0x300);
        run(&mut state, 0xD011).unwrap();
        for x in 0..4 {
            assert_eq!(state.display.pixel(x, 0), 1);
        }
        for x in 4..8 {
            assert_eq!(state.display.pixel(x, 0), 0);
        }
        assert_eq!(state.registers.v(0xF), 0x0);
        assert!(state.display.is_dirty());
    }

    #[test]
    fn test_dxyn_drw_collides() {
        let mut state = State::new();
        state.memory.write(0x300, 0xF0).unwrap();
        state.registers.set_i(0x300);
        run(&mut state, 0xD011).unwrap();
        run(&mut state, 0xD011).unwrap();
        assert_eq!(state.display.pixel(0, 0), 0);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_dxyn_drw_at_registers() {
        let mut state = State::new();
        state.registers.set_v(0x0, 10);
        state.registers.set_v(0x1, 20);
        state.registers.set_i(0x0); // glyph 0
        run(&mut state, 0xD015).unwrap();
        assert_eq!(state.display.pixel(10, 20), 1);
        assert_eq!(state.display.pixel(13, 20), 1);
        assert_eq!(state.display.pixel(11, 21), 0);
    }

    #[test]
    fn test_dxyn_drw_past_memory() {
        let mut state = State::new();
        state.registers.set_i(0xFFE);
        assert!(matches!(
            run(&mut state, 0xD015),
            Err(Chip8Error::MemoryOutOfBounds(_))
        ));
    }

    #[test]
    fn test_dxyn_drw_clipped_rows_not_read() {
        let mut state = State::new();
        state.memory.slice_mut(0xFFD, 3).unwrap().copy_from_slice(&[0x80, 0x80, 0x80]);
        state.registers.set_v(0x1, 30);
        state.registers.set_i(0xFFD);
        assert_eq!(run(&mut state, 0xD015), Ok(Flow::Continue));
        assert_eq!(state.display.pixel(0, 30), 1);
        assert_eq!(state.display.pixel(0, 31), 1);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_dxyn_drw_wrapped_rows_still_read() {
        let mut state = State::new();
        state.registers.set_v(0x1, 30);
        state.registers.set_i(0xFFD);
        assert_eq!(
            run_with(&mut state, 0xD015, &MODERN_QUIRKS),
            Err(Chip8Error::MemoryOutOfBounds(0x1000))
        );
    }

    #[test]
    fn test_dxyn_drw_last_pixel_collision() {
        let quirks = Quirks {
            collision: CollisionPolicy::LastPixel,
            ..DEFAULT_QUIRKS
        };
        let mut state = State::new();
        state.memory.slice_mut(0x300, 2).unwrap().copy_from_slice(&[0x80, 0xC0]);
        state.display.draw_sprite(0, 0, &[0x80], false, CollisionPolicy::Accumulate);
        state.registers.set_i(0x300);
        // erases (0,0) then lights (0,1) and (1,1); the last lit pixel decides
        run_with(&mut state, 0xD002, &quirks).unwrap();
        assert_eq!(state.registers.v(0xF), 0x0);

        let mut state = State::new();
        state.memory.slice_mut(0x300, 2).unwrap().copy_from_slice(&[0x80, 0xC0]);
        state.display.draw_sprite(1, 1, &[0x80], false, CollisionPolicy::Accumulate);
        state.registers.set_i(0x300);
        run_with(&mut state, 0xD002, &quirks).unwrap();
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_ex9e_skp_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xA);
        state.keypad.key_down(0xA).unwrap();
        run(&mut state, 0xE19E).unwrap();
        assert_eq!(state.registers.pc(), SKIPPED);
    }

    #[test]
    fn test_ex9e_skp_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xA);
        run(&mut state, 0xE19E).unwrap();
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_ex9e_skp_uses_low_nibble() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x1A);
        state.keypad.key_down(0xA).unwrap();
        run(&mut state, 0xE19E).unwrap();
        assert_eq!(state.registers.pc(), SKIPPED);
    }

    #[test]
    fn test_exa1_sknp_skips() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xA);
        run(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.registers.pc(), SKIPPED);
    }

    #[test]
    fn test_exa1_sknp_doesntskip() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0xA);
        state.keypad.key_down(0xA).unwrap();
        run(&mut state, 0xE1A1).unwrap();
        assert_eq!(state.registers.pc(), NEXT);
    }

    #[test]
    fn test_fx07_ld() {
        let mut state = State::new();
        state.timers.set_delay(0x9);
        run(&mut state, 0xF107).unwrap();
        assert_eq!(state.registers.v(0x1), 0x9);
    }

    #[test]
    fn test_fx0a_ld_waits_for_key() {
        let mut state = State::new();
        run(&mut state, 0xF10A).unwrap();
        assert_eq!(state.registers.pc(), PROGRAM_START);
        run(&mut state, 0xF10A).unwrap();
        assert_eq!(state.registers.pc(), PROGRAM_START);
    }

    #[test]
    fn test_fx0a_ld_captures_key() {
        let mut state = State::new();
        state.keypad.key_down(0xE).unwrap();
        run(&mut state, 0xF10A).unwrap();
        assert_eq!(state.registers.pc(), NEXT);
        assert_eq!(state.registers.v(0x1), 0xE);
    }

    #[test]
    fn test_fx15_ld() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x9);
        run(&mut state, 0xF115).unwrap();
        assert_eq!(state.timers.delay(), 0x9);
    }

    #[test]
    fn test_fx18_ld() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x9);
        run(&mut state, 0xF118).unwrap();
        assert_eq!(state.timers.sound(), 0x9);
    }

    #[test]
    fn test_fx1e_add() {
        let mut state = State::new();
        state.registers.set_i(0x1);
        state.registers.set_v(0x1, 0x1);
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.registers.i(), 0x2);
        assert_eq!(state.registers.v(0xF), 0x0);
    }

    #[test]
    fn test_fx1e_add_carry() {
        let mut state = State::new();
        state.registers.set_i(0xFFF);
        state.registers.set_v(0x1, 0x2);
        run(&mut state, 0xF11E).unwrap();
        assert_eq!(state.registers.i(), 0x001);
        assert_eq!(state.registers.v(0xF), 0x1);
    }

    #[test]
    fn test_fx29_ld() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x2);
        run(&mut state, 0xF129).unwrap();
        assert_eq!(state.registers.i(), 0xA);
    }

    #[test]
    fn test_fx29_ld_uses_low_nibble() {
        let mut state = State::new();
        state.registers.set_v(0x1, 0x3F);
        run(&mut state, 0xF129).unwrap();
        assert_eq!(state.registers.i(), 0x4B);
    }

    #[test]
    fn test_fx33_ld() {
        let mut state = State::new();
        state.registers.set_v(0x1, 123);
        state.registers.set_i(0x300);
        run(&mut state, 0xF133).unwrap();
        assert_eq!(state.memory.slice(0x300, 3).unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn test_fx33_ld_past_memory() {
        let mut state = State::new();
        state.registers.set_i(0xFFE);
        assert_eq!(
            run(&mut state, 0xF133),
            Err(Chip8Error::MemoryOutOfBounds(0x1000))
        );
    }

    #[test]
    fn test_fx55_ld() {
        let mut state = State::new();
        state.registers.set_v(0x0, 0x1);
        state.registers.set_v(0x1, 0x2);
        state.registers.set_v(0x2, 0x3);
        state.registers.set_i(0x300);
        run(&mut state, 0xF155).unwrap();
        assert_eq!(state.memory.slice(0x300, 3).unwrap(), &[0x1, 0x2, 0x0]);
        assert_eq!(state.registers.i(), 0x302);
    }

    #[test]
    fn test_fx55_ld_keeps_i() {
        let mut state = State::new();
        state.registers.set_i(0x300);
        run_with(&mut state, 0xF155, &MODERN_QUIRKS).unwrap();
        assert_eq!(state.registers.i(), 0x300);
    }

    #[test]
    fn test_fx65_ld() {
        let mut state = State::new();
        state.memory.slice_mut(0x300, 3).unwrap().copy_from_slice(&[0x4, 0x5, 0x6]);
        state.registers.set_i(0x300);
        run(&mut state, 0xF165).unwrap();
        assert_eq!(state.registers.v(0x0), 0x4);
        assert_eq!(state.registers.v(0x1), 0x5);
        assert_eq!(state.registers.v(0x2), 0x0);
        assert_eq!(state.registers.i(), 0x302);
    }

    #[test]
    fn test_fx65_ld_keeps_i() {
        let mut state = State::new();
        state.memory.slice_mut(0x300, 2).unwrap().copy_from_slice(&[0x7, 0x8]);
        state.registers.set_i(0x300);
        run_with(&mut state, 0xF165, &MODERN_QUIRKS).unwrap();
        assert_eq!(state.registers.v(0x1), 0x8);
        assert_eq!(state.registers.i(), 0x300);
    }

    #[test]
    fn test_fx55_ld_past_memory() {
        let mut state = State::new();
        state.registers.set_i(0xFFE);
        assert_eq!(
            run(&mut state, 0xF255),
            Err(Chip8Error::MemoryOutOfBounds(0x1000))
        );
        assert_eq!(state.registers.i(), 0xFFE);
    }

    #[test]
    fn test_fx65_ld_past_memory() {
        let mut state = State::new();
        state.registers.set_i(0xFFF);
        assert_eq!(
            run(&mut state, 0xF165),
            Err(Chip8Error::MemoryOutOfBounds(0x1000))
        );
        assert_eq!(state.registers.v(0x0), 0x0);
    }
}
