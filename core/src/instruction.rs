use std::fmt;

use crate::opcode::Opcode;

/// # Instructions
/// Every operation the interpreter understands, with its operands already pulled out of the opcode.
///
/// `x` and `y` index the V registers, `nn` is an immediate byte, `nnn` an address and `n` a sprite height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn; call a machine code routine. Unsupported and executed as a no-op.
    Sys { nnn: u16 },
    /// 00E0
    Clear,
    /// 00EE
    Return,
    /// 00FD
    Exit,
    /// 1nnn
    Jump { nnn: u16 },
    /// 2nnn
    Call { nnn: u16 },
    /// 3xnn
    SkipEqByte { x: usize, nn: u8 },
    /// 4xnn
    SkipNeByte { x: usize, nn: u8 },
    /// 5xy0
    SkipEqReg { x: usize, y: usize },
    /// 6xnn
    LoadByte { x: usize, nn: u8 },
    /// 7xnn
    AddByte { x: usize, nn: u8 },
    /// 8xy0
    Move { x: usize, y: usize },
    /// 8xy1
    Or { x: usize, y: usize },
    /// 8xy2
    And { x: usize, y: usize },
    /// 8xy3
    Xor { x: usize, y: usize },
    /// 8xy4
    AddReg { x: usize, y: usize },
    /// 8xy5
    Sub { x: usize, y: usize },
    /// 8xy6
    ShiftRight { x: usize, y: usize },
    /// 8xy7
    SubN { x: usize, y: usize },
    /// 8xyE
    ShiftLeft { x: usize, y: usize },
    /// 9xy0
    SkipNeReg { x: usize, y: usize },
    /// Annn
    LoadIndex { nnn: u16 },
    /// Bnnn
    JumpOffset { nnn: u16 },
    /// Cxnn
    Random { x: usize, nn: u8 },
    /// Dxyn
    Draw { x: usize, y: usize, n: u8 },
    /// Ex9E
    SkipPressed { x: usize },
    /// ExA1
    SkipNotPressed { x: usize },
    /// Fx07
    LoadDelay { x: usize },
    /// Fx0A
    WaitKey { x: usize },
    /// Fx15
    SetDelay { x: usize },
    /// Fx18
    SetSound { x: usize },
    /// Fx1E
    AddIndex { x: usize },
    /// Fx29
    LoadGlyph { x: usize },
    /// Fx33
    StoreBcd { x: usize },
    /// Fx55
    StoreRegisters { x: usize },
    /// Fx65
    LoadRegisters { x: usize },
}

/// Selects the Instruction for a given opcode, or None if it isn't one
pub fn decode(op: u16) -> Option<Instruction> {
    use Instruction::*;

    let (x, y, n, nn, nnn) = (op.x(), op.y(), op.n(), op.nn(), op.nnn());
    let instruction = match op.nibbles() {
        (0x0, ..) => match op {
            0x00E0 => Clear,
            0x00EE => Return,
            0x00FD => Exit,
            _ => Sys { nnn },
        },
        (0x1, ..) => Jump { nnn },
        (0x2, ..) => Call { nnn },
        (0x3, ..) => SkipEqByte { x, nn },
        (0x4, ..) => SkipNeByte { x, nn },
        (0x5, .., 0x0) => SkipEqReg { x, y },
        (0x6, ..) => LoadByte { x, nn },
        (0x7, ..) => AddByte { x, nn },
        (0x8, .., 0x0) => Move { x, y },
        (0x8, .., 0x1) => Or { x, y },
        (0x8, .., 0x2) => And { x, y },
        (0x8, .., 0x3) => Xor { x, y },
        (0x8, .., 0x4) => AddReg { x, y },
        (0x8, .., 0x5) => Sub { x, y },
        (0x8, .., 0x6) => ShiftRight { x, y },
        (0x8, .., 0x7) => SubN { x, y },
        (0x8, .., 0xE) => ShiftLeft { x, y },
        (0x9, .., 0x0) => SkipNeReg { x, y },
        (0xA, ..) => LoadIndex { nnn },
        (0xB, ..) => JumpOffset { nnn },
        (0xC, ..) => Random { x, nn },
        (0xD, ..) => Draw { x, y, n },
        (0xE, ..) => match nn {
            0x9E => SkipPressed { x },
            0xA1 => SkipNotPressed { x },
            _ => return None,
        },
        (0xF, ..) => match nn {
            0x07 => LoadDelay { x },
            0x0A => WaitKey { x },
            0x15 => SetDelay { x },
            0x18 => SetSound { x },
            0x1E => AddIndex { x },
            0x29 => LoadGlyph { x },
            0x33 => StoreBcd { x },
            0x55 => StoreRegisters { x },
            0x65 => LoadRegisters { x },
            _ => return None,
        },
        _ => return None,
    };
    Some(instruction)
}

impl Instruction {
    /// The opcode this Instruction decodes from
    pub fn encode(&self) -> u16 {
        use Instruction::*;

        let xy = |family: u16, x: usize, y: usize, n: u16| -> u16 {
            family << 12 | (x as u16 & 0xF) << 8 | (y as u16 & 0xF) << 4 | n
        };
        let xnn = |family: u16, x: usize, nn: u8| -> u16 {
            family << 12 | (x as u16 & 0xF) << 8 | u16::from(nn)
        };

        match *self {
            Sys { nnn } => nnn & 0x0FFF,
            Clear => 0x00E0,
            Return => 0x00EE,
            Exit => 0x00FD,
            Jump { nnn } => 0x1000 | (nnn & 0x0FFF),
            Call { nnn } => 0x2000 | (nnn & 0x0FFF),
            SkipEqByte { x, nn } => xnn(0x3, x, nn),
            SkipNeByte { x, nn } => xnn(0x4, x, nn),
            SkipEqReg { x, y } => xy(0x5, x, y, 0x0),
            LoadByte { x, nn } => xnn(0x6, x, nn),
            AddByte { x, nn } => xnn(0x7, x, nn),
            Move { x, y } => xy(0x8, x, y, 0x0),
            Or { x, y } => xy(0x8, x, y, 0x1),
            And { x, y } => xy(0x8, x, y, 0x2),
            Xor { x, y } => xy(0x8, x, y, 0x3),
            AddReg { x, y } => xy(0x8, x, y, 0x4),
            Sub { x, y } => xy(0x8, x, y, 0x5),
            ShiftRight { x, y } => xy(0x8, x, y, 0x6),
            SubN { x, y } => xy(0x8, x, y, 0x7),
            ShiftLeft { x, y } => xy(0x8, x, y, 0xE),
            SkipNeReg { x, y } => xy(0x9, x, y, 0x0),
            LoadIndex { nnn } => 0xA000 | (nnn & 0x0FFF),
            JumpOffset { nnn } => 0xB000 | (nnn & 0x0FFF),
            Random { x, nn } => xnn(0xC, x, nn),
            Draw { x, y, n } => xy(0xD, x, y, u16::from(n & 0xF)),
            SkipPressed { x } => xnn(0xE, x, 0x9E),
            SkipNotPressed { x } => xnn(0xE, x, 0xA1),
            LoadDelay { x } => xnn(0xF, x, 0x07),
            WaitKey { x } => xnn(0xF, x, 0x0A),
            SetDelay { x } => xnn(0xF, x, 0x15),
            SetSound { x } => xnn(0xF, x, 0x18),
            AddIndex { x } => xnn(0xF, x, 0x1E),
            LoadGlyph { x } => xnn(0xF, x, 0x29),
            StoreBcd { x } => xnn(0xF, x, 0x33),
            StoreRegisters { x } => xnn(0xF, x, 0x55),
            LoadRegisters { x } => xnn(0xF, x, 0x65),
        }
    }
}

/// Disassembles into the same syntax the assembler reads
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys { nnn } => write!(f, "SYS {:#05X}", nnn),
            Clear => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Exit => write!(f, "EXIT"),
            Jump { nnn } => write!(f, "JP {:#05X}", nnn),
            Call { nnn } => write!(f, "CALL {:#05X}", nnn),
            SkipEqByte { x, nn } => write!(f, "SE V{:X}, {:#04X}", x, nn),
            SkipNeByte { x, nn } => write!(f, "SNE V{:X}, {:#04X}", x, nn),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadByte { x, nn } => write!(f, "LD V{:X}, {:#04X}", x, nn),
            AddByte { x, nn } => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { nnn } => write!(f, "LD I, {:#05X}", nnn),
            JumpOffset { nnn } => write!(f, "JP V0, {:#05X}", nnn),
            Random { x, nn } => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipPressed { x } => write!(f, "SKP V{:X}", x),
            SkipNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadGlyph { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegisters { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegisters { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
