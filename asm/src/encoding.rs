use std::collections::HashMap;

use chip8_core::Instruction;

use crate::error::AssemblerError;

/// Label name to the address it marks
pub type Labels = HashMap<String, usize>;

/// A single resolved instruction operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// V0..VF
    Register(usize),
    /// I
    Index,
    /// [I]
    Indirect,
    /// DT
    Delay,
    /// ST
    Sound,
    /// K
    Key,
    /// F
    Glyph,
    /// B
    Bcd,
    /// A number, character or label
    Value(i64),
}

/// Parses a numeric literal: decimal, `0x`/`$` hex, `0b` binary, `0o` octal or a `'c'` character
pub fn parse_number(token: &str) -> Option<i64> {
    let token = token.trim();

    if let Some(inner) = token.strip_prefix('\'').and_then(|t| t.strip_suffix('\'')) {
        let mut chars = inner.chars();
        return match (chars.next(), chars.next()) {
            (Some(ch), None) => Some(i64::from(u32::from(ch))),
            _ => None,
        };
    }

    let (digits, radix) = if let Some(rest) = token.strip_prefix('$') {
        (rest, 16)
    } else if let Some(rest) = strip_prefix_ignore_case(token, "0x") {
        (rest, 16)
    } else if let Some(rest) = strip_prefix_ignore_case(token, "0b") {
        (rest, 2)
    } else if let Some(rest) = strip_prefix_ignore_case(token, "0o") {
        (rest, 8)
    } else {
        (token, 10)
    };
    i64::from_str_radix(digits, radix).ok()
}

fn strip_prefix_ignore_case<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    token
        .strip_prefix(prefix)
        .or_else(|| token.strip_prefix(prefix.to_ascii_uppercase().as_str()))
}

/// Parses `V0`..`VF` (also `V10`..`V15`)
///
/// Returns `Ok(None)` when the token isn't register-shaped at all, so it can still be a label.
pub fn parse_register(token: &str, line_no: usize) -> Result<Option<usize>, AssemblerError> {
    let upper = token.trim().to_ascii_uppercase();
    let digits = match upper.strip_prefix('V') {
        Some(digits) if !digits.is_empty() => digits,
        _ => return Ok(None),
    };

    if digits.len() == 1 {
        return Ok(digits.chars().next().and_then(|ch| ch.to_digit(16)).map(|r| r as usize));
    }
    if digits.chars().all(|ch| ch.is_ascii_digit()) {
        return match digits.parse::<usize>() {
            Ok(register) if register <= 0xF => Ok(Some(register)),
            _ => Err(AssemblerError::at(
                line_no,
                format!("invalid register '{}'", token.trim()),
            )),
        };
    }
    Ok(None)
}

/// Resolves a label or numeric literal
pub fn parse_value(token: &str, labels: &Labels, line_no: usize) -> Result<i64, AssemblerError> {
    let token = token.trim();
    if let Some(addr) = labels.get(token) {
        return Ok(*addr as i64);
    }
    parse_number(token).ok_or_else(|| {
        AssemblerError::at(line_no, format!("invalid value or unknown label '{}'", token))
    })
}

pub fn parse_operand(token: &str, labels: &Labels, line_no: usize) -> Result<Operand, AssemblerError> {
    let operand = match token.trim().to_ascii_uppercase().as_str() {
        "I" => Operand::Index,
        "[I]" => Operand::Indirect,
        "DT" => Operand::Delay,
        "ST" => Operand::Sound,
        "K" => Operand::Key,
        "F" => Operand::Glyph,
        "B" => Operand::Bcd,
        _ => match parse_register(token, line_no)? {
            Some(x) => Operand::Register(x),
            None => Operand::Value(parse_value(token, labels, line_no)?),
        },
    };
    Ok(operand)
}

/// Checks `value` is within `0..=max`
pub fn ensure_range(value: i64, max: i64, what: &str, line_no: usize) -> Result<i64, AssemblerError> {
    if (0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(AssemblerError::at(
            line_no,
            format!("{} out of range: {} (expected 0..={:#X})", what, value, max),
        ))
    }
}

fn address(value: i64, line_no: usize) -> Result<u16, AssemblerError> {
    Ok(ensure_range(value, 0xFFF, "address", line_no)? as u16)
}

fn byte(value: i64, line_no: usize) -> Result<u8, AssemblerError> {
    Ok(ensure_range(value, 0xFF, "byte", line_no)? as u8)
}

fn nibble(value: i64, line_no: usize) -> Result<u8, AssemblerError> {
    Ok(ensure_range(value, 0xF, "nibble", line_no)? as u8)
}

/// How many operands each mnemonic can take
fn arities(mnemonic: &str) -> Option<&'static [usize]> {
    let arities: &'static [usize] = match mnemonic {
        "CLS" | "RET" | "EXIT" => &[0],
        "SYS" | "CALL" | "SKP" | "SKNP" => &[1],
        "JP" | "SHR" | "SHL" => &[1, 2],
        "SE" | "SNE" | "LD" | "ADD" | "OR" | "AND" | "XOR" | "SUB" | "SUBN" | "RND" => &[2],
        "DRW" => &[3],
        _ => return None,
    };
    Some(arities)
}

/// Encodes one instruction line into its opcode
///
/// # Arguments
/// * `mnemonic` upper-cased mnemonic
/// * `arguments` the raw comma separated operands
pub fn encode_instruction(
    mnemonic: &str,
    arguments: &[String],
    labels: &Labels,
    line_no: usize,
) -> Result<u16, AssemblerError> {
    use Instruction::*;
    use Operand::*;

    let arities = arities(mnemonic).ok_or_else(|| {
        AssemblerError::at(line_no, format!("unknown instruction '{}'", mnemonic))
    })?;
    if !arities.contains(&arguments.len()) {
        let expected = arities
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(" or ");
        return Err(AssemblerError::at(
            line_no,
            format!(
                "{} expects {} operand(s), got {}",
                mnemonic,
                expected,
                arguments.len()
            ),
        ));
    }

    let operands = arguments
        .iter()
        .map(|arg| parse_operand(arg, labels, line_no))
        .collect::<Result<Vec<_>, _>>()?;

    let instruction = match (mnemonic, operands.as_slice()) {
        ("CLS", []) => Clear,
        ("RET", []) => Return,
        ("EXIT", []) => Exit,
        // 00E0, 00EE and 00FD are CLS, RET and EXIT, not machine calls
        ("SYS", [Value(a @ (0x0E0 | 0x0EE | 0x0FD))]) => {
            return Err(AssemblerError::at(
                line_no,
                format!("SYS {:#05X} collides with a built-in instruction", a),
            ))
        }
        ("SYS", [Value(a)]) => Sys { nnn: address(*a, line_no)? },
        ("JP", [Value(a)]) => Jump { nnn: address(*a, line_no)? },
        ("JP", [Register(0), Value(a)]) => JumpOffset { nnn: address(*a, line_no)? },
        // Bxnn, for interpreters that jump off Vx
        ("JP", [Register(x), Value(nn)]) => JumpOffset {
            nnn: (*x as u16) << 8 | u16::from(byte(*nn, line_no)?),
        },
        ("CALL", [Value(a)]) => Call { nnn: address(*a, line_no)? },
        ("SE", [Register(x), Register(y)]) => SkipEqReg { x: *x, y: *y },
        ("SE", [Register(x), Value(nn)]) => SkipEqByte { x: *x, nn: byte(*nn, line_no)? },
        ("SNE", [Register(x), Register(y)]) => SkipNeReg { x: *x, y: *y },
        ("SNE", [Register(x), Value(nn)]) => SkipNeByte { x: *x, nn: byte(*nn, line_no)? },
        ("LD", [Register(x), Register(y)]) => Move { x: *x, y: *y },
        ("LD", [Register(x), Value(nn)]) => LoadByte { x: *x, nn: byte(*nn, line_no)? },
        ("LD", [Register(x), Delay]) => LoadDelay { x: *x },
        ("LD", [Register(x), Key]) => WaitKey { x: *x },
        ("LD", [Register(x), Indirect]) => LoadRegisters { x: *x },
        ("LD", [Index, Value(a)]) => LoadIndex { nnn: address(*a, line_no)? },
        ("LD", [Delay, Register(x)]) => SetDelay { x: *x },
        ("LD", [Sound, Register(x)]) => SetSound { x: *x },
        ("LD", [Glyph, Register(x)]) => LoadGlyph { x: *x },
        ("LD", [Bcd, Register(x)]) => StoreBcd { x: *x },
        ("LD", [Indirect, Register(x)]) => StoreRegisters { x: *x },
        ("ADD", [Index, Register(x)]) => AddIndex { x: *x },
        ("ADD", [Register(x), Register(y)]) => AddReg { x: *x, y: *y },
        ("ADD", [Register(x), Value(nn)]) => AddByte { x: *x, nn: byte(*nn, line_no)? },
        ("OR", [Register(x), Register(y)]) => Or { x: *x, y: *y },
        ("AND", [Register(x), Register(y)]) => And { x: *x, y: *y },
        ("XOR", [Register(x), Register(y)]) => Xor { x: *x, y: *y },
        ("SUB", [Register(x), Register(y)]) => Sub { x: *x, y: *y },
        ("SUBN", [Register(x), Register(y)]) => SubN { x: *x, y: *y },
        ("SHR", [Register(x)]) => ShiftRight { x: *x, y: *x },
        ("SHR", [Register(x), Register(y)]) => ShiftRight { x: *x, y: *y },
        ("SHL", [Register(x)]) => ShiftLeft { x: *x, y: *x },
        ("SHL", [Register(x), Register(y)]) => ShiftLeft { x: *x, y: *y },
        ("RND", [Register(x), Value(nn)]) => Random { x: *x, nn: byte(*nn, line_no)? },
        ("DRW", [Register(x), Register(y), Value(n)]) => Draw {
            x: *x,
            y: *y,
            n: nibble(*n, line_no)?,
        },
        ("SKP", [Register(x)]) => SkipPressed { x: *x },
        ("SKNP", [Register(x)]) => SkipNotPressed { x: *x },
        _ => {
            return Err(AssemblerError::at(
                line_no,
                format!("unsupported operands for {}: {}", mnemonic, arguments.join(", ")),
            ))
        }
    };
    Ok(instruction.encode())
}
