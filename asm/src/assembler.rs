use std::fs;
use std::path::Path;

use crate::encoding::{encode_instruction, ensure_range, parse_number, parse_value, Labels};
use crate::error::AssemblerError;

/// One line of source with its labels and comment already stripped
#[derive(Debug, Clone, PartialEq, Eq)]
enum Statement {
    /// ORG addr; continue assembling at addr, padding with zeros
    Org(String),
    /// DB byte, 'c', "string", ...
    Bytes(Vec<String>),
    /// DW word, ...; big-endian
    Words(Vec<String>),
    Instruction {
        mnemonic: String,
        arguments: Vec<String>,
    },
}

#[derive(Debug, Clone)]
struct Line {
    line_no: usize,
    statement: Statement,
}

/// Assembles the source file at `path` for a program loaded at `origin`
pub fn assemble_file(path: impl AsRef<Path>, origin: usize) -> Result<Vec<u8>, AssemblerError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| {
        AssemblerError::new(format!("failed to read {}: {}", path.display(), e), None)
    })?;
    assemble_text(&source, origin)
}

/// Assembles `source` for a program loaded at `origin`
///
/// The first pass collects statements and gives every label an address, the second encodes
/// them now that forward references can be resolved.
pub fn assemble_text(source: &str, origin: usize) -> Result<Vec<u8>, AssemblerError> {
    let (lines, labels) = parse(source, origin)?;
    emit(&lines, &labels, origin)
}

fn parse(source: &str, origin: usize) -> Result<(Vec<Line>, Labels), AssemblerError> {
    let mut lines = Vec::new();
    let mut labels = Labels::new();
    let mut address = origin;

    for (index, raw) in source.lines().enumerate() {
        let line_no = index + 1;
        let (line_labels, rest) = split_labels(strip_comment(raw).trim(), line_no)?;

        for label in line_labels {
            if labels.insert(label.to_string(), address).is_some() {
                return Err(AssemblerError::at(
                    line_no,
                    format!("duplicate label '{}'", label),
                ));
            }
        }
        if rest.is_empty() {
            continue;
        }

        let statement = parse_statement(rest);
        address = match &statement {
            Statement::Org(target) => org_target(target, origin, address, line_no)?,
            Statement::Bytes(arguments) => address + count_bytes(arguments, line_no)?,
            Statement::Words(arguments) if arguments.is_empty() => {
                return Err(AssemblerError::at(line_no, "DW expects at least one value"))
            }
            Statement::Words(arguments) => address + 2 * arguments.len(),
            Statement::Instruction { .. } => address + 2,
        };
        lines.push(Line { line_no, statement });
    }

    Ok((lines, labels))
}

fn emit(lines: &[Line], labels: &Labels, origin: usize) -> Result<Vec<u8>, AssemblerError> {
    let mut rom = Vec::new();

    for Line { line_no, statement } in lines {
        let line_no = *line_no;
        match statement {
            Statement::Org(target) => {
                let target = org_target(target, origin, origin + rom.len(), line_no)?;
                rom.resize(target - origin, 0);
            }
            Statement::Bytes(arguments) => {
                for argument in arguments {
                    match string_literal(argument) {
                        Some(text) => rom.extend(text.chars().map(|ch| (u32::from(ch) & 0xFF) as u8)),
                        None => {
                            let value = parse_value(argument, labels, line_no)?;
                            rom.push(ensure_range(value, 0xFF, "byte", line_no)? as u8);
                        }
                    }
                }
            }
            Statement::Words(arguments) => {
                for argument in arguments {
                    let value = parse_value(argument, labels, line_no)?;
                    let word = ensure_range(value, 0xFFFF, "word", line_no)? as u16;
                    rom.extend_from_slice(&word.to_be_bytes());
                }
            }
            Statement::Instruction {
                mnemonic,
                arguments,
            } => {
                let opcode = encode_instruction(mnemonic, arguments, labels, line_no)?;
                rom.extend_from_slice(&opcode.to_be_bytes());
            }
        }
    }

    Ok(rom)
}

/// The address an ORG moves to; it can't go below the origin or backwards
fn org_target(
    target: &str,
    origin: usize,
    current: usize,
    line_no: usize,
) -> Result<usize, AssemblerError> {
    let target = parse_number(target)
        .and_then(|t| usize::try_from(t).ok())
        .ok_or_else(|| AssemblerError::at(line_no, format!("invalid ORG address '{}'", target)))?;
    if target < origin {
        return Err(AssemblerError::at(
            line_no,
            format!("ORG {:#05X} is below the origin {:#05X}", target, origin),
        ));
    }
    if target < current {
        return Err(AssemblerError::at(
            line_no,
            format!("ORG {:#05X} would move backwards from {:#05X}", target, current),
        ));
    }
    Ok(target)
}

fn count_bytes(arguments: &[String], line_no: usize) -> Result<usize, AssemblerError> {
    let count: usize = arguments
        .iter()
        .map(|arg| string_literal(arg).map_or(1, |text| text.chars().count()))
        .sum();
    if count == 0 {
        return Err(AssemblerError::at(line_no, "DB expects at least one byte"));
    }
    Ok(count)
}

fn parse_statement(text: &str) -> Statement {
    let (head, tail) = match text.split_once(char::is_whitespace) {
        Some((head, tail)) => (head, tail.trim()),
        None => (text, ""),
    };
    let arguments = split_arguments(tail);
    let mnemonic = head.trim_start_matches('.').to_ascii_uppercase();

    match mnemonic.as_str() {
        "ORG" if arguments.len() == 1 => Statement::Org(arguments[0].clone()),
        "ORG" => Statement::Org(tail.to_string()),
        "DB" => Statement::Bytes(arguments),
        "DW" => Statement::Words(arguments),
        _ => Statement::Instruction {
            mnemonic,
            arguments,
        },
    }
}

/// Opens or closes quoting at `ch`; only the quote that opened can close
fn track_quote(quote: &mut Option<char>, ch: char) {
    if ch == '\'' || ch == '"' {
        match *quote {
            None => *quote = Some(ch),
            Some(open) if open == ch => *quote = None,
            Some(_) => {}
        }
    }
}

/// Drops everything from the first `;` or `#` that isn't inside quotes
fn strip_comment(line: &str) -> &str {
    let mut quote = None;
    for (index, ch) in line.char_indices() {
        track_quote(&mut quote, ch);
        if quote.is_none() && (ch == ';' || ch == '#') {
            return &line[..index];
        }
    }
    line
}

/// Splits leading `name:` labels off a line
fn split_labels(line: &str, line_no: usize) -> Result<(Vec<&str>, &str), AssemblerError> {
    let mut labels = Vec::new();
    let mut rest = line;

    while let Some((label, after)) = rest.split_once(':') {
        let label = label.trim();
        // a colon further along, e.g. inside a string, isn't a label
        if label.is_empty() || label.contains(char::is_whitespace) || label.contains(['\'', '"']) {
            break;
        }
        validate_label(label, line_no)?;
        labels.push(label);
        rest = after.trim();
    }

    Ok((labels, rest))
}

fn validate_label(label: &str, line_no: usize) -> Result<(), AssemblerError> {
    let mut chars = label.chars();
    let starts_well = chars
        .next()
        .map_or(false, |ch| ch.is_ascii_alphabetic() || ch == '_');
    if starts_well && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        Ok(())
    } else {
        Err(AssemblerError::at(
            line_no,
            format!("invalid label '{}'", label),
        ))
    }
}

/// Splits operands on commas outside of quotes
fn split_arguments(text: &str) -> Vec<String> {
    let mut arguments = Vec::new();
    let mut current = String::new();
    let mut quote = None;

    for ch in text.chars() {
        track_quote(&mut quote, ch);
        if ch == ',' && quote.is_none() {
            arguments.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    arguments.push(current.trim().to_string());
    arguments.retain(|arg| !arg.is_empty());
    arguments
}

/// The contents of a quoted string of any length other than a single character
fn string_literal(token: &str) -> Option<&str> {
    let token = token.trim();
    let quote = token.chars().next().filter(|ch| *ch == '\'' || *ch == '"')?;
    let inner = token.strip_prefix(quote)?.strip_suffix(quote)?;
    if quote == '\'' && inner.chars().count() == 1 {
        return None;
    }
    Some(inner)
}
