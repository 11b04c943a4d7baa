//! Operand parser: maps operand text to an addressing mode
//!
//! Operands use a single canonical grammar. Every byte is written as exactly
//! two hexadecimal digits (any case) after a `$`; the number of digit pairs
//! decides between zero-page and absolute forms, so `$0041` is always absolute.
//!
//! | Text          | Mode        |
//! |---------------|-------------|
//! | (empty)       | Implicit    |
//! | `a`           | Accumulator |
//! | `#$hh`        | Immediate   |
//! | `$hh` `*$hh`  | ZeroPage    |
//! | `$hh,x`       | ZeroPageX   |
//! | `$hh,y`       | ZeroPageY   |
//! | `$hhhh`       | Absolute    |
//! | `$hhhh,x`     | AbsoluteX   |
//! | `$hhhh,y`     | AbsoluteY   |
//! | `($hhhh)`     | Indirect    |
//! | `($hh,x)`     | IndirectX   |
//! | `($hh),y`     | IndirectY   |
//!
//! The `*` zero-page prefix is also accepted on the indexed zero-page forms.

use crate::addressing::AddressingMode;

/// A matched operand: its addressing mode and the bytes to emit after the opcode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    /// Addressing mode selected by the operand syntax
    pub mode: AddressingMode,

    /// Operand bytes in emission (little-endian) order
    pub bytes: Vec<u8>,
}

impl Operand {
    fn new(mode: AddressingMode, bytes: Vec<u8>) -> Self {
        Operand { mode, bytes }
    }
}

/// A `$`-prefixed hex literal, sized by its digit count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Literal {
    Byte(u8),
    Word(u16),
}

impl Literal {
    fn byte(self) -> Option<u8> {
        match self {
            Literal::Byte(value) => Some(value),
            Literal::Word(_) => None,
        }
    }

    fn word(self) -> Option<u16> {
        match self {
            Literal::Word(value) => Some(value),
            Literal::Byte(_) => None,
        }
    }
}

/// Parse `$hh` or `$hhhh` (nothing more, nothing less)
fn parse_literal(text: &str) -> Option<Literal> {
    let digits = text.strip_prefix('$')?;

    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    match digits.len() {
        2 => u8::from_str_radix(digits, 16).ok().map(Literal::Byte),
        4 => u16::from_str_radix(digits, 16).ok().map(Literal::Word),
        _ => None,
    }
}

/// Match parenthesized operands: `($hhhh)`, `($hh,x)`, `($hh),y`
fn match_indirect(text: &str) -> Option<Operand> {
    let inner = text.strip_prefix('(')?;

    if let Some(pointer) = inner.strip_suffix("),y") {
        let zp = parse_literal(pointer)?.byte()?;
        return Some(Operand::new(AddressingMode::IndirectY, vec![zp]));
    }

    if let Some(pointer) = inner.strip_suffix(",x)") {
        let zp = parse_literal(pointer)?.byte()?;
        return Some(Operand::new(AddressingMode::IndirectX, vec![zp]));
    }

    let pointer = inner.strip_suffix(')')?;
    let addr = parse_literal(pointer)?.word()?;
    Some(Operand::new(
        AddressingMode::Indirect,
        addr.to_le_bytes().to_vec(),
    ))
}

/// Match direct operands: zero-page and absolute, optionally indexed
fn match_direct(text: &str) -> Option<Operand> {
    let (forced_zp, text) = match text.strip_prefix('*') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (literal, index) = match text.split_once(',') {
        Some((literal, index)) => (literal, Some(index)),
        None => (text, None),
    };

    match (parse_literal(literal)?, index) {
        (Literal::Byte(zp), None) => Some(Operand::new(AddressingMode::ZeroPage, vec![zp])),
        (Literal::Byte(zp), Some("x")) => Some(Operand::new(AddressingMode::ZeroPageX, vec![zp])),
        (Literal::Byte(zp), Some("y")) => Some(Operand::new(AddressingMode::ZeroPageY, vec![zp])),
        (Literal::Word(_), _) if forced_zp => None,
        (Literal::Word(addr), None) => Some(Operand::new(
            AddressingMode::Absolute,
            addr.to_le_bytes().to_vec(),
        )),
        (Literal::Word(addr), Some("x")) => Some(Operand::new(
            AddressingMode::AbsoluteX,
            addr.to_le_bytes().to_vec(),
        )),
        (Literal::Word(addr), Some("y")) => Some(Operand::new(
            AddressingMode::AbsoluteY,
            addr.to_le_bytes().to_vec(),
        )),
        _ => None,
    }
}

/// Determine the addressing mode of an operand and extract its bytes.
///
/// `text` is the operand portion of an instruction with whitespace already
/// removed. Matching is case-insensitive. Returns `None` when the text matches
/// none of the operand grammars; the encoder reports that as an invalid operand.
///
/// # Examples
///
/// ```
/// use nessmith::assembler::parser::match_operand;
/// use nessmith::AddressingMode;
///
/// let operand = match_operand("$ABCD").unwrap();
/// assert_eq!(operand.mode, AddressingMode::Absolute);
/// assert_eq!(operand.bytes, vec![0xCD, 0xAB]);
///
/// assert!(match_operand("$123432").is_none());
/// ```
pub fn match_operand(text: &str) -> Option<Operand> {
    let text = text.to_ascii_lowercase();

    match text.as_str() {
        "" => Some(Operand::new(AddressingMode::Implicit, Vec::new())),
        "a" => Some(Operand::new(AddressingMode::Accumulator, Vec::new())),
        _ => {
            if let Some(value) = text.strip_prefix('#') {
                let imm = parse_literal(value)?.byte()?;
                Some(Operand::new(AddressingMode::Immediate, vec![imm]))
            } else if text.starts_with('(') {
                match_indirect(&text)
            } else {
                match_direct(&text)
            }
        }
    }
}
