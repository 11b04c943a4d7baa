//! # Opcode Table
//!
//! This module contains the mnemonic-keyed opcode table that serves as the
//! single source of truth for instruction encoding.
//!
//! The table covers the 56 documented NMOS 6502 mnemonics and their 151
//! documented opcodes. Undocumented opcodes are not assembled.
//!
//! Entries are sorted by mnemonic so lookups are a binary search, and every
//! entry lists its encodings in a fixed order, so nothing about assembly depends
//! on hash iteration order.

use crate::addressing::AddressingMode::{self, *};

/// Encodings for a single mnemonic.
///
/// # Examples
///
/// ```
/// use nessmith::{opcodes, AddressingMode};
///
/// let lda = opcodes::entry("LDA").unwrap();
/// assert_eq!(lda.mnemonic, "lda");
/// assert_eq!(lda.opcode(AddressingMode::Immediate), Some(0xA9));
/// assert_eq!(lda.opcode(AddressingMode::Accumulator), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    /// Lowercase instruction mnemonic (e.g., "lda").
    pub mnemonic: &'static str,

    /// Supported addressing modes paired with their opcode byte.
    ///
    /// Never empty.
    pub encodings: &'static [(AddressingMode, u8)],
}

impl OpcodeEntry {
    /// Opcode byte for `mode`, if this mnemonic supports it.
    pub fn opcode(&self, mode: AddressingMode) -> Option<u8> {
        self.encodings
            .iter()
            .find(|(m, _)| *m == mode)
            .map(|(_, opcode)| *opcode)
    }

    /// Addressing modes this mnemonic can be assembled with, in table order.
    pub fn modes(&self) -> impl Iterator<Item = AddressingMode> + '_ {
        self.encodings.iter().map(|(mode, _)| *mode)
    }

    /// Whether this is one of the eight relative-branch instructions.
    pub fn is_branch(&self) -> bool {
        self.opcode(Relative).is_some()
    }
}

/// Complete opcode table, sorted by mnemonic.
pub static OPCODE_TABLE: [OpcodeEntry; 56] = [
    OpcodeEntry {
        mnemonic: "adc",
        encodings: &[
            (Immediate, 0x69),
            (ZeroPage, 0x65),
            (ZeroPageX, 0x75),
            (Absolute, 0x6D),
            (AbsoluteX, 0x7D),
            (AbsoluteY, 0x79),
            (IndirectX, 0x61),
            (IndirectY, 0x71),
        ],
    },
    OpcodeEntry {
        mnemonic: "and",
        encodings: &[
            (Immediate, 0x29),
            (ZeroPage, 0x25),
            (ZeroPageX, 0x35),
            (Absolute, 0x2D),
            (AbsoluteX, 0x3D),
            (AbsoluteY, 0x39),
            (IndirectX, 0x21),
            (IndirectY, 0x31),
        ],
    },
    OpcodeEntry {
        mnemonic: "asl",
        encodings: &[
            (Accumulator, 0x0A),
            (ZeroPage, 0x06),
            (ZeroPageX, 0x16),
            (Absolute, 0x0E),
            (AbsoluteX, 0x1E),
        ],
    },
    OpcodeEntry {
        mnemonic: "bcc",
        encodings: &[(Relative, 0x90)],
    },
    OpcodeEntry {
        mnemonic: "bcs",
        encodings: &[(Relative, 0xB0)],
    },
    OpcodeEntry {
        mnemonic: "beq",
        encodings: &[(Relative, 0xF0)],
    },
    OpcodeEntry {
        mnemonic: "bit",
        encodings: &[(ZeroPage, 0x24), (Absolute, 0x2C)],
    },
    OpcodeEntry {
        mnemonic: "bmi",
        encodings: &[(Relative, 0x30)],
    },
    OpcodeEntry {
        mnemonic: "bne",
        encodings: &[(Relative, 0xD0)],
    },
    OpcodeEntry {
        mnemonic: "bpl",
        encodings: &[(Relative, 0x10)],
    },
    OpcodeEntry {
        mnemonic: "brk",
        encodings: &[(Implicit, 0x00)],
    },
    OpcodeEntry {
        mnemonic: "bvc",
        encodings: &[(Relative, 0x50)],
    },
    OpcodeEntry {
        mnemonic: "bvs",
        encodings: &[(Relative, 0x70)],
    },
    OpcodeEntry {
        mnemonic: "clc",
        encodings: &[(Implicit, 0x18)],
    },
    OpcodeEntry {
        mnemonic: "cld",
        encodings: &[(Implicit, 0xD8)],
    },
    OpcodeEntry {
        mnemonic: "cli",
        encodings: &[(Implicit, 0x58)],
    },
    OpcodeEntry {
        mnemonic: "clv",
        encodings: &[(Implicit, 0xB8)],
    },
    OpcodeEntry {
        mnemonic: "cmp",
        encodings: &[
            (Immediate, 0xC9),
            (ZeroPage, 0xC5),
            (ZeroPageX, 0xD5),
            (Absolute, 0xCD),
            (AbsoluteX, 0xDD),
            (AbsoluteY, 0xD9),
            (IndirectX, 0xC1),
            (IndirectY, 0xD1),
        ],
    },
    OpcodeEntry {
        mnemonic: "cpx",
        encodings: &[(Immediate, 0xE0), (ZeroPage, 0xE4), (Absolute, 0xEC)],
    },
    OpcodeEntry {
        mnemonic: "cpy",
        encodings: &[(Immediate, 0xC0), (ZeroPage, 0xC4), (Absolute, 0xCC)],
    },
    OpcodeEntry {
        mnemonic: "dec",
        encodings: &[
            (ZeroPage, 0xC6),
            (ZeroPageX, 0xD6),
            (Absolute, 0xCE),
            (AbsoluteX, 0xDE),
        ],
    },
    OpcodeEntry {
        mnemonic: "dex",
        encodings: &[(Implicit, 0xCA)],
    },
    OpcodeEntry {
        mnemonic: "dey",
        encodings: &[(Implicit, 0x88)],
    },
    OpcodeEntry {
        mnemonic: "eor",
        encodings: &[
            (Immediate, 0x49),
            (ZeroPage, 0x45),
            (ZeroPageX, 0x55),
            (Absolute, 0x4D),
            (AbsoluteX, 0x5D),
            (AbsoluteY, 0x59),
            (IndirectX, 0x41),
            (IndirectY, 0x51),
        ],
    },
    OpcodeEntry {
        mnemonic: "inc",
        encodings: &[
            (ZeroPage, 0xE6),
            (ZeroPageX, 0xF6),
            (Absolute, 0xEE),
            (AbsoluteX, 0xFE),
        ],
    },
    OpcodeEntry {
        mnemonic: "inx",
        encodings: &[(Implicit, 0xE8)],
    },
    OpcodeEntry {
        mnemonic: "iny",
        encodings: &[(Implicit, 0xC8)],
    },
    OpcodeEntry {
        mnemonic: "jmp",
        encodings: &[(Absolute, 0x4C), (Indirect, 0x6C)],
    },
    OpcodeEntry {
        mnemonic: "jsr",
        encodings: &[(Absolute, 0x20)],
    },
    OpcodeEntry {
        mnemonic: "lda",
        encodings: &[
            (Immediate, 0xA9),
            (ZeroPage, 0xA5),
            (ZeroPageX, 0xB5),
            (Absolute, 0xAD),
            (AbsoluteX, 0xBD),
            (AbsoluteY, 0xB9),
            (IndirectX, 0xA1),
            (IndirectY, 0xB1),
        ],
    },
    OpcodeEntry {
        mnemonic: "ldx",
        encodings: &[
            (Immediate, 0xA2),
            (ZeroPage, 0xA6),
            (ZeroPageY, 0xB6),
            (Absolute, 0xAE),
            (AbsoluteY, 0xBE),
        ],
    },
    OpcodeEntry {
        mnemonic: "ldy",
        encodings: &[
            (Immediate, 0xA0),
            (ZeroPage, 0xA4),
            (ZeroPageX, 0xB4),
            (Absolute, 0xAC),
            (AbsoluteX, 0xBC),
        ],
    },
    OpcodeEntry {
        mnemonic: "lsr",
        encodings: &[
            (Accumulator, 0x4A),
            (ZeroPage, 0x46),
            (ZeroPageX, 0x56),
            (Absolute, 0x4E),
            (AbsoluteX, 0x5E),
        ],
    },
    OpcodeEntry {
        mnemonic: "nop",
        encodings: &[(Implicit, 0xEA)],
    },
    OpcodeEntry {
        mnemonic: "ora",
        encodings: &[
            (Immediate, 0x09),
            (ZeroPage, 0x05),
            (ZeroPageX, 0x15),
            (Absolute, 0x0D),
            (AbsoluteX, 0x1D),
            (AbsoluteY, 0x19),
            (IndirectX, 0x01),
            (IndirectY, 0x11),
        ],
    },
    OpcodeEntry {
        mnemonic: "pha",
        encodings: &[(Implicit, 0x48)],
    },
    OpcodeEntry {
        mnemonic: "php",
        encodings: &[(Implicit, 0x08)],
    },
    OpcodeEntry {
        mnemonic: "pla",
        encodings: &[(Implicit, 0x68)],
    },
    OpcodeEntry {
        mnemonic: "plp",
        encodings: &[(Implicit, 0x28)],
    },
    OpcodeEntry {
        mnemonic: "rol",
        encodings: &[
            (Accumulator, 0x2A),
            (ZeroPage, 0x26),
            (ZeroPageX, 0x36),
            (Absolute, 0x2E),
            (AbsoluteX, 0x3E),
        ],
    },
    OpcodeEntry {
        mnemonic: "ror",
        encodings: &[
            (Accumulator, 0x6A),
            (ZeroPage, 0x66),
            (ZeroPageX, 0x76),
            (Absolute, 0x6E),
            (AbsoluteX, 0x7E),
        ],
    },
    OpcodeEntry {
        mnemonic: "rti",
        encodings: &[(Implicit, 0x40)],
    },
    OpcodeEntry {
        mnemonic: "rts",
        encodings: &[(Implicit, 0x60)],
    },
    OpcodeEntry {
        mnemonic: "sbc",
        encodings: &[
            (Immediate, 0xE9),
            (ZeroPage, 0xE5),
            (ZeroPageX, 0xF5),
            (Absolute, 0xED),
            (AbsoluteX, 0xFD),
            (AbsoluteY, 0xF9),
            (IndirectX, 0xE1),
            (IndirectY, 0xF1),
        ],
    },
    OpcodeEntry {
        mnemonic: "sec",
        encodings: &[(Implicit, 0x38)],
    },
    OpcodeEntry {
        mnemonic: "sed",
        encodings: &[(Implicit, 0xF8)],
    },
    OpcodeEntry {
        mnemonic: "sei",
        encodings: &[(Implicit, 0x78)],
    },
    OpcodeEntry {
        mnemonic: "sta",
        encodings: &[
            (ZeroPage, 0x85),
            (ZeroPageX, 0x95),
            (Absolute, 0x8D),
            (AbsoluteX, 0x9D),
            (AbsoluteY, 0x99),
            (IndirectX, 0x81),
            (IndirectY, 0x91),
        ],
    },
    OpcodeEntry {
        mnemonic: "stx",
        encodings: &[(ZeroPage, 0x86), (ZeroPageY, 0x96), (Absolute, 0x8E)],
    },
    OpcodeEntry {
        mnemonic: "sty",
        encodings: &[(ZeroPage, 0x84), (ZeroPageX, 0x94), (Absolute, 0x8C)],
    },
    OpcodeEntry {
        mnemonic: "tax",
        encodings: &[(Implicit, 0xAA)],
    },
    OpcodeEntry {
        mnemonic: "tay",
        encodings: &[(Implicit, 0xA8)],
    },
    OpcodeEntry {
        mnemonic: "tsx",
        encodings: &[(Implicit, 0xBA)],
    },
    OpcodeEntry {
        mnemonic: "txa",
        encodings: &[(Implicit, 0x8A)],
    },
    OpcodeEntry {
        mnemonic: "txs",
        encodings: &[(Implicit, 0x9A)],
    },
    OpcodeEntry {
        mnemonic: "tya",
        encodings: &[(Implicit, 0x98)],
    },
];

/// Find the table entry for a mnemonic (case-insensitive).
pub fn entry(mnemonic: &str) -> Option<&'static OpcodeEntry> {
    let key = mnemonic.to_ascii_lowercase();
    OPCODE_TABLE
        .binary_search_by(|e| e.mnemonic.cmp(key.as_str()))
        .ok()
        .map(|idx| &OPCODE_TABLE[idx])
}

/// Look up the opcode byte for a mnemonic in a given addressing mode.
///
/// Returns `None` both for unknown mnemonics and for known mnemonics that have
/// no encoding in `mode` (e.g., `ASL` with `Immediate`).
///
/// # Examples
///
/// ```
/// use nessmith::{opcodes, AddressingMode};
///
/// assert_eq!(opcodes::lookup("lda", AddressingMode::Absolute), Some(0xAD));
/// assert_eq!(opcodes::lookup("asl", AddressingMode::Immediate), None);
/// assert_eq!(opcodes::lookup("jhg", AddressingMode::Implicit), None);
/// ```
pub fn lookup(mnemonic: &str, mode: AddressingMode) -> Option<u8> {
    entry(mnemonic).and_then(|e| e.opcode(mode))
}

/// Opcode byte for a relative-branch mnemonic (BEQ, BNE, BPL, BMI, BVC, BVS, BCC, BCS).
pub fn branch_opcode(mnemonic: &str) -> Option<u8> {
    lookup(mnemonic, Relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_encodings() {
        assert_eq!(lookup("brk", Implicit), Some(0x00));
        assert_eq!(lookup("lda", Absolute), Some(0xAD));
        assert_eq!(lookup("LDA", Absolute), Some(0xAD));
        assert_eq!(lookup("adc", IndirectX), Some(0x61));
        assert_eq!(lookup("jmp", Indirect), Some(0x6C));
        assert_eq!(lookup("stx", ZeroPageY), Some(0x96));
    }

    #[test]
    fn test_lookup_missing_mode() {
        assert_eq!(lookup("asl", Immediate), None);
        assert_eq!(lookup("sta", Immediate), None);
        assert_eq!(lookup("jmp", ZeroPage), None);
    }

    #[test]
    fn test_branch_opcodes() {
        assert_eq!(branch_opcode("beq"), Some(0xF0));
        assert_eq!(branch_opcode("BNE"), Some(0xD0));
        assert_eq!(branch_opcode("jmp"), None);
        assert!(entry("bcs").unwrap().is_branch());
        assert!(!entry("lda").unwrap().is_branch());
    }

    #[test]
    fn test_unknown_mnemonic() {
        assert!(entry("jhg").is_none());
        assert!(entry("").is_none());
        assert!(entry("Nop").is_some());
    }
}
