//! # Addressing Modes
//!
//! This module defines the addressing modes understood by the assembler. Each
//! mode fixes the operand syntax accepted in source and the number of operand
//! bytes emitted after the opcode.

use std::fmt;

/// 6502 addressing mode enumeration.
///
/// The addressing mode determines which opcode a mnemonic assembles to and
/// how many operand bytes follow it in the output.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR A, ROL A, ASL A
    Accumulator,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate,

    /// 8-bit address in zero page, written `$80` or `*$80`.
    ZeroPage,

    /// Zero page address indexed by X register.
    ///
    /// Example: LDA $80,X
    ZeroPageX,

    /// Zero page address indexed by Y register.
    ///
    /// Example: LDX $80,Y
    ZeroPageY,

    /// Signed 8-bit displacement to a named label. Branch instructions only.
    ///
    /// Example: BEQ label
    Relative,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute,

    /// 16-bit address indexed by X register.
    ///
    /// Example: LDA $1234,X
    AbsoluteX,

    /// 16-bit address indexed by Y register.
    ///
    /// Example: LDA $1234,Y
    AbsoluteY,

    /// Indirect jump through 16-bit pointer.
    ///
    /// Example: JMP ($FFFC)
    Indirect,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY,
}

impl AddressingMode {
    /// Number of operand bytes emitted after the opcode for this mode.
    pub const fn operand_size(self) -> usize {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::Relative
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AddressingMode::Implicit => "implied",
            AddressingMode::Accumulator => "accumulator",
            AddressingMode::Immediate => "immediate",
            AddressingMode::ZeroPage => "zero page",
            AddressingMode::ZeroPageX => "zero page,X",
            AddressingMode::ZeroPageY => "zero page,Y",
            AddressingMode::Relative => "relative",
            AddressingMode::Absolute => "absolute",
            AddressingMode::AbsoluteX => "absolute,X",
            AddressingMode::AbsoluteY => "absolute,Y",
            AddressingMode::Indirect => "indirect",
            AddressingMode::IndirectX => "(indirect,X)",
            AddressingMode::IndirectY => "(indirect),Y",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operand_sizes() {
        assert_eq!(AddressingMode::Implicit.operand_size(), 0);
        assert_eq!(AddressingMode::Accumulator.operand_size(), 0);
        assert_eq!(AddressingMode::Immediate.operand_size(), 1);
        assert_eq!(AddressingMode::ZeroPageY.operand_size(), 1);
        assert_eq!(AddressingMode::Relative.operand_size(), 1);
        assert_eq!(AddressingMode::IndirectY.operand_size(), 1);
        assert_eq!(AddressingMode::AbsoluteX.operand_size(), 2);
        assert_eq!(AddressingMode::Indirect.operand_size(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(AddressingMode::Immediate.to_string(), "immediate");
        assert_eq!(AddressingMode::IndirectX.to_string(), "(indirect,X)");
    }
}
