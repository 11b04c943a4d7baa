//! Property-based tests for the assembler.
//!
//! These tests verify assembler invariants like:
//! - Operands are emitted little-endian, whatever the digit case
//! - Branch displacements match the 6502 relative-branch rule
//! - Comments never change the output
//! - No panics on malformed input
//! - Identical input always yields identical output

use nessmith::{assemble, assemble_with, AssemblerOptions, BranchPolicy, ErrorKind};
use proptest::prelude::*;

// ========== Operand Encoding Tests ==========

proptest! {
    /// Property: Immediate values are emitted verbatim
    #[test]
    fn prop_immediate_value(value in 0u8..=255u8) {
        let bytes = assemble(&format!("LDA #${:02X}", value)).unwrap();
        prop_assert_eq!(bytes, vec![0xA9, value]);
    }

    /// Property: Absolute addresses are emitted low byte first, in either digit case
    #[test]
    fn prop_absolute_little_endian(addr in 0u16..=0xFFFF, upper in any::<bool>()) {
        let source = if upper {
            format!("STA ${:04X}", addr)
        } else {
            format!("sta ${:04x}", addr)
        };

        let bytes = assemble(&source).unwrap();
        let [lo, hi] = addr.to_le_bytes();
        prop_assert_eq!(bytes, vec![0x8D, lo, hi]);
    }

    /// Property: Literals with the wrong number of digits are rejected, never truncated
    #[test]
    fn prop_bad_digit_count_rejected(value in 0u32..0x0100_0000, width in prop::sample::select(vec![1usize, 3, 5, 6])) {
        let digits = format!("{:06X}", value);
        let source = format!("LDA ${}", &digits[6 - width..]);

        let err = assemble(&source).unwrap_err();
        let is_invalid_operand = matches!(err.kind, ErrorKind::InvalidOperand { .. });
        prop_assert!(is_invalid_operand);
    }
}

// ========== Label Resolution Tests ==========

proptest! {
    /// Property: Forward branches resolve to the number of bytes skipped
    #[test]
    fn prop_forward_branch(skip in 0usize..=127) {
        let source = format!("BNE target\n{}target:\nRTS", "NOP\n".repeat(skip));

        let bytes = assemble(&source).unwrap();
        prop_assert_eq!(bytes[0], 0xD0);
        prop_assert_eq!(bytes[1] as usize, skip);
    }

    /// Property: Backward branches resolve to a two's-complement displacement
    #[test]
    fn prop_backward_branch(skip in 0usize..=126) {
        let source = format!("loop:\n{}BEQ loop", "NOP\n".repeat(skip));

        let bytes = assemble(&source).unwrap();
        let expected = -((skip as i64) + 2);
        prop_assert_eq!(bytes[skip + 1], expected as i8 as u8);
    }

    /// Property: Wrapping matches modulo-256 arithmetic at any distance
    #[test]
    fn prop_wrap_policy_modulo(skip in 0usize..600) {
        let source = format!("BCC target\n{}target:", "NOP\n".repeat(skip));
        let options = AssemblerOptions { branch_policy: BranchPolicy::Wrap };

        let output = assemble_with(&source, &options).unwrap();
        prop_assert_eq!(output.bytes[1], (skip % 256) as u8);
        prop_assert_eq!(output.lookup_symbol_offset("target"), Some(skip + 2));
    }
}

// ========== Robustness Tests ==========

proptest! {
    /// Property: Arbitrary input never panics
    #[test]
    fn prop_no_panic_on_arbitrary_input(source in "\\PC{0,200}") {
        let _ = assemble(&source);
    }

    /// Property: Assembly-like noise never panics
    #[test]
    fn prop_no_panic_on_operand_noise(op in "[#$*(),xyXYa0-9a-fA-F]{0,12}") {
        let _ = assemble(&format!("LDA {}", op));
        let _ = assemble(&format!("JMP {}", op));
        let _ = assemble(&format!("BEQ {}", op));
    }

    /// Property: Trailing comments never change output
    #[test]
    fn prop_comments_transparent(value in 0u8..=255u8, comment in "[ -~]{0,30}") {
        let plain = format!("LDX #${:02X}\nloop:\nDEX\nBNE loop", value);
        let commented = format!(
            "LDX #${:02X} ;{}\nloop: //{}\nDEX\nBNE loop ;{}",
            value, comment, comment, comment
        );

        prop_assert_eq!(assemble(&plain).unwrap(), assemble(&commented).unwrap());
    }

    /// Property: Assembly is deterministic
    #[test]
    fn prop_deterministic(ops in prop::collection::vec(0usize..6, 0..40)) {
        let lines = ["NOP", "LDA #$10", "STA $0200,X", "a:", "BNE a", "ROL"];
        // Keep the label unique by only defining it once, up front
        let body: Vec<&str> = ops.iter().map(|&i| lines[i]).filter(|l| *l != "a:").collect();
        let source = format!("a:\n{}", body.join("\n"));

        let options = AssemblerOptions { branch_policy: BranchPolicy::Wrap };
        let first = assemble_with(&source, &options).unwrap();
        let second = assemble_with(&source, &options).unwrap();
        prop_assert_eq!(first, second);
    }
}
