//! # nessmith: a two-pass 6502 assembler
//!
//! Translates a small, line-oriented 6502 assembly dialect into machine code.
//!
//! ## Quick Start
//!
//! ```rust
//! use nessmith::assemble;
//!
//! let bytes = assemble(
//!     "
//!     LDA *$41
//!     label1:
//!     JMP $1234
//!     // loop back
//!     BEQ label1
//!     ",
//! )
//! .unwrap();
//!
//! assert_eq!(bytes, vec![0xA5, 0x41, 0x4C, 0x34, 0x12, 0xF0, 0xFB]);
//! ```
//!
//! ## Architecture
//!
//! - **Table-Driven Design**: all opcode data lives in one immutable, sorted table
//! - **Deterministic**: no hash iteration anywhere; the same text always yields the same bytes
//! - **WebAssembly Portability**: no OS dependencies, optional `wasm` bindings
//! - **Typed errors**: every failure carries its kind, line number and line text
//!
//! ## Modules
//!
//! - `addressing` - Addressing mode enumeration
//! - `opcodes` - Mnemonic to opcode table
//! - `assembler` - Tokenizer, operand parser and the two-pass encoder
//! - `wasm` - JavaScript bindings (feature `wasm`)

pub mod addressing;
pub mod assembler;
pub mod opcodes;
pub mod wasm;

// Re-export public API
pub use addressing::AddressingMode;
pub use assembler::{
    assemble, assemble_with, AssemblerError, AssemblerOptions, AssemblerOutput, BranchPolicy,
    ErrorKind, Symbol,
};
pub use opcodes::{OpcodeEntry, OPCODE_TABLE};
