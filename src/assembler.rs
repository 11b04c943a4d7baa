//! 6502 Assembler Module
//!
//! Converts assembly language source code into binary machine code.
//!
//! Assembly is done in two passes over one forward scan of the source:
//!
//! 1. Every line is tokenized ([`lexer`]), its operand matched to an
//!    addressing mode ([`parser`]) and its bytes emitted into an
//!    [`OutputBuffer`](encoder::OutputBuffer). Labels are recorded in the
//!    [`SymbolTable`](symbol_table::SymbolTable) at the current offset. Branch
//!    displacements are left as placeholders.
//! 2. Once every label is known, placeholders are resolved into signed
//!    relative displacements ([`encoder::OutputBuffer::resolve`]).
//!
//! The first error stops assembly; no partial output is ever returned.

pub mod encoder;
pub mod lexer;
pub mod parser;
pub mod source_map;
pub mod symbol_table;

use crate::addressing::AddressingMode;
use crate::opcodes;
use encoder::OutputBuffer;
use lexer::{LineKind, SourceLine};
use source_map::{SourceLocation, SourceMap};
use symbol_table::SymbolTable;
use thiserror::Error;

/// Complete output from assembling source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOutput {
    /// Assembled machine code bytes
    pub bytes: Vec<u8>,

    /// All defined labels, in definition order
    pub symbols: Vec<Symbol>,

    /// Source map for debugging
    pub source_map: SourceMap,
}

impl AssemblerOutput {
    /// Offset of a label, looked up case-insensitively
    pub fn lookup_symbol_offset(&self, name: &str) -> Option<usize> {
        self.symbols
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .map(|s| s.offset)
    }
}

/// A symbol table entry mapping a label to an output offset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Label name (lowercased)
    pub name: String,

    /// Byte offset in the output where the label was defined
    pub offset: usize,

    /// Source line where label was defined
    pub defined_at: usize,
}

/// What to do with a branch whose target is more than a signed byte away
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BranchPolicy {
    /// Fail with [`ErrorKind::BranchOutOfRange`]
    #[default]
    Error,

    /// Keep the displacement modulo 256 and log a warning
    Wrap,
}

/// Options controlling assembly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Handling of out-of-range branch displacements
    pub branch_policy: BranchPolicy,
}

/// An error encountered during assembly
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}: `{text}`")]
pub struct AssemblerError {
    /// Error classification and details
    pub kind: ErrorKind,

    /// Line number where error occurred (1-indexed)
    pub line: usize,

    /// Raw text of the offending line
    pub text: String,
}

impl AssemblerError {
    pub(crate) fn new(kind: ErrorKind, line: usize, text: impl Into<String>) -> Self {
        AssemblerError {
            kind,
            line,
            text: text.into(),
        }
    }

    fn at(kind: ErrorKind, source: &SourceLine<'_>) -> Self {
        Self::new(kind, source.number, source.raw)
    }
}

/// Classification of assembly errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// Mnemonic is not a recognized instruction
    #[error("unknown mnemonic '{mnemonic}'")]
    UnknownMnemonic { mnemonic: String },

    /// Operand text matches no addressing-mode grammar
    #[error("invalid operand '{operand}'")]
    InvalidOperand { operand: String },

    /// Operand is well formed but the mnemonic has no encoding for its mode
    #[error(
        "'{mnemonic}' does not support {mode} addressing (supports {})",
        join_modes(.supported)
    )]
    UnsupportedAddressingMode {
        mnemonic: String,
        mode: AddressingMode,
        /// Modes the mnemonic does encode, in opcode-table order
        supported: Vec<AddressingMode>,
    },

    /// Label name does not follow the label naming rules
    #[error("invalid label '{name}': {reason}")]
    InvalidLabel { name: String, reason: String },

    /// Label defined more than once
    #[error("duplicate label '{name}' (first defined on line {first_defined})")]
    DuplicateLabel { name: String, first_defined: usize },

    /// Branch refers to a label that is never defined
    #[error("undefined label '{name}'")]
    UndefinedLabel { name: String },

    /// Branch target is further than a signed byte displacement can reach
    #[error("branch to '{label}' out of range (displacement {displacement})")]
    BranchOutOfRange { label: String, displacement: i64 },
}

fn join_modes(modes: &[AddressingMode]) -> String {
    modes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Assemble source code into machine code
///
/// Uses [`AssemblerOptions::default`]: out-of-range branches are an error.
///
/// # Examples
///
/// ```
/// use nessmith::assemble;
///
/// assert_eq!(assemble("LDA $6001").unwrap(), vec![0xAD, 0x01, 0x60]);
/// assert!(assemble("").unwrap().is_empty());
/// assert!(assemble("JHG").is_err());
/// ```
pub fn assemble(source: &str) -> Result<Vec<u8>, AssemblerError> {
    assemble_with(source, &AssemblerOptions::default()).map(|output| output.bytes)
}

/// Assemble source code, returning bytes together with symbols and a source map
pub fn assemble_with(
    source: &str,
    options: &AssemblerOptions,
) -> Result<AssemblerOutput, AssemblerError> {
    let mut labels = SymbolTable::new();
    let mut buffer = OutputBuffer::new();
    let mut source_map = SourceMap::new();

    tracing::trace!("starting pass 1");

    for line in lexer::source_lines(source) {
        match lexer::tokenize(line.code) {
            LineKind::Blank => {}
            LineKind::LabelDefinition(name) => {
                define_label(&mut labels, &name, buffer.offset(), &line)?;
            }
            LineKind::Instruction { mnemonic, operand } => {
                let start = buffer.offset();
                encode_instruction(&mut buffer, &mnemonic, &operand, &line)?;
                source_map.add_mapping(
                    start,
                    SourceLocation {
                        line: line.number,
                        length: buffer.offset() - start,
                    },
                );
            }
        }
    }

    tracing::trace!(pending = buffer.pending(), "starting pass 2");

    let bytes = buffer.resolve(&labels, options.branch_policy)?;

    tracing::debug!(
        symbols = labels.symbols().len(),
        bytes = bytes.len(),
        "assembly complete"
    );

    Ok(AssemblerOutput {
        bytes,
        symbols: labels.into_symbols(),
        source_map,
    })
}

fn define_label(
    labels: &mut SymbolTable,
    name: &str,
    offset: usize,
    line: &SourceLine<'_>,
) -> Result<(), AssemblerError> {
    lexer::validate_label(name).map_err(|reason| {
        AssemblerError::at(
            ErrorKind::InvalidLabel {
                name: name.to_string(),
                reason,
            },
            line,
        )
    })?;

    labels
        .add_symbol(name, offset, line.number)
        .map_err(|existing| {
            AssemblerError::at(
                ErrorKind::DuplicateLabel {
                    name: existing.name,
                    first_defined: existing.defined_at,
                },
                line,
            )
        })?;

    tracing::trace!(label = name, offset, "label defined");
    Ok(())
}

fn encode_instruction(
    buffer: &mut OutputBuffer,
    mnemonic: &str,
    operand: &str,
    line: &SourceLine<'_>,
) -> Result<(), AssemblerError> {
    let Some(entry) = opcodes::entry(mnemonic) else {
        return Err(AssemblerError::at(
            ErrorKind::UnknownMnemonic {
                mnemonic: mnemonic.to_string(),
            },
            line,
        ));
    };

    if let Some(opcode) = opcodes::branch_opcode(entry.mnemonic) {
        if lexer::validate_label(operand).is_err() {
            return Err(AssemblerError::at(
                ErrorKind::InvalidOperand {
                    operand: operand.to_string(),
                },
                line,
            ));
        }
        buffer.emit_branch(opcode, operand, line);
        return Ok(());
    }

    let Some(parsed) = parser::match_operand(operand) else {
        return Err(AssemblerError::at(
            ErrorKind::InvalidOperand {
                operand: operand.to_string(),
            },
            line,
        ));
    };

    // A bare shift/rotate means the accumulator
    let opcode = entry.opcode(parsed.mode).or_else(|| {
        (parsed.mode == AddressingMode::Implicit)
            .then(|| entry.opcode(AddressingMode::Accumulator))
            .flatten()
    });

    let Some(opcode) = opcode else {
        return Err(AssemblerError::at(
            ErrorKind::UnsupportedAddressingMode {
                mnemonic: entry.mnemonic.to_string(),
                mode: parsed.mode,
                supported: entry.modes().collect(),
            },
            line,
        ));
    };

    debug_assert_eq!(parsed.bytes.len(), parsed.mode.operand_size());

    buffer.emit(&[opcode]);
    buffer.emit(&parsed.bytes);
    Ok(())
}
