//! Output buffer and branch resolution for the 6502 assembler
//!
//! During the forward scan every emitted byte goes into an [`OutputBuffer`].
//! Ordinary instructions are fully known when their line is read, so their
//! bytes are stored as [`Slot::Resolved`]. A branch operand depends on a label
//! that may not be defined yet, so it is stored as [`Slot::PendingBranch`] and
//! filled in by [`OutputBuffer::resolve`] once the whole source has been read.

use crate::assembler::lexer::SourceLine;
use crate::assembler::symbol_table::SymbolTable;
use crate::assembler::{AssemblerError, BranchPolicy, ErrorKind};

/// One byte position in the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    /// Final byte value
    Resolved(u8),

    /// Branch displacement still waiting for its target label
    PendingBranch {
        /// Referenced label name (lowercased)
        label: String,

        /// Source line of the branch instruction (1-indexed)
        line: usize,

        /// Raw text of that line, for diagnostics
        text: String,
    },
}

/// Ordered output of the forward scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    slots: Vec<Slot>,
}

/// Displacement from the byte after a branch operand to `target`
///
/// `operand_offset` is the offset of the branch's operand byte; the 6502 adds
/// the displacement to the address of the following instruction.
pub fn branch_displacement(target: usize, operand_offset: usize) -> i64 {
    target as i64 - (operand_offset as i64 + 1)
}

/// Encode a displacement as a two's-complement byte, if it fits in an `i8`
pub fn encode_displacement(displacement: i64) -> Option<u8> {
    i8::try_from(displacement).ok().map(|d| d as u8)
}

/// Encode any displacement modulo 256
pub fn wrap_displacement(displacement: i64) -> u8 {
    displacement.rem_euclid(256) as u8
}

impl OutputBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the next byte to be emitted
    pub fn offset(&self) -> usize {
        self.slots.len()
    }

    /// Emit resolved bytes
    pub fn emit(&mut self, bytes: &[u8]) {
        self.slots.extend(bytes.iter().copied().map(Slot::Resolved));
    }

    /// Emit a branch opcode followed by a placeholder for its displacement
    pub fn emit_branch(&mut self, opcode: u8, label: &str, source: &SourceLine<'_>) {
        self.slots.push(Slot::Resolved(opcode));
        self.slots.push(Slot::PendingBranch {
            label: label.to_ascii_lowercase(),
            line: source.number,
            text: source.raw.to_string(),
        });
    }

    /// Number of branch placeholders not yet resolved
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::PendingBranch { .. }))
            .count()
    }

    /// Second pass: replace every placeholder with its displacement byte
    ///
    /// Placeholders are resolved in output order, so the first failing branch
    /// in the source is the one reported.
    pub fn resolve(
        self,
        labels: &SymbolTable,
        policy: BranchPolicy,
    ) -> Result<Vec<u8>, AssemblerError> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(offset, slot)| match slot {
                Slot::Resolved(byte) => Ok(byte),
                Slot::PendingBranch { label, line, text } => {
                    let Some(symbol) = labels.lookup_symbol(&label) else {
                        return Err(AssemblerError::new(
                            ErrorKind::UndefinedLabel { name: label },
                            line,
                            text,
                        ));
                    };

                    let displacement = branch_displacement(symbol.offset, offset);
                    match (encode_displacement(displacement), policy) {
                        (Some(byte), _) => Ok(byte),
                        (None, BranchPolicy::Wrap) => {
                            tracing::warn!(
                                line,
                                label = %label,
                                displacement,
                                "branch target out of range, wrapping displacement"
                            );
                            Ok(wrap_displacement(displacement))
                        }
                        (None, BranchPolicy::Error) => Err(AssemblerError::new(
                            ErrorKind::BranchOutOfRange {
                                label,
                                displacement,
                            },
                            line,
                            text,
                        )),
                    }
                }
            })
            .collect()
    }
}
