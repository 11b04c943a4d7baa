//! Line tokenizer for 6502 assembly source
//!
//! The first phase of assembly: each physical line of source is stripped of its
//! comment, trimmed, and classified into a [`LineKind`]. The tokenizer only
//! handles character-level concerns (where does a comment start? where does the
//! mnemonic end?). Deciding whether a mnemonic exists or whether an operand is
//! well formed is left to the encoder and the operand [`parser`](super::parser).
//!
//! # Examples
//!
//! ```
//! use nessmith::assembler::lexer::{tokenize, LineKind};
//!
//! assert_eq!(tokenize(""), LineKind::Blank);
//! assert_eq!(tokenize("Loop:"), LineKind::LabelDefinition("loop".to_string()));
//! assert_eq!(
//!     tokenize("LDA ( $44 ), Y"),
//!     LineKind::Instruction {
//!         mnemonic: "lda".to_string(),
//!         operand: "($44),y".to_string(),
//!     }
//! );
//! ```
//!
//! # Comments
//!
//! Two comment markers are recognized: `;` and `//`. The first marker found on a
//! line ends the code portion of that line.

/// Markers that start a line comment.
pub const COMMENT_MARKERS: [&str; 2] = [";", "//"];

/// A single physical line of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// Line number in the source text (1-indexed)
    pub number: usize,

    /// The line exactly as written, used in diagnostics
    pub raw: &'a str,

    /// The line with its comment removed and surrounding whitespace trimmed
    pub code: &'a str,
}

impl<'a> SourceLine<'a> {
    /// Create a source line, computing its code portion
    pub fn new(number: usize, raw: &'a str) -> Self {
        SourceLine {
            number,
            raw,
            code: strip_comment(raw).trim(),
        }
    }
}

/// Classification of a single source line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Nothing but whitespace and/or a comment
    Blank,

    /// `name:` on a line of its own (name lowercased, colon removed)
    LabelDefinition(String),

    /// Mnemonic plus operand text
    Instruction {
        /// Lowercased mnemonic
        mnemonic: String,

        /// Lowercased operand with all whitespace removed (may be empty)
        operand: String,
    },
}

/// Split source text into numbered [`SourceLine`]s.
///
/// LF, CRLF and a lone CR all end a line. A trailing line break does not
/// start an extra empty line.
pub fn source_lines(source: &str) -> impl Iterator<Item = SourceLine<'_>> {
    let mut rest = source;

    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }

        let (raw, tail) = match rest.find(['\r', '\n']) {
            Some(pos) => {
                let width = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..pos], &rest[pos + width..])
            }
            None => (rest, ""),
        };

        rest = tail;
        Some(raw)
    })
    .enumerate()
    .map(|(idx, raw)| SourceLine::new(idx + 1, raw))
}

/// Remove a trailing line comment, if any.
pub fn strip_comment(line: &str) -> &str {
    let cut = COMMENT_MARKERS
        .iter()
        .filter_map(|marker| line.find(marker))
        .min();

    match cut {
        Some(pos) => &line[..pos],
        None => line,
    }
}

/// Classify the code portion of a line.
///
/// `code` is expected to already be comment-stripped (see [`SourceLine::code`]);
/// surrounding whitespace is tolerated.
pub fn tokenize(code: &str) -> LineKind {
    let code = code.trim();

    if code.is_empty() {
        return LineKind::Blank;
    }

    if let Some(name) = code.strip_suffix(':') {
        if !name.contains(char::is_whitespace) {
            return LineKind::LabelDefinition(name.to_lowercase());
        }
    }

    let (mnemonic, rest) = match code.split_once(char::is_whitespace) {
        Some((mnemonic, rest)) => (mnemonic, rest),
        None => (code, ""),
    };

    LineKind::Instruction {
        mnemonic: mnemonic.to_lowercase(),
        operand: rest
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect(),
    }
}

/// Validate a label name according to 6502 conventions
///
/// Labels must:
/// - Start with a letter or underscore
/// - Contain only alphanumeric characters and underscores
pub fn validate_label(name: &str) -> Result<(), String> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Err("label name cannot be empty".to_string());
    };

    if !first.is_ascii_alphabetic() && first != '_' {
        return Err(format!(
            "label must start with a letter or underscore, not '{}'",
            first
        ));
    }

    for ch in chars {
        if !ch.is_ascii_alphanumeric() && ch != '_' {
            return Err(format!(
                "label contains invalid character '{}' (only letters, digits, and underscores allowed)",
                ch
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("LDA #$01 ; load"), "LDA #$01 ");
        assert_eq!(strip_comment("// melon farmer"), "");
        assert_eq!(strip_comment("NOP // a ; b"), "NOP ");
        assert_eq!(strip_comment("NOP ; a // b"), "NOP ");
        assert_eq!(strip_comment("RTS"), "RTS");
    }

    #[test]
    fn test_tokenize_blank() {
        assert_eq!(tokenize(""), LineKind::Blank);
        assert_eq!(tokenize("   \t "), LineKind::Blank);
    }

    #[test]
    fn test_tokenize_label() {
        assert_eq!(
            tokenize("BACK:"),
            LineKind::LabelDefinition("back".to_string())
        );
        // A colon after whitespace is not a label definition
        assert!(matches!(
            tokenize("LDA label:"),
            LineKind::Instruction { .. }
        ));
    }

    #[test]
    fn test_tokenize_instruction() {
        assert_eq!(
            tokenize("BRK"),
            LineKind::Instruction {
                mnemonic: "brk".to_string(),
                operand: String::new(),
            }
        );
        assert_eq!(
            tokenize("\tSTA\t$80 , X"),
            LineKind::Instruction {
                mnemonic: "sta".to_string(),
                operand: "$80,x".to_string(),
            }
        );
    }

    #[test]
    fn test_source_lines_numbering() {
        let lines: Vec<_> = source_lines("NOP\r\n\r\n  RTS ; done").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].code, "NOP");
        assert_eq!(lines[1].code, "");
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].raw, "  RTS ; done");
        assert_eq!(lines[2].code, "RTS");
    }

    #[test]
    fn test_source_lines_lone_carriage_return() {
        let lines: Vec<_> = source_lines("LDA #$01\rSTA $0200\r\nRTS\r").collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].code, "LDA #$01");
        assert_eq!(lines[1].code, "STA $0200");
        assert_eq!(lines[2].number, 3);
        assert_eq!(lines[2].code, "RTS");
    }

    #[test]
    fn test_validate_label_valid() {
        assert!(validate_label("start").is_ok());
        assert!(validate_label("loop_1").is_ok());
        assert!(validate_label("_private").is_ok());
        assert!(validate_label("a").is_ok());
        assert!(validate_label(&"long_label".repeat(10)).is_ok());
    }

    #[test]
    fn test_validate_label_invalid() {
        assert!(validate_label("").is_err());
        assert!(validate_label("1start").is_err());
        assert!(validate_label("my-label").is_err());
        assert!(validate_label("label!").is_err());
    }
}
