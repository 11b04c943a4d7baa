//! Fuzz target for the assembler.
//!
//! This target feeds arbitrary strings to the assembler to find
//! edge cases, panics, and crashes in tokenizing, matching and encoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nessmith::{assemble_with, AssemblerOptions, BranchPolicy};

fuzz_target!(|data: &[u8]| {
    let source = String::from_utf8_lossy(data);

    // Errors are fine, panics are not
    let strict = assemble_with(&source, &AssemblerOptions::default());

    let wrapping = assemble_with(
        &source,
        &AssemblerOptions {
            branch_policy: BranchPolicy::Wrap,
        },
    );

    // Wrapping only ever turns range errors into output
    if let Ok(output) = &strict {
        assert_eq!(wrapping.as_ref().map(|o| &o.bytes), Ok(&output.bytes));
    }
});
