//! WASM API for the assembler.
//!
//! Provides a JavaScript-callable assemble entry point with a flat result
//! object (JavaScript has no use for Rust's `Result`).

use crate::assemble;
use wasm_bindgen::prelude::*;

/// Result of assembly operation
#[wasm_bindgen]
#[derive(Debug, Clone)]
pub struct AssemblyResult {
    success: bool,
    machine_code: Vec<u8>,
    error_message: Option<String>,
    error_line: Option<usize>,
}

#[wasm_bindgen]
impl AssemblyResult {
    #[wasm_bindgen(getter)]
    pub fn success(&self) -> bool {
        self.success
    }

    #[wasm_bindgen(getter)]
    pub fn machine_code(&self) -> Vec<u8> {
        self.machine_code.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error_message(&self) -> Option<String> {
        self.error_message.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn error_line(&self) -> Option<usize> {
        self.error_line
    }
}

/// Assemble source text into machine code
#[wasm_bindgen(js_name = assemble)]
pub fn assemble_source(source: String) -> AssemblyResult {
    match assemble(&source) {
        Ok(machine_code) => AssemblyResult {
            success: true,
            machine_code,
            error_message: None,
            error_line: None,
        },
        Err(err) => AssemblyResult {
            success: false,
            machine_code: Vec::new(),
            error_message: Some(err.kind.to_string()),
            error_line: Some(err.line),
        },
    }
}
