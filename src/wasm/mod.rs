//! WebAssembly bindings for the assembler.
//!
//! This module provides a JavaScript-callable interface to the assembler,
//! enabling browser-based assembly of 6502 source.

#[cfg(feature = "wasm")]
pub mod api;

#[cfg(feature = "wasm")]
pub use api::{assemble_source, AssemblyResult};
