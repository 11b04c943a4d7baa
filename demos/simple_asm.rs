//! Basic assembler usage example
//!
//! Run with `RUST_LOG=nessmith=trace` to see the assembler's passes.

use nessmith::assemble;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let source = r#"
        LDA *$54
        BNE BACK
        LDA *$53
        CMP #$30
        BCS BACK

        LDA *$50
        ASL
        RTS

    BACK:
        PLA
        PLA
        LDA #$01
        STA $6000   ; signal done
        JMP $874A
    "#;

    match assemble(source) {
        Ok(bytes) => {
            println!("Assembled {} bytes:", bytes.len());
            for (i, byte) in bytes.iter().enumerate() {
                print!("{:02X} ", byte);
                if (i + 1) % 8 == 0 {
                    println!();
                }
            }
            println!();
        }
        Err(error) => {
            eprintln!("Assembly failed:");
            eprintln!("  {}", error);
        }
    }
}
