//! Debug utilities for inspecting emitted IR

use super::ir::{InstructionStream, Ir, SymbolTable};

/// Indexed listing, one `0000: OPCODE ...` line per instruction
pub fn format_listing(code: &InstructionStream) -> String {
    code.iter()
        .enumerate()
        .map(|(i, instr)| format!("{:04}: {}", i, instr))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_table(table: &SymbolTable) -> String {
    let entries: Vec<String> = table
        .entries()
        .iter()
        .map(|e| format!("{}={}", e.name, e.out))
        .collect();
    format!(
        "{} (next {}): [{}]",
        table.class(),
        table.next(),
        entries.join(", ")
    )
}

/// Print symbol tables and the instruction listing in human-readable format
pub fn dump_ir<T>(ir: &Ir<T>) {
    let symbols = ir.symbols();
    println!("═══════════════════════════════════════════════════════════");
    println!("                    IR DUMP");
    println!("═══════════════════════════════════════════════════════════");
    println!("{}", format_table(&symbols.uniform));
    println!("{}", format_table(&symbols.attribute));
    println!("{}", format_table(&symbols.varying));
    println!("temp (next {})", symbols.temp.next());
    println!("───────────────────────────────────────────────────────────");
    println!("{}", format_listing(ir.code()));
    println!("═══════════════════════════════════════════════════════════\n");
}
