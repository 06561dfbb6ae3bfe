//! # Intermediate Representation (IR) for shader compilation
//!
//! Linear, assembler-like IR over symbolic registers. The code generator
//! resolves declarations to registers, expands instruction templates into
//! the stream, and patches earlier operands once final registers are known.
//!
//! ## Module Structure
//!
//! ```text
//! ir/
//! ├── mod.rs          # This file - module definition and re-exports
//! ├── operand.rs      # Operand, Register, RegisterClass
//! ├── instruction.rs  # Instruction, OperandField
//! ├── swizzle.rs      # Swizzle classification and normalization
//! ├── symbols.rs      # Declaration, SymbolTable, TempAllocator
//! ├── stream.rs       # InstructionStream, replace_name
//! └── builder.rs      # Ir compilation unit and template expansion
//! ```
//!
//! ## Text Format
//!
//! | Item | Form | Example |
//! |------|------|---------|
//! | Register | `class@index` | `uniform@3` |
//! | Operand | `[-]name[@address][.swizzle]` | `-temp@0.xy` |
//! | Instruction | `OPCODE dst, src1, src2, src3` | `MAD temp@1, temp@0, uniform@2.x, 1.0` |
//! | Listing | newline-joined instructions | |

mod builder;
mod instruction;
mod operand;
mod stream;
pub mod swizzle;
mod symbols;

// Re-export all public types
pub use builder::Ir;
pub use instruction::{Instruction, OperandField};
pub use operand::{Operand, Register, RegisterClass};
pub use stream::InstructionStream;
pub use symbols::{
    Declaration, SimpleDeclaration, SymbolEntry, SymbolTable, SymbolTables, TempAllocator,
};
