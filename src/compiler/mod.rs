//! # Shader Compiler Backend - IR Layer
//!
//! ```text
//! Declarations ─┐
//!               ├─> Ir (symbol tables + template builder) ─> InstructionStream ─> assembler
//! Templates ────┘
//! ```
//!
//! ## Usage
//!
//! ```
//! use shader_ir::compiler::{Ir, SimpleDeclaration};
//!
//! let mut ir = Ir::new(());
//! let color = ir.varying(&SimpleDeclaration::new("v_color", 1)).to_string();
//! ir.build(&["MUL %1, %2, 0.5"], &[color.as_str(), "temp@0.zyx"])?;
//!
//! assert_eq!(
//!     ir.code().to_string(),
//!     "MOV temp@0.xyz, temp@0.zyx\nMUL varying@0, temp@0, 0.5"
//! );
//! # Ok::<(), shader_ir::Error>(())
//! ```

pub mod debug;
pub mod ir;

pub use debug::{dump_ir, format_listing};
pub use ir::{
    swizzle, Declaration, Instruction, InstructionStream, Ir, Operand, OperandField, Register,
    RegisterClass, SimpleDeclaration, SymbolTable, SymbolTables,
};

use serde::{Deserialize, Serialize};

/// IR construction options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IrOptions {
    /// Opcode used for corrective moves
    pub move_opcode: String,
    /// Insert corrective moves for out-of-order swizzles
    pub canonicalize_swizzles: bool,
    /// Components per register (1-4)
    pub component_count: usize,
}

impl Default for IrOptions {
    fn default() -> Self {
        Self {
            move_opcode: "MOV".to_string(),
            canonicalize_swizzles: true,
            component_count: swizzle::MAX_COMPONENTS,
        }
    }
}
