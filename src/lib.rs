//! # Shader IR - intermediate representation for a shader compiler backend
//!
//! Sits between the shader front end (parser, type checker) and the
//! ISA-specific assembler. It turns declarations and instruction templates
//! into a linear listing over symbolic registers.
//!
//! ## Features
//!
//! - **Symbol tables** - stable `uniform@N` / `attribute@N` / `varying@N`
//!   registers per declaration, plus never-reused `temp@N` scratch registers
//! - **Template expansion** - `%N` operand and `%tN` scratch placeholders,
//!   with corrective moves for out-of-order swizzles
//! - **Swizzle normalization** - `xyzw`, `rgba` and `stpq` conventions
//! - **Operand rewriting** - patch operands in already-emitted instructions
//!
//! ## Quick Start
//!
//! ```rust
//! use shader_ir::{Ir, SimpleDeclaration};
//!
//! # fn main() -> shader_ir::Result<()> {
//! let mut ir = Ir::new(());
//!
//! let position = ir.attribute(&SimpleDeclaration::new("a_position", 1)).to_string();
//! let mvp = ir.uniform(&SimpleDeclaration::new("u_mvp", 4)).to_string();
//!
//! // gl_Position = u_mvp * a_position
//! ir.build(
//!     &[
//!         "DP4 %1.x, %2, %3",
//!         "DP4 %1.y, %2@1, %3",
//!         "DP4 %1.z, %2@2, %3",
//!         "DP4 %1.w, %2@3, %3",
//!     ],
//!     &["varying@0", mvp.as_str(), position.as_str()],
//! )?;
//!
//! assert_eq!(ir.code().len(), 4);
//! assert_eq!(ir.code().get(1)?.to_string(), "DP4 varying@0.y, uniform@1, attribute@0");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Source defects ([`CompilationError`]) and compiler defects
//! ([`BuilderError`]) are separate variants of [`Error`]:
//!
//! ```rust
//! use shader_ir::{Error, ErrorSeverity, Ir};
//!
//! let mut ir = Ir::new(());
//! let err = ir.build(&["MOV %1, %2"], &["temp@0"]).unwrap_err();
//! assert!(err.is_internal());
//! assert_eq!(err.classify(), ErrorSeverity::Fatal);
//!
//! let err: Error = ir.check_swizzle("xyzq").unwrap_err().into();
//! assert_eq!(err.classify(), ErrorSeverity::Recoverable);
//! ```

/// Version of the shader IR crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod compiler;
pub mod error;

// Re-export main types
pub use compiler::{
    Declaration, Instruction, InstructionStream, Ir, IrOptions, Operand, OperandField, Register,
    RegisterClass, SimpleDeclaration,
};
pub use error::{BuilderError, CompilationError, Error, ErrorSeverity, Result};
