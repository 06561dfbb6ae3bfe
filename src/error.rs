//! Error types for the shader IR layer
//!
//! Two kinds of failure are kept apart at the type level:
//!
//! - [`CompilationError`] - a defect in the shader being compiled. The code
//!   generator reports these to the user with source context.
//! - [`BuilderError`] - a defect in how the compiler drove the IR layer
//!   (bad template, bad operand text, bad instruction index). These are
//!   compiler bugs.

use thiserror::Error;

/// Shader IR errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Error in the compiled shader source
    #[error("Compilation error: {0}")]
    Compilation(#[from] CompilationError),

    /// Internal error raised by the instruction builder or stream
    #[error("Internal compiler error: {0}")]
    Builder(#[from] BuilderError),
}

/// Errors caused by the shader source being compiled
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompilationError {
    /// Swizzle references more components than the value has
    ///
    /// **Triggered by:** `v.xyz` on a `vec2`, or `.w` on a three-component register
    #[error("Swizzle '{swizzle}' references components beyond {components}")]
    SwizzleOutOfRange {
        /// Swizzle as written in the source
        swizzle: String,
        /// Number of components available
        components: usize,
    },

    /// Swizzle uses components outside the allowed set
    #[error("Swizzle '{swizzle}' is not drawn from components '{allowed}'")]
    ComponentMismatch {
        /// Swizzle as written in the source
        swizzle: String,
        /// Allowed component characters
        allowed: String,
    },

    /// Field selection is not a swizzle in any naming convention
    #[error("'{text}' is not a swizzle")]
    NotASwizzle {
        /// Selection text as written in the source
        text: String,
    },

    /// Error reported by the code generator with a source position
    #[error("Error at line {line}, column {col}: {message}")]
    Source {
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
        /// Error description
        message: String,
    },
}

/// Errors caused by a defect in the compiler itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Operand text does not match the operand grammar
    #[error("Malformed operand: '{text}'")]
    MalformedOperand {
        /// Offending operand text
        text: String,
    },

    /// Instruction template line could not be parsed
    #[error("Malformed instruction: '{text}'")]
    MalformedInstruction {
        /// Offending template line
        text: String,
    },

    /// Instruction has more operands than there are operand fields
    #[error("Too many operands in '{text}' (max: {max})")]
    TooManyOperands {
        /// Offending template line
        text: String,
        /// Number of operand fields
        max: usize,
    },

    /// Placeholder such as `%0` or `%t0` that can never resolve
    #[error("Invalid placeholder: '{text}'")]
    InvalidPlaceholder {
        /// Offending placeholder
        text: String,
    },

    /// Template references an operand that was not supplied
    #[error("Placeholder %{placeholder} out of range ({supplied} operands supplied)")]
    OperandOutOfRange {
        /// 1-based placeholder number
        placeholder: usize,
        /// Number of operands passed to the builder
        supplied: usize,
    },

    /// Address arithmetic would leave the `u32` slot range
    #[error("Address of '{text}' overflows when advanced by {offset}")]
    AddressOverflow {
        /// Operand being advanced
        text: String,
        /// Requested slot offset
        offset: u32,
    },

    /// Operand assigned past an empty field, which the text form cannot express
    #[error("Operand field {index} of '{opcode}' set while an earlier field is empty")]
    OperandGap {
        /// Instruction opcode
        opcode: String,
        /// Position of the assigned field
        index: usize,
    },

    /// Instruction index past the end of the stream
    #[error("Instruction index {index} out of range (stream length: {length})")]
    InstructionOutOfRange {
        /// Requested index
        index: usize,
        /// Current stream length
        length: usize,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Compiler defect; the compilation cannot continue
    Fatal,
    /// Source defect; report it and keep compiling to find more
    Recoverable,
}

impl Error {
    /// Create a compilation error carrying a source position
    pub fn at(line: usize, col: usize, message: impl Into<String>) -> Self {
        Error::Compilation(CompilationError::Source {
            line,
            col,
            message: message.into(),
        })
    }

    /// Create a malformed-operand builder error
    pub fn malformed_operand(text: impl Into<String>) -> Self {
        Error::Builder(BuilderError::MalformedOperand { text: text.into() })
    }

    /// True when the error is a compiler bug rather than a source defect
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::Builder(_))
    }

    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::Builder(_) => ErrorSeverity::Fatal,
            Error::Compilation(_) => ErrorSeverity::Recoverable,
        }
    }
}

/// Result type for shader IR operations
pub type Result<T> = std::result::Result<T, Error>;
