//! IR compilation unit and instruction-template expansion
//!
//! Templates are lists of instruction lines with two kinds of placeholder:
//!
//! - `%N` - the Nth operand passed to [`Ir::build`] (1-based). An address on
//!   the placeholder advances the operand's address; its swizzle and sign
//!   replace the operand's own, so `-%1@1.x` means "negated x of the slot
//!   after operand 1" and a bare `%1` is the whole, unnegated register.
//! - `%tN` - the Nth scratch temporary of this expansion. Every `%t1` in one
//!   call names the same register; distinct `N` never share one.
//!
//! ```text
//! build(["DP3 %t1.x, %1, %1", "RSQ %t1.x, %t1.x", "MUL %2, %1, %t1.x"],
//!       ["varying@0", "temp@3"])
//!
//! DP3 temp@4.x, varying@0, varying@0
//! RSQ temp@4.x, temp@4.x
//! MUL temp@3, varying@0, temp@4.x
//! ```

use super::instruction::{Instruction, OperandField};
use super::operand::{Operand, Register, RegisterClass};
use super::stream::InstructionStream;
use super::swizzle;
use super::symbols::{Declaration, SymbolTables, TempAllocator};
use crate::compiler::IrOptions;
use crate::error::{BuilderError, CompilationError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use tracing::debug;

lazy_static! {
    static ref OPERAND_PLACEHOLDER_RE: Regex =
        Regex::new(r"^%(\d+)$").expect("placeholder grammar is a valid regex");
    static ref TEMP_PLACEHOLDER_RE: Regex =
        Regex::new(r"^%t(\d+)$").expect("temp placeholder grammar is a valid regex");
}

/// IR for one compilation unit: symbol tables plus the emitted instructions.
///
/// `target` is carried for the driver and never inspected here.
#[derive(Debug, Clone)]
pub struct Ir<T = ()> {
    target: T,
    options: IrOptions,
    symbols: SymbolTables,
    code: InstructionStream,
}

impl<T> Ir<T> {
    /// Create an empty compilation unit with default options
    pub fn new(target: T) -> Self {
        Self::with_options(target, IrOptions::default())
    }

    /// Create an empty compilation unit
    pub fn with_options(target: T, options: IrOptions) -> Self {
        Self {
            target,
            options,
            symbols: SymbolTables::new(),
            code: InstructionStream::new(),
        }
    }

    /// Target description passed at construction
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Options in effect
    pub fn options(&self) -> &IrOptions {
        &self.options
    }

    /// Symbol tables
    pub fn symbols(&self) -> &SymbolTables {
        &self.symbols
    }

    /// Emitted instructions
    pub fn code(&self) -> &InstructionStream {
        &self.code
    }

    /// Emitted instructions, mutably
    pub fn code_mut(&mut self) -> &mut InstructionStream {
        &mut self.code
    }

    /// Register for `decl` in `class`, assigned on first use
    pub fn resolve(&mut self, class: RegisterClass, decl: &dyn Declaration) -> Register {
        self.symbols.resolve(class, decl)
    }

    /// Register for a uniform declaration
    pub fn uniform(&mut self, decl: &dyn Declaration) -> Register {
        self.symbols.uniform.resolve(decl)
    }

    /// Register for an attribute declaration
    pub fn attribute(&mut self, decl: &dyn Declaration) -> Register {
        self.symbols.attribute.resolve(decl)
    }

    /// Register for a varying declaration
    pub fn varying(&mut self, decl: &dyn Declaration) -> Register {
        self.symbols.varying.resolve(decl)
    }

    /// Fresh temporary spanning `n` slots
    pub fn temp(&mut self, n: u32) -> Register {
        self.symbols.temp.alloc(n)
    }

    /// Append an instruction
    pub fn push(&mut self, instr: Instruction) {
        self.code.push(instr);
    }

    /// Instruction at `index`
    pub fn get(&self, index: usize) -> Result<&Instruction> {
        self.code.get(index)
    }

    /// Most recently appended instruction
    pub fn last(&self) -> Option<&Instruction> {
        self.code.last()
    }

    /// See [`InstructionStream::replace_name`]
    pub fn replace_name(
        &mut self,
        start: usize,
        old: &str,
        new: &str,
        index_offset: u32,
        full_replace: bool,
    ) -> Result<usize> {
        self.code
            .replace_name(start, old, new, index_offset, full_replace)
    }

    /// Validate a source swizzle against the register width in [`IrOptions`].
    ///
    /// Returns the canonical `xyzw` form.
    pub fn check_swizzle(&self, swz: &str) -> std::result::Result<String, CompilationError> {
        swizzle::check_components(swz, self.options.component_count)
    }

    /// Expand `template` with `operands` and append the result.
    ///
    /// Operands whose swizzle is not the canonical prefix (`.yx`, `.zw`) are
    /// first copied into a temporary with a corrective move, since operand
    /// slots consume components in register order.
    ///
    /// Nothing is appended and no temporary is consumed if any line or operand
    /// fails to parse or resolve.
    pub fn build<S: AsRef<str>, O: AsRef<str>>(
        &mut self,
        template: &[S],
        operands: &[O],
    ) -> Result<()> {
        let mut temps = self.symbols.temp.clone();
        let mut emitted = Vec::with_capacity(template.len() + operands.len());

        let mut resolved = Vec::with_capacity(operands.len());
        for text in operands {
            let oprd = self.prepare_operand(text.as_ref(), &mut temps, &mut emitted)?;
            resolved.push(oprd);
        }

        let mut scratch: HashMap<u32, Register> = HashMap::new();
        for line in template {
            let mut instr = Instruction::parse(line.as_ref())?;

            for field in OperandField::ALL {
                let Some(oprd) = instr.operand(field) else {
                    continue;
                };

                if let Some(n) = placeholder(&OPERAND_PLACEHOLDER_RE, oprd)? {
                    let substituted = substitute(oprd, &resolved, n)?;
                    instr.set_operand(field, substituted)?;
                } else if let Some(n) = placeholder(&TEMP_PLACEHOLDER_RE, oprd)? {
                    let reg = *scratch.entry(n).or_insert_with(|| temps.alloc(1));
                    if let Some(oprd) = instr.operand_mut(field) {
                        oprd.name = reg.class.as_str().to_string();
                        oprd.address = Some(reg.index);
                    }
                }
            }

            emitted.push(instr);
        }

        self.symbols.temp = temps;
        for instr in emitted {
            self.code.push(instr);
        }
        Ok(())
    }

    /// Parse a caller operand, inserting a corrective move when its swizzle
    /// is out of register order
    fn prepare_operand(
        &self,
        text: &str,
        temps: &mut TempAllocator,
        emitted: &mut Vec<Instruction>,
    ) -> Result<Operand> {
        let mut oprd = Operand::parse(text)?;

        let Some(swz) = oprd.swizzle.clone() else {
            return Ok(oprd);
        };
        // the operand grammar only admits swizzle letters
        let normalized = swizzle::normalize(&swz).unwrap_or(swz);
        oprd.swizzle = Some(normalized.clone());

        let canonical = swizzle::canonical_prefix(normalized.len());
        if !self.options.canonicalize_swizzles || normalized == canonical {
            return Ok(oprd);
        }

        let dest = temps.alloc(1);
        debug!(
            "Swizzle .{} of '{}' is out of order, moving into {}",
            normalized, text, dest
        );
        emitted.push(
            Instruction::new(self.options.move_opcode.as_str())
                .with_operand(OperandField::Dest, dest.operand().with_swizzle(canonical))?
                .with_operand(OperandField::Src1, oprd)?,
        );

        Ok(dest.operand())
    }
}

/// Placeholder number if `oprd` is named like `re`; `%0` / `%t0` are errors
fn placeholder(re: &Regex, oprd: &Operand) -> Result<Option<u32>> {
    let Some(caps) = re.captures(&oprd.name) else {
        return Ok(None);
    };
    match caps[1].parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(BuilderError::InvalidPlaceholder {
            text: oprd.name.clone(),
        }
        .into()),
    }
}

/// Merge the template placeholder `slot` with the `n`th resolved operand
fn substitute(slot: &Operand, resolved: &[Operand], n: u32) -> Result<Operand> {
    let mut oprd = resolved
        .get(n as usize - 1)
        .cloned()
        .ok_or(BuilderError::OperandOutOfRange {
            placeholder: n as usize,
            supplied: resolved.len(),
        })?;

    oprd.add_offset(slot.address.unwrap_or(0))?;
    oprd.swizzle = slot.swizzle.clone();
    oprd.set_sign(slot.neg);
    Ok(oprd)
}
