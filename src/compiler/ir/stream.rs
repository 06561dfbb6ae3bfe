//! Instruction stream and post-hoc operand rewriting

use super::instruction::Instruction;
use super::operand::Operand;
use crate::error::{BuilderError, Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use tracing::{debug, trace};

lazy_static! {
    static ref NEG_CONST_RE: Regex =
        Regex::new(r"^-(\d+\.\d+)$").expect("negative constant grammar is a valid regex");
}

/// Ordered, append-only instruction log of one compilation unit
#[derive(Debug, Clone, Default)]
pub struct InstructionStream {
    code: Vec<Instruction>,
}

impl InstructionStream {
    /// Create an empty stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction
    pub fn push(&mut self, instr: Instruction) {
        trace!("{:04}: {}", self.code.len(), instr);
        self.code.push(instr);
    }

    /// Instruction at `index`
    pub fn get(&self, index: usize) -> Result<&Instruction> {
        let length = self.code.len();
        self.code
            .get(index)
            .ok_or(Error::Builder(BuilderError::InstructionOutOfRange { index, length }))
    }

    /// Mutable instruction at `index`
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Instruction> {
        let length = self.code.len();
        self.code
            .get_mut(index)
            .ok_or(Error::Builder(BuilderError::InstructionOutOfRange { index, length }))
    }

    /// Most recently appended instruction
    pub fn last(&self) -> Option<&Instruction> {
        self.code.last()
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.code.len()
    }

    /// True when nothing has been emitted
    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Instructions in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.code.iter()
    }

    /// Instructions as a slice
    pub fn instructions(&self) -> &[Instruction] {
        &self.code
    }

    /// Replace every operand named `old` in instructions `start..`.
    ///
    /// * `full_replace`: the operand becomes `new` parsed from scratch, keeping
    ///   only the sign the original occurrence carried.
    /// * otherwise the name becomes `new` and the address advances by
    ///   `index_offset`.
    ///
    /// When `old` is a negative decimal literal (`-1.0`) the match is made
    /// against the unsigned constant, and a sign flag on a matched operand is
    /// cleared after substitution, since the constant carries the sign itself.
    ///
    /// Returns the number of operand fields rewritten. Fails without touching
    /// the stream when `start` is past the end, `new` is not a valid operand,
    /// or a patched address would overflow.
    pub fn replace_name(
        &mut self,
        start: usize,
        old: &str,
        new: &str,
        index_offset: u32,
        full_replace: bool,
    ) -> Result<usize> {
        if start > self.code.len() {
            return Err(BuilderError::InstructionOutOfRange {
                index: start,
                length: self.code.len(),
            }
            .into());
        }

        let replacement = if full_replace {
            Some(Operand::parse(new)?)
        } else if Operand::is_valid_name(new) {
            None
        } else {
            return Err(Error::malformed_operand(new));
        };

        let (old, neg_const) = match NEG_CONST_RE.captures(old) {
            Some(caps) => (caps[1].to_string(), true),
            None => (old.to_string(), false),
        };

        if replacement.is_none() {
            for instr in &self.code[start..] {
                for (_, op) in instr.operands().filter(|(_, op)| op.name == old) {
                    op.offset_address(index_offset)?;
                }
            }
        }

        let mut replaced = 0;
        for instr in &mut self.code[start..] {
            for (_, op) in instr.operands_mut() {
                if op.name != old {
                    continue;
                }

                match &replacement {
                    Some(base) => {
                        let mut fresh = base.clone();
                        if op.neg {
                            fresh.negate();
                        }
                        *op = fresh;
                    }
                    None => {
                        op.name = new.to_string();
                        op.add_offset(index_offset)?;
                    }
                }

                if neg_const && op.neg {
                    op.neg = false;
                }
                replaced += 1;
            }
        }

        debug!(
            "Replaced {} occurrence(s) of '{}' with '{}' from instruction {}",
            replaced, old, new, start
        );
        Ok(replaced)
    }
}

impl<'a> IntoIterator for &'a InstructionStream {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.code.iter()
    }
}

impl fmt::Display for InstructionStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instr) in self.code.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", instr)?;
        }
        Ok(())
    }
}
