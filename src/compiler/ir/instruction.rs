//! IR instruction definitions

use super::operand::Operand;
use crate::error::{BuilderError, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref INSTRUCTION_RE: Regex = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)(?:\s+(.*?))?\s*;?$")
        .expect("instruction grammar is a valid regex");
}

/// Operand slot of an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperandField {
    /// Destination
    Dest,
    /// First source
    Src1,
    /// Second source
    Src2,
    /// Third source
    Src3,
}

impl OperandField {
    /// Fields in canonical order. Parsing, building, rewriting and printing all
    /// visit operands in this order.
    pub const ALL: [OperandField; 4] = [
        OperandField::Dest,
        OperandField::Src1,
        OperandField::Src2,
        OperandField::Src3,
    ];

    /// Position within [`OperandField::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One emitted instruction: `OPCODE dst, src1, src2, src3`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// Operation name
    pub opcode: String,
    /// Operand slots, indexed by [`OperandField::index`]
    operands: [Option<Operand>; 4],
}

impl Instruction {
    /// Instruction with no operands
    pub fn new(opcode: impl Into<String>) -> Self {
        Self {
            opcode: opcode.into(),
            operands: Default::default(),
        }
    }

    /// Parse one template or listing line
    pub fn parse(text: &str) -> Result<Self> {
        let line = text.trim();
        let caps = INSTRUCTION_RE
            .captures(line)
            .ok_or_else(|| BuilderError::MalformedInstruction {
                text: text.to_string(),
            })?;

        let mut instr = Instruction::new(&caps[1]);

        let args = match caps.get(2) {
            Some(m) if !m.as_str().trim().is_empty() => m.as_str(),
            _ => return Ok(instr),
        };

        let parts: Vec<&str> = args.split(',').collect();
        if parts.len() > OperandField::ALL.len() {
            return Err(BuilderError::TooManyOperands {
                text: text.to_string(),
                max: OperandField::ALL.len(),
            }
            .into());
        }

        for (field, part) in OperandField::ALL.into_iter().zip(parts) {
            instr.set_operand(field, Operand::parse(part)?)?;
        }

        Ok(instr)
    }

    /// Builder-style operand assignment
    pub fn with_operand(mut self, field: OperandField, operand: Operand) -> Result<Self> {
        self.set_operand(field, operand)?;
        Ok(self)
    }

    /// Assign an operand slot. Fields fill in order: every earlier field must
    /// already hold an operand.
    pub fn set_operand(&mut self, field: OperandField, operand: Operand) -> Result<()> {
        let index = field.index();
        if self.operands[..index].iter().any(Option::is_none) {
            return Err(BuilderError::OperandGap {
                opcode: self.opcode.clone(),
                index,
            }
            .into());
        }
        self.operands[index] = Some(operand);
        Ok(())
    }

    /// Operand in `field`, if any
    pub fn operand(&self, field: OperandField) -> Option<&Operand> {
        self.operands[field.index()].as_ref()
    }

    /// Mutable operand in `field`, if any
    pub fn operand_mut(&mut self, field: OperandField) -> Option<&mut Operand> {
        self.operands[field.index()].as_mut()
    }

    /// Leading present operands in canonical order, up to the first empty field
    pub fn operands(&self) -> impl Iterator<Item = (OperandField, &Operand)> {
        OperandField::ALL
            .into_iter()
            .zip(self.operands.iter())
            .map_while(|(field, op)| op.as_ref().map(|op| (field, op)))
    }

    /// Mutable [`Instruction::operands`]
    pub fn operands_mut(&mut self) -> impl Iterator<Item = (OperandField, &mut Operand)> {
        OperandField::ALL
            .into_iter()
            .zip(self.operands.iter_mut())
            .map_while(|(field, op)| op.as_mut().map(|op| (field, op)))
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.opcode)?;
        for (i, (_, op)) in self.operands().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}
