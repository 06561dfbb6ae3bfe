//! Instruction operands and register identifiers
//!
//! Textual form: `[-]name[@address][.swizzle]`, e.g. `uniform@3`,
//! `-temp@0.xy`, `%1@1`. Numeric literals (`1.0`, `-0.5`) parsed from text
//! carry their sign in the name itself and have no address or swizzle. A
//! negation modifier applied later (`-%3` in a template) is the `neg` flag.

use crate::error::{BuilderError, Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref OPERAND_RE: Regex =
        Regex::new(r"^(-)?([A-Za-z_%$][A-Za-z0-9_%$]*)(?:@(\d+))?(?:\.([xyzwrgbastpq]{1,4}))?$")
            .expect("operand grammar is a valid regex");
    static ref LITERAL_RE: Regex =
        Regex::new(r"^-?\d+(?:\.\d+)?$").expect("literal grammar is a valid regex");
    static ref NAME_RE: Regex =
        Regex::new(r"^[A-Za-z_%$][A-Za-z0-9_%$]*$").expect("name grammar is a valid regex");
}

/// Register class of an output identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterClass {
    /// Per-draw constants
    Uniform,
    /// Per-vertex inputs
    Attribute,
    /// Values interpolated between shader stages
    Varying,
    /// Anonymous scratch registers
    Temp,
}

impl RegisterClass {
    /// All register classes
    pub const ALL: [RegisterClass; 4] = [
        RegisterClass::Uniform,
        RegisterClass::Attribute,
        RegisterClass::Varying,
        RegisterClass::Temp,
    ];

    /// Name used in operand text
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterClass::Uniform => "uniform",
            RegisterClass::Attribute => "attribute",
            RegisterClass::Varying => "varying",
            RegisterClass::Temp => "temp",
        }
    }
}

impl fmt::Display for RegisterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegisterClass {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        RegisterClass::ALL
            .into_iter()
            .find(|class| class.as_str() == s)
            .ok_or_else(|| Error::malformed_operand(s))
    }
}

/// Allocated output register: `<class>@<index>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Register {
    /// Register class
    pub class: RegisterClass,
    /// First slot index within the class
    pub index: u32,
}

impl Register {
    /// Creates a register identifier
    pub fn new(class: RegisterClass, index: u32) -> Self {
        Self { class, index }
    }

    /// Register `n` slots further on, `None` past the last slot
    pub fn offset(self, n: u32) -> Option<Self> {
        Some(Self::new(self.class, self.index.checked_add(n)?))
    }

    /// Bare operand referring to this register
    pub fn operand(self) -> Operand {
        Operand {
            name: self.class.as_str().to_string(),
            address: Some(self.index),
            swizzle: None,
            neg: false,
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.class, self.index)
    }
}

impl FromStr for Register {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (class, index) = s.split_once('@').ok_or_else(|| Error::malformed_operand(s))?;
        let index = index.parse().map_err(|_| Error::malformed_operand(s))?;
        Ok(Self::new(class.parse()?, index))
    }
}

/// A single instruction argument
///
/// The text form is always derived from the fields; there is no cached copy
/// that could go stale after a mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Operand {
    /// Register class, placeholder (`%1`, `%t1`) or literal constant
    pub name: String,
    /// Slot offset added to the base register
    pub address: Option<u32>,
    /// Component selection, as written
    pub swizzle: Option<String>,
    /// Negate the value on read
    pub neg: bool,
}

impl Operand {
    /// Parse operand text
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if LITERAL_RE.is_match(text) {
            return Ok(Self::named(text));
        }

        let caps = OPERAND_RE
            .captures(text)
            .ok_or_else(|| Error::malformed_operand(text))?;

        let address = match caps.get(3) {
            Some(m) => Some(
                m.as_str()
                    .parse()
                    .map_err(|_| Error::malformed_operand(text))?,
            ),
            None => None,
        };

        Ok(Self {
            name: caps[2].to_string(),
            address,
            swizzle: caps.get(4).map(|m| m.as_str().to_string()),
            neg: caps.get(1).is_some(),
        })
    }

    /// Operand with just a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            swizzle: None,
            neg: false,
        }
    }

    /// True if `name` is usable as an operand base name (identifier or literal)
    pub fn is_valid_name(name: &str) -> bool {
        NAME_RE.is_match(name) || LITERAL_RE.is_match(name)
    }

    /// True for numeric literal constants
    pub fn is_literal(&self) -> bool {
        LITERAL_RE.is_match(&self.name)
    }

    /// Typed register view, when the name is a register class with an address
    pub fn register(&self) -> Option<Register> {
        let class = self.name.parse().ok()?;
        Some(Register::new(class, self.address?))
    }

    /// Canonical text form
    pub fn full(&self) -> String {
        self.to_string()
    }

    /// Address after advancing by `n` slots, without changing the operand.
    /// Literals have no address.
    pub fn offset_address(&self, n: u32) -> Result<Option<u32>> {
        if self.is_literal() || (n == 0 && self.address.is_none()) {
            return Ok(self.address);
        }
        self.address
            .unwrap_or(0)
            .checked_add(n)
            .map(Some)
            .ok_or_else(|| {
                BuilderError::AddressOverflow {
                    text: self.to_string(),
                    offset: n,
                }
                .into()
            })
    }

    /// Advance the address by `n` slots
    pub fn add_offset(&mut self, n: u32) -> Result<()> {
        self.address = self.offset_address(n)?;
        Ok(())
    }

    /// Flip the sign of the operand.
    ///
    /// Literals carry their sign textually, so a negated literal keeps `neg`
    /// clear and toggles the leading `-` of its name instead.
    pub fn negate(&mut self) {
        if self.is_literal() {
            self.name = match self.name.strip_prefix('-') {
                Some(positive) => positive.to_string(),
                None => format!("-{}", self.name),
            };
        } else {
            self.neg = !self.neg;
        }
    }

    /// Set the negation modifier, replacing whatever sign the operand had.
    ///
    /// A textually negative literal under a negation modifier folds to its
    /// positive text, so the operand never prints as `--2.5`.
    pub fn set_sign(&mut self, neg: bool) {
        match self.name.strip_prefix('-') {
            Some(positive) if neg && self.is_literal() => {
                self.name = positive.to_string();
                self.neg = false;
            }
            _ => self.neg = neg,
        }
    }

    /// Builder-style [`Operand::negate`]
    pub fn negated(mut self) -> Self {
        self.negate();
        self
    }

    /// Builder-style swizzle assignment
    pub fn with_swizzle(mut self, swizzle: impl Into<String>) -> Self {
        self.swizzle = Some(swizzle.into());
        self
    }
}

impl From<Register> for Operand {
    fn from(reg: Register) -> Self {
        reg.operand()
    }
}

impl FromStr for Operand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Operand::parse(s)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.neg {
            f.write_str("-")?;
        }
        f.write_str(&self.name)?;
        if let Some(address) = self.address {
            write!(f, "@{}", address)?;
        }
        if let Some(swizzle) = &self.swizzle {
            write!(f, ".{}", swizzle)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_operand() {
        let op = Operand::parse("-uniform@3.xy").unwrap();
        assert_eq!(op.name, "uniform");
        assert_eq!(op.address, Some(3));
        assert_eq!(op.swizzle.as_deref(), Some("xy"));
        assert!(op.neg);
        assert_eq!(op.full(), "-uniform@3.xy");
    }

    #[test]
    fn test_parse_placeholders() {
        let op = Operand::parse("%2@1.w").unwrap();
        assert_eq!(op.name, "%2");
        assert_eq!(op.address, Some(1));

        let op = Operand::parse("%t1").unwrap();
        assert_eq!(op.name, "%t1");
        assert_eq!(op.address, None);
    }

    #[test]
    fn test_parse_literals() {
        let op = Operand::parse("-1.0").unwrap();
        assert_eq!(op.name, "-1.0");
        assert!(!op.neg);
        assert!(op.is_literal());
        assert_eq!(op.full(), "-1.0");

        assert!(Operand::parse("2").unwrap().is_literal());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for text in ["", "-", "a..x", "a@", "a@x", "a.xyzwx", "a.m", "1abc", "a b", "--a"] {
            let err = Operand::parse(text).unwrap_err();
            assert!(err.is_internal(), "{:?} should be rejected", text);
        }
    }

    #[test]
    fn test_add_offset() {
        let mut op = Operand::parse("attribute@2.x").unwrap();
        op.add_offset(3).unwrap();
        assert_eq!(op.full(), "attribute@5.x");

        let mut op = Operand::parse("%1").unwrap();
        op.add_offset(0).unwrap();
        assert_eq!(op.full(), "%1");
        op.add_offset(1).unwrap();
        assert_eq!(op.full(), "%1@1");

        let mut lit = Operand::parse("0.5").unwrap();
        lit.add_offset(2).unwrap();
        assert_eq!(lit.full(), "0.5");
    }

    #[test]
    fn test_add_offset_overflow() {
        let mut op = Operand::parse("temp@4294967295.x").unwrap();
        let err = op.add_offset(1).unwrap_err();
        assert!(matches!(
            err,
            Error::Builder(BuilderError::AddressOverflow { offset: 1, .. })
        ));
        assert_eq!(op.full(), "temp@4294967295.x");
        op.add_offset(0).unwrap();
        assert_eq!(op.offset_address(0).unwrap(), Some(u32::MAX));
    }

    #[test]
    fn test_negate() {
        assert_eq!(Operand::parse("temp@0").unwrap().negated().full(), "-temp@0");
        assert_eq!(Operand::parse("-temp@0").unwrap().negated().full(), "temp@0");
        assert_eq!(Operand::parse("1.0").unwrap().negated().full(), "-1.0");
        assert_eq!(Operand::parse("-1.0").unwrap().negated().full(), "1.0");
    }

    #[test]
    fn test_set_sign() {
        let mut op = Operand::parse("-uniform@0").unwrap();
        op.set_sign(false);
        assert_eq!(op.full(), "uniform@0");
        op.set_sign(true);
        op.set_sign(true);
        assert_eq!(op.full(), "-uniform@0");

        let mut lit = Operand::parse("1.0").unwrap();
        lit.set_sign(true);
        assert_eq!(lit.name, "1.0");
        assert!(lit.neg);
        assert_eq!(lit.full(), "-1.0");

        let mut lit = Operand::parse("-2.5").unwrap();
        lit.set_sign(true);
        assert_eq!(lit.full(), "2.5");
        let mut lit = Operand::parse("-2.5").unwrap();
        lit.set_sign(false);
        assert_eq!(lit.full(), "-2.5");
    }

    #[test]
    fn test_register() {
        let reg: Register = "varying@7".parse().unwrap();
        assert_eq!(reg, Register::new(RegisterClass::Varying, 7));
        assert_eq!(reg.offset(2).unwrap().to_string(), "varying@9");
        assert_eq!(Register::new(RegisterClass::Temp, u32::MAX).offset(1), None);

        let op = Operand::parse("varying@7.xyz").unwrap();
        assert_eq!(op.register(), Some(reg));
        assert_eq!(Operand::parse("%1").unwrap().register(), None);
        assert!("vertex@1".parse::<Register>().is_err());
    }
}
