//! Per-compilation symbol tables
//!
//! Each declaration class (uniform, attribute, varying) owns a slot cursor and
//! a name-keyed entry map. Temporaries only have a cursor: they are anonymous
//! and never reused within a compilation unit.

use super::operand::{Register, RegisterClass};
use std::collections::HashMap;
use tracing::{debug, trace};

/// A declaration the IR layer can assign registers to
pub trait Declaration {
    /// Name, unique within its class for one compilation unit
    fn name(&self) -> &str;

    /// Number of consecutive register slots the declared type occupies
    fn slot_count(&self) -> u32;
}

/// Minimal [`Declaration`] for drivers that don't carry their own AST node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDeclaration {
    /// Declared name
    pub name: String,
    /// Slots occupied by the declared type
    pub slots: u32,
}

impl SimpleDeclaration {
    /// Create a declaration
    pub fn new(name: impl Into<String>, slots: u32) -> Self {
        Self {
            name: name.into(),
            slots,
        }
    }
}

impl Declaration for SimpleDeclaration {
    fn name(&self) -> &str {
        &self.name
    }

    fn slot_count(&self) -> u32 {
        self.slots
    }
}

/// Registered declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolEntry {
    /// Declared name
    pub name: String,
    /// Slots occupied
    pub slots: u32,
    /// Assigned output register
    pub out: Register,
}

/// Symbol table for one declaration class
#[derive(Debug, Clone)]
pub struct SymbolTable {
    class: RegisterClass,
    next: u32,
    entries: HashMap<String, usize>,
    /// Entries in assignment order
    order: Vec<SymbolEntry>,
}

impl SymbolTable {
    /// Create an empty table for `class`
    pub fn new(class: RegisterClass) -> Self {
        Self {
            class,
            next: 0,
            entries: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Register class served by this table
    pub fn class(&self) -> RegisterClass {
        self.class
    }

    /// Next free slot index
    pub fn next(&self) -> u32 {
        self.next
    }

    /// Return the register assigned to `decl`, assigning one on first use.
    ///
    /// Re-resolving a known name returns the original register and leaves the
    /// cursor untouched. The cursor saturates at the last slot index.
    pub fn resolve(&mut self, decl: &dyn Declaration) -> Register {
        if let Some(&i) = self.entries.get(decl.name()) {
            return self.order[i].out;
        }

        let out = Register::new(self.class, self.next);
        self.next = self.next.saturating_add(decl.slot_count());

        debug!(
            "Registered {} '{}' at {} ({} slots)",
            self.class,
            decl.name(),
            out,
            decl.slot_count()
        );

        self.entries.insert(decl.name().to_string(), self.order.len());
        self.order.push(SymbolEntry {
            name: decl.name().to_string(),
            slots: decl.slot_count(),
            out,
        });

        out
    }

    /// Look up a registered declaration by name
    pub fn lookup(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name).map(|&i| &self.order[i])
    }

    /// Registered entries in assignment order
    pub fn entries(&self) -> &[SymbolEntry] {
        &self.order
    }

    /// Number of registered declarations
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Allocator for anonymous temporaries
#[derive(Debug, Clone, Default)]
pub struct TempAllocator {
    next: u32,
}

impl TempAllocator {
    /// Next free temp slot
    pub fn next(&self) -> u32 {
        self.next
    }

    /// Allocate `n` consecutive slots and return the first. The cursor
    /// saturates at the last slot index.
    pub fn alloc(&mut self, n: u32) -> Register {
        let reg = Register::new(RegisterClass::Temp, self.next);
        self.next = self.next.saturating_add(n);
        trace!("Allocated {} ({} slots)", reg, n);
        reg
    }
}

/// All symbol tables of one compilation unit
#[derive(Debug, Clone)]
pub struct SymbolTables {
    /// Uniform declarations
    pub uniform: SymbolTable,
    /// Attribute declarations
    pub attribute: SymbolTable,
    /// Varying declarations
    pub varying: SymbolTable,
    /// Temporaries
    pub temp: TempAllocator,
}

impl SymbolTables {
    /// Create empty tables
    pub fn new() -> Self {
        Self {
            uniform: SymbolTable::new(RegisterClass::Uniform),
            attribute: SymbolTable::new(RegisterClass::Attribute),
            varying: SymbolTable::new(RegisterClass::Varying),
            temp: TempAllocator::default(),
        }
    }

    /// Table for a declaration class; `None` for temporaries
    pub fn table(&self, class: RegisterClass) -> Option<&SymbolTable> {
        match class {
            RegisterClass::Uniform => Some(&self.uniform),
            RegisterClass::Attribute => Some(&self.attribute),
            RegisterClass::Varying => Some(&self.varying),
            RegisterClass::Temp => None,
        }
    }

    /// Resolve `decl` in `class`.
    ///
    /// Temporaries are never deduplicated: resolving in [`RegisterClass::Temp`]
    /// always allocates `decl.slot_count()` fresh slots.
    pub fn resolve(&mut self, class: RegisterClass, decl: &dyn Declaration) -> Register {
        match class {
            RegisterClass::Uniform => self.uniform.resolve(decl),
            RegisterClass::Attribute => self.attribute.resolve(decl),
            RegisterClass::Varying => self.varying.resolve(decl),
            RegisterClass::Temp => self.temp.alloc(decl.slot_count()),
        }
    }
}

impl Default for SymbolTables {
    fn default() -> Self {
        Self::new()
    }
}
