use std::fmt;

use indexmap::IndexMap;
use itertools::Itertools;

use super::error::{ErrorKind, Limit};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Vector,
    Parameter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    kind: SymbolKind,
    capacity: Option<usize>,
}

impl Symbol {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> SymbolKind {
        self.kind
    }

    /// Declared length; only set for vectors.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match (self.kind, self.capacity) {
            (SymbolKind::Vector, Some(capacity)) => write!(f, "{}[{}]", self.name, capacity),
            (SymbolKind::Parameter, _) => write!(f, "{} (parameter)", self.name),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Names declared in one scope, kept in declaration order.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    owner: String,
    symbols: IndexMap<String, Symbol>,
    max_symbols: usize,
    max_name_len: usize,
}

impl SymbolTable {
    pub fn new(owner: impl Into<String>, max_symbols: usize, max_name_len: usize) -> Self {
        Self {
            owner: owner.into(),
            symbols: IndexMap::new(),
            max_symbols,
            max_name_len,
        }
    }

    pub fn declare(
        &mut self,
        name: &str,
        kind: SymbolKind,
        capacity: Option<usize>,
    ) -> Result<(), ErrorKind> {
        if name.chars().count() > self.max_name_len {
            return Err(ErrorKind::NameTooLong {
                name: name.to_string(),
                limit: self.max_name_len,
            });
        }
        if self.symbols.contains_key(name) {
            return Err(ErrorKind::DuplicateSymbol {
                name: name.to_string(),
                scope: self.owner.clone(),
            });
        }
        if self.symbols.len() >= self.max_symbols {
            return Err(ErrorKind::CapacityExceeded {
                what: Limit::SymbolsPerScope,
                limit: self.max_symbols,
            });
        }
        let capacity = match kind {
            SymbolKind::Vector => capacity,
            _ => None,
        };
        self.symbols.insert(
            name.to_string(),
            Symbol {
                name: name.to_string(),
                kind,
                capacity,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.values()
    }

    pub fn count_of(&self, kind: SymbolKind) -> usize {
        self.iter().filter(|s| s.kind == kind).count()
    }
}

impl fmt::Display for SymbolTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.iter().join(", "))
    }
}

/// Look a name up in the local table first, then the global one.
pub fn resolve<'a>(
    local: Option<&'a SymbolTable>,
    global: &'a SymbolTable,
    name: &str,
) -> Option<&'a Symbol> {
    local
        .and_then(|table| table.get(name))
        .or_else(|| global.get(name))
}
