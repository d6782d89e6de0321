use std::fmt;

use super::error::{ErrorKind, Limit};
use super::options::TranslatorOptions;
use super::scope::SymbolTable;

#[derive(Debug, Clone)]
pub struct System {
    name: String,
    declared_equation_count: usize,
    local_scope: SymbolTable,
}

impl System {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The count written in the system header; not checked against the block.
    pub fn declared_equation_count(&self) -> usize {
        self.declared_equation_count
    }

    pub fn scope(&self) -> &SymbolTable {
        &self.local_scope
    }

    pub fn scope_mut(&mut self) -> &mut SymbolTable {
        &mut self.local_scope
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "system {}({}): {}",
            self.name, self.declared_equation_count, self.local_scope
        )
    }
}

/// The program being translated: shared declarations plus its systems.
#[derive(Debug, Clone)]
pub struct Catastrophe {
    name: String,
    global_scope: SymbolTable,
    systems: Vec<System>,
    max_systems: usize,
    max_symbols: usize,
    max_name_len: usize,
}

impl Catastrophe {
    pub fn new(options: &TranslatorOptions) -> Self {
        Self {
            name: String::new(),
            global_scope: SymbolTable::new(
                "catastrophe",
                options.max_symbols_per_scope,
                options.max_identifier_len,
            ),
            systems: Vec::new(),
            max_systems: options.max_systems,
            max_symbols: options.max_symbols_per_scope,
            max_name_len: options.max_identifier_len,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> Result<(), ErrorKind> {
        self.check_name(name)?;
        self.name = name.to_string();
        self.global_scope.set_owner(format!("catastrophe {}", name));
        Ok(())
    }

    pub fn globals(&self) -> &SymbolTable {
        &self.global_scope
    }

    pub fn globals_mut(&mut self) -> &mut SymbolTable {
        &mut self.global_scope
    }

    pub fn systems(&self) -> &[System] {
        &self.systems
    }

    pub fn system(&self, index: usize) -> Option<&System> {
        self.systems.get(index)
    }

    pub fn system_mut(&mut self, index: usize) -> Option<&mut System> {
        self.systems.get_mut(index)
    }

    /// Register a new system and return its index.
    pub fn add_system(&mut self, name: &str, equations: usize) -> Result<usize, ErrorKind> {
        self.check_name(name)?;
        if self.systems.iter().any(|s| s.name == name) {
            return Err(ErrorKind::DuplicateSymbol {
                name: name.to_string(),
                scope: format!("catastrophe {}", self.name),
            });
        }
        if self.systems.len() >= self.max_systems {
            return Err(ErrorKind::CapacityExceeded {
                what: Limit::Systems,
                limit: self.max_systems,
            });
        }
        self.systems.push(System {
            name: name.to_string(),
            declared_equation_count: equations,
            local_scope: SymbolTable::new(
                format!("system {}", name),
                self.max_symbols,
                self.max_name_len,
            ),
        });
        Ok(self.systems.len() - 1)
    }

    fn check_name(&self, name: &str) -> Result<(), ErrorKind> {
        if name.chars().count() > self.max_name_len {
            return Err(ErrorKind::NameTooLong {
                name: name.to_string(),
                limit: self.max_name_len,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Catastrophe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "catastrophe {}", self.name)?;
        writeln!(f, "  globals: {}", self.global_scope)?;
        for system in &self.systems {
            writeln!(f, "  {}", system)?;
        }
        Ok(())
    }
}
