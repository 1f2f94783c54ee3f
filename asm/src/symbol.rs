use crate::error::Error;
use arch::reg::{MAX_ADDRESS, PREDEFINED, VARIABLE_BASE};
use indexmap::IndexMap;
use tracing::debug;

/// Name to address bindings for one assembly unit.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: IndexMap<String, u16>,
    next: u16,
}

impl SymbolTable {
    pub fn new() -> Self {
        let symbols = PREDEFINED
            .iter()
            .map(|&(name, addr)| (name.to_string(), addr))
            .collect();
        SymbolTable {
            symbols,
            next: VARIABLE_BASE,
        }
    }

    /// Bind `name` to `addr`, returning the previous binding.
    pub fn define(&mut self, name: &str, addr: u16) -> Option<u16> {
        self.symbols.insert(name.to_string(), addr)
    }

    pub fn get(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    /// Look `name` up, allocating the next free variable register on first use.
    pub fn resolve(&mut self, name: &str) -> Result<u16, Error> {
        if let Some(addr) = self.get(name) {
            return Ok(addr);
        }
        if self.next > MAX_ADDRESS {
            return Err(Error::AddressSpace(name.to_string()));
        }
        let addr = self.next;
        self.next += 1;
        debug!("variable `{}` -> {}", name, addr);
        self.symbols.insert(name.to_string(), addr);
        Ok(addr)
    }

    /// Number of variable registers handed out so far.
    pub fn variables(&self) -> u16 {
        self.next - VARIABLE_BASE
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u16)> {
        self.symbols.iter().map(|(name, &addr)| (name.as_str(), addr))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
