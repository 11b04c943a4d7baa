//! Symbol table management for labels

use std::collections::HashMap;

use crate::assembler::Symbol;

/// Symbol table for managing label definitions
///
/// Label names are case-insensitive: they are stored lowercased and every
/// lookup is normalized the same way. Symbols are kept in definition order;
/// `index` maps each lowercased name to its position in `symbols`.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, usize>,
}

impl SymbolTable {
    /// Create a new empty symbol table
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a symbol to the table
    ///
    /// Returns Ok(()) on success, Err with the existing symbol if the name is
    /// already defined (compared case-insensitively)
    pub fn add_symbol(
        &mut self,
        name: &str,
        offset: usize,
        defined_at: usize,
    ) -> Result<(), Symbol> {
        let key = name.to_ascii_lowercase();

        if let Some(&idx) = self.index.get(&key) {
            return Err(self.symbols[idx].clone());
        }

        self.index.insert(key.clone(), self.symbols.len());
        self.symbols.push(Symbol {
            name: key,
            offset,
            defined_at,
        });

        Ok(())
    }

    /// Look up a symbol by name
    pub fn lookup_symbol(&self, name: &str) -> Option<&Symbol> {
        let idx = match self.index.get(name) {
            Some(idx) => *idx,
            None => *self.index.get(&name.to_ascii_lowercase())?,
        };
        self.symbols.get(idx)
    }

    /// Get all symbols, in definition order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Consume the table, yielding its symbols in definition order
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_table_add_lookup() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol("START", 0, 1).is_ok());
        assert!(table.add_symbol("loop", 16, 5).is_ok());

        let start = table.lookup_symbol("start").unwrap();
        assert_eq!(start.name, "start");
        assert_eq!(start.offset, 0);

        let loop_sym = table.lookup_symbol("LOOP").unwrap();
        assert_eq!(loop_sym.offset, 16);
        assert_eq!(loop_sym.defined_at, 5);

        assert!(table.lookup_symbol("undefined").is_none());
        assert_eq!(table.symbols().len(), 2);
    }

    #[test]
    fn test_symbol_table_duplicate() {
        let mut table = SymbolTable::new();

        assert!(table.add_symbol("start", 0, 1).is_ok());
        let existing = table.add_symbol("Start", 9, 10).unwrap_err();
        assert_eq!(existing.defined_at, 1);

        // Original symbol should still be there
        let start = table.lookup_symbol("start").unwrap();
        assert_eq!(start.offset, 0);
        assert_eq!(table.symbols().len(), 1);
    }

    #[test]
    fn test_symbol_table_many_labels_keep_order() {
        let mut table = SymbolTable::new();

        for i in 0..2000 {
            table.add_symbol(&format!("Label_{i}"), i * 2, i + 1).unwrap();
        }

        assert_eq!(table.lookup_symbol("LABEL_1999").unwrap().offset, 3998);
        assert_eq!(table.lookup_symbol("label_0").unwrap().defined_at, 1);
        assert!(table.add_symbol("label_1000", 0, 9999).is_err());

        let names: Vec<_> = table.symbols().iter().take(3).map(|s| &s.name[..]).collect();
        assert_eq!(names, ["label_0", "label_1", "label_2"]);
        assert_eq!(table.into_symbols().len(), 2000);
    }
}
