use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::diagnostics::LanguageError;
use crate::table::{validate, FieldId, GrammarTable, Symbol, SymbolKind};

/// Newest table ABI this runtime understands.
pub const LANGUAGE_VERSION: u32 = 15;

/// Oldest table ABI this runtime still accepts.
pub const MIN_COMPATIBLE_LANGUAGE_VERSION: u32 = 13;

/// A validated grammar table, cheap to clone and shared read-only between
/// threads and parsers.
#[derive(Clone)]
pub struct Language {
    table: Arc<GrammarTable>,
}

impl Language {
    /// Validate `table` and wrap it in a handle.
    pub fn load(table: GrammarTable) -> Result<Language, LanguageError> {
        if !(MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&table.version) {
            return Err(LanguageError::incompatible(table.version));
        }
        validate::check(&table)?;
        debug!(
            language = %table.name,
            version = table.version,
            symbols = table.symbols.len(),
            states = table.states.len(),
            "loaded language"
        );
        Ok(Language { table: Arc::new(table) })
    }

    /// Decode a binary table artifact and load it.
    pub fn from_bytes(data: &[u8]) -> Result<Language, LanguageError> {
        Language::load(GrammarTable::from_bytes(data)?)
    }

    pub(crate) fn table(&self) -> &GrammarTable {
        &self.table
    }

    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn version(&self) -> u32 {
        self.table.version
    }

    pub fn symbol_count(&self) -> usize {
        self.table.symbols.len()
    }

    pub fn state_count(&self) -> usize {
        self.table.states.len()
    }

    /// Name of `symbol`, or `"ERROR"` for synthetic error nodes.
    pub fn symbol_name(&self, symbol: Symbol) -> Option<&str> {
        if symbol == Symbol::ERROR {
            return Some("ERROR");
        }
        self.table.metadata(symbol).map(|m| m.name.as_str())
    }

    pub fn symbol_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.table.symbols.iter().map(|m| m.name.as_str())
    }

    /// Look up a visible symbol by name. Anonymous tokens are found with
    /// `named = false`, e.g. `symbol_for_name("end", false)`.
    pub fn symbol_for_name(&self, name: &str, named: bool) -> Option<Symbol> {
        if name == "ERROR" && named {
            return Some(Symbol::ERROR);
        }
        self.table
            .symbols
            .iter()
            .position(|m| m.visible && m.named == named && m.name == name)
            .map(|i| Symbol(i as u16))
    }

    pub fn symbol_is_named(&self, symbol: Symbol) -> bool {
        symbol == Symbol::ERROR || self.table.metadata(symbol).is_some_and(|m| m.named)
    }

    pub fn symbol_is_visible(&self, symbol: Symbol) -> bool {
        symbol == Symbol::ERROR || self.table.metadata(symbol).is_some_and(|m| m.visible)
    }

    pub fn symbol_is_terminal(&self, symbol: Symbol) -> bool {
        self.table.metadata(symbol).is_some_and(|m| m.kind == SymbolKind::Terminal)
    }

    pub fn field_count(&self) -> usize {
        self.table.fields.len()
    }

    pub fn field_name(&self, field: FieldId) -> Option<&str> {
        self.table.fields.get(field.index()).map(String::as_str)
    }

    pub fn field_id_for_name(&self, name: &str) -> Option<FieldId> {
        let index = self.table.fields.iter().position(|f| f == name)?;
        u16::try_from(index).ok().map(FieldId)
    }

    /// True when both handles share the same table.
    pub fn same_table(&self, other: &Language) -> bool {
        Arc::ptr_eq(&self.table, &other.table)
    }
}

impl fmt::Debug for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.table.name)
            .field("version", &self.table.version)
            .field("symbols", &self.table.symbols.len())
            .field("states", &self.table.states.len())
            .finish()
    }
}
