//! Compiled grammar tables.
//!
//! A [`GrammarTable`] is the output of an external grammar generator: the
//! symbol inventory, the productions, the LR parse states and the lexer
//! automaton. The runtime never builds one from a grammar; it only validates
//! and executes them. Tables can be written out by generated Rust code (see
//! [`crate::grammars`]) or decoded from the binary container in [`binary`].

pub mod binary;
pub mod validate;

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::lexer::external::ExternalScanner;

/// Index of a parse state.
pub type StateId = u16;

/// Index of a production.
pub type ProductionId = u16;

/// Every table starts parsing in this state.
pub const START_STATE: StateId = 0;

/// Grammar symbol id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u16);

impl Symbol {
    /// End of input. Always symbol 0.
    pub const END: Symbol = Symbol(0);
    /// Synthetic error nodes produced by recovery.
    pub const ERROR: Symbol = Symbol(u16::MAX);

    pub fn id(self) -> u16 {
        self.0
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Field id, an index into [`GrammarTable::fields`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FieldId(pub u16);

impl FieldId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SymbolKind {
    Terminal,
    NonTerminal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMetadata {
    pub name: String,
    pub kind: SymbolKind,
    /// Invisible non-terminals are inlined into their parent.
    pub visible: bool,
    pub named: bool,
    /// Extras may appear between any two tokens (comments).
    pub extra: bool,
}

impl SymbolMetadata {
    pub fn new(name: impl Into<String>, kind: SymbolKind, visible: bool, named: bool, extra: bool) -> Self {
        Self { name: name.into(), kind, visible, named, extra }
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == SymbolKind::Terminal
    }

    /// Hidden non-terminals never appear in the tree; their children do.
    pub fn is_hidden_rule(&self) -> bool {
        self.kind == SymbolKind::NonTerminal && !self.visible
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Shift(StateId),
    Reduce(ProductionId),
    Accept,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Production {
    pub lhs: Symbol,
    pub child_count: u16,
    /// `(child index, field)` pairs; the index counts non-extra children.
    pub fields: Vec<(u16, FieldId)>,
}

impl Production {
    pub fn new(lhs: impl Into<Symbol>, child_count: u16) -> Self {
        Self { lhs: lhs.into(), child_count, fields: Vec::new() }
    }

    pub fn field(mut self, child_index: u16, field: FieldId) -> Self {
        self.fields.push((child_index, field));
        self
    }

    pub fn field_for(&self, child_index: u16) -> Option<FieldId> {
        self.fields.iter().find(|(i, _)| *i == child_index).map(|(_, f)| *f)
    }
}

/// One row of the LR automaton. Both lists are kept sorted by symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseState {
    pub actions: Vec<(Symbol, Action)>,
    pub gotos: Vec<(Symbol, StateId)>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift(self, symbol: impl Into<Symbol>, state: StateId) -> Self {
        self.with_action(symbol.into(), Action::Shift(state))
    }

    pub fn reduce<S: Copy + Into<Symbol>>(mut self, lookaheads: &[S], production: ProductionId) -> Self {
        for &symbol in lookaheads {
            self = self.with_action(symbol.into(), Action::Reduce(production));
        }
        self
    }

    pub fn accept(self, symbol: impl Into<Symbol>) -> Self {
        self.with_action(symbol.into(), Action::Accept)
    }

    pub fn goto(mut self, symbol: impl Into<Symbol>, state: StateId) -> Self {
        self.gotos.push((symbol.into(), state));
        self.gotos.sort_by_key(|(s, _)| *s);
        self
    }

    fn with_action(mut self, symbol: Symbol, action: Action) -> Self {
        // Stable sort keeps duplicate entries adjacent so validation can report them.
        self.actions.push((symbol, action));
        self.actions.sort_by_key(|(s, _)| *s);
        self
    }

    pub fn action(&self, symbol: Symbol) -> Option<Action> {
        self.actions
            .binary_search_by_key(&symbol, |(s, _)| *s)
            .ok()
            .map(|i| self.actions[i].1)
    }

    pub fn goto_state(&self, symbol: Symbol) -> Option<StateId> {
        self.gotos
            .binary_search_by_key(&symbol, |(s, _)| *s)
            .ok()
            .map(|i| self.gotos[i].1)
    }

    /// Terminals with an entry in this row, in symbol order.
    pub fn valid_terminals(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.actions.iter().map(|(s, _)| *s)
    }
}

/// Inclusive byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByteRange {
    pub lo: u8,
    pub hi: u8,
}

impl ByteRange {
    pub const fn new(lo: u8, hi: u8) -> Self {
        Self { lo, hi }
    }

    pub const fn single(byte: u8) -> Self {
        Self { lo: byte, hi: byte }
    }

    pub fn contains(&self, byte: u8) -> bool {
        self.lo <= byte && byte <= self.hi
    }
}

/// A state of the lexer DFA. State 0 is the start state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexState {
    pub accept: Option<Symbol>,
    pub transitions: Vec<(ByteRange, u16)>,
}

impl LexState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accepting(symbol: impl Into<Symbol>) -> Self {
        Self { accept: Some(symbol.into()), transitions: Vec::new() }
    }

    pub fn on(mut self, lo: u8, hi: u8, next: u16) -> Self {
        self.transitions.push((ByteRange::new(lo, hi), next));
        self
    }

    pub fn on_byte(self, byte: u8, next: u16) -> Self {
        self.on(byte, byte, next)
    }

    pub fn next(&self, byte: u8) -> Option<u16> {
        self.transitions
            .iter()
            .find(|(range, _)| range.contains(byte))
            .map(|(_, next)| *next)
    }
}

/// Hand-written tokenizer attached to a table that declares external tokens.
#[derive(Clone)]
pub struct ScannerHook(pub Arc<dyn ExternalScanner>);

impl fmt::Debug for ScannerHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ScannerHook(..)")
    }
}

/// The compiled form of a grammar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarTable {
    pub name: String,
    /// ABI version the table was generated for.
    pub version: u32,
    /// Indexed by [`Symbol`]; entry 0 is the end-of-input symbol.
    pub symbols: Vec<SymbolMetadata>,
    pub fields: Vec<String>,
    pub productions: Vec<Production>,
    pub states: Vec<ParseState>,
    pub lex_states: Vec<LexState>,
    /// Bytes skipped between tokens without producing nodes.
    pub separators: Vec<ByteRange>,
    /// Token whose matches are checked against [`GrammarTable::keywords`].
    pub word_token: Option<Symbol>,
    pub keywords: Vec<(String, Symbol)>,
    /// Terminals produced by the external scanner, in scanner index order.
    pub external_tokens: Vec<Symbol>,
    #[serde(skip)]
    pub scanner: Option<ScannerHook>,
}

impl GrammarTable {
    /// Attach the external scanner, e.g. after decoding a binary artifact.
    pub fn with_scanner(mut self, scanner: Arc<dyn ExternalScanner>) -> Self {
        self.scanner = Some(ScannerHook(scanner));
        self
    }

    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn metadata(&self, symbol: Symbol) -> Option<&SymbolMetadata> {
        self.symbols.get(symbol.index())
    }

    pub fn is_extra(&self, symbol: Symbol) -> bool {
        self.metadata(symbol).is_some_and(|m| m.extra)
    }

    pub fn is_external(&self, symbol: Symbol) -> bool {
        self.external_tokens.contains(&symbol)
    }

    pub fn keyword(&self, word: &[u8]) -> Option<Symbol> {
        self.keywords
            .iter()
            .find(|(text, _)| text.as_bytes() == word)
            .map(|(_, symbol)| *symbol)
    }

    pub fn is_separator(&self, byte: u8) -> bool {
        self.separators.iter().any(|r| r.contains(byte))
    }
}
