//! Pre-generated table for a subset of Pyret: bindings, functions, check
//! tests, operator chains, applications and literals.

mod lex;
mod parse_table;
mod scanner;

use std::sync::{Arc, OnceLock};

use crate::diagnostics::LanguageError;
use crate::language::{Language, LANGUAGE_VERSION};
use crate::table::{FieldId, GrammarTable, Symbol, SymbolKind, SymbolMetadata};

pub use scanner::ParenScanner;

macro_rules! pyret_symbols {
    ($($variant:ident = $id:literal => $name:literal, $kind:ident, $visible:literal, $named:literal, $extra:literal;)*) => {
        /// Every symbol of the Pyret table, for `match`-based dispatch on
        /// [`crate::Node::symbol`].
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u16)]
        pub enum PyretSymbol {
            $($variant = $id,)*
        }

        impl PyretSymbol {
            pub const ALL: &'static [PyretSymbol] = &[$(PyretSymbol::$variant,)*];

            pub fn symbol(self) -> Symbol {
                Symbol(self as u16)
            }
        }

        impl TryFrom<Symbol> for PyretSymbol {
            type Error = Symbol;

            fn try_from(symbol: Symbol) -> Result<Self, Symbol> {
                match symbol.0 {
                    $($id => Ok(PyretSymbol::$variant),)*
                    _ => Err(symbol),
                }
            }
        }

        fn symbol_metadata() -> Vec<SymbolMetadata> {
            vec![$(SymbolMetadata::new($name, SymbolKind::$kind, $visible, $named, $extra),)*]
        }
    };
}

pyret_symbols! {
    End = 0 => "end", Terminal, false, false, false;
    Name = 1 => "name", Terminal, true, true, false;
    Number = 2 => "number", Terminal, true, true, false;
    String = 3 => "string", Terminal, true, true, false;
    Eq = 4 => "=", Terminal, true, false, false;
    Colon = 5 => ":", Terminal, true, false, false;
    Comma = 6 => ",", Terminal, true, false, false;
    RParen = 7 => ")", Terminal, true, false, false;
    Plus = 8 => "+", Terminal, true, false, false;
    Minus = 9 => "-", Terminal, true, false, false;
    Star = 10 => "*", Terminal, true, false, false;
    Slash = 11 => "/", Terminal, true, false, false;
    Lt = 12 => "<", Terminal, true, false, false;
    Gt = 13 => ">", Terminal, true, false, false;
    EqEq = 14 => "==", Terminal, true, false, false;
    And = 15 => "and", Terminal, true, false, false;
    Or = 16 => "or", Terminal, true, false, false;
    Is = 17 => "is", Terminal, true, false, false;
    IsNot = 18 => "is-not", Terminal, true, false, false;
    True = 19 => "true", Terminal, true, false, false;
    False = 20 => "false", Terminal, true, false, false;
    Fun = 21 => "fun", Terminal, true, false, false;
    KwEnd = 22 => "end", Terminal, true, false, false;
    LineComment = 23 => "line_comment", Terminal, true, true, true;
    BlockComment = 24 => "block_comment", Terminal, true, true, true;
    ParenNoSpace = 25 => "(", Terminal, true, false, false;
    ParenSpace = 26 => "(", Terminal, true, false, false;
    SourceFile = 27 => "source_file", NonTerminal, true, true, false;
    Block = 28 => "block", NonTerminal, true, true, false;
    BlockRepeat1 = 29 => "_block_repeat1", NonTerminal, false, false, false;
    Stmt = 30 => "_stmt", NonTerminal, false, false, false;
    LetExpr = 31 => "let_expr", NonTerminal, true, true, false;
    NameBinding = 32 => "name_binding", NonTerminal, true, true, false;
    FunExpr = 33 => "fun_expr", NonTerminal, true, true, false;
    Args = 34 => "args", NonTerminal, true, true, false;
    ArgsRepeat1 = 35 => "_args_repeat1", NonTerminal, false, false, false;
    CheckTest = 36 => "check_test", NonTerminal, true, true, false;
    CheckOp = 37 => "check_op", NonTerminal, true, true, false;
    BinopExpr = 38 => "_binop_expr", NonTerminal, false, false, false;
    Binop = 39 => "binop", NonTerminal, true, true, false;
    Expr = 40 => "_expr", NonTerminal, false, false, false;
    IdExpr = 41 => "id_expr", NonTerminal, true, true, false;
    PrimExpr = 42 => "prim_expr", NonTerminal, true, true, false;
    NumExpr = 43 => "num_expr", NonTerminal, true, true, false;
    StringExpr = 44 => "string_expr", NonTerminal, true, true, false;
    BoolExpr = 45 => "bool_expr", NonTerminal, true, true, false;
    ParenExpr = 46 => "paren_expr", NonTerminal, true, true, false;
    AppExpr = 47 => "app_expr", NonTerminal, true, true, false;
    AppArgs = 48 => "app_args", NonTerminal, true, true, false;
    CommaBinops = 49 => "comma_binops", NonTerminal, true, true, false;
    CommaBinopsRepeat1 = 50 => "_comma_binops_repeat1", NonTerminal, false, false, false;
}

impl From<PyretSymbol> for Symbol {
    fn from(symbol: PyretSymbol) -> Symbol {
        symbol.symbol()
    }
}

/// Field names, sorted; indices are the [`FieldId`]s used by the productions.
const FIELD_NAMES: &[&str] = &["args", "binding", "body", "function", "left", "name", "op", "right", "value"];

pub(crate) const FIELD_ARGS: FieldId = FieldId(0);
pub(crate) const FIELD_BINDING: FieldId = FieldId(1);
pub(crate) const FIELD_BODY: FieldId = FieldId(2);
pub(crate) const FIELD_FUNCTION: FieldId = FieldId(3);
pub(crate) const FIELD_LEFT: FieldId = FieldId(4);
pub(crate) const FIELD_NAME: FieldId = FieldId(5);
pub(crate) const FIELD_OP: FieldId = FieldId(6);
pub(crate) const FIELD_RIGHT: FieldId = FieldId(7);
pub(crate) const FIELD_VALUE: FieldId = FieldId(8);

/// A fresh copy of the Pyret grammar table, scanner attached.
pub fn table() -> GrammarTable {
    GrammarTable {
        name: "pyret".to_string(),
        version: LANGUAGE_VERSION,
        symbols: symbol_metadata(),
        fields: FIELD_NAMES.iter().map(|f| f.to_string()).collect(),
        productions: parse_table::productions(),
        states: parse_table::states(),
        lex_states: lex::lex_states(),
        separators: lex::separators(),
        word_token: Some(PyretSymbol::Name.symbol()),
        keywords: lex::keywords(),
        external_tokens: vec![PyretSymbol::ParenNoSpace.symbol(), PyretSymbol::ParenSpace.symbol()],
        scanner: None,
    }
    .with_scanner(Arc::new(ParenScanner))
}

/// The process-wide Pyret language, loaded on first use.
pub fn language() -> Result<&'static Language, LanguageError> {
    static LANGUAGE: OnceLock<Result<Language, LanguageError>> = OnceLock::new();
    LANGUAGE.get_or_init(|| Language::load(table())).as_ref().map_err(Clone::clone)
}
