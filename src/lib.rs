//! Runtime for pre-generated, table-driven grammars.
//!
//! A [`GrammarTable`] produced by a grammar generator is validated into a
//! [`Language`]; a [`Parser`] bound to that language turns bytes into a
//! concrete [`SyntaxTree`], recovering from errors instead of failing.
//! [`grammars::pyret`] bundles a table for a subset of Pyret.

pub mod config;
pub mod diagnostics;
pub mod grammars;
pub mod language;
pub mod lexer;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod table;
pub mod tree;

pub use config::ParseOptions;
pub use diagnostics::{ConfigError, LanguageError, SyntaxError, SyntaxErrorKind};
pub use language::{Language, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};
pub use lexer::external::{ExternalScanner, ExternalToken};
pub use parser::Parser;
pub use span::Span;
pub use table::{FieldId, GrammarTable, Symbol};
pub use tree::{Node, SyntaxTree};

/// Parse `text` with default options.
pub fn parse(language: &Language, text: &[u8]) -> SyntaxTree {
    Parser::new(language).parse(text)
}
