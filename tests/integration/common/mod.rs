#![allow(dead_code)]

use std::process::Command;

use pyret_sitter::grammars::pyret;
use pyret_sitter::table::{ByteRange, LexState, ParseState, Production, SymbolKind, SymbolMetadata};
use pyret_sitter::{GrammarTable, Language, Node, Parser, Symbol, SyntaxTree, LANGUAGE_VERSION};

pub fn pyret_sitter() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pyret-sitter"))
}

pub fn language() -> &'static Language {
    pyret::language().unwrap()
}

pub fn parse(source: &str) -> SyntaxTree {
    Parser::new(language()).parse(source.as_bytes())
}

pub fn sexp(source: &str) -> String {
    parse(source).to_sexp()
}

/// Every child lies inside its parent, siblings are ordered and never overlap.
pub fn assert_spans_nested(tree: &SyntaxTree) {
    let root = tree.root_node();
    assert!(root.end_byte() <= tree.source().len());
    check_node(root);
}

fn check_node(node: &Node) {
    let mut previous_end = node.start_byte();
    for child in node.children() {
        assert!(child.start_byte() <= child.end_byte(), "inverted span {:?}", child.span());
        assert!(
            node.span().contains(child.span()),
            "child {:?} escapes parent {:?}",
            child.span(),
            node.span()
        );
        assert!(
            child.start_byte() >= previous_end,
            "child {:?} overlaps previous sibling ending at {previous_end}",
            child.span()
        );
        previous_end = child.end_byte();
        check_node(child);
    }
}

pub fn error_nodes(tree: &SyntaxTree) -> Vec<&Node> {
    tree.walk().filter(|n| n.is_error()).collect()
}

pub fn missing_nodes(tree: &SyntaxTree) -> Vec<&Node> {
    tree.walk().filter(|n| n.is_missing()).collect()
}

pub const WORD: Symbol = Symbol(1);
pub const PROGRAM: Symbol = Symbol(2);

/// A grammar accepting exactly one lowercase word: `program -> word`.
/// Unlike Pyret it rejects empty input.
pub fn word_table() -> GrammarTable {
    GrammarTable {
        name: "word".to_string(),
        version: LANGUAGE_VERSION,
        symbols: vec![
            SymbolMetadata::new("end", SymbolKind::Terminal, false, false, false),
            SymbolMetadata::new("word", SymbolKind::Terminal, true, true, false),
            SymbolMetadata::new("program", SymbolKind::NonTerminal, true, true, false),
        ],
        fields: Vec::new(),
        productions: vec![Production::new(PROGRAM, 1)],
        states: vec![
            ParseState::new().shift(WORD, 2).goto(PROGRAM, 1),
            ParseState::new().accept(Symbol::END),
            ParseState::new().reduce(&[Symbol::END], 0),
        ],
        lex_states: vec![
            LexState::new().on(b'a', b'z', 1),
            LexState::accepting(WORD).on(b'a', b'z', 1),
        ],
        separators: vec![ByteRange::single(b' ')],
        word_token: None,
        keywords: Vec::new(),
        external_tokens: Vec::new(),
        scanner: None,
    }
}

pub fn word_language() -> Language {
    Language::load(word_table()).unwrap()
}
