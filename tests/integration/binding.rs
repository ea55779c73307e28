mod common;

use pyret_sitter::grammars::pyret;
use pyret_sitter::{Parser, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

#[test]
fn can_load_grammar() {
    let language = pyret::language().expect("Error loading Pyret grammar");
    let parser = Parser::new(language);
    assert!(parser.language().same_table(language));
}

#[test]
fn symbol_names_are_present() {
    let language = pyret::language().unwrap();
    let names: Vec<&str> = language.symbol_names().collect();
    assert!(!names.is_empty());
    assert!(names.iter().all(|n| !n.is_empty()));
    assert!(names.contains(&"source_file"));
    assert_eq!(names.len(), language.symbol_count());
}

#[test]
fn version_is_supported() {
    let version = pyret::language().unwrap().version();
    assert!((MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&version));
}

#[test]
fn repeated_calls_share_one_handle() {
    let first = pyret::language().unwrap();
    let second = pyret::language().unwrap();
    assert!(std::ptr::eq(first, second));
}

#[test]
fn parses_with_the_loaded_grammar() {
    let tree = common::parse("x = 1");
    assert!(!tree.has_error());
    assert_eq!(tree.kind(tree.root_node()), "source_file");
}
