mod common;

use std::sync::Arc;

use common::{word_language, word_table};
use pyret_sitter::grammars::pyret::{self, ParenScanner};
use pyret_sitter::table::binary::{is_table_artifact, HEADER_SIZE};
use pyret_sitter::{GrammarTable, Language, LanguageError, Parser};

const PROGRAMS: &[&str] = &[
    "x = 1",
    "fun add(a, b): a + b end",
    "f(1) is 2",
    "(1 + 2",
    "x = 1 @ y = 2",
];

#[test]
fn artifact_on_disk_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pyret.pgtb");
    std::fs::write(&path, pyret::table().to_bytes().unwrap()).unwrap();

    let data = std::fs::read(&path).unwrap();
    assert!(is_table_artifact(&data));
    let table = GrammarTable::from_bytes(&data).unwrap().with_scanner(Arc::new(ParenScanner));
    let loaded = Language::load(table).unwrap();

    let bundled = pyret::language().unwrap();
    assert!(!loaded.same_table(bundled));
    assert_eq!(loaded.name(), bundled.name());
    assert_eq!(loaded.symbol_count(), bundled.symbol_count());
    assert_eq!(loaded.state_count(), bundled.state_count());
    for source in PROGRAMS {
        let expected = Parser::new(bundled).parse(source.as_bytes());
        let actual = Parser::new(&loaded).parse(source.as_bytes());
        assert_eq!(actual.to_sexp(), expected.to_sexp(), "{source}");
        assert_eq!(actual.errors(), expected.errors(), "{source}");
    }
}

#[test]
fn scanner_is_not_serialized() {
    let bytes = pyret::table().to_bytes().unwrap();
    match Language::from_bytes(&bytes) {
        Err(LanguageError::MalformedTable { msg }) => assert!(msg.contains("external scanner")),
        other => panic!("expected a missing scanner error, got {other:?}"),
    }
}

#[test]
fn grammar_without_externals_loads_directly() {
    let bytes = word_table().to_bytes().unwrap();
    let language = Language::from_bytes(&bytes).unwrap();
    let expected = Parser::new(&word_language()).parse(b"hello");
    let actual = Parser::new(&language).parse(b"hello");
    assert_eq!(actual.to_sexp(), expected.to_sexp());
    assert!(!actual.has_error());
}

#[test]
fn corrupt_artifacts_are_rejected() {
    let bytes = word_table().to_bytes().unwrap();

    assert_eq!(Language::from_bytes(b"").unwrap_err(), LanguageError::truncated(HEADER_SIZE, 0));
    assert_eq!(Language::from_bytes(b"\x7fELF....").unwrap_err(), LanguageError::InvalidMagic);
    assert_eq!(
        Language::from_bytes(&bytes[..HEADER_SIZE - 1]).unwrap_err(),
        LanguageError::truncated(HEADER_SIZE, HEADER_SIZE - 1)
    );

    let mut flipped = bytes.clone();
    let last = flipped.len() - 1;
    flipped[last] ^= 0x01;
    assert!(matches!(
        Language::from_bytes(&flipped),
        Err(LanguageError::MalformedTable { msg }) if msg.contains("checksum")
    ));

    let short = &bytes[..bytes.len() - 1];
    assert!(matches!(
        Language::from_bytes(short),
        Err(LanguageError::MalformedTable { msg }) if msg.contains("length")
    ));
}

#[test]
fn artifact_version_outside_range() {
    let mut bytes = word_table().to_bytes().unwrap();
    bytes[4..8].copy_from_slice(&16u32.to_le_bytes());
    match Language::from_bytes(&bytes) {
        Err(LanguageError::IncompatibleVersion { version, .. }) => assert_eq!(version, 16),
        other => panic!("expected IncompatibleVersion, got {other:?}"),
    }
}

#[test]
fn older_compatible_artifact_loads() {
    let mut table = word_table();
    table.version = 13;
    let language = Language::from_bytes(&table.to_bytes().unwrap()).unwrap();
    assert_eq!(language.version(), 13);
}

#[test]
fn structurally_invalid_artifact_fails_validation() {
    let mut table = word_table();
    table.states.truncate(2);
    let bytes = table.to_bytes().unwrap();
    assert!(GrammarTable::from_bytes(&bytes).is_ok());
    assert!(matches!(Language::from_bytes(&bytes), Err(LanguageError::MalformedTable { .. })));
}
