mod common;

use std::thread;

use pyret_sitter::grammars::pyret;
use pyret_sitter::Parser;

const SOURCES: &[&str] = &[
    "x = 1",
    "fun add(a, b): a + b end\nadd(1, 2) is 3",
    "(1 + 2",
    "x = 1 @ y = 2",
    "f(x)(y)",
];

#[test]
fn threads_share_one_language() {
    let language = pyret::language().unwrap();
    let expected: Vec<String> = SOURCES.iter().map(|s| Parser::new(language).parse(s.as_bytes()).to_sexp()).collect();

    let results: Vec<Vec<String>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                scope.spawn(|| {
                    let language = pyret::language().unwrap();
                    let parser = Parser::new(language);
                    SOURCES.iter().map(|s| parser.parse(s.as_bytes()).to_sexp()).collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for result in results {
        assert_eq!(result, expected);
    }
}

#[test]
fn one_parser_cloned_across_threads() {
    let parser = Parser::new(pyret::language().unwrap());
    let expected = parser.parse(b"fun f(x): x end").to_sexp();
    thread::scope(|scope| {
        for _ in 0..4 {
            let parser = parser.clone();
            let expected = &expected;
            scope.spawn(move || {
                for _ in 0..50 {
                    assert_eq!(&parser.parse(b"fun f(x): x end").to_sexp(), expected);
                }
            });
        }
    });
}

#[test]
fn first_use_races_resolve_to_one_handle() {
    let addresses: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| pyret::language().unwrap() as *const _ as usize))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert!(addresses.windows(2).all(|w| w[0] == w[1]));
}

#[test]
fn trees_move_between_threads() {
    let tree = common::parse("x = 1");
    let sexp = thread::spawn(move || tree.to_sexp()).join().unwrap();
    assert_eq!(sexp, common::sexp("x = 1"));
}
