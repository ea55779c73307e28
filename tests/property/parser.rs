// Property tests for the parse engine:
// 1. Any byte string parses to a tree covering the whole input, spans nested
// 2. Parsing is deterministic
// 3. Generated well-formed programs parse without errors
// 4. A run of unlexable bytes between statements yields exactly one ERROR

use proptest::prelude::*;
use pyret_sitter::grammars::pyret;
use pyret_sitter::{Node, Parser, Span, SyntaxTree};

fn parse(source: &[u8]) -> SyntaxTree {
    Parser::new(pyret::language().unwrap()).parse(source)
}

fn spans_nested(node: &Node) -> bool {
    let mut previous_end = node.start_byte();
    for child in node.children() {
        if !node.span().contains(child.span()) || child.start_byte() < previous_end {
            return false;
        }
        previous_end = child.end_byte();
        if !spans_nested(child) {
            return false;
        }
    }
    true
}

// Names get a prefix so they never collide with keywords.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,4}(-[a-z]{1,3})?".prop_map(|n| format!("v{n}"))
}

fn arb_atom() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_name(),
        (0..1000u32).prop_map(|n| n.to_string()),
        (0..100u32, 1..100u32).prop_map(|(a, b)| format!("{a}.{b}")),
        "[a-z ]{0,8}".prop_map(|s| format!("\"{s}\"")),
        Just("true".to_string()),
        Just("false".to_string()),
    ]
}

fn arb_operator() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["+", "-", "*", "/", "<", ">", "==", "and", "or"])
}

fn arb_expr() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        arb_atom(),
        (arb_name(), prop::collection::vec(arb_atom(), 0..3))
            .prop_map(|(f, args)| format!("{f}({})", args.join(", "))),
    ];
    leaf.prop_recursive(3, 16, 3, |inner| {
        prop_oneof![
            (inner.clone(), arb_operator(), inner.clone()).prop_map(|(a, op, b)| format!("{a} {op} {b}")),
            inner.prop_map(|e| format!("({e})")),
        ]
    })
}

fn arb_statement() -> impl Strategy<Value = String> {
    prop_oneof![
        (arb_name(), arb_expr()).prop_map(|(n, e)| format!("{n} = {e}")),
        (arb_expr(), prop::sample::select(vec!["is", "is-not"]), arb_expr())
            .prop_map(|(a, op, b)| format!("{a} {op} {b}")),
        (arb_name(), prop::collection::vec(arb_name(), 0..3), arb_expr())
            .prop_map(|(f, params, body)| format!("fun {f}({}):\n  {body}\nend", params.join(", "))),
        arb_expr(),
    ]
}

fn arb_program() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_statement(), 1..6).prop_map(|stmts| stmts.join("\n"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn any_bytes_give_a_covering_tree(source in prop::collection::vec(any::<u8>(), 0..200)) {
        let tree = parse(&source);
        prop_assert_eq!(tree.root_node().span(), Span::new(0, source.len()));
        prop_assert!(spans_nested(tree.root_node()));
        prop_assert_eq!(tree.errors().is_empty(), !tree.root_node().has_error());
    }

    #[test]
    fn parse_is_deterministic(source in "\\PC{0,200}") {
        let first = parse(source.as_bytes());
        let second = parse(source.as_bytes());
        prop_assert_eq!(first.to_sexp(), second.to_sexp());
        prop_assert_eq!(first.errors(), second.errors());
        prop_assert_eq!(first.root_node(), second.root_node());
    }

    #[test]
    fn generated_programs_parse_cleanly(source in arb_program()) {
        let tree = parse(source.as_bytes());
        prop_assert!(!tree.has_error(), "{}\n{}", source, tree.to_sexp());
        prop_assert!(spans_nested(tree.root_node()));
    }

    #[test]
    fn garbage_between_statements_is_isolated(
        before in arb_statement(),
        after in arb_statement(),
        garbage in "[@$~]{1,6}",
    ) {
        let source = format!("{before}\n{garbage}\n{after}");
        let tree = parse(source.as_bytes());
        let errors: Vec<&Node> = tree.walk().filter(|n| n.is_error()).collect();
        prop_assert_eq!(errors.len(), 1, "{}\n{}", source, tree.to_sexp());
        let start = before.len() + 1;
        prop_assert_eq!(errors[0].span(), Span::new(start, start + garbage.len()));
        prop_assert_eq!(tree.errors().len(), 1);
    }
}
