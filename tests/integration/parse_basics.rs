mod common;

use common::{assert_spans_nested, parse, sexp};
use pyret_sitter::Span;

#[test]
fn application() {
    insta::assert_snapshot!(
        sexp("f(1, x)"),
        @"(source_file (block (app_expr function: (id_expr (name)) args: (app_args (comma_binops (prim_expr (num_expr (number))) (id_expr (name)))))))"
    );
}

#[test]
fn application_without_arguments() {
    insta::assert_snapshot!(
        sexp("f()"),
        @"(source_file (block (app_expr function: (id_expr (name)) args: (app_args))))"
    );
}

#[test]
fn curried_application() {
    insta::assert_snapshot!(
        sexp("f(x)(y)"),
        @"(source_file (block (app_expr function: (app_expr function: (id_expr (name)) args: (app_args (comma_binops (id_expr (name))))) args: (app_args (comma_binops (id_expr (name)))))))"
    );
}

#[test]
fn function_definition() {
    insta::assert_snapshot!(
        sexp("fun add(a, b): a + b end"),
        @"(source_file (block (fun_expr name: (name) args: (args (name_binding (name)) (name_binding (name))) body: (block (id_expr (name)) (binop) (id_expr (name))))))"
    );
}

#[test]
fn check_tests() {
    insta::assert_snapshot!(
        sexp("f(1) is 2"),
        @"(source_file (block (check_test left: (app_expr function: (id_expr (name)) args: (app_args (comma_binops (prim_expr (num_expr (number)))))) op: (check_op) right: (prim_expr (num_expr (number))))))"
    );
    insta::assert_snapshot!(
        sexp("1 is-not 2"),
        @"(source_file (block (check_test left: (prim_expr (num_expr (number))) op: (check_op) right: (prim_expr (num_expr (number))))))"
    );
}

#[test]
fn parenthesized_expression() {
    insta::assert_snapshot!(
        sexp("(1 + 2) * 3"),
        @"(source_file (block (paren_expr (prim_expr (num_expr (number))) (binop) (prim_expr (num_expr (number)))) (binop) (prim_expr (num_expr (number)))))"
    );
}

#[test]
fn literals() {
    insta::assert_snapshot!(
        sexp("s = \"hi\""),
        @r#"(source_file (block (let_expr binding: (name_binding (name)) value: (prim_expr (string_expr (string))))))"#
    );
    insta::assert_snapshot!(
        sexp("t = true and false"),
        @"(source_file (block (let_expr binding: (name_binding (name)) value: (prim_expr (bool_expr)) value: (binop) value: (prim_expr (bool_expr)))))"
    );
}

#[test]
fn comments_are_extras() {
    let source = "x = 1 # note\n#| block |#\ny";
    insta::assert_snapshot!(
        sexp(source),
        @"(source_file (block (let_expr binding: (name_binding (name)) value: (prim_expr (num_expr (number)))) (line_comment) (block_comment) (id_expr (name))))"
    );
    let tree = parse(source);
    let comments: Vec<_> = tree.walk().filter(|n| tree.kind(n).ends_with("comment")).collect();
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|n| n.is_extra()));
    assert_eq!(tree.node_text(comments[0]).unwrap(), "# note");
    assert_eq!(tree.node_text(comments[1]).unwrap(), "#| block |#");
}

#[test]
fn fields_are_reachable_by_name() {
    let tree = parse("fun add(a, b): a + b end");
    let block = tree.root_node().child(0).unwrap();
    let fun = block.child(0).unwrap();
    assert_eq!(tree.kind(fun), "fun_expr");

    let name = tree.child_by_field_name(fun, "name").unwrap();
    assert_eq!(tree.node_text(name).unwrap(), "add");
    let args = tree.child_by_field_name(fun, "args").unwrap();
    assert_eq!(args.named_child_count(), 2);
    let body = tree.child_by_field_name(fun, "body").unwrap();
    assert_eq!(tree.node_text(body).unwrap(), "a + b");
    assert!(tree.child_by_field_name(fun, "value").is_none());
}

#[test]
fn anonymous_tokens_stay_in_the_tree() {
    let tree = parse("fun f(): 1 end");
    let fun = tree.root_node().child(0).unwrap().child(0).unwrap();
    let kinds: Vec<&str> = fun.children().iter().filter(|c| !c.is_named()).map(|c| tree.kind(c)).collect();
    assert_eq!(kinds, vec!["fun", ":", "end"]);
    let args = tree.child_by_field_name(fun, "args").unwrap();
    assert_eq!(tree.node_text(args).unwrap(), "()");
    assert_eq!(args.child_count(), 2);
}

#[test]
fn keywords_are_not_names() {
    let tree = parse("end-of-line = 1");
    assert!(!tree.has_error());
    let name = tree.walk().find(|n| tree.kind(n) == "name").unwrap();
    assert_eq!(tree.node_text(name).unwrap(), "end-of-line");
}

#[test]
fn descendant_lookup() {
    let tree = parse("x = 12 + y");
    let root = tree.root_node();
    let number = root.descendant_for_byte_range(4, 6);
    assert_eq!(tree.kind(number), "number");
    let name = root.descendant_for_byte_range(9, 10);
    assert_eq!(tree.node_text(name).unwrap(), "y");
    let whole = root.descendant_for_byte_range(0, 10);
    assert_eq!(tree.kind(whole), "let_expr");
    assert_eq!(whole.span(), root.span());
}

#[test]
fn spans_nest_for_valid_programs() {
    for source in [
        "",
        "x = 1",
        "fun f(x):\n  x + 1\nend\nf(2) is 3",
        "a = (1 + 2) * 3 # trailing",
        "#| lead |# g(\"s\", 'c', -1.5e3)",
    ] {
        let tree = parse(source);
        assert!(!tree.has_error(), "{source}: {}", tree.to_sexp());
        assert_eq!(tree.root_node().span(), Span::new(0, source.len()));
        assert_spans_nested(&tree);
    }
}

#[test]
fn library_entry_point_matches_parser() {
    let language = common::language();
    let tree = pyret_sitter::parse(language, b"x = 1");
    assert_eq!(tree.to_sexp(), sexp("x = 1"));
}
