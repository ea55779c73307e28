#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pyret_sitter::grammars::pyret;
use pyret_sitter::{Node, Parser, Span};

/// Pyret-shaped fragments, so inputs get past the lexer more often than raw bytes.
#[derive(Arbitrary, Debug)]
enum Fragment {
    Name,
    Number,
    Str,
    Fun,
    End,
    Is,
    And,
    Eq,
    Plus,
    Comma,
    Colon,
    OpenParen,
    CloseParen,
    Space,
    Newline,
    Comment,
    Garbage,
    Raw(u8),
}

impl Fragment {
    fn push_to(&self, out: &mut Vec<u8>) {
        let text: &[u8] = match self {
            Fragment::Name => b"x",
            Fragment::Number => b"42",
            Fragment::Str => b"\"s\"",
            Fragment::Fun => b"fun",
            Fragment::End => b"end",
            Fragment::Is => b"is",
            Fragment::And => b"and",
            Fragment::Eq => b"=",
            Fragment::Plus => b"+",
            Fragment::Comma => b",",
            Fragment::Colon => b":",
            Fragment::OpenParen => b"(",
            Fragment::CloseParen => b")",
            Fragment::Space => b" ",
            Fragment::Newline => b"\n",
            Fragment::Comment => b"#| c |#",
            Fragment::Garbage => b"@",
            Fragment::Raw(byte) => {
                out.push(*byte);
                return;
            }
        };
        out.extend_from_slice(text);
    }
}

fn check_spans(node: &Node) {
    let mut previous_end = node.start_byte();
    for child in node.children() {
        assert!(node.span().contains(child.span()));
        assert!(child.start_byte() >= previous_end);
        previous_end = child.end_byte();
        check_spans(child);
    }
}

fuzz_target!(|fragments: Vec<Fragment>| {
    let mut source = Vec::new();
    for fragment in &fragments {
        fragment.push_to(&mut source);
    }

    let tree = Parser::new(pyret::language().unwrap()).parse(&source);
    assert_eq!(tree.root_node().span(), Span::new(0, source.len()));
    check_spans(tree.root_node());
});
