use super::PyretSymbol as S;
use crate::table::{ByteRange, LexState, Symbol};

// Lexer DFA states.
const START: u16 = 0;
const NAME: u16 = 1;
const INT: u16 = 2;
const PLUS: u16 = 3;
const MINUS: u16 = 4;
const STAR: u16 = 5;
const SLASH: u16 = 6;
const LT: u16 = 7;
const GT: u16 = 8;
const EQ: u16 = 9;
const EQ_EQ: u16 = 10;
const COLON: u16 = 11;
const COMMA: u16 = 12;
const RPAREN: u16 = 13;
const DQ_BODY: u16 = 14;
const DQ_ESCAPE: u16 = 15;
const STRING_END: u16 = 16;
const SQ_BODY: u16 = 17;
const SQ_ESCAPE: u16 = 18;
const HASH: u16 = 19;
const LINE_BODY: u16 = 20;
// `#|` with no newline seen yet: still a valid line comment if never closed.
const BLOCK_FIRST_LINE: u16 = 21;
const BLOCK_FIRST_LINE_BAR: u16 = 22;
const BLOCK_BODY: u16 = 23;
const BLOCK_BAR: u16 = 24;
const BLOCK_DONE: u16 = 25;
const DOT: u16 = 26;
const FRACTION: u16 = 27;
const EXPONENT: u16 = 28;
const EXPONENT_SIGN: u16 = 29;
const EXPONENT_DIGITS: u16 = 30;

fn digits(state: LexState, next: u16) -> LexState {
    state.on(b'0', b'9', next)
}

/// Every byte except `excluded`, which must be sorted.
fn all_except(mut state: LexState, excluded: &[u8], next: u16) -> LexState {
    let mut lo: u16 = 0;
    for &byte in excluded {
        if (byte as u16) > lo {
            state = state.on(lo as u8, byte - 1, next);
        }
        lo = byte as u16 + 1;
    }
    if lo <= 0xff {
        state = state.on(lo as u8, 0xff, next);
    }
    state
}

fn accepting(symbol: S) -> LexState {
    LexState::accepting(symbol)
}

pub(super) fn lex_states() -> Vec<LexState> {
    let name_chars = |state: LexState| {
        state
            .on_byte(b'-', NAME)
            .on(b'0', b'9', NAME)
            .on(b'A', b'Z', NAME)
            .on_byte(b'_', NAME)
            .on(b'a', b'z', NAME)
    };

    let states = vec![
        (
            START,
            LexState::new()
                .on(b'a', b'z', NAME)
                .on(b'A', b'Z', NAME)
                .on_byte(b'_', NAME)
                .on(b'0', b'9', INT)
                .on_byte(b'+', PLUS)
                .on_byte(b'-', MINUS)
                .on_byte(b'*', STAR)
                .on_byte(b'/', SLASH)
                .on_byte(b'<', LT)
                .on_byte(b'>', GT)
                .on_byte(b'=', EQ)
                .on_byte(b':', COLON)
                .on_byte(b',', COMMA)
                .on_byte(b')', RPAREN)
                .on_byte(b'"', DQ_BODY)
                .on_byte(b'\'', SQ_BODY)
                .on_byte(b'#', HASH),
        ),
        (NAME, name_chars(accepting(S::Name))),
        (
            INT,
            digits(accepting(S::Number), INT)
                .on_byte(b'.', DOT)
                .on_byte(b'e', EXPONENT)
                .on_byte(b'E', EXPONENT),
        ),
        (PLUS, digits(accepting(S::Plus), INT)),
        (MINUS, digits(accepting(S::Minus), INT)),
        (STAR, accepting(S::Star)),
        (SLASH, accepting(S::Slash)),
        (LT, accepting(S::Lt)),
        (GT, accepting(S::Gt)),
        (EQ, accepting(S::Eq).on_byte(b'=', EQ_EQ)),
        (EQ_EQ, accepting(S::EqEq)),
        (COLON, accepting(S::Colon)),
        (COMMA, accepting(S::Comma)),
        (RPAREN, accepting(S::RParen)),
        (
            DQ_BODY,
            all_except(
                LexState::new().on_byte(b'"', STRING_END).on_byte(b'\\', DQ_ESCAPE),
                b"\n\"\\",
                DQ_BODY,
            ),
        ),
        (DQ_ESCAPE, LexState::new().on(0x00, 0xff, DQ_BODY)),
        (STRING_END, accepting(S::String)),
        (
            SQ_BODY,
            all_except(
                LexState::new().on_byte(b'\'', STRING_END).on_byte(b'\\', SQ_ESCAPE),
                b"\n'\\",
                SQ_BODY,
            ),
        ),
        (SQ_ESCAPE, LexState::new().on(0x00, 0xff, SQ_BODY)),
        (
            HASH,
            all_except(accepting(S::LineComment).on_byte(b'|', BLOCK_FIRST_LINE), b"\n|", LINE_BODY),
        ),
        (LINE_BODY, all_except(accepting(S::LineComment), b"\n", LINE_BODY)),
        (
            BLOCK_FIRST_LINE,
            all_except(
                accepting(S::LineComment)
                    .on_byte(b'|', BLOCK_FIRST_LINE_BAR)
                    .on_byte(b'\n', BLOCK_BODY),
                b"\n|",
                BLOCK_FIRST_LINE,
            ),
        ),
        (
            BLOCK_FIRST_LINE_BAR,
            all_except(
                accepting(S::LineComment)
                    .on_byte(b'\n', BLOCK_BODY)
                    .on_byte(b'#', BLOCK_DONE)
                    .on_byte(b'|', BLOCK_FIRST_LINE_BAR),
                b"\n#|",
                BLOCK_FIRST_LINE,
            ),
        ),
        (BLOCK_BODY, all_except(LexState::new().on_byte(b'|', BLOCK_BAR), b"|", BLOCK_BODY)),
        (
            BLOCK_BAR,
            all_except(
                LexState::new().on_byte(b'#', BLOCK_DONE).on_byte(b'|', BLOCK_BAR),
                b"#|",
                BLOCK_BODY,
            ),
        ),
        (BLOCK_DONE, accepting(S::BlockComment)),
        (DOT, digits(LexState::new(), FRACTION)),
        (
            FRACTION,
            digits(accepting(S::Number), FRACTION)
                .on_byte(b'e', EXPONENT)
                .on_byte(b'E', EXPONENT),
        ),
        (
            EXPONENT,
            digits(LexState::new(), EXPONENT_DIGITS)
                .on_byte(b'+', EXPONENT_SIGN)
                .on_byte(b'-', EXPONENT_SIGN),
        ),
        (EXPONENT_SIGN, digits(LexState::new(), EXPONENT_DIGITS)),
        (EXPONENT_DIGITS, digits(accepting(S::Number), EXPONENT_DIGITS)),
    ];

    states
        .into_iter()
        .enumerate()
        .map(|(i, (id, state))| {
            debug_assert_eq!(i, id as usize);
            state
        })
        .collect()
}

/// Whitespace between tokens.
pub(super) fn separators() -> Vec<ByteRange> {
    vec![ByteRange::new(b'\t', b'\r'), ByteRange::single(b' ')]
}

pub(super) fn keywords() -> Vec<(String, Symbol)> {
    [
        ("and", S::And),
        ("end", S::KwEnd),
        ("false", S::False),
        ("fun", S::Fun),
        ("is", S::Is),
        ("is-not", S::IsNot),
        ("or", S::Or),
        ("true", S::True),
    ]
    .into_iter()
    .map(|(text, symbol)| (text.to_string(), symbol.symbol()))
    .collect()
}
