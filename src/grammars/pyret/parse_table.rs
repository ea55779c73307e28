use super::PyretSymbol as S;
use super::{FIELD_ARGS, FIELD_BINDING, FIELD_BODY, FIELD_FUNCTION, FIELD_LEFT, FIELD_NAME, FIELD_OP, FIELD_RIGHT, FIELD_VALUE};
use crate::table::{ParseState, Production, StateId};

const EXPR_START: &[S] = &[S::Name, S::Number, S::String, S::True, S::False, S::ParenSpace];

const BLOCK_END: &[S] = &[S::End, S::KwEnd];

const STMT_FOLLOW: &[S] = &[
    S::End, S::Name, S::Number, S::String, S::True, S::False, S::Fun, S::KwEnd, S::ParenSpace,
];

const BINOP_EXPR_FOLLOW: &[S] = &[
    S::End, S::Name, S::Number, S::String, S::Comma, S::RParen,
    S::Plus, S::Minus, S::Star, S::Slash, S::Lt, S::Gt, S::EqEq, S::And, S::Or,
    S::Is, S::IsNot, S::True, S::False, S::Fun, S::KwEnd, S::ParenSpace,
];

const EXPR_FOLLOW: &[S] = &[
    S::End, S::Name, S::Number, S::String, S::Comma, S::RParen,
    S::Plus, S::Minus, S::Star, S::Slash, S::Lt, S::Gt, S::EqEq, S::And, S::Or,
    S::Is, S::IsNot, S::True, S::False, S::Fun, S::KwEnd, S::ParenNoSpace, S::ParenSpace,
];

const LIST_FOLLOW: &[S] = &[S::Comma, S::RParen];

pub(super) fn productions() -> Vec<Production> {
    vec![
        /* 0 */ Production::new(S::SourceFile, 1),
        /* 1 */ Production::new(S::SourceFile, 0),
        /* 2 */ Production::new(S::Block, 1),
        /* 3 */ Production::new(S::BlockRepeat1, 2),
        /* 4 */ Production::new(S::BlockRepeat1, 1),
        /* 5 */ Production::new(S::Stmt, 1),
        /* 6 */ Production::new(S::Stmt, 1),
        /* 7 */ Production::new(S::Stmt, 1),
        /* 8 */ Production::new(S::Stmt, 1),
        /* 9 */ Production::new(S::LetExpr, 3).field(0, FIELD_BINDING).field(2, FIELD_VALUE),
        /* 10 */ Production::new(S::NameBinding, 1),
        /* 11 */ Production::new(S::FunExpr, 6).field(1, FIELD_NAME).field(2, FIELD_ARGS).field(4, FIELD_BODY),
        /* 12 */ Production::new(S::FunExpr, 5).field(1, FIELD_NAME).field(2, FIELD_ARGS),
        /* 13 */ Production::new(S::Args, 2),
        /* 14 */ Production::new(S::Args, 3),
        /* 15 */ Production::new(S::ArgsRepeat1, 3),
        /* 16 */ Production::new(S::ArgsRepeat1, 1),
        /* 17 */ Production::new(S::CheckTest, 3).field(0, FIELD_LEFT).field(1, FIELD_OP).field(2, FIELD_RIGHT),
        /* 18 */ Production::new(S::CheckOp, 1),
        /* 19 */ Production::new(S::CheckOp, 1),
        /* 20 */ Production::new(S::BinopExpr, 3),
        /* 21 */ Production::new(S::BinopExpr, 1),
        /* 22 */ Production::new(S::Binop, 1),
        /* 23 */ Production::new(S::Binop, 1),
        /* 24 */ Production::new(S::Binop, 1),
        /* 25 */ Production::new(S::Binop, 1),
        /* 26 */ Production::new(S::Binop, 1),
        /* 27 */ Production::new(S::Binop, 1),
        /* 28 */ Production::new(S::Binop, 1),
        /* 29 */ Production::new(S::Binop, 1),
        /* 30 */ Production::new(S::Binop, 1),
        /* 31 */ Production::new(S::Expr, 1),
        /* 32 */ Production::new(S::Expr, 1),
        /* 33 */ Production::new(S::Expr, 1),
        /* 34 */ Production::new(S::Expr, 1),
        /* 35 */ Production::new(S::IdExpr, 1),
        /* 36 */ Production::new(S::PrimExpr, 1),
        /* 37 */ Production::new(S::PrimExpr, 1),
        /* 38 */ Production::new(S::PrimExpr, 1),
        /* 39 */ Production::new(S::NumExpr, 1),
        /* 40 */ Production::new(S::StringExpr, 1),
        /* 41 */ Production::new(S::BoolExpr, 1),
        /* 42 */ Production::new(S::BoolExpr, 1),
        /* 43 */ Production::new(S::ParenExpr, 3),
        /* 44 */ Production::new(S::AppExpr, 2).field(0, FIELD_FUNCTION).field(1, FIELD_ARGS),
        /* 45 */ Production::new(S::AppArgs, 2),
        /* 46 */ Production::new(S::AppArgs, 3),
        /* 47 */ Production::new(S::CommaBinops, 1),
        /* 48 */ Production::new(S::CommaBinopsRepeat1, 3),
        /* 49 */ Production::new(S::CommaBinopsRepeat1, 1),
    ]
}

/// Shifts and gotos shared by every state where an expression can start.
/// `name` is the state reached on a name, which differs at statement start.
fn expr_start(state: ParseState, name: StateId) -> ParseState {
    state
        .shift(S::Name, name)
        .shift(S::Number, 19)
        .shift(S::String, 20)
        .shift(S::True, 21)
        .shift(S::False, 22)
        .shift(S::ParenSpace, 57)
        .goto(S::IdExpr, 11)
        .goto(S::PrimExpr, 12)
        .goto(S::ParenExpr, 13)
        .goto(S::AppExpr, 14)
        .goto(S::NumExpr, 15)
        .goto(S::StringExpr, 16)
        .goto(S::BoolExpr, 17)
}

fn stmt_start(state: ParseState) -> ParseState {
    expr_start(state, 18)
        .shift(S::Fun, 23)
        .goto(S::LetExpr, 5)
        .goto(S::FunExpr, 6)
        .goto(S::CheckTest, 7)
        .goto(S::NameBinding, 8)
        .goto(S::BinopExpr, 9)
        .goto(S::Expr, 10)
}

fn binop_shifts(state: ParseState) -> ParseState {
    state
        .shift(S::Plus, 48)
        .shift(S::Minus, 49)
        .shift(S::Star, 50)
        .shift(S::Slash, 51)
        .shift(S::Lt, 52)
        .shift(S::Gt, 53)
        .shift(S::EqEq, 54)
        .shift(S::And, 55)
        .shift(S::Or, 56)
        .goto(S::Binop, 46)
}

fn reduce(lookaheads: &[S], production: u16) -> ParseState {
    ParseState::new().reduce(lookaheads, production)
}

pub(super) fn states() -> Vec<ParseState> {
    vec![
        /* 0 */
        stmt_start(ParseState::new())
            .reduce(&[S::End], 1)
            .goto(S::SourceFile, 1)
            .goto(S::Block, 2)
            .goto(S::BlockRepeat1, 3)
            .goto(S::Stmt, 4),
        /* 1 */ ParseState::new().accept(S::End),
        /* 2 */ reduce(&[S::End], 0),
        /* 3 */ stmt_start(reduce(BLOCK_END, 2)).goto(S::Stmt, 38),
        /* 4 */ reduce(STMT_FOLLOW, 4),
        /* 5 */ reduce(STMT_FOLLOW, 5),
        /* 6 */ reduce(STMT_FOLLOW, 6),
        /* 7 */ reduce(STMT_FOLLOW, 7),
        /* 8 */ ParseState::new().shift(S::Eq, 39),
        /* 9 */
        binop_shifts(reduce(STMT_FOLLOW, 8))
            .shift(S::Is, 42)
            .shift(S::IsNot, 43)
            .goto(S::CheckOp, 44),
        /* 10 */ reduce(BINOP_EXPR_FOLLOW, 21).shift(S::ParenNoSpace, 60).goto(S::AppArgs, 68),
        /* 11 */ reduce(EXPR_FOLLOW, 31),
        /* 12 */ reduce(EXPR_FOLLOW, 32),
        /* 13 */ reduce(EXPR_FOLLOW, 33),
        /* 14 */ reduce(EXPR_FOLLOW, 34),
        /* 15 */ reduce(EXPR_FOLLOW, 36),
        /* 16 */ reduce(EXPR_FOLLOW, 37),
        /* 17 */ reduce(EXPR_FOLLOW, 38),
        /* 18 */ reduce(EXPR_FOLLOW, 35).reduce(&[S::Eq], 10),
        /* 19 */ reduce(EXPR_FOLLOW, 39),
        /* 20 */ reduce(EXPR_FOLLOW, 40),
        /* 21 */ reduce(EXPR_FOLLOW, 41),
        /* 22 */ reduce(EXPR_FOLLOW, 42),
        /* 23 */ ParseState::new().shift(S::Name, 24),
        /* 24 */ ParseState::new().shift(S::ParenNoSpace, 25).goto(S::Args, 28),
        /* 25 */
        ParseState::new()
            .shift(S::RParen, 26)
            .shift(S::Name, 27)
            .goto(S::ArgsRepeat1, 29)
            .goto(S::NameBinding, 30),
        /* 26 */ reduce(&[S::Colon], 13),
        /* 27 */ reduce(LIST_FOLLOW, 10),
        /* 28 */ ParseState::new().shift(S::Colon, 31),
        /* 29 */ ParseState::new().shift(S::RParen, 32).shift(S::Comma, 33),
        /* 30 */ reduce(LIST_FOLLOW, 16),
        /* 31 */
        stmt_start(ParseState::new().shift(S::KwEnd, 34))
            .goto(S::Block, 35)
            .goto(S::BlockRepeat1, 3)
            .goto(S::Stmt, 4),
        /* 32 */ reduce(&[S::Colon], 14),
        /* 33 */ ParseState::new().shift(S::Name, 27).goto(S::NameBinding, 36),
        /* 34 */ reduce(STMT_FOLLOW, 12),
        /* 35 */ ParseState::new().shift(S::KwEnd, 37),
        /* 36 */ reduce(LIST_FOLLOW, 15),
        /* 37 */ reduce(STMT_FOLLOW, 11),
        /* 38 */ reduce(STMT_FOLLOW, 3),
        /* 39 */ expr_start(ParseState::new(), 40).goto(S::BinopExpr, 41).goto(S::Expr, 10),
        /* 40 */ reduce(EXPR_FOLLOW, 35),
        /* 41 */ binop_shifts(reduce(STMT_FOLLOW, 9)),
        /* 42 */ reduce(EXPR_START, 18),
        /* 43 */ reduce(EXPR_START, 19),
        /* 44 */ expr_start(ParseState::new(), 40).goto(S::BinopExpr, 45).goto(S::Expr, 10),
        /* 45 */ binop_shifts(reduce(STMT_FOLLOW, 17)),
        /* 46 */ expr_start(ParseState::new(), 40).goto(S::Expr, 47),
        /* 47 */ reduce(BINOP_EXPR_FOLLOW, 20).shift(S::ParenNoSpace, 60).goto(S::AppArgs, 68),
        /* 48 */ reduce(EXPR_START, 22),
        /* 49 */ reduce(EXPR_START, 23),
        /* 50 */ reduce(EXPR_START, 24),
        /* 51 */ reduce(EXPR_START, 25),
        /* 52 */ reduce(EXPR_START, 26),
        /* 53 */ reduce(EXPR_START, 27),
        /* 54 */ reduce(EXPR_START, 28),
        /* 55 */ reduce(EXPR_START, 29),
        /* 56 */ reduce(EXPR_START, 30),
        /* 57 */ expr_start(ParseState::new(), 40).goto(S::BinopExpr, 58).goto(S::Expr, 10),
        /* 58 */ binop_shifts(ParseState::new().shift(S::RParen, 59)),
        /* 59 */ reduce(EXPR_FOLLOW, 43),
        /* 60 */
        expr_start(ParseState::new().shift(S::RParen, 61), 40)
            .goto(S::CommaBinops, 62)
            .goto(S::CommaBinopsRepeat1, 63)
            .goto(S::BinopExpr, 64)
            .goto(S::Expr, 10),
        /* 61 */ reduce(EXPR_FOLLOW, 45),
        /* 62 */ ParseState::new().shift(S::RParen, 65),
        /* 63 */ reduce(&[S::RParen], 47).shift(S::Comma, 66),
        /* 64 */ binop_shifts(reduce(LIST_FOLLOW, 49)),
        /* 65 */ reduce(EXPR_FOLLOW, 46),
        /* 66 */ expr_start(ParseState::new(), 40).goto(S::BinopExpr, 67).goto(S::Expr, 10),
        /* 67 */ binop_shifts(reduce(LIST_FOLLOW, 48)),
        /* 68 */ reduce(EXPR_FOLLOW, 44),
    ]
}
