//! Structural consistency checks run by [`crate::Language::load`].
//!
//! The parser indexes tables without bounds checks of its own, so every
//! index a table can hand out is verified here once.

use super::{Action, GrammarTable, Symbol, SymbolKind};
use crate::diagnostics::LanguageError;

type Result<T = ()> = std::result::Result<T, LanguageError>;

pub fn check(table: &GrammarTable) -> Result {
    check_symbols(table)?;
    check_productions(table)?;
    check_states(table)?;
    check_lexer(table)?;
    check_keywords(table)?;
    check_externals(table)?;
    Ok(())
}

fn terminal(table: &GrammarTable, symbol: Symbol) -> bool {
    table.metadata(symbol).is_some_and(|m| m.kind == SymbolKind::Terminal)
}

fn non_terminal(table: &GrammarTable, symbol: Symbol) -> bool {
    table.metadata(symbol).is_some_and(|m| m.kind == SymbolKind::NonTerminal)
}

fn check_symbols(table: &GrammarTable) -> Result {
    let Some(end) = table.symbols.first() else {
        return Err(LanguageError::malformed("table has no symbols"));
    };
    if end.kind != SymbolKind::Terminal || end.extra {
        return Err(LanguageError::malformed("symbol 0 must be the end-of-input terminal"));
    }
    if table.symbols.len() >= Symbol::ERROR.index() {
        return Err(LanguageError::malformed(format!(
            "{} symbols exceed the symbol id space",
            table.symbols.len()
        )));
    }
    let mut seen_non_terminal = false;
    for (id, meta) in table.symbols.iter().enumerate() {
        if meta.name.is_empty() {
            return Err(LanguageError::malformed(format!("symbol {id} has an empty name")));
        }
        match meta.kind {
            SymbolKind::NonTerminal => seen_non_terminal = true,
            SymbolKind::Terminal if seen_non_terminal => {
                return Err(LanguageError::malformed(format!(
                    "terminal '{}' ({id}) follows a non-terminal",
                    meta.name
                )));
            }
            SymbolKind::Terminal => {}
        }
        if meta.extra && meta.kind == SymbolKind::NonTerminal {
            return Err(LanguageError::malformed(format!(
                "non-terminal '{}' cannot be an extra",
                meta.name
            )));
        }
    }
    if table.fields.len() > usize::from(u16::MAX) {
        return Err(LanguageError::malformed(format!(
            "{} fields exceed the field id space",
            table.fields.len()
        )));
    }
    for (id, name) in table.fields.iter().enumerate() {
        if name.is_empty() {
            return Err(LanguageError::malformed(format!("field {id} has an empty name")));
        }
    }
    Ok(())
}

fn check_productions(table: &GrammarTable) -> Result {
    for (id, prod) in table.productions.iter().enumerate() {
        if !non_terminal(table, prod.lhs) {
            return Err(LanguageError::malformed(format!(
                "production {id} has lhs {} which is not a non-terminal",
                prod.lhs.0
            )));
        }
        for &(child, field) in &prod.fields {
            if child >= prod.child_count {
                return Err(LanguageError::malformed(format!(
                    "production {id} assigns a field to child {child} of {}",
                    prod.child_count
                )));
            }
            if field.index() >= table.fields.len() {
                return Err(LanguageError::malformed(format!(
                    "production {id} uses unknown field {}",
                    field.0
                )));
            }
        }
    }
    Ok(())
}

fn check_states(table: &GrammarTable) -> Result {
    if table.states.is_empty() {
        return Err(LanguageError::malformed("table has no parse states"));
    }
    let state_count = table.states.len();
    let mut accepts = false;
    for (id, state) in table.states.iter().enumerate() {
        for pair in state.actions.windows(2) {
            if pair[0].0 == pair[1].0 {
                return Err(LanguageError::malformed(format!(
                    "state {id} has conflicting actions for symbol {}",
                    pair[0].0 .0
                )));
            }
            if pair[0].0 > pair[1].0 {
                return Err(LanguageError::malformed(format!("state {id} action row is not sorted")));
            }
        }
        for &(symbol, action) in &state.actions {
            if !terminal(table, symbol) {
                return Err(LanguageError::malformed(format!(
                    "state {id} has an action for non-terminal {}",
                    symbol.0
                )));
            }
            match action {
                Action::Shift(_) if symbol == Symbol::END => {
                    return Err(LanguageError::malformed(format!("state {id} shifts end of input")));
                }
                Action::Shift(next) if next as usize >= state_count => {
                    return Err(LanguageError::malformed(format!(
                        "state {id} shifts to missing state {next}"
                    )));
                }
                Action::Reduce(prod) if prod as usize >= table.productions.len() => {
                    return Err(LanguageError::malformed(format!(
                        "state {id} reduces by missing production {prod}"
                    )));
                }
                Action::Accept => accepts = true,
                _ => {}
            }
        }
        for pair in state.gotos.windows(2) {
            if pair[0].0 >= pair[1].0 {
                return Err(LanguageError::malformed(format!(
                    "state {id} goto row is not sorted or has duplicates"
                )));
            }
        }
        for &(symbol, next) in &state.gotos {
            if !non_terminal(table, symbol) {
                return Err(LanguageError::malformed(format!(
                    "state {id} has a goto for terminal {}",
                    symbol.0
                )));
            }
            if next as usize >= state_count {
                return Err(LanguageError::malformed(format!(
                    "state {id} goes to missing state {next}"
                )));
            }
        }
    }
    if !accepts {
        return Err(LanguageError::malformed("no state accepts the input"));
    }
    Ok(())
}

fn check_lexer(table: &GrammarTable) -> Result {
    let Some(start) = table.lex_states.first() else {
        return Err(LanguageError::malformed("table has no lexer states"));
    };
    if start.accept.is_some() {
        return Err(LanguageError::malformed("lexer start state must not accept"));
    }
    for (id, state) in table.lex_states.iter().enumerate() {
        if let Some(symbol) = state.accept {
            if symbol == Symbol::END || !terminal(table, symbol) {
                return Err(LanguageError::malformed(format!(
                    "lexer state {id} accepts {} which is not a token",
                    symbol.0
                )));
            }
        }
        for &(range, next) in &state.transitions {
            if range.lo > range.hi {
                return Err(LanguageError::malformed(format!(
                    "lexer state {id} has an empty byte range {}..={}",
                    range.lo, range.hi
                )));
            }
            if next as usize >= table.lex_states.len() {
                return Err(LanguageError::malformed(format!(
                    "lexer state {id} moves to missing state {next}"
                )));
            }
        }
    }
    for range in &table.separators {
        if range.lo > range.hi {
            return Err(LanguageError::malformed("empty separator byte range"));
        }
    }
    Ok(())
}

fn check_keywords(table: &GrammarTable) -> Result {
    if let Some(word) = table.word_token {
        if !terminal(table, word) {
            return Err(LanguageError::malformed(format!("word token {} is not a terminal", word.0)));
        }
    } else if !table.keywords.is_empty() {
        return Err(LanguageError::malformed("keywords declared without a word token"));
    }
    for (text, symbol) in &table.keywords {
        if text.is_empty() || !terminal(table, *symbol) || *symbol == Symbol::END {
            return Err(LanguageError::malformed(format!("keyword '{text}' does not map to a token")));
        }
    }
    Ok(())
}

fn check_externals(table: &GrammarTable) -> Result {
    for &symbol in &table.external_tokens {
        if symbol == Symbol::END || !terminal(table, symbol) {
            return Err(LanguageError::malformed(format!(
                "external token {} is not a terminal",
                symbol.0
            )));
        }
    }
    if !table.external_tokens.is_empty() && table.scanner.is_none() {
        return Err(LanguageError::malformed(
            "table declares external tokens but has no external scanner",
        ));
    }
    Ok(())
}
