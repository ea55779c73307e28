pub mod external;

use std::collections::HashSet;

use crate::language::Language;
use crate::span::{Span, Spanned};
use crate::table::{GrammarTable, ParseState, Symbol};

/// `(position, lexer state)` pairs from which the DFA cannot reach an accepting state.
type DeadEnds = HashSet<(usize, usize)>;

/// Result of one scan.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Lexeme {
    Token(Spanned<Symbol>),
    /// A run of bytes no token matches.
    Invalid(Span),
    End,
}

/// Table-driven scanner: longest match over the lexer DFA, keyword
/// substitution for the word token, and the external scanner for the tokens
/// the table delegates to it.
pub(crate) struct Lexer<'a> {
    table: &'a GrammarTable,
    text: &'a [u8],
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(table: &'a GrammarTable, text: &'a [u8]) -> Self {
        Self { table, text }
    }

    pub(crate) fn skip_separators(&self, mut pos: usize) -> usize {
        while pos < self.text.len() && self.table.is_separator(self.text[pos]) {
            pos += 1;
        }
        pos
    }

    /// Scan the next token at or after `pos` for a parser sitting in `state`.
    pub(crate) fn next(&self, pos: usize, state: &ParseState) -> Lexeme {
        let valid = self.valid_externals(state);
        self.next_with(pos, &valid)
    }

    fn next_with(&self, pos: usize, valid: &[bool]) -> Lexeme {
        let start = self.skip_separators(pos);
        if start >= self.text.len() {
            return Lexeme::End;
        }
        if let Some(token) = self.scan_external(start, valid) {
            return Lexeme::Token(token);
        }
        let mut dead = DeadEnds::default();
        match self.longest_match_from(start, &mut dead) {
            Some((symbol, end)) => {
                let symbol = self.keyword_substitute(symbol, start, end);
                Lexeme::Token(Spanned::new(symbol, Span::new(start, end)))
            }
            None => Lexeme::Invalid(Span::new(start, self.invalid_run_end(start, valid, &mut dead))),
        }
    }

    fn valid_externals(&self, state: &ParseState) -> Vec<bool> {
        self.table
            .external_tokens
            .iter()
            .map(|&symbol| state.action(symbol).is_some())
            .collect()
    }

    fn scan_external(&self, start: usize, valid: &[bool]) -> Option<Spanned<Symbol>> {
        if !valid.iter().any(|v| *v) {
            return None;
        }
        let hook = self.table.scanner.as_ref()?;
        let token = hook.0.scan(self.text, start, valid)?;
        let end = start.checked_add(token.len)?;
        // Ignore tokens the scanner was not allowed to produce.
        if token.len == 0 || end > self.text.len() || !valid.get(token.index).copied().unwrap_or(false) {
            return None;
        }
        let symbol = *self.table.external_tokens.get(token.index)?;
        Some(Spanned::new(symbol, Span::new(start, end)))
    }

    /// Run the DFA from `start`, returning the last accepting symbol and its end.
    /// Stops early at any `(position, state)` pair already in `dead`, and
    /// records the pairs of a run that accepts nothing.
    fn longest_match_from(&self, start: usize, dead: &mut DeadEnds) -> Option<(Symbol, usize)> {
        let mut state = 0usize;
        let mut pos = start;
        let mut best = None;
        let mut visited = Vec::new();
        loop {
            if dead.contains(&(pos, state)) {
                break;
            }
            visited.push((pos, state));
            let lex_state = &self.table.lex_states[state];
            if let Some(symbol) = lex_state.accept {
                if pos > start {
                    best = Some((symbol, pos));
                }
            }
            let Some(&byte) = self.text.get(pos) else { break };
            match lex_state.next(byte) {
                Some(next) => {
                    state = next as usize;
                    pos += 1;
                }
                None => break,
            }
        }
        // The start state never accepts, so every pair of a failed run is a dead end.
        if best.is_none() {
            dead.extend(visited);
        }
        best
    }

    fn keyword_substitute(&self, symbol: Symbol, start: usize, end: usize) -> Symbol {
        if self.table.word_token == Some(symbol) {
            if let Some(keyword) = self.table.keyword(&self.text[start..end]) {
                return keyword;
            }
        }
        symbol
    }

    /// Unlexable bytes run until a separator or a position where some token starts.
    /// `dead` carries over between offsets, so each byte is walked by the
    /// DFA a bounded number of times however long the run is.
    fn invalid_run_end(&self, start: usize, valid: &[bool], dead: &mut DeadEnds) -> usize {
        let mut end = start + 1;
        while end < self.text.len()
            && !self.table.is_separator(self.text[end])
            && self.longest_match_from(end, dead).is_none()
            && self.scan_external(end, valid).is_none()
        {
            end += 1;
        }
        end
    }
}

/// Tokenize `text` without a parser. Every external token is considered
/// valid, extras are included and unlexable runs come back as
/// [`Symbol::ERROR`].
pub fn lex(language: &Language, text: &[u8]) -> Vec<Spanned<Symbol>> {
    let table = language.table();
    let lexer = Lexer::new(table, text);
    let valid = vec![true; table.external_tokens.len()];
    let mut tokens = Vec::new();
    let mut pos = 0;
    loop {
        match lexer.next_with(pos, &valid) {
            Lexeme::Token(token) => {
                pos = token.span.end;
                tokens.push(token);
            }
            Lexeme::Invalid(span) => {
                pos = span.end;
                tokens.push(Spanned::new(Symbol::ERROR, span));
            }
            Lexeme::End => break,
        }
    }
    tokens
}
