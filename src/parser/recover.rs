use tracing::debug;

use super::{ParseRun, Phase};
use crate::diagnostics::SyntaxError;
use crate::span::Span;
use crate::table::{Action, Symbol};
use crate::tree::Node;

impl ParseRun<'_> {
    /// The lookahead is not viable. Try, in order: inserting a missing
    /// token, popping back to a state that accepts end of input, skipping
    /// the lookahead.
    pub(super) fn recover(&mut self) {
        let lookahead = self.lookahead.node;
        if self.options.insert_missing {
            if let Some(symbol) = self.missing_candidate(lookahead) {
                self.insert_missing(symbol);
                self.phase = self.phase_for_lookahead();
                return;
            }
        }
        if lookahead == Symbol::END {
            self.recover_at_end();
        } else {
            self.skip_lookahead();
        }
    }

    fn display_name(&self, symbol: Symbol) -> String {
        match self.table.metadata(symbol) {
            Some(meta) if symbol == Symbol::END => format!("end of input ({})", meta.name),
            Some(meta) if meta.named => meta.name.clone(),
            Some(meta) => format!("\"{}\"", meta.name),
            None => format!("symbol {}", symbol.0),
        }
    }

    /// Lowest-numbered terminal whose insertion lets `lookahead` continue.
    fn missing_candidate(&self, lookahead: Symbol) -> Option<Symbol> {
        let path = self.stack.state_path();
        let top = *path.last()?;
        for symbol in self.table.states[top as usize].valid_terminals() {
            if symbol == Symbol::END || self.table.is_extra(symbol) || self.table.is_external(symbol) {
                continue;
            }
            let mut states = path.clone();
            let Some(Action::Shift(next)) = self.simulate(&mut states, symbol) else {
                continue;
            };
            states.push(next);
            if self.simulate(&mut states, lookahead).is_some() {
                return Some(symbol);
            }
        }
        None
    }

    fn insert_missing(&mut self, symbol: Symbol) {
        loop {
            let top = self.stack.top_state();
            match self.table.states[top as usize].action(symbol) {
                Some(Action::Reduce(production)) => {
                    if !self.reduce(production) {
                        break;
                    }
                }
                Some(Action::Shift(next)) => {
                    let node = Node::missing(symbol, self.last_end, self.named(symbol));
                    self.stack.push(next, node);
                    break;
                }
                _ => break,
            }
        }
        debug!(symbol = symbol.0, offset = self.last_end, "inserted missing token");
        let message = format!("missing {}", self.display_name(symbol));
        self.errors.push(SyntaxError::missing(message, Span::empty(self.last_end)));
        self.merge_skips = false;
    }

    /// End of input is not viable: wrap the newest entries in an ERROR so the
    /// nearest state that can finish is exposed. Gives up when none can.
    fn recover_at_end(&mut self) {
        for index in (0..self.stack.len()).rev() {
            if !self.is_viable(self.stack.state_path_below(index), Symbol::END) {
                continue;
            }
            let (nodes, span) = self.stack.split_off(index);
            debug!(start = span.start, end = span.end, popped = nodes.len(), "wrapped incomplete input");
            self.errors.push(SyntaxError::syntactic("unexpected end of input", span));
            self.stack.push_extra(Node::error(span, nodes));
            self.phase = self.phase_for_lookahead();
            return;
        }
        debug!("no state accepts end of input");
        let end = self.text.len();
        self.errors.push(SyntaxError::syntactic("unexpected end of input", Span::empty(end)));
        self.phase = Phase::DoneWithErrors;
    }

    /// Skip the lookahead into an ERROR, extending the previous one when the
    /// last action was also a skip.
    fn skip_lookahead(&mut self) {
        let token = self.lookahead.clone();
        let leaf = Node::leaf(token.node, token.span, self.named(token.node));
        let merged = match self.stack.top_node_mut() {
            Some(top) if self.merge_skips && top.is_error() => {
                top.span.end = token.span.end;
                top.children.push(leaf.clone());
                if let Some(err) = self.errors.last_mut() {
                    err.span.end = token.span.end;
                }
                true
            }
            _ => false,
        };
        if !merged {
            debug!(symbol = token.node.0, start = token.span.start, "skipped token");
            let message = format!("unexpected {}", self.display_name(token.node));
            self.errors.push(SyntaxError::syntactic(message, token.span));
            self.stack.push_extra(Node::error(token.span, vec![leaf]));
        }
        self.position = token.span.end;
        self.last_end = token.span.end;
        self.merge_skips = true;
        self.phase = Phase::Scanning;
    }
}
