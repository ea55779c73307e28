//! Table-driven LR parse engine.
//!
//! Each parse runs a small state machine:
//! `Scanning -> Shifting | Reducing | ErrorRecovery`, with `Accepting` or
//! `DoneWithErrors` as terminal states. Reductions only happen once the
//! lookahead is known to be viable, so errors are detected on the token that
//! causes them, before any state is thrown away.

mod recover;
mod stack;

use tracing::{debug, trace};

use crate::config::ParseOptions;
use crate::diagnostics::SyntaxError;
use crate::language::Language;
use crate::lexer::{Lexeme, Lexer};
use crate::span::{Span, Spanned};
use crate::table::{Action, GrammarTable, Production, ProductionId, StateId, Symbol};
use crate::tree::{Node, SyntaxTree};
use stack::Stack;

/// Parses byte buffers against one [`Language`]. Holds no per-parse state,
/// so one parser can be reused for any number of inputs.
#[derive(Debug, Clone)]
pub struct Parser {
    language: Language,
    options: ParseOptions,
}

impl Parser {
    pub fn new(language: &Language) -> Self {
        Self::with_options(language, ParseOptions::default())
    }

    pub fn with_options(language: &Language, options: ParseOptions) -> Self {
        Self { language: language.clone(), options }
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse `text`. Always returns a tree; problems are recorded as
    /// [`SyntaxError`]s and ERROR or MISSING nodes.
    pub fn parse(&self, text: &[u8]) -> SyntaxTree {
        let run = ParseRun::new(self.language.table(), &self.options, text);
        let (root, errors) = run.run();
        debug!(bytes = text.len(), errors = errors.len(), "parsed");
        SyntaxTree::new(root, text.to_vec(), self.language.clone(), errors)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Scanning,
    Shifting,
    Reducing,
    ErrorRecovery,
    Accepting,
    DoneWithErrors,
}

struct ParseRun<'a> {
    table: &'a GrammarTable,
    options: &'a ParseOptions,
    text: &'a [u8],
    lexer: Lexer<'a>,
    stack: Stack,
    phase: Phase,
    lookahead: Spanned<Symbol>,
    /// Where the next scan starts.
    position: usize,
    /// End of the last token or extra pushed; MISSING nodes go here.
    last_end: usize,
    /// Set right after a token was skipped, so the next skip extends the same ERROR.
    merge_skips: bool,
    accepted: bool,
    errors: Vec<SyntaxError>,
}

impl<'a> ParseRun<'a> {
    fn new(table: &'a GrammarTable, options: &'a ParseOptions, text: &'a [u8]) -> Self {
        Self {
            table,
            options,
            text,
            lexer: Lexer::new(table, text),
            stack: Stack::default(),
            phase: Phase::Scanning,
            lookahead: Spanned::new(Symbol::END, Span::empty(0)),
            position: 0,
            last_end: 0,
            merge_skips: false,
            accepted: false,
            errors: Vec::new(),
        }
    }

    fn run(mut self) -> (Node, Vec<SyntaxError>) {
        loop {
            match self.phase {
                Phase::Scanning => {
                    self.lookahead = self.scan();
                    self.phase = self.dispatch();
                }
                Phase::Shifting => self.shift(),
                Phase::Reducing => self.reduce_step(),
                Phase::ErrorRecovery => self.recover(),
                Phase::Accepting => {
                    trace!("accept");
                    self.accepted = true;
                    break;
                }
                Phase::DoneWithErrors => break,
            }
        }
        let root = self.assemble_root();
        (root, self.errors)
    }

    fn named(&self, symbol: Symbol) -> bool {
        self.table.metadata(symbol).is_some_and(|m| m.named)
    }

    fn current_action(&self) -> Option<Action> {
        self.table.states[self.stack.top_state() as usize].action(self.lookahead.node)
    }

    /// Next phase for the current lookahead, assuming it is viable.
    fn phase_for_lookahead(&self) -> Phase {
        match self.current_action() {
            Some(Action::Shift(_)) => Phase::Shifting,
            Some(Action::Reduce(_)) => Phase::Reducing,
            Some(Action::Accept) => Phase::Accepting,
            None => Phase::ErrorRecovery,
        }
    }

    fn dispatch(&self) -> Phase {
        match self.current_action() {
            Some(Action::Reduce(_)) if !self.is_viable(self.stack.state_path(), self.lookahead.node) => {
                Phase::ErrorRecovery
            }
            _ => self.phase_for_lookahead(),
        }
    }

    /// Scan the next non-extra token. Extras and unlexable runs are pushed
    /// onto the stack as they are met.
    fn scan(&mut self) -> Spanned<Symbol> {
        let table = self.table;
        loop {
            let state = &table.states[self.stack.top_state() as usize];
            match self.lexer.next(self.position, state) {
                Lexeme::End => return Spanned::new(Symbol::END, Span::empty(self.text.len())),
                Lexeme::Token(token) if table.is_extra(token.node) => {
                    trace!(symbol = token.node.0, start = token.span.start, "extra");
                    let node = Node::leaf(token.node, token.span, self.named(token.node));
                    self.push_extra(node);
                }
                Lexeme::Token(token) => return token,
                Lexeme::Invalid(span) => {
                    let bytes = String::from_utf8_lossy(&self.text[span.range()]).into_owned();
                    debug!(start = span.start, end = span.end, "lexical error");
                    self.errors.push(SyntaxError::lexical(
                        format!("unrecognized input '{}'", bytes.escape_debug()),
                        span,
                    ));
                    self.push_extra(Node::error(span, Vec::new()));
                }
            }
        }
    }

    fn push_extra(&mut self, node: Node) {
        self.position = node.span().end;
        self.last_end = node.span().end;
        self.merge_skips = false;
        self.stack.push_extra(node);
    }

    fn shift(&mut self) {
        let Some(Action::Shift(next)) = self.current_action() else {
            self.phase = Phase::ErrorRecovery;
            return;
        };
        let token = self.lookahead.clone();
        if token.node == Symbol::END {
            // Shifting END consumes nothing, so the parse would never advance.
            debug!(state = next, "table shifts end of input");
            self.errors.push(SyntaxError::syntactic("unexpected end of input", token.span));
            self.phase = Phase::DoneWithErrors;
            return;
        }
        trace!(symbol = token.node.0, state = next, "shift");
        let node = Node::leaf(token.node, token.span, self.named(token.node));
        self.stack.push(next, node);
        self.position = token.span.end;
        self.last_end = token.span.end;
        self.merge_skips = false;
        self.phase = Phase::Scanning;
    }

    fn reduce_step(&mut self) {
        let Some(Action::Reduce(production)) = self.current_action() else {
            self.phase = self.dispatch();
            return;
        };
        self.phase = if self.reduce(production) {
            self.phase_for_lookahead()
        } else {
            Phase::ErrorRecovery
        };
    }

    /// Apply `production` to the real stack. Returns false when the table has
    /// no goto for the produced symbol; the node is then kept as an ERROR.
    fn reduce(&mut self, production_id: ProductionId) -> bool {
        let table = self.table;
        let production = &table.productions[production_id as usize];
        let trailing = self.stack.pop_trailing_extras();
        let popped = self.stack.pop_children(production.child_count as usize);
        let below = self.stack.top_state();
        let children = self.collect_children(production, popped);
        let span = match (children.first(), children.last()) {
            (Some(first), Some(last)) => Span::new(first.span().start, last.span().end),
            _ => Span::empty(self.stack.end_offset()),
        };
        let node = Node::branch(production.lhs, span, self.named(production.lhs), children);
        self.merge_skips = false;

        match table.states[below as usize].goto_state(production.lhs) {
            Some(next) => {
                trace!(production = production_id, lhs = production.lhs.0, state = next, "reduce");
                self.stack.push(next, node);
                for extra in trailing {
                    self.stack.push_extra(extra);
                }
                true
            }
            None => {
                debug!(production = production_id, state = below, "no goto after reduce");
                self.stack.push_extra(Node::error(span, vec![node]));
                for extra in trailing {
                    self.stack.push_extra(extra);
                }
                false
            }
        }
    }

    /// Attach fields and inline hidden rules.
    fn collect_children(&self, production: &Production, popped: Vec<Node>) -> Vec<Node> {
        let mut children = Vec::with_capacity(popped.len());
        let mut index = 0u16;
        for mut child in popped {
            if child.is_extra() {
                children.push(child);
                continue;
            }
            let field = production.field_for(index);
            index += 1;
            let hidden = !child.is_error()
                && self.table.metadata(child.symbol()).is_some_and(|m| m.is_hidden_rule());
            if hidden {
                for mut grandchild in child.children {
                    if field.is_some() && grandchild.field.is_none() && !grandchild.is_extra() {
                        grandchild.field = field;
                    }
                    children.push(grandchild);
                }
            } else {
                if field.is_some() {
                    child.field = field;
                }
                children.push(child);
            }
        }
        children
    }

    /// Run the reductions `symbol` triggers on a copy of the state stack and
    /// return the action that ends the chain.
    fn simulate(&self, states: &mut Vec<StateId>, symbol: Symbol) -> Option<Action> {
        let mut reductions = 0usize;
        loop {
            let top = *states.last()?;
            match self.table.states[top as usize].action(symbol)? {
                Action::Reduce(production_id) => {
                    reductions += 1;
                    if reductions > self.options.reduction_limit {
                        debug!(limit = self.options.reduction_limit, "reduction limit reached");
                        return None;
                    }
                    let production = &self.table.productions[production_id as usize];
                    let count = production.child_count as usize;
                    if states.len() <= count {
                        return None;
                    }
                    states.truncate(states.len() - count);
                    let below = *states.last()?;
                    states.push(self.table.states[below as usize].goto_state(production.lhs)?);
                }
                action => return Some(action),
            }
        }
    }

    fn is_viable(&self, mut states: Vec<StateId>, symbol: Symbol) -> bool {
        self.simulate(&mut states, symbol).is_some()
    }

    fn assemble_root(&mut self) -> Node {
        let nodes = std::mem::take(&mut self.stack).into_nodes();
        let whole = Span::new(0, self.text.len());
        if self.accepted {
            let mut leading = Vec::new();
            let mut trailing = Vec::new();
            let mut root = None;
            for node in nodes {
                if !node.is_extra() && root.is_none() {
                    root = Some(node);
                } else if root.is_none() {
                    leading.push(node);
                } else {
                    trailing.push(node);
                }
            }
            if let Some(mut root) = root {
                leading.append(&mut root.children);
                leading.append(&mut trailing);
                root.children = leading;
                root.span = whole;
                return root;
            }
            return Node::branch(Symbol::ERROR, whole, true, leading);
        }
        Node::branch(Symbol::ERROR, whole, true, nodes)
    }
}
