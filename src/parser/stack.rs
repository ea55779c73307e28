use crate::span::Span;
use crate::table::{StateId, START_STATE};
use crate::tree::Node;

/// A stack entry: the node and the state the automaton is in after it.
/// Extras carry the state of the entry below them.
#[derive(Debug)]
struct Entry {
    state: StateId,
    node: Node,
}

#[derive(Debug, Default)]
pub(crate) struct Stack {
    entries: Vec<Entry>,
}

impl Stack {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn top_state(&self) -> StateId {
        self.entries.last().map_or(START_STATE, |e| e.state)
    }

    pub(crate) fn push(&mut self, state: StateId, node: Node) {
        self.entries.push(Entry { state, node });
    }

    pub(crate) fn push_extra(&mut self, node: Node) {
        let state = self.top_state();
        self.entries.push(Entry { state, node: node.into_extra() });
    }

    pub(crate) fn top_node_mut(&mut self) -> Option<&mut Node> {
        self.entries.last_mut().map(|e| &mut e.node)
    }

    /// End offset of the newest node, 0 when empty.
    pub(crate) fn end_offset(&self) -> usize {
        self.entries.last().map_or(0, |e| e.node.span().end)
    }

    /// Pop the extras sitting on top of the newest real entry.
    pub(crate) fn pop_trailing_extras(&mut self) -> Vec<Node> {
        let mut extras = Vec::new();
        while self.entries.last().is_some_and(|e| e.node.is_extra()) {
            if let Some(entry) = self.entries.pop() {
                extras.push(entry.node);
            }
        }
        extras.reverse();
        extras
    }

    /// Pop `count` real entries plus the extras between them, oldest first.
    pub(crate) fn pop_children(&mut self, count: usize) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut real = 0;
        while real < count {
            let Some(entry) = self.entries.pop() else { break };
            if !entry.node.is_extra() {
                real += 1;
            }
            nodes.push(entry.node);
        }
        nodes.reverse();
        nodes
    }

    /// States of the real entries, starting with the start state.
    pub(crate) fn state_path(&self) -> Vec<StateId> {
        self.state_path_below(self.entries.len())
    }

    /// Like [`Stack::state_path`] for the first `index` entries only.
    pub(crate) fn state_path_below(&self, index: usize) -> Vec<StateId> {
        std::iter::once(START_STATE)
            .chain(self.entries[..index].iter().filter(|e| !e.node.is_extra()).map(|e| e.state))
            .collect()
    }

    /// Remove entries from `index` up, returning their nodes and covering span.
    pub(crate) fn split_off(&mut self, index: usize) -> (Vec<Node>, Span) {
        let nodes: Vec<Node> = self.entries.split_off(index).into_iter().map(|e| e.node).collect();
        let start = nodes.first().map_or(self.end_offset(), |n| n.span().start);
        let end = nodes.last().map_or(start, |n| n.span().end);
        (nodes, Span::new(start, end))
    }

    pub(crate) fn into_nodes(self) -> Vec<Node> {
        self.entries.into_iter().map(|e| e.node).collect()
    }
}
