//! Concrete syntax trees.

use std::str::Utf8Error;

use crate::diagnostics::SyntaxError;
use crate::language::Language;
use crate::span::Span;
use crate::table::{FieldId, Symbol};

/// A node of a concrete syntax tree. Children are owned; spans of siblings
/// never overlap and are nested in the parent span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) symbol: Symbol,
    pub(crate) span: Span,
    pub(crate) children: Vec<Node>,
    pub(crate) field: Option<FieldId>,
    pub(crate) named: bool,
    pub(crate) extra: bool,
    pub(crate) missing: bool,
}

impl Node {
    pub(crate) fn leaf(symbol: Symbol, span: Span, named: bool) -> Self {
        Node { symbol, span, children: Vec::new(), field: None, named, extra: false, missing: false }
    }

    pub(crate) fn branch(symbol: Symbol, span: Span, named: bool, children: Vec<Node>) -> Self {
        Node { symbol, span, children, field: None, named, extra: false, missing: false }
    }

    /// ERROR node wrapping `children`; an extra, so it can sit anywhere.
    pub(crate) fn error(span: Span, children: Vec<Node>) -> Self {
        Node { symbol: Symbol::ERROR, span, children, field: None, named: true, extra: true, missing: false }
    }

    pub(crate) fn missing(symbol: Symbol, offset: usize, named: bool) -> Self {
        Node { missing: true, ..Node::leaf(symbol, Span::empty(offset), named) }
    }

    pub(crate) fn into_extra(mut self) -> Self {
        self.extra = true;
        self
    }

    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn start_byte(&self) -> usize {
        self.span.start
    }

    pub fn end_byte(&self) -> usize {
        self.span.end
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn named_children(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children.iter().filter(|c| c.named)
    }

    pub fn named_child_count(&self) -> usize {
        self.named_children().count()
    }

    /// Field this node fills in its parent, if any.
    pub fn field(&self) -> Option<FieldId> {
        self.field
    }

    pub fn child_by_field_id(&self, field: FieldId) -> Option<&Node> {
        self.children.iter().find(|c| c.field == Some(field))
    }

    pub fn children_by_field_id(&self, field: FieldId) -> impl Iterator<Item = &Node> + '_ {
        self.children.iter().filter(move |c| c.field == Some(field))
    }

    pub fn is_named(&self) -> bool {
        self.named
    }

    pub fn is_extra(&self) -> bool {
        self.extra
    }

    pub fn is_error(&self) -> bool {
        self.symbol == Symbol::ERROR
    }

    /// Zero-width token inserted by error recovery.
    pub fn is_missing(&self) -> bool {
        self.missing
    }

    /// True when this node or any descendant is an ERROR or MISSING node.
    pub fn has_error(&self) -> bool {
        self.is_error() || self.missing || self.children.iter().any(Node::has_error)
    }

    /// Smallest node spanning `[start, end)`. A node must extend past
    /// `start` to qualify, so an empty range between two tokens resolves to
    /// their parent.
    pub fn descendant_for_byte_range(&self, start: usize, end: usize) -> &Node {
        let mut node = self;
        'descend: loop {
            for child in &node.children {
                if child.span.start <= start && child.span.end >= end && child.span.end > start {
                    node = child;
                    continue 'descend;
                }
            }
            return node;
        }
    }

    /// Pre-order traversal starting at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Source bytes covered by this node.
    pub fn text<'s>(&self, source: &'s [u8]) -> &'s [u8] {
        &source[self.span.start.min(source.len())..self.span.end.min(source.len())]
    }
}

/// Pre-order iterator over a node and its descendants.
pub struct Walk<'t> {
    stack: Vec<&'t Node>,
}

impl<'t> Iterator for Walk<'t> {
    type Item = &'t Node;

    fn next(&mut self) -> Option<&'t Node> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// Result of a parse: the root node, the parsed bytes, the language and the
/// syntax errors recovered from.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    root: Node,
    source: Vec<u8>,
    language: Language,
    errors: Vec<SyntaxError>,
}

impl SyntaxTree {
    pub(crate) fn new(root: Node, source: Vec<u8>, language: Language, errors: Vec<SyntaxError>) -> Self {
        Self { root, source, language, errors }
    }

    pub fn root_node(&self) -> &Node {
        &self.root
    }

    pub fn source(&self) -> &[u8] {
        &self.source
    }

    pub fn language(&self) -> &Language {
        &self.language
    }

    /// True when the input did not match the grammar.
    pub fn has_error(&self) -> bool {
        !self.errors.is_empty() || self.root.has_error()
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Symbol name of `node`.
    pub fn kind(&self, node: &Node) -> &str {
        self.language.symbol_name(node.symbol).unwrap_or("UNKNOWN")
    }

    pub fn field_name(&self, node: &Node) -> Option<&str> {
        node.field.and_then(|f| self.language.field_name(f))
    }

    pub fn child_by_field_name<'t>(&self, node: &'t Node, name: &str) -> Option<&'t Node> {
        let field = self.language.field_id_for_name(name)?;
        node.child_by_field_id(field)
    }

    pub fn node_bytes(&self, node: &Node) -> &[u8] {
        node.text(&self.source)
    }

    pub fn node_text(&self, node: &Node) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.node_bytes(node))
    }

    pub fn walk(&self) -> Walk<'_> {
        self.root.walk()
    }
}
