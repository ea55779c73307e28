use serde_json::{json, Map, Value};

use crate::tree::{Node, SyntaxTree};

impl SyntaxTree {
    /// S-expression of the named nodes, in the format tree-sitter prints:
    /// `(let_expr binding: (name_binding (name)) value: ...)`.
    pub fn to_sexp(&self) -> String {
        let mut pp = SexpPrinter::new(self);
        pp.emit_node(self.root_node(), None);
        pp.buf
    }

    /// Every node, anonymous ones included, plus the recorded errors.
    pub fn to_json(&self) -> Value {
        json!({
            "language": self.language().name(),
            "has_error": self.has_error(),
            "errors": self.errors(),
            "root": node_json(self, self.root_node()),
        })
    }
}

struct SexpPrinter<'t> {
    tree: &'t SyntaxTree,
    buf: String,
}

impl<'t> SexpPrinter<'t> {
    fn new(tree: &'t SyntaxTree) -> Self {
        Self { tree, buf: String::new() }
    }

    fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    fn emit_node(&mut self, node: &Node, field: Option<&str>) {
        let language = self.tree.language();
        let visible = node.is_error()
            || node.is_missing()
            || (node.is_named() && language.symbol_is_visible(node.symbol()));
        if visible {
            if !self.buf.is_empty() {
                self.write(" ");
            }
            if let Some(field) = field {
                self.write(field);
                self.write(": ");
            }
            let kind = self.tree.kind(node);
            if node.is_missing() {
                if node.is_named() {
                    self.buf.push_str(&format!("(MISSING {kind}"));
                } else {
                    self.buf.push_str(&format!("(MISSING \"{}\"", kind.escape_default()));
                }
            } else {
                self.write("(");
                self.write(kind);
            }
        }
        for child in node.children() {
            let field = self.tree.field_name(child);
            self.emit_node(child, field);
        }
        if visible {
            self.write(")");
        }
    }
}

fn node_json(tree: &SyntaxTree, node: &Node) -> Value {
    let mut obj = Map::new();
    obj.insert("kind".into(), Value::from(tree.kind(node)));
    obj.insert("start".into(), Value::from(node.start_byte()));
    obj.insert("end".into(), Value::from(node.end_byte()));
    obj.insert("named".into(), Value::from(node.is_named()));
    if let Some(field) = tree.field_name(node) {
        obj.insert("field".into(), Value::from(field));
    }
    if node.is_extra() {
        obj.insert("extra".into(), Value::Bool(true));
    }
    if node.is_missing() {
        obj.insert("missing".into(), Value::Bool(true));
    }
    if node.child_count() > 0 {
        let children = node.children().iter().map(|c| node_json(tree, c)).collect();
        obj.insert("children".into(), Value::Array(children));
    }
    Value::Object(obj)
}
