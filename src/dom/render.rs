//! [`Document`] -> HTML text.

use super::{Document, NodeId, NodeKind};
use crate::utils::html::{ContentModel, content_model, escape, escape_attr};

impl Document {
    /// Serialize the whole document, including its doctype.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        if let Some(doctype) = &self.doctype {
            out.push_str("<!");
            out.push_str(doctype);
            out.push('>');
        }
        self.write_children(self.root(), false, &mut out);
        out
    }

    /// Serialize a node and its subtree.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, false, &mut out);
        out
    }

    /// Serialize the children of a node.
    pub fn inner_html(&self, node: NodeId) -> String {
        let raw = self
            .tag_name(node)
            .is_some_and(|tag| content_model(tag) == ContentModel::RawText);
        let mut out = String::new();
        self.write_children(node, raw, &mut out);
        out
    }

    fn write_children(&self, node: NodeId, raw: bool, out: &mut String) {
        for &child in self.children(node) {
            self.write_node(child, raw, out);
        }
    }

    fn write_node(&self, node: NodeId, raw: bool, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Document => self.write_children(node, false, out),
            NodeKind::Text(text) if raw => out.push_str(text),
            NodeKind::Text(text) => out.push_str(&escape(text)),
            NodeKind::Comment(text) => {
                out.push_str("<!--");
                out.push_str(text);
                out.push_str("-->");
            }
            NodeKind::Element(element) => {
                out.push('<');
                out.push_str(element.tag());
                for (name, value) in element.attrs() {
                    out.push(' ');
                    out.push_str(name);
                    out.push_str("=\"");
                    out.push_str(&escape_attr(value));
                    out.push('"');
                }
                out.push('>');

                let raw = match content_model(element.tag()) {
                    ContentModel::Void => return,
                    ContentModel::RawText => true,
                    ContentModel::Normal => false,
                };

                self.write_children(node, raw, out);
                out.push_str("</");
                out.push_str(element.tag());
                out.push('>');
            }
        }
    }
}
