//! Arena document tree.
//!
//! A [`Document`] owns every node; callers hold [`NodeId`] handles. Nodes are
//! never freed: a detached node keeps its id and state, it just stops being
//! reachable from the root. This mirrors how a page script may keep a
//! reference to an element after it has been removed.
//!
//! # Modules
//!
//! - `parse`: HTML text -> `Document` (via `tl`)
//! - `render`: `Document` -> HTML text
//! - `select`: the CSS selector subset used for queries
//!
//! Tag and attribute names are stored lowercase, matching HTML's
//! case-insensitive name handling; every lookup lowercases its argument.

mod parse;
mod render;
mod select;

pub use select::Selector;

use std::borrow::Cow;

use serde::Serialize;
use thiserror::Error;

// ============================================================================
// Types
// ============================================================================

/// Errors raised while building or querying a document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomError {
    #[error("html parse error: {0}")]
    Parse(String),

    #[error("invalid selector `{selector}`: {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Handle to a node inside a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Behaviour attached to an element, run when it is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listener {
    /// Scroll to the footnote body sharing this `bid` and flash it.
    ScrollToFootnote { bid: Option<String> },
}

#[derive(Debug, Clone)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    listeners: Vec<Listener>,
    /// Set once the enhancer has inserted a label; never serialized.
    labelled: bool,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: Vec::new(),
            listeners: Vec::new(),
            labelled: false,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        let name = lower(name);
        self.attrs
            .iter()
            .find(|(k, _)| *k == *name)
            .map(|(_, v)| v.as_str())
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        let name = lower(name);
        match self.attrs.iter_mut().find(|(k, _)| *k == *name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.attrs.push((name.into_owned(), value.to_string())),
        }
    }

    fn remove_attr(&mut self, name: &str) -> bool {
        let name = lower(name);
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| *k != *name);
        self.attrs.len() != before
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class")
            .unwrap_or_default()
            .split_ascii_whitespace()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Document,
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// An HTML document held as an arena of nodes.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    doctype: Option<String>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn lower(name: &str) -> Cow<'_, str> {
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        Cow::Owned(name.to_ascii_lowercase())
    } else {
        Cow::Borrowed(name)
    }
}

// ============================================================================
// Construction
// ============================================================================

impl Document {
    /// Create an empty document containing only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Document,
            }],
            doctype: None,
        }
    }

    /// Parse an HTML string into a document.
    pub fn parse(html: &str) -> Result<Self, DomError> {
        parse::parse_document(html)
    }

    #[inline]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn doctype(&self) -> Option<&str> {
        self.doctype.as_deref()
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Comment(text.to_string()))
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Insert `child` as the first child of `parent`, detaching it first.
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.insert(0, child);
    }

    /// Remove a node from its parent. The node and its subtree stay valid.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != node);
        }
    }

    /// Detach every child of `node`.
    pub fn clear_children(&mut self, node: NodeId) {
        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }
    }

    /// Create `<tag>text</tag>` as a detached element.
    pub fn create_element_with_text(&mut self, tag: &str, text: &str) -> NodeId {
        let element = self.create_element(tag);
        let text = self.create_text(text);
        self.append_child(element, text);
        element
    }
}

// ============================================================================
// Navigation
// ============================================================================

impl Document {
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Whether `node` is reachable from the root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == self.root() {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// All elements under `scope` (excluding `scope` itself) in document order.
    pub fn descendant_elements(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            if self.element(id).is_some() {
                out.push(id);
            }
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// All connected elements in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendant_elements(self.root())
    }

    /// Concatenated text of `node` and its descendants.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Comment(_) => {}
            NodeKind::Document | NodeKind::Element(_) => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
        }
    }
}

// ============================================================================
// Element state
// ============================================================================

impl Document {
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match self.nodes.get(node.0).map(|n| &n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(node.0).map(|n| &mut n.kind) {
            Some(NodeKind::Element(e)) => Some(e),
            _ => None,
        }
    }

    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::tag)
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node).and_then(|e| e.attr(name))
    }

    pub fn has_attr(&self, node: NodeId, name: &str) -> bool {
        self.attr(node, name).is_some()
    }

    /// Set an attribute. No-op on non-element nodes.
    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(node) {
            e.set_attr(name, value);
        }
    }

    /// Remove an attribute, returning whether it was present.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) -> bool {
        self.element_mut(node).is_some_and(|e| e.remove_attr(name))
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    /// Add a class token; adding an existing token changes nothing.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let Some(e) = self.element_mut(node) else {
            return;
        };
        if e.has_class(class) {
            return;
        }
        let value = match e.attr("class").map(str::trim) {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        e.set_attr("class", &value);
    }

    /// Remove every occurrence of a class token.
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        let Some(e) = self.element_mut(node) else {
            return;
        };
        if !e.has_class(class) {
            return;
        }
        let value = e
            .classes()
            .filter(|c| *c != class)
            .collect::<Vec<_>>()
            .join(" ");
        e.set_attr("class", &value);
    }

    pub fn add_listener(&mut self, node: NodeId, listener: Listener) {
        if let Some(e) = self.element_mut(node) {
            e.listeners.push(listener);
        }
    }

    pub fn listeners(&self, node: NodeId) -> &[Listener] {
        self.element(node)
            .map(Element::listeners)
            .unwrap_or_default()
    }

    pub fn is_labelled(&self, node: NodeId) -> bool {
        self.element(node).is_some_and(|e| e.labelled)
    }

    pub fn mark_labelled(&mut self, node: NodeId) {
        if let Some(e) = self.element_mut(node) {
            e.labelled = true;
        }
    }

    /// Replace the children of `node` with a single detached subtree.
    pub fn replace_children(&mut self, node: NodeId, child: NodeId) {
        self.clear_children(node);
        self.append_child(node, child);
    }
}

// ============================================================================
// Queries
// ============================================================================

impl Document {
    /// All connected elements matching `selector`, in document order.
    pub fn select(&self, selector: &Selector) -> Vec<NodeId> {
        self.elements()
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    /// First connected element matching `selector`.
    pub fn select_first(&self, selector: &Selector) -> Option<NodeId> {
        self.elements()
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    /// First connected element (optionally restricted to `tag`) whose `name`
    /// attribute equals `value` exactly.
    pub fn find_by_attr(&self, tag: Option<&str>, name: &str, value: &str) -> Option<NodeId> {
        let tag = tag.map(lower);
        self.elements().into_iter().find(|&id| {
            let Some(e) = self.element(id) else {
                return false;
            };
            tag.as_deref().is_none_or(|t| e.tag() == t) && e.attr(name) == Some(value)
        })
    }
}
