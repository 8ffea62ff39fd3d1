//! Arena-backed element tree.

use std::fmt;

use crate::events::Listener;

/// Handle to a node in a [`Dom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// Kind of name rejected by the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Tag,
    Attribute,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tag => f.write_str("tag"),
            Self::Attribute => f.write_str("attribute"),
        }
    }
}

/// Errors raised by tree primitives.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DomError {
    #[error("Invalid {kind} name: {name:?}")]
    InvalidName { kind: NameKind, name: String },

    #[error("Unsupported selector: {0:?}")]
    InvalidSelector(String),
}

/// An element node: tag name plus attributes in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lower-cased tag name
    pub tag: String,

    /// Attributes in the order they were first set
    pub attributes: Vec<(String, String)>,
}

impl Element {
    /// Look up an attribute value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whitespace-separated class names.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attribute("class")
            .unwrap_or("")
            .split_ascii_whitespace()
    }
}

/// Payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root
    Document,

    /// An element
    Element(Element),

    /// Text, escaped on output
    Text(String),

    /// Trusted markup, emitted verbatim
    Markup(String),
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) data: NodeData,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// An in-memory document.
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Nodes are never
/// freed; a node created without a parent stays detached until appended.
pub struct Dom {
    pub(crate) nodes: Vec<Node>,
    pub(crate) listeners: Vec<(NodeId, crate::events::EventKind, Listener)>,
}

impl Dom {
    /// Create an empty document with just a root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
            listeners: Vec::new(),
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Number of nodes ever created, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document holds only its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Create a detached element.
    pub fn create(&mut self, tag: &str) -> Result<NodeId, DomError> {
        validate_name(tag, NameKind::Tag)?;
        Ok(self.push(NodeData::Element(Element {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
        })))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Payload of a node.
    pub fn data(&self, node: NodeId) -> &NodeData {
        &self.nodes[node.0].data
    }

    /// Element payload, if the node is an element.
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.nodes[node.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[node.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Tag name of an element node.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|el| el.tag.as_str())
    }

    /// Parent of a node, if attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Children of a node in order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    /// Element children of a node in order.
    pub fn element_children(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|child| self.element(*child).is_some())
            .collect()
    }

    /// Whether a node may hold children.
    pub fn can_have_children(&self, node: NodeId) -> bool {
        matches!(
            self.nodes[node.0].data,
            NodeData::Document | NodeData::Element(_)
        )
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// Returns `false` without changing anything when `parent` cannot hold
    /// children or when the append would create a cycle. A child that is
    /// already attached elsewhere is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_have_children(parent) || self.is_inclusive_ancestor(child, parent) {
            return false;
        }

        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
        true
    }

    /// Append a text node to `parent`.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let node = self.create_text(text);
        self.append_child(parent, node);
        node
    }

    fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.nodes[node.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != node);
        }
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(n) = current {
            if n == ancestor {
                return true;
            }
            current = self.nodes[n.0].parent;
        }
        false
    }

    /// Whether a node is reachable from the document root.
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.is_inclusive_ancestor(self.root(), node)
    }

    /// Ancestors of a node, nearest first, excluding the node itself.
    pub fn ancestors(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut current = self.nodes[node.0].parent;
        while let Some(n) = current {
            out.push(n);
            current = self.nodes[n.0].parent;
        }
        out
    }

    /// Next sibling that is an element.
    pub fn next_element_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|c| *c == node)?;
        siblings[pos + 1..]
            .iter()
            .copied()
            .find(|s| self.element(*s).is_some())
    }

    /// Set an attribute, replacing any previous value.
    ///
    /// Setting an attribute on a non-element node is ignored.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        validate_name(name, NameKind::Attribute)?;
        self.put_attribute(node, name.to_ascii_lowercase(), value);
        Ok(())
    }

    /// Set an already-valid, lowercase attribute name.
    fn put_attribute(&mut self, node: NodeId, name: String, value: &str) {
        if let Some(el) = self.element_mut(node) {
            match el.attributes.iter_mut().find(|(key, _)| *key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => el.attributes.push((name, value.to_string())),
            }
        }
    }

    /// Read an attribute.
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(&name.to_ascii_lowercase())
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, node: NodeId, name: &str) {
        let name = name.to_ascii_lowercase();
        if let Some(el) = self.element_mut(node) {
            el.attributes.retain(|(key, _)| *key != name);
        }
    }

    /// Whether the element carries the given class.
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .map(|el| el.classes().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Whether the `hidden` attribute is present.
    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.get_attribute(node, "hidden").is_some()
    }

    /// Toggle the `hidden` attribute.
    pub fn set_hidden(&mut self, node: NodeId, hidden: bool) {
        if hidden {
            self.put_attribute(node, "hidden".to_string(), "");
        } else {
            self.remove_attribute(node, "hidden");
        }
    }

    /// Whether `aria-expanded` is `"true"`.
    pub fn is_expanded(&self, node: NodeId) -> bool {
        self.get_attribute(node, "aria-expanded") == Some("true")
    }

    /// Set `aria-expanded` to `"true"` or `"false"`.
    pub fn set_expanded(&mut self, node: NodeId, expanded: bool) {
        let value = if expanded { "true" } else { "false" };
        self.put_attribute(node, "aria-expanded".to_string(), value);
    }

    /// Replace all children with a single text node.
    ///
    /// An empty string just clears the children.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) {
        self.replace_children(node, NodeData::Text(text.to_string()), text.is_empty());
    }

    /// Replace all children with a single markup node.
    pub fn set_inner_markup(&mut self, node: NodeId, markup: &str) {
        self.replace_children(node, NodeData::Markup(markup.to_string()), markup.is_empty());
    }

    fn replace_children(&mut self, node: NodeId, data: NodeData, clear_only: bool) {
        if !self.can_have_children(node) {
            return;
        }

        for child in std::mem::take(&mut self.nodes[node.0].children) {
            self.nodes[child.0].parent = None;
        }

        if !clear_only {
            let child = self.push(data);
            self.append_child(node, child);
        }
    }

    /// Concatenated text of a node and its descendants.
    ///
    /// Markup nodes contribute their text with tags removed.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.nodes[node.0].data {
            NodeData::Text(text) => out.push_str(text),
            NodeData::Markup(markup) => out.push_str(&strip_tags(markup)),
            NodeData::Document | NodeData::Element(_) => {
                for child in &self.nodes[node.0].children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    /// Depth-first, pre-order list of the node and its descendants.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n.0].children.iter().rev().copied());
        }
        out
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dom")
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Reject names the HTML serializer could not round-trip.
fn validate_name(name: &str, kind: NameKind) -> Result<(), DomError> {
    let bad = name.is_empty()
        || name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '\'' | '/' | '=')
        });

    if bad {
        return Err(DomError::InvalidName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Drop everything between `<` and `>`.
fn strip_tags(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
