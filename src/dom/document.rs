//! Arena-backed document tree

use serde::Serialize;

use crate::error::CountdownError;

use super::Selector;

/// Handle to a node owned by a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            children: Vec::new(),
            parent: None,
        }
    }
}

/// In-memory element tree that countdown widgets render into.
///
/// Node ids are only meaningful for the document that created them; passing
/// an id from another document panics.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Create a document containing only a `body` root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new("body")],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node::new(tag));
        NodeId(self.nodes.len() - 1)
    }

    pub fn set_id(&mut self, node: NodeId, id: &str) {
        self.nodes[node.0].id = Some(id.to_string());
    }

    /// Add a class unless it is already present or blank
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        let classes = &mut self.nodes[node.0].classes;
        if !class.is_empty() && !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    ///
    /// Appending a node into its own subtree is ignored.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if self.is_inclusive_ancestor(child, parent) {
            tracing::warn!("Refusing to append {:?} into its own subtree", child);
            return;
        }

        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|&c| c != child);
        }
        self.nodes[child.0].parent = Some(parent);
        self.nodes[parent.0].children.push(child);
    }

    /// Replace the node's content with plain text, dropping its children
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        let children = std::mem::take(&mut self.nodes[node.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
        }
        let slot = &mut self.nodes[node.0].text;
        slot.clear();
        slot.push_str(text);
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.nodes[node.0].tag
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node.0].id.as_deref()
    }

    pub fn classes(&self, node: NodeId) -> &[String] {
        &self.nodes[node.0].classes
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[node.0].classes.iter().any(|c| c == class)
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.nodes[node.0].children
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    /// Text set directly on this node
    pub fn text(&self, node: NodeId) -> &str {
        &self.nodes[node.0].text
    }

    /// Text of this node followed by all descendant text, in tree order
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        out.push_str(&self.nodes[node.0].text);
        for &child in &self.nodes[node.0].children {
            self.collect_text(child, out);
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

    /// All attached elements matching `selector`, in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>, CountdownError> {
        let selector = Selector::parse(selector)?;
        let mut found = Vec::new();
        let mut stack = vec![self.root()];

        while let Some(node) = stack.pop() {
            if selector.matches(self, node) {
                found.push(node);
            }
            stack.extend(self.nodes[node.0].children.iter().rev().copied());
        }

        Ok(found)
    }

    /// Serialize the attached tree as HTML
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(self.root(), &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let n = &self.nodes[node.0];
        out.push('<');
        out.push_str(&n.tag);
        if let Some(id) = &n.id {
            out.push_str(" id=\"");
            out.push_str(&escape(id));
            out.push('"');
        }
        if !n.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape(&n.classes.join(" ")));
            out.push('"');
        }
        out.push('>');
        out.push_str(&escape(&n.text));
        for &child in &n.children {
            self.write_html(child, out);
        }
        out.push_str("</");
        out.push_str(&n.tag);
        out.push('>');
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
