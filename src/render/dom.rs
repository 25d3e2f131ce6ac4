//! Minimal DOM: element trees, named mount points, HTML serialization.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A node in a rendered subtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    pub fn text(content: impl Into<String>) -> Self {
        Node::Text(content.into())
    }

    /// Serialize this node as HTML, escaping text and attribute values.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&escape_html(text)),
            Node::Element(element) => element.write_html(out),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element with ordered attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Elements that never have children or a closing tag.
const VOID_TAGS: &[&str] = &["img", "br", "hr", "input", "meta", "link"];

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing any previous value for the same name.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a class to the existing `class` attribute.
    pub fn add_class(self, class: &str) -> Self {
        let joined = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.attr("class", joined)
    }

    /// Append a text node.
    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.children.push(Node::text(content));
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Concatenated text of this element and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    pub fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(element) => collect_text(&element.children, out),
        }
    }
}

/// A page document: a set of named mount points, each owning its children.
///
/// Mount points are declared up front; rendering into an undeclared mount is
/// a no-op so pages only receive the sections they have room for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    mounts: BTreeMap<String, Vec<Node>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with the given (empty) mount points.
    pub fn with_mounts<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mounts: ids.into_iter().map(|id| (id.into(), Vec::new())).collect(),
        }
    }

    /// Declare an empty mount point (existing content is kept).
    pub fn add_mount(&mut self, id: impl Into<String>) {
        self.mounts.entry(id.into()).or_default();
    }

    pub fn has_mount(&self, id: &str) -> bool {
        self.mounts.contains_key(id)
    }

    /// Replace the children of mount `id`. Returns `false` when the mount
    /// point does not exist.
    pub fn replace_children(&mut self, id: &str, children: Vec<Node>) -> bool {
        match self.mounts.get_mut(id) {
            Some(slot) => {
                *slot = children;
                true
            }
            None => false,
        }
    }

    pub fn children(&self, id: &str) -> Option<&[Node]> {
        self.mounts.get(id).map(Vec::as_slice)
    }

    /// Check whether a mount point exists and has content.
    pub fn is_painted(&self, id: &str) -> bool {
        self.children(id).is_some_and(|children| !children.is_empty())
    }

    pub fn mount_ids(&self) -> impl Iterator<Item = &str> {
        self.mounts.keys().map(String::as_str)
    }

    /// HTML of one mount point's children.
    pub fn mount_html(&self, id: &str) -> Option<String> {
        self.children(id).map(|children| {
            let mut out = String::new();
            for child in children {
                child.write_html(&mut out);
            }
            out
        })
    }

    /// Serialize every mount point as `<div id="...">...</div>`, in id order.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (id, children) in &self.mounts {
            let _ = write!(out, "<div id=\"{}\">", escape_html(id));
            for child in children {
                child.write_html(&mut out);
            }
            out.push_str("</div>\n");
        }
        out
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
