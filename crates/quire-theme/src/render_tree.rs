//! Render tree produced by shells and components.
//!
//! A [`RenderTree`] is an ordered list of [`RenderNode`]s. Base shells mark
//! their extension points with [`Slot`] nodes whose content is the default
//! rendering for that point. Substitution swaps the content of a slot while
//! leaving everything around it untouched.

use std::collections::BTreeMap;
use std::fmt::Write;

/// Elements written without a closing tag.
const VOID_ELEMENTS: [&str; 6] = ["br", "hr", "img", "input", "link", "meta"];

/// A node in the render tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderNode {
    /// HTML element.
    Element(Element),
    /// Text content, escaped on output.
    Text(String),
    /// Trusted markup, written as-is.
    Raw(String),
    /// Named extension point.
    Slot(Slot),
}

impl RenderNode {
    /// Text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Trusted markup node.
    #[must_use]
    pub fn raw(html: impl Into<String>) -> Self {
        Self::Raw(html.into())
    }

    /// Extension point with default content.
    #[must_use]
    pub fn slot(name: impl Into<String>, content: Vec<RenderNode>) -> Self {
        Self::Slot(Slot {
            name: name.into(),
            content,
        })
    }
}

impl From<Element> for RenderNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// HTML element with ordered attributes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Attributes in output order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<RenderNode>,
}

impl Element {
    /// Element with no attributes or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Append a child node.
    #[must_use]
    pub fn child(mut self, node: impl Into<RenderNode>) -> Self {
        self.children.push(node.into());
        self
    }

    /// Append several child nodes.
    #[must_use]
    pub fn children(mut self, nodes: impl IntoIterator<Item = RenderNode>) -> Self {
        self.children.extend(nodes);
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(RenderNode::Text(text.into()))
    }

    /// Value of the first attribute named `name`.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Extension point marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    /// Extension point key.
    pub name: String,
    /// Current content: the default rendering, or a substitution.
    pub content: Vec<RenderNode>,
}

/// Ordered render output.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderTree {
    nodes: Vec<RenderNode>,
}

impl RenderTree {
    /// Tree from top-level nodes.
    #[must_use]
    pub fn new(nodes: Vec<RenderNode>) -> Self {
        Self { nodes }
    }

    /// Tree with a single node.
    #[must_use]
    pub fn single(node: impl Into<RenderNode>) -> Self {
        Self {
            nodes: vec![node.into()],
        }
    }

    /// Top-level nodes.
    #[must_use]
    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    /// Consume into the top-level nodes.
    #[must_use]
    pub fn into_nodes(self) -> Vec<RenderNode> {
        self.nodes
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Find the first slot named `name`, searching depth-first.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&Slot> {
        fn find<'a>(nodes: &'a [RenderNode], name: &str) -> Option<&'a Slot> {
            nodes.iter().find_map(|node| match node {
                RenderNode::Slot(slot) if slot.name == name => Some(slot),
                RenderNode::Slot(slot) => find(&slot.content, name),
                RenderNode::Element(el) => find(&el.children, name),
                RenderNode::Text(_) | RenderNode::Raw(_) => None,
            })
        }
        find(&self.nodes, name)
    }

    /// Names of every slot in document order.
    #[must_use]
    pub fn slot_names(&self) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [RenderNode], out: &mut Vec<&'a str>) {
            for node in nodes {
                match node {
                    RenderNode::Slot(slot) => {
                        out.push(&slot.name);
                        collect(&slot.content, out);
                    }
                    RenderNode::Element(el) => collect(&el.children, out),
                    RenderNode::Text(_) | RenderNode::Raw(_) => {}
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }

    /// Replace the content of every slot named in `substitutions`.
    ///
    /// Slots without a substitution keep their default content; slots nested
    /// inside default content are still substituted. Replacement content is
    /// inserted as-is.
    #[must_use]
    pub fn substitute(&self, substitutions: &BTreeMap<String, RenderTree>) -> Self {
        fn go(nodes: &[RenderNode], subs: &BTreeMap<String, RenderTree>) -> Vec<RenderNode> {
            nodes
                .iter()
                .map(|node| match node {
                    RenderNode::Slot(slot) => {
                        let content = match subs.get(&slot.name) {
                            Some(replacement) => replacement.nodes.clone(),
                            None => go(&slot.content, subs),
                        };
                        RenderNode::Slot(Slot {
                            name: slot.name.clone(),
                            content,
                        })
                    }
                    RenderNode::Element(el) => RenderNode::Element(Element {
                        tag: el.tag.clone(),
                        attrs: el.attrs.clone(),
                        children: go(&el.children, subs),
                    }),
                    other => other.clone(),
                })
                .collect()
        }

        if substitutions.is_empty() {
            return self.clone();
        }
        Self {
            nodes: go(&self.nodes, substitutions),
        }
    }

    /// Concatenated text content, ignoring markup.
    #[must_use]
    pub fn text_content(&self) -> String {
        fn go(nodes: &[RenderNode], out: &mut String) {
            for node in nodes {
                match node {
                    RenderNode::Text(text) => out.push_str(text),
                    RenderNode::Element(el) => go(&el.children, out),
                    RenderNode::Slot(slot) => go(&slot.content, out),
                    RenderNode::Raw(_) => {}
                }
            }
        }
        let mut out = String::new();
        go(&self.nodes, &mut out);
        out
    }

    /// Serialize to HTML.
    ///
    /// Slot markers produce no markup of their own, only their content.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut html = String::with_capacity(4096);
        write_nodes(&mut html, &self.nodes);
        html
    }
}

impl From<Vec<RenderNode>> for RenderTree {
    fn from(nodes: Vec<RenderNode>) -> Self {
        Self::new(nodes)
    }
}

fn write_nodes(html: &mut String, nodes: &[RenderNode]) {
    for node in nodes {
        match node {
            RenderNode::Text(text) => html.push_str(&escape_html(text)),
            RenderNode::Raw(raw) => html.push_str(raw),
            RenderNode::Slot(slot) => write_nodes(html, &slot.content),
            RenderNode::Element(el) => {
                let _ = write!(html, "<{}", el.tag);
                for (name, value) in &el.attrs {
                    let _ = write!(html, " {name}=\"{}\"", escape_html(value));
                }
                html.push('>');
                if VOID_ELEMENTS.contains(&el.tag.as_str()) {
                    continue;
                }
                write_nodes(html, &el.children);
                let _ = write!(html, "</{}>", el.tag);
            }
        }
    }
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
