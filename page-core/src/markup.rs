//! Markup tree produced by blocks and serialized by the page renderer.
//!
//! Blocks build a [`Node`] tree with the small builder API below; the
//! renderer turns it into HTML with [`to_html`]. Text and attribute values
//! are always escaped. [`Node::Raw`] is the one escape hatch and is honoured
//! only under [`TrustPolicy::Trusted`].

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

/// Whether authored free-text HTML/CSS may reach the output unescaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrustPolicy {
    /// Pages are only viewed by their authors; raw HTML and custom CSS pass through.
    Trusted,
    /// Pages may be viewed by third parties; raw HTML is escaped and custom CSS dropped.
    #[default]
    Untrusted,
}

impl TrustPolicy {
    /// Whether raw content is emitted verbatim.
    #[must_use]
    pub const fn allows_raw(self) -> bool {
        matches!(self, Self::Trusted)
    }
}

impl std::str::FromStr for TrustPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "trusted" => Ok(Self::Trusted),
            "untrusted" => Ok(Self::Untrusted),
            other => Err(format!("unknown trust policy: {other}")),
        }
    }
}

/// An element with attributes and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Tag name.
    pub tag: &'static str,
    /// Attributes in insertion order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
}

/// A markup node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element.
    Element(Element),
    /// Escaped text.
    Text(String),
    /// Unescaped HTML, subject to the trust policy.
    Raw(String),
    /// Children without a wrapping element.
    Fragment(Vec<Node>),
}

const VOID_TAGS: [&str; 6] = ["img", "input", "br", "hr", "meta", "source"];

impl Node {
    /// Start an element.
    #[must_use]
    pub fn el(tag: &'static str) -> Self {
        Self::Element(Element {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        })
    }

    /// A text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Add an attribute. No-op on non-element nodes.
    #[must_use]
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        if let Self::Element(el) = &mut self {
            el.attrs.push((name.into(), value.into()));
        }
        self
    }

    /// Add an attribute only when `value` is `Some`.
    #[must_use]
    pub fn attr_opt(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.attr(name, value),
            None => self,
        }
    }

    /// Shorthand for the `class` attribute.
    #[must_use]
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append a child.
    #[must_use]
    pub fn child(mut self, child: Node) -> Self {
        match &mut self {
            Self::Element(el) => el.children.push(child),
            Self::Fragment(children) => children.push(child),
            Self::Text(_) | Self::Raw(_) => {}
        }
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        for child in children {
            self = self.child(child);
        }
        self
    }

    /// Append a text child.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.child(Self::text(text))
    }

    /// Attribute value by name.
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        match self {
            Self::Element(el) => el
                .attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    /// Concatenated text content of this subtree.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Find every element in the subtree carrying `name="value"`.
    #[must_use]
    pub fn find_by_attr<'a>(&'a self, name: &str, value: &str) -> Vec<&'a Node> {
        let mut found = Vec::new();
        find_attr(self, name, value, &mut found);
        found
    }
}

fn collect_text(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) | Node::Raw(text) => out.push_str(text),
        Node::Element(el) => el.children.iter().for_each(|c| collect_text(c, out)),
        Node::Fragment(children) => children.iter().for_each(|c| collect_text(c, out)),
    }
}

fn find_attr<'a>(node: &'a Node, name: &str, value: &str, found: &mut Vec<&'a Node>) {
    let children = match node {
        Node::Element(el) => {
            if el.attrs.iter().any(|(n, v)| n == name && v == value) {
                found.push(node);
            }
            &el.children
        }
        Node::Fragment(children) => children,
        Node::Text(_) | Node::Raw(_) => return,
    };
    for child in children {
        find_attr(child, name, value, found);
    }
}

/// Escape text for an HTML text or attribute context.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Serialize a node tree to HTML.
#[must_use]
pub fn to_html(node: &Node, policy: TrustPolicy) -> String {
    let mut out = String::new();
    write_node(node, policy, &mut out);
    out
}

fn write_node(node: &Node, policy: TrustPolicy, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Raw(html) => {
            if policy.allows_raw() {
                out.push_str(html);
            } else {
                out.push_str(&escape(html));
            }
        }
        Node::Fragment(children) => {
            for child in children {
                write_node(child, policy, out);
            }
        }
        Node::Element(el) => {
            out.push('<');
            out.push_str(el.tag);
            for (name, value) in &el.attrs {
                let _ = write!(out, " {}=\"{}\"", escape(name), escape(value));
            }
            out.push('>');
            if VOID_TAGS.contains(&el.tag) {
                return;
            }
            for child in &el.children {
                match child {
                    // Style sheets are raw text: entity escapes would corrupt them.
                    Node::Text(css) if el.tag == "style" => {
                        out.push_str(&css.replace("</", "<\\/"));
                    }
                    _ => write_node(child, policy, out),
                }
            }
            let _ = write!(out, "</{}>", el.tag);
        }
    }
}
