//! Built-in block library.
//!
//! Every block is a pure function from its props to a [`Node`] tree. Blocks
//! never see their style descriptor; the page renderer wraps the output in a
//! container carrying the compiled style. In [`RenderMode::Author`] the text
//! fields a block exposes through [`BlockContext`] become click-to-edit
//! targets for the in-place editor.
//!
//! Blocks with transient interaction state (carousel, FAQ accordion, product
//! catalog, parallax) expose a small state machine next to their renderer.
//! That state is always rebuilt from props and never persisted.

mod carousel;
mod cta;
mod faq;
mod features;
mod footer;
mod gallery;
mod hero;
mod html;
mod navbar;
mod newsletter;
mod parallax;
mod pricing;
mod product_grid;
mod spacer;
mod stats;
mod team;
mod testimonials;
mod text;

use serde::{Deserialize, Serialize};

use crate::inline::{self, FieldKind, InlineEditor};
use crate::markup::Node;
use crate::registry::ComponentDefinition;
use crate::value::{format_number, Props};

pub use carousel::CarouselState;
pub use faq::AccordionState;
pub use parallax::ParallaxState;
pub use product_grid::{CatalogView, SortOrder};

/// How a block is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Read-only output for visitors and collapsed editor cards.
    #[default]
    Display,
    /// Authoring output with click-to-edit affordances.
    Author,
}

impl RenderMode {
    /// Whether editing affordances are rendered.
    #[must_use]
    pub const fn is_author(self) -> bool {
        matches!(self, Self::Author)
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "display" => Ok(Self::Display),
            "author" => Ok(Self::Author),
            other => Err(format!("unknown render mode: {other}")),
        }
    }
}

/// Signature every block renderer satisfies.
pub type RenderFn = fn(&Props<'_>, &BlockContext<'_>) -> Node;

/// Per-render context handed to a block.
#[derive(Debug, Clone, Copy)]
pub struct BlockContext<'a> {
    /// Display or author mode.
    pub mode: RenderMode,
    /// Whether timers and scroll effects may run (live preview).
    pub interactive: bool,
    editing: Option<&'a InlineEditor>,
}

impl<'a> BlockContext<'a> {
    /// Context for the given mode; interactive in display mode only.
    #[must_use]
    pub const fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            interactive: !mode.is_author(),
            editing: None,
        }
    }

    /// Override the interactive flag.
    #[must_use]
    pub const fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Attach the in-place editor whose field is currently open.
    #[must_use]
    pub const fn with_editor(mut self, editor: Option<&'a InlineEditor>) -> Self {
        self.editing = editor;
        self
    }

    /// Whether the block is being rendered for an author.
    #[must_use]
    pub const fn is_author(&self) -> bool {
        self.mode.is_author()
    }

    /// A single-line editable text field.
    #[must_use]
    pub fn text(&self, tag: &'static str, field: &str, value: &str) -> Node {
        self.field(tag, field, value, FieldKind::Text)
    }

    /// A multi-line editable text field.
    #[must_use]
    pub fn multiline(&self, tag: &'static str, field: &str, value: &str) -> Node {
        self.field(tag, field, value, FieldKind::MultiLine)
    }

    /// An editable numeric field.
    #[must_use]
    pub fn number(&self, tag: &'static str, field: &str, value: f64) -> Node {
        self.field(tag, field, &format_number(value), FieldKind::Number)
    }

    /// A single-line field on one item of an array prop (`features.2.title`).
    #[must_use]
    pub fn item_text(
        &self,
        tag: &'static str,
        list: &str,
        index: usize,
        key: &str,
        value: &str,
    ) -> Node {
        self.text(tag, &format!("{list}.{index}.{key}"), value)
    }

    /// A multi-line field on one item of an array prop.
    #[must_use]
    pub fn item_multiline(
        &self,
        tag: &'static str,
        list: &str,
        index: usize,
        key: &str,
        value: &str,
    ) -> Node {
        self.multiline(tag, &format!("{list}.{index}.{key}"), value)
    }

    fn field(&self, tag: &'static str, field: &str, value: &str, kind: FieldKind) -> Node {
        if !self.is_author() {
            return Node::el(tag).with_text(value);
        }
        let open = self.editing.filter(|editor| editor.field() == field);
        inline::author_node(tag, field, value, kind, open)
    }
}

/// Every built-in definition, in picker order.
#[must_use]
pub fn builtin_definitions() -> Vec<ComponentDefinition> {
    vec![
        navbar::definition(),
        hero::definition(),
        features::definition(),
        pricing::definition(),
        testimonials::definition(),
        faq::definition(),
        product_grid::definition(),
        carousel::definition(),
        parallax::definition(),
        cta::definition(),
        stats::definition(),
        team::definition(),
        gallery::definition(),
        newsletter::definition(),
        text::definition(),
        html::definition(),
        spacer::definition(),
        footer::definition(),
    ]
}

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

/// Outer `<section>` of a block.
fn section(component_type: &str) -> Node {
    Node::el("section").class(format!("pf-block pf-{component_type}"))
}

/// Optional section header (title + subtitle).
fn header(cx: &BlockContext<'_>, props: &Props<'_>, title: &str, subtitle: &str) -> Node {
    let mut node = Node::el("header").class("pf-header");
    let title = props.text("title", title);
    if !title.is_empty() {
        node = node.child(cx.text("h2", "title", &title));
    }
    let subtitle = props.text("subtitle", subtitle);
    if !subtitle.is_empty() {
        node = node.child(cx.multiline("p", "subtitle", &subtitle));
    }
    node
}

/// A link styled as a button.
fn button(cx: &BlockContext<'_>, field: &str, label: &str, href: &str, variant: &str) -> Node {
    Node::el("a")
        .class(format!("pf-button pf-button-{variant}"))
        .attr("href", if href.is_empty() { "#" } else { href })
        .child(cx.text("span", field, label))
}

/// An image, or nothing when `src` is empty.
fn image(src: &str, alt: &str) -> Option<Node> {
    (!src.is_empty()).then(|| {
        Node::el("img")
            .attr("src", src)
            .attr("alt", alt)
            .attr("loading", "lazy")
    })
}

/// Grid column count clamped to something a layout can use.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn columns(props: &Props<'_>, default: f64) -> u32 {
    props.number("columns", default).clamp(1.0, 6.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::{to_html, TrustPolicy};
    use crate::registry::registry;
    use crate::value::prop_map;
    use serde_json::json;

    fn render(component_type: &str, props: serde_json::Value, mode: RenderMode) -> Node {
        let def = registry().lookup(component_type).expect("builtin");
        def.render(&prop_map(props), &BlockContext::new(mode))
    }

    #[test]
    fn test_display_mode_has_no_affordances() {
        let node = render("hero", json!({"title": "Welcome"}), RenderMode::Display);
        let html = to_html(&node, TrustPolicy::Untrusted);
        assert!(html.contains("Welcome"));
        assert!(!html.contains("data-pf-field"));
    }

    #[test]
    fn test_author_mode_marks_editable_fields() {
        let node = render("hero", json!({"title": "Welcome"}), RenderMode::Author);
        let fields = node.find_by_attr("data-pf-field", "title");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].text_content(), "Welcome");
    }

    #[test]
    fn test_item_fields_use_indexed_paths() {
        let node = render(
            "features",
            json!({"features": [{"title": "Fast"}, {"title": "Safe"}]}),
            RenderMode::Author,
        );
        let second = node.find_by_attr("data-pf-field", "features.1.title");
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].text_content(), "Safe");
    }

    #[test]
    fn test_context_interactive_defaults() {
        assert!(BlockContext::new(RenderMode::Display).interactive);
        assert!(!BlockContext::new(RenderMode::Author).interactive);
        assert!(BlockContext::new(RenderMode::Author).with_interactive(true).interactive);
    }

    #[test]
    fn test_render_mode_parse() {
        assert_eq!("AUTHOR".parse::<RenderMode>(), Ok(RenderMode::Author));
        assert!("print".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_wrong_shapes_fall_back() {
        let node = render(
            "pricing",
            json!({"plans": "not a list", "title": {"nested": true}}),
            RenderMode::Display,
        );
        assert!(node.text_content().contains("Pricing"));
    }
}
