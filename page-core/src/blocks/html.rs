//! Raw HTML embed.
//!
//! The body is emitted as [`Node::Raw`], so whether it reaches the page
//! unescaped is decided by the renderer's trust policy.

use serde_json::json;

use super::{section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[FieldSchema::textarea("html", "HTML")];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "html",
        label: "Custom HTML",
        icon: "code",
        category: Category::Content,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "html": "<p>Custom HTML content</p>"
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let html = props.text("html", "<p>Custom HTML content</p>");
    let root = section("html");
    if cx.is_author() {
        // Edited as source text in the properties panel, not inline.
        return root.child(
            Node::el("div")
                .class("pf-html-preview")
                .attr("data-pf-source", "html")
                .child(Node::Raw(html.into_owned())),
        );
    }
    root.child(Node::Raw(html.into_owned()))
}
