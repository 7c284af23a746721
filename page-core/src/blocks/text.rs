//! Rich text section (plain paragraphs).

use serde_json::json;

use super::{section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("heading", "Heading"),
    FieldSchema::textarea("content", "Content"),
    FieldSchema::select("alignment", "Alignment", &["left", "center", "right", "justify"]),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "text",
        label: "Text Block",
        icon: "type",
        category: Category::Content,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "heading": "About us",
        "content": "Tell your visitors who you are and what you do.\n\nSeparate paragraphs with a blank line.",
        "alignment": "left"
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let mut root = section("text").attr("data-align", props.text("alignment", "left"));
    if let Some(heading) = props.opt_text("heading") {
        root = root.child(cx.text("h2", "heading", &heading));
    }
    let content = props.text("content", "");
    if cx.is_author() {
        // The whole body is one editable field.
        return root.child(cx.multiline("div", "content", &content));
    }
    let paragraphs = content
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| Node::el("p").with_text(p));
    root.child(Node::el("div").class("pf-text-body").children(paragraphs))
}
