//! Vertical whitespace, optionally with a divider.

use serde_json::json;

use super::BlockContext;
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{format_number, prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::new("height", "Height (px)", FieldType::Number),
    FieldSchema::new("showDivider", "Show Divider", FieldType::Boolean),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "spacer",
        label: "Spacer",
        icon: "minus",
        category: Category::Layout,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({"height": 64, "showDivider": false}))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let height = props.number("height", 64.0).max(0.0);
    let mut node = Node::el("div")
        .class("pf-block pf-spacer")
        .attr("aria-hidden", "true")
        .attr("style", format!("height: {}px", format_number(height)));
    if props.flag("showDivider", false) {
        node = node.child(Node::el("hr"));
    }
    if cx.is_author() {
        node = node.child(cx.number("span", "height", height));
    }
    node
}
