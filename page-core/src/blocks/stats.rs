//! Key figures row.

use serde_json::json;

use super::{columns, header, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::new("columns", "Columns", FieldType::Number),
    FieldSchema::new("stats", "Stats", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "stats",
        label: "Stats",
        icon: "bar-chart",
        category: Category::Marketing,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "",
        "columns": 4,
        "stats": [
            {"value": "10k+", "label": "Customers"},
            {"value": "99.9%", "label": "Uptime"},
            {"value": "24/7", "label": "Support"},
            {"value": "150", "label": "Countries"}
        ]
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let items = props.items("stats").enumerate().map(|(index, stat)| {
        Node::el("div")
            .class("pf-stat")
            .child(cx.item_text("strong", "stats", index, "value", &stat.text("value", "0")))
            .child(cx.item_text("span", "stats", index, "label", &stat.text("label", "")))
    });
    section("stats")
        .child(header(cx, props, "", ""))
        .child(
            Node::el("div")
                .class("pf-grid")
                .attr("data-columns", columns(props, 4.0).to_string())
                .children(items),
        )
}
