//! Feature grid.

use serde_json::json;

use super::{columns, header, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("subtitle", "Subtitle"),
    FieldSchema::new("columns", "Columns", FieldType::Number),
    FieldSchema::new("features", "Features", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "features",
        label: "Features",
        icon: "grid",
        category: Category::Content,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Features",
        "subtitle": "Everything you need to launch and grow.",
        "columns": 3,
        "features": [
            {"icon": "zap", "title": "Fast", "description": "Pages load in the blink of an eye."},
            {"icon": "shield", "title": "Secure", "description": "Built with safety in mind from day one."},
            {"icon": "smile", "title": "Easy", "description": "No code required to get started."}
        ]
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let cards = props.items("features").enumerate().map(|(index, feature)| {
        let mut card = Node::el("article").class("pf-feature");
        if let Some(icon) = feature.opt_text("icon") {
            card = card.child(
                Node::el("span")
                    .class("pf-icon")
                    .attr("data-icon", icon)
                    .attr("aria-hidden", "true"),
            );
        }
        let title = feature.text("title", "Feature");
        card.child(cx.item_text("h3", "features", index, "title", &title))
            .child(cx.item_multiline(
                "p",
                "features",
                index,
                "description",
                &feature.text("description", ""),
            ))
    });

    section("features")
        .attr("id", "features")
        .child(header(cx, props, "Features", ""))
        .child(
            Node::el("div")
                .class("pf-grid")
                .attr("data-columns", columns(props, 3.0).to_string())
                .children(cards),
        )
}
