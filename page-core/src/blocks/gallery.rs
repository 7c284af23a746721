//! Image gallery.

use serde_json::json;

use super::{columns, header, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema, FieldType};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::new("columns", "Columns", FieldType::Number),
    FieldSchema::new("gap", "Gap (px)", FieldType::Number),
    FieldSchema::new("images", "Images", FieldType::Array),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "gallery",
        label: "Gallery",
        icon: "images",
        category: Category::Content,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Gallery",
        "columns": 3,
        "gap": 16,
        "images": [
            {"src": "", "alt": "First image", "caption": "Our studio"},
            {"src": "", "alt": "Second image", "caption": "The team at work"},
            {"src": "", "alt": "Third image", "caption": "Launch day"}
        ]
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let figures = props.items("images").enumerate().map(|(index, item)| {
        let alt = item.text("alt", "");
        let src = item.text("src", "");
        let media = if src.is_empty() {
            Node::el("div").class("pf-placeholder").attr("role", "img").attr("aria-label", alt)
        } else {
            Node::el("img").attr("src", src).attr("alt", alt).attr("loading", "lazy")
        };
        let mut figure = Node::el("figure").class("pf-gallery-item").child(media);
        if let Some(caption) = item.opt_text("caption") {
            figure = figure.child(cx.item_text("figcaption", "images", index, "caption", &caption));
        }
        figure
    });

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let gap = props.number("gap", 16.0).clamp(0.0, 200.0) as u32;
    section("gallery")
        .child(header(cx, props, "Gallery", ""))
        .child(
            Node::el("div")
                .class("pf-grid")
                .attr("data-columns", columns(props, 3.0).to_string())
                .attr("style", format!("gap: {gap}px"))
                .children(figures),
        )
}
