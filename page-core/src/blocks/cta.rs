//! Call-to-action banner.

use serde_json::json;

use super::{button, section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("description", "Description"),
    FieldSchema::text("buttonText", "Button Text"),
    FieldSchema::text("buttonLink", "Button Link"),
    FieldSchema::select("variant", "Variant", &["primary", "secondary", "outline"]),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "cta",
        label: "Call to Action",
        icon: "megaphone",
        category: Category::Marketing,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Ready to get started?",
        "description": "Join thousands of teams building with us.",
        "buttonText": "Start now",
        "buttonLink": "#",
        "variant": "primary"
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let title = props.text("title", "Ready to get started?");
    let mut root = section("cta").child(cx.text("h2", "title", &title));
    if let Some(description) = props.opt_text("description") {
        root = root.child(cx.multiline("p", "description", &description));
    }
    let label = props.text("buttonText", "Start now");
    if !label.is_empty() {
        root = root.child(button(
            cx,
            "buttonText",
            &label,
            &props.text("buttonLink", "#"),
            &props.text("variant", "primary"),
        ));
    }
    root
}
