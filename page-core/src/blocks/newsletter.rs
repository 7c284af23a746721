//! Newsletter signup.

use std::borrow::Cow;

use serde_json::json;

use super::{section, BlockContext};
use crate::markup::Node;
use crate::registry::{Category, ComponentDefinition, FieldSchema};
use crate::value::{prop_map, PropMap, Props};

const SCHEMA: &[FieldSchema] = &[
    FieldSchema::text("title", "Title"),
    FieldSchema::textarea("description", "Description"),
    FieldSchema::text("placeholder", "Placeholder"),
    FieldSchema::text("buttonText", "Button Text"),
    FieldSchema::text("action", "Form Action URL"),
];

pub(super) fn definition() -> ComponentDefinition {
    ComponentDefinition {
        component_type: "newsletter",
        label: "Newsletter",
        icon: "mail",
        category: Category::Marketing,
        schema: SCHEMA,
        defaults,
        render,
    }
}

fn defaults() -> PropMap {
    prop_map(json!({
        "title": "Stay in the loop",
        "description": "Get product updates straight to your inbox.",
        "placeholder": "you@example.com",
        "buttonText": "Subscribe",
        "action": "#"
    }))
}

fn render(props: &Props<'_>, cx: &BlockContext<'_>) -> Node {
    let title = props.text("title", "Stay in the loop");
    let mut root = section("newsletter").child(cx.text("h2", "title", &title));
    if let Some(description) = props.opt_text("description") {
        root = root.child(cx.multiline("p", "description", &description));
    }
    // Submitting is never live while authoring.
    let action = if cx.is_author() { Cow::Borrowed("#") } else { props.text("action", "#") };
    root.child(
        Node::el("form")
            .class("pf-newsletter-form")
            .attr("method", "post")
            .attr("action", action)
            .child(
                Node::el("input")
                    .attr("type", "email")
                    .attr("name", "email")
                    .attr("required", "")
                    .attr("placeholder", props.text("placeholder", "you@example.com")),
            )
            .child(
                Node::el("button")
                    .attr("type", "submit")
                    .child(cx.text("span", "buttonText", &props.text("buttonText", "Subscribe"))),
            ),
    )
}
